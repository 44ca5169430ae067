use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::handler::HandlerContext;
use crate::app::state::AppState;
use crate::domain::gateway::{ByteStream, GatewayError, MockModelGateway};
use crate::domain::models::{ModelInfo, PromptCommand, Settings};
use crate::infrastructure::buffer::SharedBuffer;
use bytes::Bytes;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn frame_bytes(response: &str) -> Bytes {
    Bytes::from(format!(
        "{{\"response\":{}}}\n",
        serde_json::to_string(response).unwrap()
    ))
}

fn stream_of(frames: Vec<&str>) -> ByteStream {
    futures::stream::iter(
        frames
            .into_iter()
            .map(|f| Ok(frame_bytes(f)))
            .collect::<Vec<anyhow::Result<Bytes>>>(),
    )
    .boxed()
}

fn test_command() -> PromptCommand {
    PromptCommand {
        name: "Summarize selection".to_string(),
        prompt: "Summarize:".to_string(),
        model: None,
        temperature: None,
    }
}

fn ctx_with(editor: SharedBuffer, gateway: MockModelGateway) -> HandlerContext {
    HandlerContext {
        editor,
        gateway: Arc::new(gateway),
        store: None,
    }
}

#[tokio::test]
async fn test_run_generation_streams_into_the_document() {
    let editor = SharedBuffer::from_text("hello world");
    editor.select_all();

    let mut gateway = MockModelGateway::new();
    gateway
        .expect_generate()
        .times(1)
        .returning(|_| Ok(stream_of(vec!["Hi", "!"])));

    let ctx = ctx_with(editor.clone(), gateway);
    let (tx, mut rx) = mpsc::channel(4);

    handle_command(
        Command::RunGeneration {
            command: test_command(),
            default_model: "llama3.2".to_string(),
        },
        &ctx,
        tx,
    )
    .unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        Action::GenerationStarted("Summarize selection".to_string())
    );
    let action = rx.recv().await.unwrap();
    match action {
        Action::GenerationCompleted { command, chars } => {
            assert_eq!(command, "Summarize selection");
            assert_eq!(chars, 3);
        }
        other => panic!("expected GenerationCompleted, got {other:?}"),
    }
    assert_eq!(editor.text(), "👤 hello world\n\n🤖 Hi!");
}

#[tokio::test]
async fn test_empty_selection_error_reaches_the_state() {
    // No selection in the buffer: the engine fails before any I/O.
    let editor = SharedBuffer::from_text("hello");
    let gateway = MockModelGateway::new();
    let ctx = ctx_with(editor, gateway);
    let (tx, mut rx) = mpsc::channel(4);
    let mut state = AppState::default();

    handle_command(
        Command::RunGeneration {
            command: test_command(),
            default_model: "llama3.2".to_string(),
        },
        &ctx,
        tx,
    )
    .unwrap();

    // 1. First action: the task registers as active.
    let action1 = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, action1);
    assert!(state.is_busy());

    // 2. Second action: the failure lands in the error state.
    let action2 = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, action2);
    assert!(!state.is_busy());
    assert!(state
        .last_error
        .as_ref()
        .unwrap()
        .message
        .contains("select some text first"));
}

#[tokio::test]
async fn test_server_error_keeps_markup_and_surfaces_failure() {
    let editor = SharedBuffer::from_text("hello");
    editor.select_all();

    let mut gateway = MockModelGateway::new();
    gateway
        .expect_generate()
        .times(1)
        .returning(|_| Err(GatewayError::Http { status: 500 }));

    let ctx = ctx_with(editor.clone(), gateway);
    let (tx, mut rx) = mpsc::channel(4);

    handle_command(
        Command::RunGeneration {
            command: test_command(),
            default_model: "llama3.2".to_string(),
        },
        &ctx,
        tx,
    )
    .unwrap();

    let _started = rx.recv().await.unwrap();
    let failed = rx.recv().await.unwrap();
    match failed {
        Action::GenerationFailed { message, .. } => {
            assert!(message.contains("500"), "got: {message}");
        }
        other => panic!("expected GenerationFailed, got {other:?}"),
    }
    assert_eq!(editor.text(), "👤 hello\n\n🤖 ");
}

#[tokio::test]
async fn test_load_models_round_trip() {
    let mut gateway = MockModelGateway::new();
    gateway.expect_list_models().times(1).returning(|| {
        Ok(vec![ModelInfo {
            name: "llama3.2".to_string(),
        }])
    });

    let ctx = ctx_with(SharedBuffer::new(), gateway);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::LoadModels, &ctx, tx).unwrap();

    match rx.recv().await.unwrap() {
        Action::ModelsLoaded(models) => assert_eq!(models[0].name, "llama3.2"),
        other => panic!("expected ModelsLoaded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let mut gateway = MockModelGateway::new();
    // Any number of calls, all succeeding, so random navigation can fire
    // whatever it likes.
    gateway
        .expect_generate()
        .returning(|_| Ok(stream_of(vec!["ok"])));
    gateway.expect_list_models().returning(|| Ok(vec![]));
    gateway.expect_pull_model().returning(|_| Ok(()));
    gateway.expect_set_server_url().returning(|_| ());

    let ctx = ctx_with(SharedBuffer::new(), gateway);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let app_state = AppState::new(Settings::default(), ctx.editor.clone());

    let (event_tx, event_rx) = mpsc::channel(100);

    // Feed random events, then bail out cleanly.
    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..3000 {
            if event_tx.send(Ok(generate_random_key(&mut rng))).await.is_err() {
                break;
            }
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Esc twice to leave any modal, then quit.
        for _ in 0..2 {
            let _ = event_tx
                .send(Ok(Event::Key(KeyEvent::new(
                    KeyCode::Esc,
                    KeyModifiers::NONE,
                ))))
                .await;
        }
        let _ = event_tx
            .send(Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
            ))))
            .await;
    });

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, app_state, ctx, event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::Tab,
        9 => KeyCode::Backspace,
        10 => KeyCode::Delete,
        11 => KeyCode::F(1),
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}
