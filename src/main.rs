use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use scribe::app::{handler::HandlerContext, r#loop::run_loop, state::AppState};
use scribe::infrastructure::{
    buffer::SharedBuffer, ollama::OllamaGateway, settings::SettingsStore,
};

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// File logging under the config dir; the TUI owns stdout. The guard must
/// outlive the app or buffered lines are lost.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = home::home_dir()?.join(".config").join("scribe");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "scribe.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scribe=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();
    let _log_guard = init_logging();

    // Settings load happens BEFORE terminal setup so a corrupt config
    // never leaves the terminal in raw mode.
    let store = SettingsStore::from_home();
    let settings = store.as_ref().map(|s| s.load()).unwrap_or_default();

    let gateway = Arc::new(OllamaGateway::new(settings.server_url.clone()));
    let buffer = SharedBuffer::new();
    let app_state = AppState::new(settings, buffer.clone());
    let ctx = HandlerContext {
        editor: buffer,
        gateway,
        store,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, ctx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}
