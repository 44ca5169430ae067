use crate::app::{action::Action, command::Command};
use crate::domain::gateway::ModelGateway;
use crate::engine;
use crate::infrastructure::buffer::SharedBuffer;
use crate::infrastructure::settings::SettingsStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Everything the async side needs; cloned into each spawned task.
#[derive(Clone)]
pub struct HandlerContext {
    pub editor: SharedBuffer,
    pub gateway: Arc<dyn ModelGateway>,
    /// Absent when no home directory could be resolved.
    pub store: Option<SettingsStore>,
}

pub fn handle_command(
    command: Command,
    ctx: &HandlerContext,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::RunGeneration {
            command,
            default_model,
        } => {
            let editor = ctx.editor.clone();
            let gateway = ctx.gateway.clone();
            tokio::spawn(async move {
                let name = command.name.clone();
                let _ = tx.send(Action::GenerationStarted(name.clone())).await;
                match engine::run_generation(&editor, gateway.as_ref(), &command, &default_model)
                    .await
                {
                    Ok(outcome) => {
                        let _ = tx
                            .send(Action::GenerationCompleted {
                                command: name,
                                chars: outcome.chars_inserted,
                            })
                            .await;
                    }
                    Err(err) => {
                        let _ = tx
                            .send(Action::GenerationFailed {
                                command: name,
                                message: err.to_string(),
                            })
                            .await;
                    }
                }
            });
        }
        Command::LoadModels => {
            let gateway = ctx.gateway.clone();
            tokio::spawn(async move {
                match gateway.list_models().await {
                    Ok(models) => {
                        let _ = tx.send(Action::ModelsLoaded(models)).await;
                    }
                    Err(err) => {
                        let _ = tx.send(Action::ModelsLoadFailed(err.to_string())).await;
                    }
                }
            });
        }
        Command::PullModel(name) => {
            let gateway = ctx.gateway.clone();
            tokio::spawn(async move {
                let result = match gateway.pull_model(&name).await {
                    Ok(()) => Ok(format!(
                        "Download of {name} accepted, this may take a while..."
                    )),
                    Err(err) => Err(format!("Failed to download {name}: {err}")),
                };
                let _ = tx.send(Action::OperationCompleted(result)).await;
            });
        }
        Command::PersistSettings(settings) => {
            persist(ctx, settings, tx, false);
        }
        Command::ApplyServerUrl(settings) => {
            persist(ctx, settings, tx, true);
        }
    }
    Ok(())
}

fn persist(
    ctx: &HandlerContext,
    settings: crate::domain::models::Settings,
    tx: mpsc::Sender<Action>,
    reload_models: bool,
) {
    ctx.gateway.set_server_url(&settings.server_url);
    let gateway = ctx.gateway.clone();
    let store = ctx.store.clone();
    tokio::spawn(async move {
        if let Some(store) = store {
            let saved =
                tokio::task::spawn_blocking(move || store.save(&settings)).await;
            match saved {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    let _ = tx
                        .send(Action::OperationCompleted(Err(format!(
                            "Could not save settings: {err}"
                        ))))
                        .await;
                    return;
                }
                Err(err) => {
                    let _ = tx
                        .send(Action::OperationCompleted(Err(format!(
                            "Could not save settings: {err}"
                        ))))
                        .await;
                    return;
                }
            }
        } else {
            tracing::warn!("no home directory, settings not persisted");
        }

        if reload_models {
            match gateway.list_models().await {
                Ok(models) => {
                    let _ = tx.send(Action::ModelsLoaded(models)).await;
                }
                Err(err) => {
                    let _ = tx.send(Action::ModelsLoadFailed(err.to_string())).await;
                }
            }
        }
    });
}
