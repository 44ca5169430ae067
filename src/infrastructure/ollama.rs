use crate::domain::gateway::{ByteStream, GatewayError, ModelGateway};
use crate::domain::models::{GenerateRequest, ModelInfo};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Deserialize;
use std::sync::{PoisonError, RwLock};

/// HTTP gateway to an Ollama-compatible server.
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: RwLock<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: RwLock::new(normalize_url(&base_url.into())),
        }
    }

    fn url(&self, path: &str) -> String {
        let base = self
            .base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        format!("{base}{path}")
    }

    fn transport(err: reqwest::Error) -> GatewayError {
        GatewayError::Transport(err.to_string())
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<ByteStream, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(Self::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
            });
        }

        Ok(Box::pin(
            response.bytes_stream().map_err(anyhow::Error::from),
        ))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(Self::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
            });
        }

        let tags: TagsResponse = response.json().await.map_err(Self::transport)?;
        Ok(tags.models)
    }

    async fn pull_model(&self, name: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/api/pull"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .map_err(Self::transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        // The server explains pull failures in the body ("model not
        // found" etc); prefer that message over the bare status.
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(GatewayError::Rejected(body.error)),
            Err(_) => Err(GatewayError::Http {
                status: status.as_u16(),
            }),
        }
    }

    fn set_server_url(&self, url: &str) {
        let mut base = self
            .base_url
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *base = normalize_url(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_the_base_url() {
        let gateway = OllamaGateway::new("http://localhost:11434/");
        assert_eq!(
            gateway.url("/api/generate"),
            "http://localhost:11434/api/generate"
        );

        gateway.set_server_url(" http://10.0.0.5:11434// ");
        assert_eq!(gateway.url("/api/tags"), "http://10.0.0.5:11434/api/tags");
    }
}
