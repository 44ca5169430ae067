use crate::domain::models::{GenerateRequest, ModelInfo};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use thiserror::Error;

/// Raw body chunks as they arrive off the wire. Chunk boundaries carry no
/// meaning; a JSON line may span several chunks.
pub type ByteStream = BoxStream<'static, anyhow::Result<Bytes>>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// The server refused the request with an error body (e.g. an unknown
    /// model name on pull).
    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Seam between the engine/UI and the completion server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Opens the streaming generation. Fails with `Http` on any non-2xx
    /// status, before a single chunk is read.
    async fn generate(&self, request: GenerateRequest) -> Result<ByteStream, GatewayError>;

    /// Models the server has available (`GET /api/tags`).
    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError>;

    /// Kicks off a model download (`POST /api/pull`). Returns once the
    /// server accepts the pull; the download continues server-side.
    async fn pull_model(&self, name: &str) -> Result<(), GatewayError>;

    /// Re-points the gateway after the user edits the server URL.
    fn set_server_url(&self, url: &str);
}
