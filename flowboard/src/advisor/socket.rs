//! Unix-socket advisor client.
//!
//! Talks to an out-of-process advisor over a Unix domain socket using a
//! JSON lines exchange: one request line out, one response line back.
//! Each suggestion uses a fresh connection, so a crashed advisor shows up
//! as a connect error rather than a wedged stream.

use std::path::{Path, PathBuf};

use flowboard_model::advisor::{SuggestionRequest, SuggestionResponse};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::UnixStream;

use super::{Advisor, AdvisorError};

/// Advisor reached over a Unix domain socket.
#[derive(Debug, Clone)]
pub struct SocketAdvisor {
    socket_path: PathBuf,
}

impl SocketAdvisor {
    /// Creates a client for the advisor listening at `socket_path`.
    #[must_use]
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Path of the advisor socket.
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Advisor for SocketAdvisor {
    async fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, AdvisorError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (read_half, write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut writer = BufWriter::new(write_half);

        let mut line = serde_json::to_string(&request)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;

        let mut reply = String::new();
        let bytes_read = reader.read_line(&mut reply).await?;
        if bytes_read == 0 {
            return Err(AdvisorError::Unavailable(
                "advisor closed the connection without replying".to_string(),
            ));
        }
        Ok(serde_json::from_str(reply.trim())?)
    }
}
