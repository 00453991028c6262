//! Unix socket listener and the sequential command loop.
//!
//! The service accepts one frontend at a time and processes its commands
//! strictly in order; there is exactly one logical thread of control over
//! the board state. The advisor call is the only suspending operation and
//! is awaited inline.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flowboard_model::task::TaskId;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{UnixListener, UnixStream};

use crate::advisor::{Advisor, AdvisorError, SuggestionSession};
use crate::app::BoardApp;
use crate::board::BoardError;
use crate::chat::ChatError;

use super::ServiceError;
use super::protocol::{
    ClientCommand, PROTOCOL_VERSION, ServerEvent, decode_line, encode_line,
};

/// The board service: socket, board state, and advisor session.
pub struct BoardService<A> {
    listener: UnixListener,
    socket_path: PathBuf,
    app: BoardApp,
    session: SuggestionSession<A>,
    /// Default chat sender name for frontends that do not supply one.
    chat_user: String,
}

impl<A: Advisor> BoardService<A> {
    /// Binds the service to a Unix socket at `socket_path`.
    ///
    /// - Removes a stale socket file if one already exists at the path.
    /// - Creates the parent directory (with mode 0o700) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Socket`] if directory creation, stale
    /// socket removal, or binding fails.
    pub fn bind(
        socket_path: &Path,
        app: BoardApp,
        session: SuggestionSession<A>,
        chat_user: String,
    ) -> Result<Self, ServiceError> {
        if let Some(parent) = socket_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let perms = std::fs::Permissions::from_mode(0o700);
                    std::fs::set_permissions(parent, perms)?;
                }
            }
        }

        if socket_path.exists() {
            std::fs::remove_file(socket_path)?;
        }

        let listener = UnixListener::bind(socket_path)?;
        tracing::info!(path = %socket_path.display(), "board service listening");

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
            app,
            session,
            chat_user,
        })
    }

    /// Path of the bound socket.
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Accepts frontends forever, one at a time.
    ///
    /// A failed connection is logged and the service keeps accepting.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Socket`] if the accept call itself fails.
    pub async fn run(mut self) -> Result<(), ServiceError> {
        loop {
            let (stream, _addr) = self.listener.accept().await?;
            tracing::info!("frontend connected");
            match self.serve_connection(stream).await {
                Ok(()) => tracing::info!("frontend disconnected"),
                Err(e) => tracing::warn!(error = %e, "frontend connection ended with error"),
            }
        }
    }

    /// Runs the handshake and command loop for one frontend.
    async fn serve_connection(&mut self, stream: UnixStream) -> Result<(), ServiceError> {
        let mut conn = FrontendConnection::new(stream);

        self.perform_handshake(&mut conn).await?;

        loop {
            let command = match conn.read_command().await {
                Ok(command) => command,
                Err(ServiceError::ConnectionClosed) => return Ok(()),
                Err(ServiceError::Json(e)) => {
                    // Malformed line: report and keep the session alive.
                    conn.write_event(&ServerEvent::Error {
                        code: "invalid_command".to_string(),
                        message: e.to_string(),
                    })
                    .await?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if matches!(command, ClientCommand::Goodbye) {
                conn.close().await;
                return Ok(());
            }

            let event = self.handle_command(command).await;
            conn.write_event(&event).await?;
        }
    }

    /// Reads the Hello, validates it, and replies with Welcome.
    async fn perform_handshake(
        &mut self,
        conn: &mut FrontendConnection,
    ) -> Result<(), ServiceError> {
        let first = conn.read_command().await?;
        let ClientCommand::Hello {
            protocol_version,
            client_name,
        } = first
        else {
            let event = ServerEvent::Error {
                code: "expected_hello".to_string(),
                message: "first command must be hello".to_string(),
            };
            conn.write_event(&event).await?;
            conn.close().await;
            return Err(ServiceError::Protocol(
                "first command was not hello".to_string(),
            ));
        };

        if protocol_version != PROTOCOL_VERSION {
            let event = ServerEvent::Error {
                code: "unsupported_version".to_string(),
                message: format!(
                    "unsupported protocol version {protocol_version}, expected {PROTOCOL_VERSION}"
                ),
            };
            conn.write_event(&event).await?;
            conn.close().await;
            return Err(ServiceError::Protocol(format!(
                "unsupported version: {protocol_version}"
            )));
        }

        tracing::info!(client = %client_name, "frontend handshake complete");
        conn.write_event(&ServerEvent::Welcome {
            protocol_version: PROTOCOL_VERSION,
            columns: self.app.columns(),
            chat: self.app.chat_messages().to_vec(),
        })
        .await
    }

    /// Dispatches one command; every outcome becomes exactly one event
    /// and errors never leave a partial mutation.
    async fn handle_command(&mut self, command: ClientCommand) -> ServerEvent {
        match command {
            ClientCommand::Hello { .. } => ServerEvent::Error {
                code: "unexpected_hello".to_string(),
                message: "handshake already completed".to_string(),
            },
            ClientCommand::CreateTask { draft } => match self.app.create_task(draft) {
                Ok(task) => ServerEvent::TaskCreated { task },
                Err(e) => board_error(&e),
            },
            ClientCommand::DragStart { task_id } => match self.app.drag_start(task_id) {
                Ok(()) => ServerEvent::DragStarted { task_id },
                Err(e) => board_error(&e),
            },
            ClientCommand::DragDrop { column } => match self.app.drag_drop(column) {
                Ok(Some(task)) => ServerEvent::TaskMoved { task },
                Ok(None) => ServerEvent::DropIgnored,
                Err(e) => board_error(&e),
            },
            ClientCommand::SetPriority { task_id, priority } => {
                match self.app.set_priority(task_id, priority) {
                    Ok(task) => ServerEvent::PriorityUpdated {
                        task_id: task.id,
                        priority: task.priority,
                    },
                    Err(e) => board_error(&e),
                }
            }
            ClientCommand::SendChat { user, text } => {
                let user = user.as_deref().unwrap_or(&self.chat_user);
                match self.app.send_chat_message(user, &text) {
                    Ok(message) => ServerEvent::ChatPosted { message },
                    Err(e) => chat_error(&e),
                }
            }
            ClientCommand::SuggestPriority { task_id } => {
                self.suggest_priority(task_id, chrono::Local::now().date_naive())
                    .await
            }
            ClientCommand::ConfirmSuggestion { task_id } => match self.session.confirm(task_id) {
                Ok(suggestion) => match self.app.set_priority(task_id, suggestion.priority) {
                    Ok(task) => ServerEvent::SuggestionApplied {
                        task_id: task.id,
                        priority: task.priority,
                    },
                    Err(e) => board_error(&e),
                },
                Err(e) => advisor_error(&e),
            },
            ClientCommand::RejectSuggestion { task_id } => match self.session.reject(task_id) {
                Ok(_discarded) => ServerEvent::SuggestionRejected { task_id },
                Err(e) => advisor_error(&e),
            },
            ClientCommand::GetBoard => ServerEvent::BoardState {
                columns: self.app.columns(),
            },
            ClientCommand::GetChat => ServerEvent::ChatLog {
                messages: self.app.chat_messages().to_vec(),
            },
            ClientCommand::Goodbye => ServerEvent::Error {
                code: "unexpected_goodbye".to_string(),
                message: "goodbye is handled by the connection loop".to_string(),
            },
        }
    }

    /// Runs one advisor request for `task_id`.
    async fn suggest_priority(&mut self, task_id: TaskId, today: NaiveDate) -> ServerEvent {
        let Some(task) = self.app.task(task_id).cloned() else {
            return board_error(&BoardError::NotFound(task_id));
        };
        match self.session.request(&task, today).await {
            Ok(suggestion) => ServerEvent::Suggestion {
                task_id,
                priority: suggestion.priority,
                raw: suggestion.raw,
            },
            Err(e) => advisor_error(&e),
        }
    }
}

impl<A> Drop for BoardService<A> {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ---------------------------------------------------------------------------
// Connection wrapper
// ---------------------------------------------------------------------------

/// A connected frontend with buffered JSON line I/O.
struct FrontendConnection {
    reader: BufReader<tokio::net::unix::OwnedReadHalf>,
    writer: BufWriter<tokio::net::unix::OwnedWriteHalf>,
}

impl FrontendConnection {
    fn new(stream: UnixStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        }
    }

    /// Reads the next command line.
    async fn read_command(&mut self) -> Result<ClientCommand, ServiceError> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Err(ServiceError::ConnectionClosed);
        }
        decode_line(&line)
    }

    /// Writes an event as a JSON line and flushes immediately.
    async fn write_event(&mut self, event: &ServerEvent) -> Result<(), ServiceError> {
        let line = encode_line(event)?;
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Flushes and shuts down the write half.
    async fn close(&mut self) {
        let _ = self.writer.flush().await;
        let _ = self.writer.shutdown().await;
    }
}

// ---------------------------------------------------------------------------
// Error -> event mapping
// ---------------------------------------------------------------------------

/// Maps a board error to an error event.
fn board_error(e: &BoardError) -> ServerEvent {
    let code = match e {
        BoardError::NotFound(_) => "task_not_found",
        BoardError::EmptyTitle => "empty_title",
        BoardError::TitleTooLong => "title_too_long",
    };
    error_event(code, e)
}

/// Maps a chat error to an error event.
fn chat_error(e: &ChatError) -> ServerEvent {
    let code = match e {
        ChatError::EmptyText => "empty_text",
        ChatError::TextTooLong => "text_too_long",
    };
    error_event(code, e)
}

/// Maps an advisor error to an error event.
fn advisor_error(e: &AdvisorError) -> ServerEvent {
    let code = match e {
        AdvisorError::MissingDeadline => "missing_deadline",
        AdvisorError::RequestPending(_) => "request_pending",
        AdvisorError::Timeout(_) => "advisor_timeout",
        AdvisorError::InvalidSuggestion(_) => "invalid_suggestion",
        AdvisorError::NothingPending(_) => "nothing_pending",
        AdvisorError::Unavailable(_) | AdvisorError::Io(_) | AdvisorError::Json(_) => {
            "advisor_unavailable"
        }
    };
    error_event(code, e)
}

fn error_event(code: &str, e: &dyn std::error::Error) -> ServerEvent {
    ServerEvent::Error {
        code: code.to_string(),
        message: e.to_string(),
    }
}
