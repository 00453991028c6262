//! Flowboard — Kanban board service with chat and priority advisor.
//!
//! Listens on a Unix socket for frontend connections and processes board
//! commands sequentially. Configuration via CLI flags, environment
//! variables, or config file (`~/.config/flowboard/config.toml`).
//!
//! ```bash
//! # Demo board on the default socket
//! cargo run --bin flowboard
//!
//! # Empty board, custom socket, with an advisor
//! cargo run --bin flowboard -- --no-demo-data \
//!     --socket /tmp/board.sock --advisor-socket /tmp/advisor.sock
//! ```

use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use flowboard::advisor::{SocketAdvisor, SuggestionSession};
use flowboard::app::BoardApp;
use flowboard::config::{AppConfig, CliArgs};
use flowboard::service::{BoardService, ServiceError};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("flowboard starting");

    let app = if config.demo_data {
        BoardApp::with_demo_data()
    } else {
        BoardApp::new()
    };

    let advisor = config.advisor_socket.clone().map(SocketAdvisor::new);
    match &advisor {
        Some(a) => tracing::info!(path = %a.socket_path().display(), "advisor configured"),
        None => tracing::info!("no advisor configured, suggestions unavailable"),
    }
    let session = SuggestionSession::with_timeout(advisor, config.advisor_timeout);

    let service = BoardService::bind(&config.socket_path, app, session, config.chat_user.clone())?;
    service.run().await
}

/// Initialize logging.
///
/// With `--log-file`, logs go to the file through a non-blocking writer and
/// the returned [`WorkerGuard`] must be held until shutdown so buffered
/// entries are flushed. Without it, logs go to stdout.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some(log_path) = file_path else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
