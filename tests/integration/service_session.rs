//! Integration tests for the socket service: handshake, command dispatch,
//! and error events, exercised over a real Unix socket connection.
//!
//! Verification command: `cargo test --test service_session`

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::UnixStream;
use tokio::task::JoinHandle;

use flowboard::advisor::{SocketAdvisor, SuggestionSession};
use flowboard::app::BoardApp;
use flowboard::service::BoardService;
use flowboard::service::protocol::{
    ClientCommand, PROTOCOL_VERSION, ServerEvent, decode_line, encode_line,
};
use flowboard_model::task::{ColumnId, Priority, TaskDraft};

/// Monotonic counter to avoid socket path collisions across parallel tests.
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_socket_path(name: &str) -> PathBuf {
    let n = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "flowboard-integ-service-{name}-{}-{n}.sock",
        std::process::id()
    ))
}

/// A connected test frontend speaking the JSON-lines protocol.
struct TestClient {
    reader: BufReader<tokio::net::unix::OwnedReadHalf>,
    writer: BufWriter<tokio::net::unix::OwnedWriteHalf>,
}

impl TestClient {
    async fn connect(path: &PathBuf) -> Self {
        // The service binds before run() is spawned, so a short retry loop
        // only guards against scheduler lag.
        let mut attempts = 0;
        let stream = loop {
            match UnixStream::connect(path).await {
                Ok(s) => break s,
                Err(e) if attempts < 20 => {
                    attempts += 1;
                    let _ = e;
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
                Err(e) => panic!("connect to service: {e}"),
            }
        };
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        }
    }

    async fn send(&mut self, command: &ClientCommand) {
        let line = encode_line(command).expect("encode command");
        self.writer
            .write_all(line.as_bytes())
            .await
            .expect("write command");
        self.writer.flush().await.expect("flush command");
    }

    async fn recv(&mut self) -> ServerEvent {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await.expect("read event");
        assert!(n > 0, "service closed the connection");
        decode_line(&line).expect("decode event")
    }

    async fn round_trip(&mut self, command: &ClientCommand) -> ServerEvent {
        self.send(command).await;
        self.recv().await
    }
}

/// Starts a service (no advisor) on a fresh socket and returns a connected,
/// handshaken client plus the service task handle.
async fn start_service(name: &str, demo: bool) -> (TestClient, JoinHandle<()>) {
    let path = temp_socket_path(name);
    let app = if demo {
        BoardApp::with_demo_data()
    } else {
        BoardApp::new()
    };
    let service = BoardService::bind(
        &path,
        app,
        SuggestionSession::new(None::<SocketAdvisor>),
        "User".to_string(),
    )
    .expect("bind service");

    let handle = tokio::spawn(async move {
        let _ = service.run().await;
    });

    let mut client = TestClient::connect(&path).await;
    let welcome = client
        .round_trip(&ClientCommand::Hello {
            protocol_version: PROTOCOL_VERSION,
            client_name: "integ-test".to_string(),
        })
        .await;
    assert!(matches!(welcome, ServerEvent::Welcome { .. }));

    (client, handle)
}

#[tokio::test]
async fn welcome_carries_the_demo_snapshot() {
    let path = temp_socket_path("welcome");
    let service = BoardService::bind(
        &path,
        BoardApp::with_demo_data(),
        SuggestionSession::new(None::<SocketAdvisor>),
        "User".to_string(),
    )
    .expect("bind service");
    let handle = tokio::spawn(async move {
        let _ = service.run().await;
    });

    let mut client = TestClient::connect(&path).await;
    let welcome = client
        .round_trip(&ClientCommand::Hello {
            protocol_version: PROTOCOL_VERSION,
            client_name: "integ-test".to_string(),
        })
        .await;

    let ServerEvent::Welcome {
        protocol_version,
        columns,
        chat,
    } = welcome
    else {
        panic!("expected welcome");
    };
    assert_eq!(protocol_version, PROTOCOL_VERSION);
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].tasks.len(), 3);
    assert_eq!(chat.len(), 3);

    handle.abort();
}

#[tokio::test]
async fn wrong_protocol_version_is_refused() {
    let path = temp_socket_path("version");
    let service = BoardService::bind(
        &path,
        BoardApp::new(),
        SuggestionSession::new(None::<SocketAdvisor>),
        "User".to_string(),
    )
    .expect("bind service");
    let handle = tokio::spawn(async move {
        let _ = service.run().await;
    });

    let mut client = TestClient::connect(&path).await;
    let reply = client
        .round_trip(&ClientCommand::Hello {
            protocol_version: PROTOCOL_VERSION + 1,
            client_name: "integ-test".to_string(),
        })
        .await;
    assert!(matches!(
        reply,
        ServerEvent::Error { code, .. } if code == "unsupported_version"
    ));

    handle.abort();
}

#[tokio::test]
async fn create_move_and_fetch_over_the_socket() {
    let (mut client, handle) = start_service("flow", false).await;

    let created = client
        .round_trip(&ClientCommand::CreateTask {
            draft: TaskDraft::titled("Wire up CI"),
        })
        .await;
    let ServerEvent::TaskCreated { task } = created else {
        panic!("expected task_created, got {created:?}");
    };
    assert_eq!(task.status, ColumnId::Todo);
    assert_eq!(task.order, 0);

    let started = client
        .round_trip(&ClientCommand::DragStart { task_id: task.id })
        .await;
    assert_eq!(started, ServerEvent::DragStarted { task_id: task.id });

    let moved = client
        .round_trip(&ClientCommand::DragDrop {
            column: Some(ColumnId::InProgress),
        })
        .await;
    let ServerEvent::TaskMoved { task: moved_task } = moved else {
        panic!("expected task_moved, got {moved:?}");
    };
    assert_eq!(moved_task.status, ColumnId::InProgress);

    let board = client.round_trip(&ClientCommand::GetBoard).await;
    let ServerEvent::BoardState { columns } = board else {
        panic!("expected board_state");
    };
    assert!(columns[0].tasks.is_empty());
    assert_eq!(columns[1].tasks.len(), 1);
    assert_eq!(columns[1].tasks[0].title, "Wire up CI");

    handle.abort();
}

#[tokio::test]
async fn drop_outside_reports_drop_ignored() {
    let (mut client, handle) = start_service("drop-outside", true).await;

    let board = client.round_trip(&ClientCommand::GetBoard).await;
    let ServerEvent::BoardState { columns } = board else {
        panic!("expected board_state");
    };
    let task_id = columns[0].tasks[0].id;

    client
        .round_trip(&ClientCommand::DragStart { task_id })
        .await;
    let reply = client
        .round_trip(&ClientCommand::DragDrop { column: None })
        .await;
    assert_eq!(reply, ServerEvent::DropIgnored);

    handle.abort();
}

#[tokio::test]
async fn chat_round_trip_and_default_user() {
    let (mut client, handle) = start_service("chat", false).await;

    let posted = client
        .round_trip(&ClientCommand::SendChat {
            user: None,
            text: "deploy is out".to_string(),
        })
        .await;
    let ServerEvent::ChatPosted { message } = posted else {
        panic!("expected chat_posted");
    };
    assert_eq!(message.user, "User");
    assert_eq!(message.text, "deploy is out");

    let log = client.round_trip(&ClientCommand::GetChat).await;
    let ServerEvent::ChatLog { messages } = log else {
        panic!("expected chat_log");
    };
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, message.id);

    handle.abort();
}

#[tokio::test]
async fn validation_errors_become_error_events() {
    let (mut client, handle) = start_service("errors", false).await;

    let reply = client
        .round_trip(&ClientCommand::CreateTask {
            draft: TaskDraft::titled(""),
        })
        .await;
    assert!(matches!(
        reply,
        ServerEvent::Error { code, .. } if code == "empty_title"
    ));

    let ghost = flowboard_model::task::TaskId::new();
    let reply = client
        .round_trip(&ClientCommand::SetPriority {
            task_id: ghost,
            priority: Priority::High,
        })
        .await;
    assert!(matches!(
        reply,
        ServerEvent::Error { code, .. } if code == "task_not_found"
    ));

    // The session survives errors.
    let board = client.round_trip(&ClientCommand::GetBoard).await;
    assert!(matches!(board, ServerEvent::BoardState { .. }));

    handle.abort();
}

#[tokio::test]
async fn suggest_without_advisor_reports_unavailable() {
    let (mut client, handle) = start_service("no-advisor", false).await;

    let created = client
        .round_trip(&ClientCommand::CreateTask {
            draft: TaskDraft {
                title: "Needs advice".to_string(),
                deadline: chrono::NaiveDate::from_ymd_opt(2024, 9, 1),
                ..TaskDraft::default()
            },
        })
        .await;
    let ServerEvent::TaskCreated { task } = created else {
        panic!("expected task_created");
    };

    let reply = client
        .round_trip(&ClientCommand::SuggestPriority { task_id: task.id })
        .await;
    assert!(matches!(
        reply,
        ServerEvent::Error { code, .. } if code == "advisor_unavailable"
    ));

    handle.abort();
}

#[tokio::test]
async fn malformed_line_gets_invalid_command_and_session_survives() {
    let (mut client, handle) = start_service("garbage", false).await;

    client
        .writer
        .write_all(b"this is not json\n")
        .await
        .expect("write garbage");
    client.writer.flush().await.expect("flush garbage");

    let reply = client.recv().await;
    assert!(matches!(
        reply,
        ServerEvent::Error { code, .. } if code == "invalid_command"
    ));

    let board = client.round_trip(&ClientCommand::GetBoard).await;
    assert!(matches!(board, ServerEvent::BoardState { .. }));

    handle.abort();
}

#[tokio::test]
async fn goodbye_closes_and_a_new_frontend_can_connect() {
    let path = temp_socket_path("goodbye");
    let service = BoardService::bind(
        &path,
        BoardApp::new(),
        SuggestionSession::new(None::<SocketAdvisor>),
        "User".to_string(),
    )
    .expect("bind service");
    let handle = tokio::spawn(async move {
        let _ = service.run().await;
    });

    let mut first = TestClient::connect(&path).await;
    first
        .round_trip(&ClientCommand::Hello {
            protocol_version: PROTOCOL_VERSION,
            client_name: "first".to_string(),
        })
        .await;
    first
        .round_trip(&ClientCommand::CreateTask {
            draft: TaskDraft::titled("Survives reconnect"),
        })
        .await;
    first.send(&ClientCommand::Goodbye).await;

    // Board state persists across frontend sessions.
    let mut second = TestClient::connect(&path).await;
    let welcome = second
        .round_trip(&ClientCommand::Hello {
            protocol_version: PROTOCOL_VERSION,
            client_name: "second".to_string(),
        })
        .await;
    let ServerEvent::Welcome { columns, .. } = welcome else {
        panic!("expected welcome");
    };
    assert_eq!(columns[0].tasks.len(), 1);
    assert_eq!(columns[0].tasks[0].title, "Survives reconnect");

    handle.abort();
}
