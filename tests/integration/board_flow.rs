//! Integration tests for the board engine: task creation, drag moves,
//! column projection, and the chat log, driven through `BoardApp`.
//!
//! Verification command: `cargo test --test board_flow`

use flowboard::app::BoardApp;
use flowboard::board::{BoardError, DragState};
use flowboard::chat::ChatError;
use flowboard_model::task::{ColumnId, Priority, TaskDraft};

fn titles(app: &BoardApp, column: ColumnId) -> Vec<String> {
    app.columns()
        .into_iter()
        .find(|c| c.id == column)
        .expect("column present")
        .tasks
        .into_iter()
        .map(|t| t.title)
        .collect()
}

#[test]
fn demo_board_has_expected_shape() {
    let app = BoardApp::with_demo_data();
    let columns = app.columns();

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].id, ColumnId::Todo);
    assert_eq!(columns[1].id, ColumnId::InProgress);
    assert_eq!(columns[2].id, ColumnId::Done);

    assert_eq!(
        titles(&app, ColumnId::Todo),
        vec![
            "Setup project environment".to_string(),
            "Design UI mockups".to_string(),
            "User testing session".to_string(),
        ]
    );
    assert_eq!(
        titles(&app, ColumnId::InProgress),
        vec!["Develop login feature".to_string()]
    );
    assert_eq!(
        titles(&app, ColumnId::Done),
        vec!["Write API documentation".to_string()]
    );

    assert_eq!(app.chat_messages().len(), 3);
    assert_eq!(app.chat_messages()[0].user, "KanbanAI");
}

#[test]
fn created_task_lands_at_end_of_todo() {
    let mut app = BoardApp::with_demo_data();
    let task = app
        .create_task(TaskDraft::titled("Review release notes"))
        .expect("create");

    assert_eq!(task.status, ColumnId::Todo);
    assert_eq!(task.order, 3);
    assert_eq!(
        titles(&app, ColumnId::Todo).last().map(String::as_str),
        Some("Review release notes")
    );
}

#[test]
fn drag_to_another_column_appends_there() {
    let mut app = BoardApp::with_demo_data();
    let columns = app.columns();
    let first_todo = columns[0].tasks[0].clone();

    app.drag_start(first_todo.id).expect("drag start");
    assert_eq!(app.drag_state(), DragState::Dragging(first_todo.id));

    let moved = app
        .drag_drop(Some(ColumnId::Done))
        .expect("drop")
        .expect("a task moved");

    assert_eq!(moved.id, first_todo.id);
    assert_eq!(moved.status, ColumnId::Done);
    assert_eq!(moved.order, 1);
    assert_eq!(app.drag_state(), DragState::Idle);

    assert_eq!(
        titles(&app, ColumnId::Done),
        vec![
            "Write API documentation".to_string(),
            "Setup project environment".to_string(),
        ]
    );
    // Remaining todo tasks keep their orders untouched.
    assert_eq!(
        titles(&app, ColumnId::Todo),
        vec![
            "Design UI mockups".to_string(),
            "User testing session".to_string(),
        ]
    );
}

#[test]
fn drop_outside_any_column_is_a_no_op() {
    let mut app = BoardApp::with_demo_data();
    let before = app.columns();
    let task_id = before[0].tasks[0].id;

    app.drag_start(task_id).expect("drag start");
    let moved = app.drag_drop(None).expect("drop");

    assert!(moved.is_none());
    assert_eq!(app.drag_state(), DragState::Idle);
    assert_eq!(app.columns(), before);
}

#[test]
fn drop_without_drag_is_ignored() {
    let mut app = BoardApp::with_demo_data();
    let moved = app.drag_drop(Some(ColumnId::Done)).expect("drop");
    assert!(moved.is_none());
}

#[test]
fn drag_start_unknown_task_is_rejected() {
    let mut app = BoardApp::new();
    let ghost = flowboard_model::task::TaskId::new();
    assert_eq!(app.drag_start(ghost), Err(BoardError::NotFound(ghost)));
    assert_eq!(app.drag_state(), DragState::Idle);
}

#[test]
fn blank_title_is_rejected_without_mutation() {
    let mut app = BoardApp::with_demo_data();
    let before = app.columns();
    assert_eq!(
        app.create_task(TaskDraft::titled("   ")),
        Err(BoardError::EmptyTitle)
    );
    assert_eq!(app.columns(), before);
}

#[test]
fn set_priority_keeps_column_and_order() {
    let mut app = BoardApp::with_demo_data();
    let target = app.columns()[0].tasks[1].clone();

    let updated = app
        .set_priority(target.id, Priority::High)
        .expect("set priority");

    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.status, target.status);
    assert_eq!(updated.order, target.order);
}

#[test]
fn chat_messages_append_with_monotonic_timestamps() {
    let mut app = BoardApp::with_demo_data();
    let first = app.send_chat_message("Alice", "standup in five").expect("send");
    let second = app.send_chat_message("", "on my way").expect("send");

    assert_eq!(second.user, "User");
    assert!(second.timestamp_ms > first.timestamp_ms);
    assert_eq!(app.chat_messages().len(), 5);
    assert_eq!(app.chat_messages()[4].text, "on my way");
}

#[test]
fn empty_chat_text_is_rejected() {
    let mut app = BoardApp::new();
    assert_eq!(
        app.send_chat_message("Alice", "  \n "),
        Err(ChatError::EmptyText)
    );
    assert!(app.chat_messages().is_empty());
}
