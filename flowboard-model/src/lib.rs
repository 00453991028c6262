//! Shared domain and wire types for the `Flowboard` Kanban engine.

pub mod advisor;
pub mod chat;
pub mod column;
pub mod task;
