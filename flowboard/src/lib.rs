//! Flowboard — Kanban board engine with team chat and priority advisor.

pub mod advisor;
pub mod app;
pub mod board;
pub mod chat;
pub mod config;
pub mod service;
