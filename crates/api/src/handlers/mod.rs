//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `sitelog_db` (or the logger in
//! `sitelog_events`) and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod categories;
pub mod events;
pub mod hooks;
pub mod maintenance;
