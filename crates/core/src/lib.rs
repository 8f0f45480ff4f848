//! Domain vocabulary and pure logic for the activity log.
//!
//! This crate has no database or HTTP dependencies so it can be used by the
//! repository layer, the lifecycle recorder, and any future CLI tooling.

pub mod activity;
pub mod error;
pub mod roles;
pub mod sanitize;
pub mod types;
