//! Role names used for authorization.
//!
//! Every administrative endpoint requires [`ROLE_ADMIN`]. Other roles may
//! hold valid tokens (and fetch anti-forgery tokens) but cannot reach the
//! activity log.

/// Full administrative access, including all activity log endpoints.
pub const ROLE_ADMIN: &str = "admin";

/// Read-only dashboard access; no activity log endpoints.
pub const ROLE_VIEWER: &str = "viewer";
