//! Lifecycle event plumbing for the activity log.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub for host lifecycle
//!   notifications, backed by `tokio::sync::broadcast`.
//! - [`LifecycleEvent`] -- the typed notification envelope.
//! - [`EventLogger`] -- validates and normalizes event data and delegates
//!   persistence to the store; shared by the recorder and the REST API.
//! - [`ActivityRecorder`] -- maps lifecycle notifications to activity
//!   events, best-effort.

pub mod bus;
pub mod logger;
pub mod recorder;

pub use bus::{EventBus, LifecycleEvent};
pub use logger::{EventLogger, LogError, ManualEventInput};
pub use recorder::ActivityRecorder;
