//! In-process lifecycle event bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! [`EventBus`] is the hub the host integration layer publishes
//! [`LifecycleEvent`]s on. It is designed to be shared via `Arc<EventBus>`
//! across the application.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// A host lifecycle notification.
///
/// Producers (the hook ingestion endpoint, in-process integration glue)
/// publish these on the [`EventBus`]; the
/// [`ActivityRecorder`](crate::recorder::ActivityRecorder) consumes them and
/// writes activity events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// A plugin was switched on.
    PluginActivated { name: String },

    /// A plugin was switched off.
    PluginDeactivated { name: String },

    /// A plugin was removed from the installation.
    PluginDeleted { name: String },

    /// A plugin changed version.
    PluginUpdated {
        name: String,
        old_version: String,
        new_version: String,
    },

    /// The host platform itself changed version.
    CoreUpdated {
        old_version: String,
        new_version: String,
    },

    /// A global setting changed. Only monitored settings are recorded.
    SettingUpdated {
        key: String,
        old_value: String,
        new_value: String,
    },

    /// The permalink (routing) structure changed. An empty structure means
    /// plain links.
    PermalinkChanged {
        old_structure: String,
        new_structure: String,
    },
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for lifecycle notifications.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`LifecycleEvent`].
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no active subscribers the notification is silently
    /// dropped; recording is best-effort by contract.
    pub fn publish(&self, event: LifecycleEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all notifications published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
