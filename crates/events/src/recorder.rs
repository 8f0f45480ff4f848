//! Turns host lifecycle notifications into recorded activity events.
//!
//! The mapping from notification to event is a pure function
//! ([`map_lifecycle`]); [`ActivityRecorder`] applies it and writes through
//! the [`EventLogger`], swallowing failures. Audit logging must never fail
//! the host action that triggered it.

use tokio::sync::broadcast;

use sitelog_core::activity::{
    classify_update_importance, format_version_change_note, is_monitored_setting, Importance,
};

use crate::bus::LifecycleEvent;
use crate::logger::EventLogger;

// ---------------------------------------------------------------------------
// Lifecycle mapping
// ---------------------------------------------------------------------------

/// What the recorder writes for a given lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub event_name: &'static str,
    pub category: &'static str,
    pub importance: Importance,
    pub note: String,
}

/// Map a lifecycle notification to the activity event it should produce.
///
/// Returns `None` for notifications that are not recorded: setting changes
/// whose key is outside the monitored allow-list.
pub fn map_lifecycle(event: &LifecycleEvent) -> Option<EventDraft> {
    match event {
        LifecycleEvent::PluginActivated { name } => Some(EventDraft {
            event_name: "Plugin activated",
            category: "Activating plugin",
            importance: Importance::Medium,
            note: format!("Plugin \"{name}\" was activated."),
        }),

        LifecycleEvent::PluginDeactivated { name } => Some(EventDraft {
            event_name: "Plugin deactivated",
            category: "Deactivating plugin",
            importance: Importance::Medium,
            note: format!("Plugin \"{name}\" was deactivated."),
        }),

        LifecycleEvent::PluginDeleted { name } => Some(EventDraft {
            event_name: "Plugin deleted",
            category: "Deleting plugin",
            importance: Importance::High,
            note: format!("Plugin \"{name}\" was deleted."),
        }),

        LifecycleEvent::PluginUpdated {
            name,
            old_version,
            new_version,
        } => Some(EventDraft {
            event_name: "Plugin updated",
            category: "Plugin update",
            importance: classify_update_importance(old_version, new_version),
            note: format_version_change_note(old_version, new_version, name),
        }),

        LifecycleEvent::CoreUpdated {
            old_version,
            new_version,
        } => Some(EventDraft {
            event_name: "WP core update",
            category: "WP core update",
            importance: classify_update_importance(old_version, new_version),
            note: format_version_change_note(old_version, new_version, "WordPress core"),
        }),

        LifecycleEvent::SettingUpdated {
            key,
            old_value,
            new_value,
        } => {
            if !is_monitored_setting(key) {
                return None;
            }
            Some(EventDraft {
                event_name: "Setting updated",
                category: "Site settings",
                importance: Importance::Medium,
                note: format!("Setting \"{key}\" was changed. From \"{old_value}\" to \"{new_value}\""),
            })
        }

        LifecycleEvent::PermalinkChanged {
            old_structure,
            new_structure,
        } => Some(EventDraft {
            event_name: "Permalink structure changed",
            category: "Site settings",
            importance: Importance::High,
            note: format!(
                "Permalink structure was changed from \"{}\" to \"{}\".",
                display_structure(old_structure),
                display_structure(new_structure),
            ),
        }),
    }
}

/// An empty permalink structure means plain links.
fn display_structure(structure: &str) -> &str {
    if structure.is_empty() {
        "Plain"
    } else {
        structure
    }
}

// ---------------------------------------------------------------------------
// ActivityRecorder
// ---------------------------------------------------------------------------

/// Consumes lifecycle notifications and records activity events best-effort.
///
/// Runs either as a long-lived background task via [`run`](Self::run) or
/// inline via [`record`](Self::record) (the hook ingestion path, which keeps
/// recording synchronous with its trigger).
pub struct ActivityRecorder {
    logger: EventLogger,
}

impl ActivityRecorder {
    pub fn new(logger: EventLogger) -> Self {
        Self { logger }
    }

    /// Consume the bus until it closes.
    ///
    /// The loop exits when the channel is closed, i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<LifecycleEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.record(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Recorder lagged, some lifecycle events were not recorded");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, recorder shutting down");
                    break;
                }
            }
        }
    }

    /// Record a single lifecycle notification.
    ///
    /// Failures are logged and swallowed, never returned.
    pub async fn record(&self, event: &LifecycleEvent) {
        let Some(draft) = map_lifecycle(event) else {
            return;
        };

        if let Err(e) = self
            .logger
            .log_automatic(draft.event_name, draft.category, draft.importance, &draft.note)
            .await
        {
            tracing::error!(
                error = %e,
                event_name = draft.event_name,
                "Failed to record activity event"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_activation_maps_to_medium() {
        let draft = map_lifecycle(&LifecycleEvent::PluginActivated {
            name: "Akismet".into(),
        })
        .unwrap();
        assert_eq!(draft.event_name, "Plugin activated");
        assert_eq!(draft.category, "Activating plugin");
        assert_eq!(draft.importance, Importance::Medium);
        assert_eq!(draft.note, "Plugin \"Akismet\" was activated.");
    }

    #[test]
    fn plugin_deletion_maps_to_high() {
        let draft = map_lifecycle(&LifecycleEvent::PluginDeleted {
            name: "Old Plugin".into(),
        })
        .unwrap();
        assert_eq!(draft.event_name, "Plugin deleted");
        assert_eq!(draft.importance, Importance::High);
    }

    #[test]
    fn plugin_update_importance_follows_major_version() {
        let major = map_lifecycle(&LifecycleEvent::PluginUpdated {
            name: "Example".into(),
            old_version: "1.9".into(),
            new_version: "2.0".into(),
        })
        .unwrap();
        assert_eq!(major.importance, Importance::High);
        assert_eq!(major.note, "Updated Example from version 1.9 to 2.0");

        let minor = map_lifecycle(&LifecycleEvent::PluginUpdated {
            name: "Example".into(),
            old_version: "2.0".into(),
            new_version: "2.1".into(),
        })
        .unwrap();
        assert_eq!(minor.importance, Importance::Medium);
    }

    #[test]
    fn core_update_names_wordpress_core() {
        let draft = map_lifecycle(&LifecycleEvent::CoreUpdated {
            old_version: "5.2".into(),
            new_version: "6.0".into(),
        })
        .unwrap();
        assert_eq!(draft.event_name, "WP core update");
        assert_eq!(draft.importance, Importance::High);
        assert_eq!(draft.note, "Updated WordPress core from version 5.2 to 6.0");
    }

    #[test]
    fn monitored_setting_is_recorded() {
        let draft = map_lifecycle(&LifecycleEvent::SettingUpdated {
            key: "blogname".into(),
            old_value: "Old Site".into(),
            new_value: "New Site".into(),
        })
        .unwrap();
        assert_eq!(draft.event_name, "Setting updated");
        assert_eq!(draft.importance, Importance::Medium);
        assert_eq!(
            draft.note,
            "Setting \"blogname\" was changed. From \"Old Site\" to \"New Site\""
        );
    }

    #[test]
    fn unmonitored_setting_is_ignored() {
        assert_eq!(
            map_lifecycle(&LifecycleEvent::SettingUpdated {
                key: "some_plugin_option".into(),
                old_value: "a".into(),
                new_value: "b".into(),
            }),
            None
        );
    }

    #[test]
    fn empty_permalink_structure_reads_as_plain() {
        let draft = map_lifecycle(&LifecycleEvent::PermalinkChanged {
            old_structure: String::new(),
            new_structure: "/%postname%/".into(),
        })
        .unwrap();
        assert_eq!(draft.importance, Importance::High);
        assert_eq!(
            draft.note,
            "Permalink structure was changed from \"Plain\" to \"/%postname%/\"."
        );
    }
}
