//! Activity event vocabulary: event kinds, importance levels, the monitored
//! settings allow-list, and the version-comparison helpers used when
//! recording update events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Event kind
// ---------------------------------------------------------------------------

/// Origin of an activity event.
///
/// Automatic events are written by the recorder in response to host lifecycle
/// notifications and are immutable once persisted. Manual events are entered
/// by an administrator and may later be edited or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Manual,
    Automatic,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Manual => "manual",
            EventKind::Automatic => "automatic",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(EventKind::Manual),
            "automatic" => Ok(EventKind::Automatic),
            other => Err(CoreError::Validation(format!(
                "unknown event type '{other}', expected 'manual' or 'automatic'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Importance
// ---------------------------------------------------------------------------

/// Severity classification of an activity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

impl Importance {
    pub fn as_str(self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
            Importance::Critical => "critical",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Importance::Low),
            "medium" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            "critical" => Ok(Importance::Critical),
            other => Err(CoreError::Validation(format!(
                "unknown importance '{other}', expected low, medium, high, or critical"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Categories always offered by the category listing, whether or not any
/// event has used them yet.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Plugin update",
    "Adding new plugin",
    "Activating plugin",
    "Deactivating plugin",
    "Deleting plugin",
    "WP core update",
    "Plugin settings change",
];

// ---------------------------------------------------------------------------
// Monitored settings
// ---------------------------------------------------------------------------

/// Global setting keys whose changes are recorded. Changes to any other
/// setting are ignored by the recorder.
pub const MONITORED_SETTINGS: [&str; 11] = [
    "blogname",
    "blogdescription",
    "siteurl",
    "home",
    "admin_email",
    "users_can_register",
    "default_role",
    "timezone_string",
    "date_format",
    "time_format",
    "start_of_week",
];

/// Whether a setting key is on the monitored allow-list.
pub fn is_monitored_setting(key: &str) -> bool {
    MONITORED_SETTINGS.contains(&key)
}

// ---------------------------------------------------------------------------
// Version helpers
// ---------------------------------------------------------------------------

/// Decide how important a version change is.
///
/// Compares the leading numeric component of the two dotted version strings:
/// a major-version bump is high importance, anything else is medium.
/// Missing or non-numeric components count as 0.
pub fn classify_update_importance(old_version: &str, new_version: &str) -> Importance {
    if major_component(new_version) > major_component(old_version) {
        Importance::High
    } else {
        Importance::Medium
    }
}

fn major_component(version: &str) -> u64 {
    version
        .split('.')
        .next()
        .and_then(|part| part.trim().parse().ok())
        .unwrap_or(0)
}

/// Human-readable note for a version change event.
pub fn format_version_change_note(old_version: &str, new_version: &str, subject: &str) -> String {
    format!("Updated {subject} from version {old_version} to {new_version}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_bump_is_high_importance() {
        assert_eq!(classify_update_importance("5.2", "6.0"), Importance::High);
    }

    #[test]
    fn minor_bump_is_medium_importance() {
        assert_eq!(classify_update_importance("5.2", "5.9"), Importance::Medium);
    }

    #[test]
    fn missing_old_version_counts_as_zero() {
        assert_eq!(classify_update_importance("", "1.0"), Importance::High);
    }

    #[test]
    fn garbage_versions_count_as_zero() {
        assert_eq!(classify_update_importance("abc", "xyz"), Importance::Medium);
        assert_eq!(classify_update_importance("abc", "2.0"), Importance::High);
    }

    #[test]
    fn downgrade_is_medium_importance() {
        assert_eq!(classify_update_importance("6.1", "5.9"), Importance::Medium);
    }

    #[test]
    fn version_note_formatting() {
        assert_eq!(
            format_version_change_note("5.2", "6.0", "WordPress core"),
            "Updated WordPress core from version 5.2 to 6.0"
        );
    }

    #[test]
    fn kind_round_trips_through_strings() {
        assert_eq!("manual".parse::<EventKind>().unwrap(), EventKind::Manual);
        assert_eq!(EventKind::Automatic.as_str(), "automatic");
        assert!("Manual".parse::<EventKind>().is_err());
    }

    #[test]
    fn importance_round_trips_through_strings() {
        for level in ["low", "medium", "high", "critical"] {
            assert_eq!(level.parse::<Importance>().unwrap().as_str(), level);
        }
        assert!("urgent".parse::<Importance>().is_err());
    }

    #[test]
    fn monitored_settings_allow_list() {
        assert!(is_monitored_setting("blogname"));
        assert!(is_monitored_setting("start_of_week"));
        assert!(!is_monitored_setting("some_plugin_option"));
    }
}
