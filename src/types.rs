//! Common types used throughout Airwave
//!
//! This module contains shared type definitions for tracks, schedules,
//! and device registrations used across multiple modules.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Track Key
// ============================================================================

/// Ordering key of a track in the play history.
///
/// Wraps the millisecond timestamp at which the track was played. One track
/// plays at a time, so keys are unique within a stream and totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackKey(pub i64);

impl TrackKey {
    /// Create a key from a millisecond timestamp
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Create a key from a datetime
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// The raw millisecond timestamp
    pub fn millis(&self) -> i64 {
        self.0
    }

    /// The key as a datetime, if it is in the representable range
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl std::fmt::Display for TrackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Track
// ============================================================================

/// A single entry in the play history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// When the track was played; doubles as the pagination key
    pub played_at: TrackKey,
    pub artist: String,
    pub title: String,
    /// Whether the entry is an advertisement rather than music
    #[serde(default)]
    pub is_ad: bool,
}

impl Track {
    /// Create a music track
    pub fn new(played_at: TrackKey, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            played_at,
            artist: artist.into(),
            title: title.into(),
            is_ad: false,
        }
    }

    /// Create an advertisement entry
    pub fn ad(played_at: TrackKey, title: impl Into<String>) -> Self {
        Self {
            played_at,
            artist: String::new(),
            title: title.into(),
            is_ad: true,
        }
    }
}

// ============================================================================
// Device Registration
// ============================================================================

/// Mobile platform a push token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Push token registration payload
///
/// The wire field for the platform is `type`, matching the mobile clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceToken {
    pub token: String,
    #[serde(rename = "type")]
    pub platform: Platform,
}

impl DeviceToken {
    pub fn new(token: impl Into<String>, platform: Platform) -> Self {
        Self {
            token: token.into(),
            platform,
        }
    }

    /// Whether the token string is usable (non-blank)
    pub fn is_valid(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// A single show in the broadcast schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleShow {
    pub title: String,
    /// Local start time, e.g. "08:00"
    pub start: String,
    /// Local end time, e.g. "10:00"
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// One day of the broadcast week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub day: String,
    #[serde(default)]
    pub shows: Vec<ScheduleShow>,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle blank strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or whitespace-only
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_blank(self) -> Option<String> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
