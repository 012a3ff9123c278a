//! Broadcast schedule module
//!
//! Serves the weekly programme. The schedule changes rarely and is edited by
//! hand, so the shipped source reads a YAML file whose shape mirrors the API
//! response:
//!
//! ```yaml
//! days:
//!   - day: Monday
//!     shows:
//!       - title: Morning Drive
//!         start: "06:00"
//!         end: "10:00"
//!         host: Alex
//! ```

use crate::error::{Error, Result};
use crate::types::{OptionStringExt, ScheduleDay};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read access to the broadcast week
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// The full week, in broadcast order
    async fn days(&self) -> Result<Vec<ScheduleDay>>;
}

/// On-disk schedule document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    days: Vec<ScheduleDay>,
}

/// Schedule held in memory, loadable from a YAML file
#[derive(Debug, Clone, Default)]
pub struct MemorySchedule {
    days: Vec<ScheduleDay>,
}

impl MemorySchedule {
    /// Create a schedule from a list of days
    pub fn new(days: Vec<ScheduleDay>) -> Self {
        Self { days }
    }

    /// Create an empty schedule
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a schedule from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a schedule from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: ScheduleFile = serde_yaml::from_str(yaml)?;
        let mut days = file.days;
        // Blank hosts in hand-edited files count as absent
        for day in &mut days {
            for show in &mut day.shows {
                show.host = show.host.take().none_if_blank();
            }
        }
        Ok(Self::new(days))
    }

    /// Number of days in the schedule
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Check if the schedule has no days
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[async_trait]
impl ScheduleSource for MemorySchedule {
    async fn days(&self) -> Result<Vec<ScheduleDay>> {
        Ok(self.days.clone())
    }
}
