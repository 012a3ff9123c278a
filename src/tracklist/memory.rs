//! In-memory track source
//!
//! Backed by a sorted map keyed on play time. Serves the dev/test setup and
//! small stations whose history fits in memory; the JSON file format is an
//! array of tracks in wire form.

use super::types::TrackSource;
use crate::error::{Error, Result};
use crate::types::{Track, TrackKey};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

/// Track source over an in-memory sorted map
#[derive(Debug, Clone, Default)]
pub struct MemoryTrackSource {
    tracks: BTreeMap<TrackKey, Track>,
}

impl MemoryTrackSource {
    /// Create a source from a collection of tracks
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        Self {
            tracks: tracks
                .into_iter()
                .map(|track| (track.played_at, track))
                .collect(),
        }
    }

    /// Create an empty source
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load tracks from a JSON file (array of tracks)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse tracks from a JSON string (array of tracks)
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Ok(Self::new(tracks))
    }

    /// Add a track, replacing any existing entry with the same key
    pub fn insert(&mut self, track: Track) {
        self.tracks.insert(track.played_at, track);
    }

    /// Number of tracks in the source
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the source has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[async_trait]
impl TrackSource for MemoryTrackSource {
    async fn fetch_after(&self, after: Option<TrackKey>, fetch_size: usize) -> Result<Vec<Track>> {
        // Play order is descending by key. The map iterates ascending, so
        // batches come from a reversed range scan. A stale cursor lands on
        // the next existing key below it for free.
        let batch: Vec<Track> = match after {
            Some(key) => self
                .tracks
                .range(..key)
                .rev()
                .take(fetch_size)
                .map(|(_, track)| track.clone())
                .collect(),
            None => self
                .tracks
                .values()
                .rev()
                .take(fetch_size)
                .cloned()
                .collect(),
        };
        Ok(batch)
    }
}
