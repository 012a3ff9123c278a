//! Track list types and traits
//!
//! Defines the page request/result types and the source abstraction the
//! retrieval engine runs against.

use crate::error::{Error, Result};
use crate::types::{Track, TrackKey};
use async_trait::async_trait;

/// Smallest page a caller may request
pub const MIN_PAGE_LIMIT: usize = 1;

/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: usize = 25;

/// Page size when the caller does not supply one
pub const DEFAULT_PAGE_LIMIT: usize = 1;

// ============================================================================
// Page Request
// ============================================================================

/// One page request, already decoded from wire form
///
/// `cursor` is the key of the last track the caller has seen; the page starts
/// strictly after it in play order. Absent cursor means the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of tracks to return after filtering
    pub limit: usize,
    /// Exclude advertisement entries from the page
    pub filter_ads: bool,
    /// Resume position from the previous page
    pub cursor: Option<TrackKey>,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            filter_ads: false,
            cursor: None,
        }
    }

    /// Set ad filtering
    #[must_use]
    pub fn with_filter_ads(mut self, filter_ads: bool) -> Self {
        self.filter_ads = filter_ads;
        self
    }

    /// Set the resume position
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<TrackKey>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Reject limits outside the allowed range
    pub fn validate(&self) -> Result<()> {
        if self.limit < MIN_PAGE_LIMIT || self.limit > MAX_PAGE_LIMIT {
            return Err(Error::invalid_limit(
                self.limit as i64,
                MIN_PAGE_LIMIT,
                MAX_PAGE_LIMIT,
            ));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

// ============================================================================
// Track Page
// ============================================================================

/// One page of the play history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    /// Tracks in play order, newest first
    pub tracks: Vec<Track>,
    /// Resume position for the next page; absent means end of stream
    pub next_cursor: Option<TrackKey>,
}

impl TrackPage {
    /// Create an empty final page
    pub fn empty() -> Self {
        Self {
            tracks: Vec::new(),
            next_cursor: None,
        }
    }

    /// Number of tracks in the page
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the page has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Check if this is the last page of the stream
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

// ============================================================================
// Track Source Trait
// ============================================================================

/// Ordered access to the underlying play history
///
/// Implementations return tracks in play order (newest first). A batch
/// shorter than `fetch_size` signals that the stream is exhausted.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetch up to `fetch_size` tracks strictly after `after` in play order
    ///
    /// `after` is an exclusive bound: the track with that key (if it still
    /// exists) is not part of the batch. `None` starts from the newest track.
    async fn fetch_after(&self, after: Option<TrackKey>, fetch_size: usize) -> Result<Vec<Track>>;
}
