//! Track list retrieval module
//!
//! Cursor-paginated access to the play history.
//!
//! # Overview
//!
//! The tracklist module provides:
//! - `TrackSource` - Trait for ordered access to the underlying play history
//! - `TrackEngine` - Produces pages, refetching past filtered-out entries so
//!   filtering never under-fills a page while matching tracks remain
//! - `MemoryTrackSource` - In-memory source backed by a sorted map

mod engine;
mod memory;
mod types;

pub use engine::{TrackEngine, TrackPageStream};
pub use memory::MemoryTrackSource;
pub use types::{
    PageRequest, TrackPage, TrackSource, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, MIN_PAGE_LIMIT,
};
