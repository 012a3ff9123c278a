// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Airwave
//!
//! Backend for the radio station apps: the cursor-paginated play history,
//! the weekly broadcast schedule and push device registration.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Opaque resumable cursors over the play history
//! - **Ad Filtering**: Optional removal of advertisement entries, refetching
//!   until the page is full or the history runs out
//! - **Schedule**: Weekly shows served from a YAML file
//! - **Device Registry**: Push token registration, in memory or forwarded to
//!   an HTTP worker
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airwave::tracklist::{MemoryTrackSource, PageRequest, TrackEngine};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> airwave::Result<()> {
//!     // Load the play history from JSON
//!     let source = MemoryTrackSource::from_file("tracks.json")?;
//!     let engine = TrackEngine::new(Arc::new(source));
//!
//!     // First page, newest first
//!     let page = engine.page(&PageRequest::new(10)).await?;
//!     println!("{} tracks, next cursor {:?}", page.len(), page.next_cursor);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          HTTP API                           │
//! │  /api/v1/tracklist    /api/v1/schedule    /api/v1/register  │
//! │                                           /api/v1/unregister│
//! └─────────────────────────────────────────────────────────────┘
//!            │                   │                   │
//! ┌──────────┴────────┐ ┌────────┴────────┐ ┌────────┴─────────┐
//! │    TrackEngine    │ │ ScheduleSource  │ │  DeviceRegistry  │
//! ├───────────────────┤ ├─────────────────┤ ├──────────────────┤
//! │ Cursor paging     │ │ Weekly shows    │ │ Memory           │
//! │ Ad filtering      │ │ from YAML       │ │ HTTP worker      │
//! │ Page stream       │ │                 │ │                  │
//! └───────────────────┘ └─────────────────┘ └──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the backend
pub mod error;

/// Common types shared across the API
pub mod types;

/// Opaque pagination cursors
pub mod cursor;

/// Cursor-paginated play history
pub mod tracklist;

/// Weekly broadcast schedule
pub mod schedule;

/// Push device registration
pub mod device;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use cursor::CursorCodec;
pub use tracklist::{PageRequest, TrackEngine, TrackPage, TrackSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
