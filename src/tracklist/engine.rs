//! Track list retrieval engine
//!
//! Produces one page of the play history per call. The engine holds no
//! mutable state of its own: a page is a pure function of the request plus
//! whatever the source returns, so concurrent calls need no locking.

use super::types::{PageRequest, TrackPage, TrackSource};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for the page stream returned by pages()
pub type TrackPageStream = Pin<Box<dyn Stream<Item = Result<TrackPage>> + Send>>;

/// Retrieval engine over a track source
#[derive(Clone)]
pub struct TrackEngine {
    source: Arc<dyn TrackSource>,
}

impl TrackEngine {
    /// Create a new engine over a source
    pub fn new(source: Arc<dyn TrackSource>) -> Self {
        Self { source }
    }

    /// Produce one page for the request
    ///
    /// Filtering happens after fetching, so a single fetch of `limit` tracks
    /// can under-fill the page when ads are interleaved. The engine refetches
    /// the deficit until it has `limit` post-filter tracks or the source runs
    /// out. The loop always terminates: a short batch ends it, and a full
    /// batch advances the scan position by at least one key.
    pub async fn page(&self, request: &PageRequest) -> Result<TrackPage> {
        request.validate()?;

        let mut kept = Vec::with_capacity(request.limit);
        let mut position = request.cursor;
        let mut exhausted = false;

        while kept.len() < request.limit {
            let want = request.limit - kept.len();
            let batch = self.source.fetch_after(position, want).await?;
            if batch.len() > want {
                return Err(Error::source(format!(
                    "source returned {} tracks, requested at most {want}",
                    batch.len()
                )));
            }

            let got = batch.len();
            for track in batch {
                // The scan must move strictly backwards through play order,
                // otherwise cursor resumption would repeat or skip tracks.
                if let Some(seen) = position {
                    if track.played_at >= seen {
                        return Err(Error::source(format!(
                            "source violated play order: key {} not before {seen}",
                            track.played_at
                        )));
                    }
                }
                position = Some(track.played_at);

                if request.filter_ads && track.is_ad {
                    continue;
                }
                kept.push(track);
            }

            if got < want {
                exhausted = true;
                break;
            }
        }

        // Exiting with a full page means the last batch item was kept, so the
        // last kept key equals the scan position and resuming there skips
        // nothing.
        let next_cursor = if exhausted {
            None
        } else {
            kept.last().map(|track| track.played_at)
        };

        Ok(TrackPage {
            tracks: kept,
            next_cursor,
        })
    }

    /// Iterate the whole stream as successive pages
    ///
    /// Feeds each page's cursor into the next request until the source is
    /// exhausted. The final (cursor-less) page is yielded too, even if empty.
    pub fn pages(&self, request: PageRequest) -> TrackPageStream {
        let engine = self.clone();
        Box::pin(stream::try_unfold(
            (engine, Some(request)),
            |(engine, request)| async move {
                let Some(request) = request else {
                    return Ok(None);
                };
                let page = engine.page(&request).await?;
                let next = page
                    .next_cursor
                    .map(|cursor| request.with_cursor(Some(cursor)));
                Ok(Some((page, (engine, next))))
            },
        ))
    }
}
