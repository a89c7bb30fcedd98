use super::SearchQuery;
use std::time::{Duration, Instant};

/// The external PDF view's search-highlight capability.
pub trait RenderSurface {
    /// False until the document has loaded far enough to accept searches.
    fn is_ready(&self) -> bool;

    fn highlight(&mut self, keyword: &str, match_case: bool, whole_words: bool);

    fn clear_highlights(&mut self);
}

#[derive(Debug, Clone)]
struct PendingSearch {
    due: Instant,
    query: SearchQuery,
}

/// Holds at most one deferred search highlight.
///
/// Every reschedule clears the surface and drops whatever was pending, so a
/// superseded selection can never paint after a newer one.
#[derive(Debug, Clone)]
pub struct SearchScheduler {
    delay: Duration,
    pending: Option<PendingSearch>,
}

impl SearchScheduler {
    pub fn new(delay: Duration) -> Self {
        SearchScheduler {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pending(&self) -> Option<&SearchQuery> {
        self.pending.as_ref().map(|p| &p.query)
    }

    pub fn reschedule(
        &mut self,
        surface: &mut dyn RenderSurface,
        query: Option<SearchQuery>,
        now: Instant,
    ) {
        surface.clear_highlights();
        self.pending = query.map(|query| PendingSearch {
            due: now + self.delay,
            query,
        });
    }

    /// Drop the pending search without touching the surface.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Apply the pending search if its delay has elapsed.
    ///
    /// A due search against a surface that is not ready is discarded; the
    /// next selection change schedules a fresh one.
    pub fn poll(&mut self, surface: &mut dyn RenderSurface, now: Instant) -> Option<SearchQuery> {
        match &self.pending {
            Some(p) if now >= p.due => {}
            _ => return None,
        }
        let pending = self.pending.take()?;

        if !surface.is_ready() {
            tracing::debug!(keyword = %pending.query.keyword, "render surface not ready, dropping search highlight");
            return None;
        }

        let q = pending.query;
        surface.highlight(&q.keyword, q.match_case, q.whole_words);
        Some(q)
    }
}
