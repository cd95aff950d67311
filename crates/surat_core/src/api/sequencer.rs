//! Stale-response guard for type-ahead searches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Recency ticket handed out when a search request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Drops results of requests that were superseded by a newer keystroke.
///
/// No request is cancelled; late responses are simply discarded.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Returns `results` only if `ticket` is still the newest request.
    pub fn accept<T>(&self, ticket: SearchTicket, results: T) -> Option<T> {
        self.is_current(ticket).then_some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchSequencer;

    #[test]
    fn stale_results_are_dropped() {
        let sequencer = SearchSequencer::new();
        let older = sequencer.begin();
        let newer = sequencer.begin();

        assert_eq!(sequencer.accept(newer, vec!["baru"]), Some(vec!["baru"]));
        assert_eq!(sequencer.accept(older, vec!["lama"]), None);
    }

    #[test]
    fn tickets_increase() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
    }
}
