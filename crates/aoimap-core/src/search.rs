//! Debounce and duplicate suppression in front of the geocoder.

use std::time::Duration;

/// Input inactivity window before a request may be issued.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Queries shorter than this never reach the geocoder.
pub const MIN_QUERY_LEN: usize = 3;

/// What the caller should do with a raw input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Too short to search: drop any displayed results immediately.
    ClearResults,
    /// Restart the debounce window for this query.
    Debounce(String),
}

/// An issued request, tagged so late responses can be matched against the
/// newest request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub query: String,
}

/// Throttles outgoing geocoding requests.
///
/// At most one request per debounce window of input inactivity; a query
/// identical to the most recently issued one is suppressed. Responses are
/// arbitrated by sequence number so the latest request wins; in-flight
/// requests are never cancelled.
#[derive(Debug, Default)]
pub struct SearchGuard {
    last_issued: Option<String>,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl SearchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a raw input change.
    pub fn on_input(&self, text: &str) -> InputAction {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            InputAction::ClearResults
        } else {
            InputAction::Debounce(trimmed.to_string())
        }
    }

    /// Ask to issue a request once the debounce window has elapsed.
    ///
    /// Returns `None` when the query equals the most recently issued one, so
    /// re-submitting unchanged text costs no round-trip.
    pub fn try_issue(&mut self, query: &str) -> Option<RequestTicket> {
        if self.last_issued.as_deref() == Some(query) {
            tracing::debug!(query, "duplicate query suppressed");
            return None;
        }
        self.last_issued = Some(query.to_string());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        Some(RequestTicket { seq, query: query.to_string() })
    }

    /// Latest-request-wins: a response is adopted only when it answers the
    /// newest issued request.
    pub fn accept_response(&self, seq: u64) -> bool {
        self.latest_seq == Some(seq)
    }

    /// Forget the last issued query so identical text can be searched again
    /// (after candidate selection or a restart).
    pub fn reset(&mut self) {
        self.last_issued = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_queries_clear_results() {
        let guard = SearchGuard::new();
        assert_eq!(guard.on_input("co"), InputAction::ClearResults);
        assert_eq!(guard.on_input("  c "), InputAction::ClearResults);
        assert_eq!(guard.on_input(""), InputAction::ClearResults);
    }

    #[test]
    fn test_long_queries_debounce_trimmed() {
        let guard = SearchGuard::new();
        assert_eq!(
            guard.on_input("  cologne "),
            InputAction::Debounce("cologne".to_string())
        );
    }

    #[test]
    fn test_duplicate_query_suppressed() {
        let mut guard = SearchGuard::new();
        assert!(guard.try_issue("cologne").is_some());
        assert!(guard.try_issue("cologne").is_none());
        assert!(guard.try_issue("bonn").is_some());
    }

    #[test]
    fn test_reset_allows_reissue() {
        let mut guard = SearchGuard::new();
        assert!(guard.try_issue("cologne").is_some());
        guard.reset();
        assert!(guard.try_issue("cologne").is_some());
    }

    #[test]
    fn test_latest_request_wins() {
        let mut guard = SearchGuard::new();
        let first = guard.try_issue("colog").unwrap();
        let second = guard.try_issue("cologne").unwrap();

        assert!(!guard.accept_response(first.seq));
        assert!(guard.accept_response(second.seq));
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut guard = SearchGuard::new();
        let a = guard.try_issue("aachen").unwrap();
        let b = guard.try_issue("bonn").unwrap();
        assert!(b.seq > a.seq);
    }
}
