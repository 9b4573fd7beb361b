//! Per-channel request sequencing.

use std::str::FromStr;

/// How responses that arrive out of order are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// A response older than one already applied is discarded.
    #[default]
    LatestRequest,
    /// Every response is applied in arrival order.
    LastArrival,
}

impl FromStr for ResponseOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest-request" | "latest_request" => Ok(Self::LatestRequest),
            "last-arrival" | "last_arrival" => Ok(Self::LastArrival),
            other => Err(format!("unknown response ordering: {other}")),
        }
    }
}

/// Hands out sequence numbers and decides which responses may be applied.
///
/// Sequence numbers start at 1 and increase monotonically.
///
/// # Example
///
/// ```
/// use marquee::catalog::{RequestSequencer, ResponseOrdering};
///
/// let mut seq = RequestSequencer::new(ResponseOrdering::LatestRequest);
/// let first = seq.issue();
/// let second = seq.issue();
///
/// assert!(seq.accept(second));
/// assert!(!seq.accept(first));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    ordering: ResponseOrdering,
    last_issued: u64,
    highest_applied: u64,
}

impl RequestSequencer {
    #[must_use]
    pub const fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            last_issued: 0,
            highest_applied: 0,
        }
    }

    /// Allocates the sequence number for a new request.
    pub fn issue(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    /// Returns whether the response to `seq` should be applied, and records it
    /// as applied if so.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.ordering == ResponseOrdering::LatestRequest && seq < self.highest_applied {
            tracing::debug!(seq, highest_applied = self.highest_applied, "discarding stale response");
            return false;
        }
        self.highest_applied = self.highest_applied.max(seq);
        true
    }

    /// `true` while the most recently issued request has not been answered.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.highest_applied < self.last_issued
    }

    #[must_use]
    pub const fn last_issued(&self) -> u64 {
        self.last_issued
    }

    #[must_use]
    pub const fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_request_discards_older_responses() {
        let mut seq = RequestSequencer::new(ResponseOrdering::LatestRequest);
        let a = seq.issue();
        let b = seq.issue();
        let c = seq.issue();

        assert!(seq.accept(b));
        assert!(!seq.accept(a));
        assert!(seq.is_pending());
        assert!(seq.accept(c));
        assert!(!seq.is_pending());
    }

    #[test]
    fn last_arrival_applies_everything() {
        let mut seq = RequestSequencer::new(ResponseOrdering::LastArrival);
        let a = seq.issue();
        let b = seq.issue();

        assert!(seq.accept(b));
        assert!(seq.accept(a));
        assert!(!seq.is_pending());
    }

    #[test]
    fn parses_config_values() {
        assert_eq!(
            "last-arrival".parse::<ResponseOrdering>(),
            Ok(ResponseOrdering::LastArrival)
        );
        assert_eq!(
            " Latest-Request ".parse::<ResponseOrdering>(),
            Ok(ResponseOrdering::LatestRequest)
        );
        assert!("newest".parse::<ResponseOrdering>().is_err());
    }
}
