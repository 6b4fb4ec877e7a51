use crate::error::FetchError;

/// Lifecycle of one remote payload as the UI renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Generation number attached to an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets so that only the reply to the latest request is applied.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        assert!(tracker.is_current(first));
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        tracker.reset();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn test_fetch_state_from_result() {
        let ready: FetchState<u32> = FetchState::from_result(Ok(4));
        assert_eq!(ready.ready(), Some(&4));

        let failed: FetchState<u32> = FetchState::from_result(Err(FetchError::Status {
            status: 404,
            message: "Street not found".into(),
        }));
        assert_eq!(
            failed,
            FetchState::Failed("server answered 404: Street not found".into())
        );
        assert!(!failed.is_loading());
    }
}
