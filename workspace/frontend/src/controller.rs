//! Glue between user interactions and the backend.
//!
//! The component hands every click and submit to [`lookup_at`] or
//! [`submit_features`]; both perform exactly one call on a [`CongestionApi`]
//! and return the reducer action to dispatch, unless a newer request of the
//! same kind was issued in the meantime.

use crate::session::SessionAction;
use async_trait::async_trait;
use common::{GeoPoint, TrafficFeatures, TrafficSample};
use serde_json::Value;
use std::cell::Cell;

#[async_trait(?Send)]
pub trait CongestionApi {
    /// Traffic conditions around a clicked point.
    async fn lookup_traffic(&self, point: GeoPoint) -> Result<TrafficSample, String>;

    /// Raw body of a successful prediction response.
    async fn predict(&self, features: &TrafficFeatures) -> Result<Value, String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Lookup,
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    sequence: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Hands out tickets so only the most recent request of each kind lands.
#[derive(Debug, Default)]
pub struct RequestTracker {
    lookup: Cell<u64>,
    submit: Cell<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: RequestKind) -> &Cell<u64> {
        match kind {
            RequestKind::Lookup => &self.lookup,
            RequestKind::Submit => &self.submit,
        }
    }

    pub fn issue(&self, kind: RequestKind) -> RequestTicket {
        let counter = self.counter(kind);
        let sequence = counter.get() + 1;
        counter.set(sequence);
        RequestTicket { kind, sequence }
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.counter(ticket.kind).get() == ticket.sequence
    }
}

/// Fetches traffic for a map click.
pub async fn lookup_at<A>(api: &A, tracker: &RequestTracker, ticket: RequestTicket, point: GeoPoint) -> Option<SessionAction>
where
    A: CongestionApi + ?Sized,
{
    log::debug!("Looking up traffic at {:.5}, {:.5}", point.lat, point.lon);
    let outcome = api.lookup_traffic(point).await;

    if !tracker.is_latest(ticket) {
        log::debug!("Dropping superseded traffic lookup for {:.5}, {:.5}", point.lat, point.lon);
        return None;
    }

    Some(SessionAction::LookupFinished(outcome))
}

/// Turns a form that cannot be sent into an action.
///
/// Issues a submit ticket anyway so a prediction still in flight cannot land
/// next to the rejection.
pub fn reject_submit(tracker: &RequestTracker, reason: String) -> SessionAction {
    tracker.issue(RequestKind::Submit);
    SessionAction::SubmitRejected(reason)
}

/// Sends the form values for a prediction.
pub async fn submit_features<A>(
    api: &A,
    tracker: &RequestTracker,
    ticket: RequestTicket,
    features: TrafficFeatures,
) -> Option<SessionAction>
where
    A: CongestionApi + ?Sized,
{
    log::debug!("Requesting prediction for {:?}", features);
    let outcome = api.predict(&features).await;

    if !tracker.is_latest(ticket) {
        log::debug!("Dropping superseded prediction response");
        return None;
    }

    Some(SessionAction::SubmitFinished(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Field, SessionState, PREDICTION_FETCH_FAILED};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockApi {
        lookups: RefCell<Vec<GeoPoint>>,
        predictions: RefCell<Vec<TrafficFeatures>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl CongestionApi for MockApi {
        async fn lookup_traffic(&self, point: GeoPoint) -> Result<TrafficSample, String> {
            self.lookups.borrow_mut().push(point);
            if self.fail {
                return Err("Request failed: connection refused".to_string());
            }
            Ok(TrafficSample {
                speed: 42.0,
                density: 0.7,
                temperature: 0.0,
            })
        }

        async fn predict(&self, features: &TrafficFeatures) -> Result<Value, String> {
            self.predictions.borrow_mut().push(*features);
            if self.fail {
                return Err("HTTP error: 500".to_string());
            }
            Ok(json!({
                "predicted_congestion_level": 0.6,
                "predicted_class": 1,
                "congestion_label": "High",
            }))
        }
    }

    fn features() -> TrafficFeatures {
        TrafficFeatures {
            traffic_speed: 42.0,
            density: 0.7,
            temperature: 0.0,
        }
    }

    #[test]
    fn test_tickets_are_tracked_per_kind() {
        let tracker = RequestTracker::new();

        let first_lookup = tracker.issue(RequestKind::Lookup);
        let submit = tracker.issue(RequestKind::Submit);
        assert!(tracker.is_latest(first_lookup));
        assert!(tracker.is_latest(submit));

        let second_lookup = tracker.issue(RequestKind::Lookup);
        assert!(!tracker.is_latest(first_lookup));
        assert!(tracker.is_latest(second_lookup));
        assert!(tracker.is_latest(submit));
        assert_eq!(second_lookup.kind(), RequestKind::Lookup);
    }

    #[tokio::test]
    async fn test_lookup_issues_exactly_one_call() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let ticket = tracker.issue(RequestKind::Lookup);

        let action = lookup_at(&api, &tracker, ticket, GeoPoint::new(51.51, -0.08)).await;

        assert_eq!(*api.lookups.borrow(), vec![GeoPoint::new(51.51, -0.08)]);
        assert!(api.predictions.borrow().is_empty());
        match action {
            Some(SessionAction::LookupFinished(Ok(sample))) => assert_eq!(sample.speed, 42.0),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_becomes_action() {
        let api = MockApi {
            fail: true,
            ..MockApi::default()
        };
        let tracker = RequestTracker::new();
        let ticket = tracker.issue(RequestKind::Lookup);

        let action = lookup_at(&api, &tracker, ticket, GeoPoint::new(0.0, 0.0)).await;

        assert!(matches!(action, Some(SessionAction::LookupFinished(Err(_)))));
    }

    #[tokio::test]
    async fn test_superseded_lookup_is_dropped() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let stale = tracker.issue(RequestKind::Lookup);
        let fresh = tracker.issue(RequestKind::Lookup);

        let stale_action = lookup_at(&api, &tracker, stale, GeoPoint::new(48.85, 2.35)).await;
        let fresh_action = lookup_at(&api, &tracker, fresh, GeoPoint::new(51.51, -0.08)).await;

        assert_eq!(stale_action, None);
        assert!(fresh_action.is_some());
        assert_eq!(api.lookups.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_issues_exactly_one_call() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let ticket = tracker.issue(RequestKind::Submit);

        let action = submit_features(&api, &tracker, ticket, features()).await;

        assert_eq!(*api.predictions.borrow(), vec![features()]);
        assert!(api.lookups.borrow().is_empty());
        match action {
            Some(SessionAction::SubmitFinished(Ok(payload))) => {
                assert_eq!(payload["congestion_label"], "High");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_superseded_submit_is_dropped() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let stale = tracker.issue(RequestKind::Submit);
        tracker.issue(RequestKind::Submit);

        assert_eq!(submit_features(&api, &tracker, stale, features()).await, None);
    }

    #[tokio::test]
    async fn test_lookup_does_not_invalidate_submit() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let submit = tracker.issue(RequestKind::Submit);
        tracker.issue(RequestKind::Lookup);

        let action = submit_features(&api, &tracker, submit, features()).await;
        assert!(matches!(action, Some(SessionAction::SubmitFinished(Ok(_)))));
    }

    #[tokio::test]
    async fn test_rejected_submit_drops_earlier_prediction() {
        let api = MockApi::default();
        let tracker = RequestTracker::new();
        let mut state = SessionState::default();

        let in_flight = tracker.issue(RequestKind::Submit);
        state.apply(SessionAction::SubmitStarted);

        state.apply(SessionAction::Edit(Field::Density, String::new()));
        let reason = state.form.to_features().unwrap_err();
        state.apply(reject_submit(&tracker, reason));

        let late = submit_features(&api, &tracker, in_flight, features()).await;
        assert_eq!(late, None);
        if let Some(action) = late {
            state.apply(action);
        }

        assert_eq!(state.result, None);
        assert_eq!(state.error.as_deref(), Some(PREDICTION_FETCH_FAILED));
    }
}
