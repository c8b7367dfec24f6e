//! Event-type dispatch: turn an authenticated delivery into a typed
//! [`Event`] plus its envelope metadata.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::accessor::{Event, EventView};
use crate::config::{EventKind, HookConfig};

/// One dispatched webhook delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub event: Event,
    /// Owned copy of the raw request body.
    pub payload: Vec<u8>,
    /// The event-type header value, verbatim.
    pub event_type: String,
    /// The delivery GUID header value; may be empty.
    pub guid: String,
}

impl Delivery {
    /// The uniform accessor view of the dispatched event.
    pub fn view(&self) -> &dyn EventView {
        self.event.view()
    }

    /// True only for a note delivery whose merge-request discriminant is
    /// populated, i.e. a comment on a pull request.
    pub fn is_pr_comment(&self) -> bool {
        matches!(&self.event, Event::Note(note) if note.merge_request.is_some())
    }
}

/// Selects the event variant for `event_type` and parses `payload` into it.
///
/// Dispatch never fails: an unmapped event type yields [`Event::Unknown`],
/// and a payload that does not parse degrades to the variant's zero value,
/// surfacing later as all-absent accessor results. Both cases keep the
/// event type and GUID reportable.
pub fn dispatch(hook: &HookConfig, event_type: &str, guid: &str, payload: &[u8]) -> Delivery {
    let event = match hook.vocabulary.kind_of(event_type) {
        Some(EventKind::Issue) => Event::Issue(parse(payload, event_type)),
        Some(EventKind::PullRequest) => Event::PullRequest(parse(payload, event_type)),
        Some(EventKind::Note) => Event::Note(parse(payload, event_type)),
        Some(EventKind::Push) => Event::Push(parse(payload, event_type)),
        None => {
            warn!(event_type, "unmapped webhook event type");
            Event::Unknown
        }
    };

    Delivery {
        event,
        payload: payload.to_vec(),
        event_type: event_type.to_string(),
        guid: guid.to_string(),
    }
}

fn parse<T: DeserializeOwned + Default>(payload: &[u8], event_type: &str) -> T {
    match serde_json::from_slice(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!(event_type, %err, "malformed webhook payload, degrading to empty event");
            T::default()
        }
    }
}
