//! Intake configuration: header names and the event-type vocabulary.
//!
//! Forges have shipped more than one set of event-type strings for the
//! same payloads, so the mapping is configuration, not a hardcoded
//! switch. The whole struct is built once at startup and passed by
//! reference.

use std::collections::HashMap;

/// The event kinds the dispatcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Issue,
    PullRequest,
    Note,
    Push,
}

/// Maps event-type header values to [`EventKind`]s.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: HashMap<String, EventKind>,
}

impl Vocabulary {
    /// The human-readable vocabulary: `"Issue Hook"`, `"Merge Request
    /// Hook"`, `"Note Hook"`, `"Push Hook"`.
    pub fn human_readable() -> Self {
        Self {
            entries: HashMap::from([
                ("Issue Hook".to_string(), EventKind::Issue),
                ("Merge Request Hook".to_string(), EventKind::PullRequest),
                ("Note Hook".to_string(), EventKind::Note),
                ("Push Hook".to_string(), EventKind::Push),
            ]),
        }
    }

    /// The machine-readable vocabulary observed on newer deployments:
    /// `"issue_hooks"`, `"merge_request_hooks"`, `"note_hooks"`.
    pub fn machine_readable() -> Self {
        Self {
            entries: HashMap::from([
                ("issue_hooks".to_string(), EventKind::Issue),
                ("merge_request_hooks".to_string(), EventKind::PullRequest),
                ("note_hooks".to_string(), EventKind::Note),
            ]),
        }
    }

    /// Adds or overrides a single mapping.
    pub fn with_event(mut self, event_type: impl Into<String>, kind: EventKind) -> Self {
        self.entries.insert(event_type.into(), kind);
        self
    }

    /// Looks up the kind for an event-type header value. `None` is the
    /// unknown case, not an error.
    pub fn kind_of(&self, event_type: &str) -> Option<EventKind> {
        self.entries.get(event_type).copied()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::human_readable()
    }
}

/// Immutable webhook intake configuration.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Header carrying the event-type tag.
    pub event_type_header: String,
    /// Header carrying the delivery GUID.
    pub delivery_header: String,
    /// Header carrying the shared-secret token.
    pub token_header: String,
    pub vocabulary: Vocabulary,
    /// Upper bound on the buffered request body.
    pub max_body_bytes: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            event_type_header: "X-Forge-Event".to_string(),
            delivery_header: "X-Forge-Delivery".to_string(),
            token_header: "X-Forge-Token".to_string(),
            vocabulary: Vocabulary::default(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_readable_vocabulary_maps_all_four_kinds() {
        let vocab = Vocabulary::human_readable();
        assert_eq!(vocab.kind_of("Issue Hook"), Some(EventKind::Issue));
        assert_eq!(
            vocab.kind_of("Merge Request Hook"),
            Some(EventKind::PullRequest)
        );
        assert_eq!(vocab.kind_of("Note Hook"), Some(EventKind::Note));
        assert_eq!(vocab.kind_of("Push Hook"), Some(EventKind::Push));
        assert_eq!(vocab.kind_of("Dummy Hook"), None);
    }

    #[test]
    fn machine_readable_vocabulary_maps_observed_kinds() {
        let vocab = Vocabulary::machine_readable();
        assert_eq!(vocab.kind_of("issue_hooks"), Some(EventKind::Issue));
        assert_eq!(
            vocab.kind_of("merge_request_hooks"),
            Some(EventKind::PullRequest)
        );
        assert_eq!(vocab.kind_of("note_hooks"), Some(EventKind::Note));
        // no push tag has been observed in this vocabulary
        assert_eq!(vocab.kind_of("push_hooks"), None);
    }

    #[test]
    fn vocabulary_is_extensible() {
        let vocab = Vocabulary::machine_readable().with_event("push_hooks", EventKind::Push);
        assert_eq!(vocab.kind_of("push_hooks"), Some(EventKind::Push));
    }

    #[test]
    fn default_header_names() {
        let hook = HookConfig::default();
        assert_eq!(hook.event_type_header, "X-Forge-Event");
        assert_eq!(hook.delivery_header, "X-Forge-Delivery");
        assert_eq!(hook.token_header, "X-Forge-Token");
    }
}
