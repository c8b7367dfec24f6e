//! Uniform read interface over the event variants.
//!
//! Every variant answers the full accessor set; a field that is not
//! meaningful for a variant resolves to `None` (or an empty list), never
//! a panic. Default trait methods return absent so each variant only
//! overrides what it carries.

use common::Timestamp;

use crate::events::{IssueEvent, NoteEvent, PullRequestEvent, PushEvent};

/// The accessor capability set shared by all event variants.
pub trait EventView {
    fn action(&self) -> Option<&str> {
        None
    }
    fn action_detail(&self) -> Option<&str> {
        None
    }
    fn state(&self) -> Option<&str> {
        None
    }
    fn org(&self) -> Option<&str> {
        None
    }
    fn repo(&self) -> Option<&str> {
        None
    }
    fn html_url(&self) -> Option<&str> {
        None
    }
    /// The branch a change targets.
    fn base(&self) -> Option<&str> {
        None
    }
    /// The branch a change comes from, qualified as `{source path}/{branch}`.
    fn head(&self) -> Option<String> {
        None
    }
    fn number(&self) -> Option<String> {
        None
    }
    fn id(&self) -> Option<String> {
        None
    }
    fn author(&self) -> Option<&str> {
        None
    }
    fn comment_id(&self) -> Option<&str> {
        None
    }
    fn comment_kind(&self) -> Option<&str> {
        None
    }
    fn comment(&self) -> Option<&str> {
        None
    }
    fn commenter(&self) -> Option<&str> {
        None
    }
    fn labels(&self) -> Vec<&str> {
        Vec::new()
    }
    fn created_at(&self) -> Option<Timestamp> {
        None
    }
    fn updated_at(&self) -> Option<Timestamp> {
        None
    }
}

impl EventView for IssueEvent {
    fn action(&self) -> Option<&str> {
        self.attributes.as_ref()?.action.as_deref()
    }

    fn action_detail(&self) -> Option<&str> {
        self.attributes.as_ref()?.action_detail.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.attributes.as_ref()?.state.as_deref()
    }

    fn org(&self) -> Option<&str> {
        self.project.as_ref()?.namespace.as_deref()
    }

    fn repo(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    fn html_url(&self) -> Option<&str> {
        self.attributes.as_ref()?.url.as_deref()
    }

    fn number(&self) -> Option<String> {
        self.attributes.as_ref()?.number.map(|n| n.to_string())
    }

    fn id(&self) -> Option<String> {
        self.attributes.as_ref()?.id.as_ref().map(|n| n.to_string())
    }

    fn author(&self) -> Option<&str> {
        self.user.as_ref()?.display_login()
    }

    fn labels(&self) -> Vec<&str> {
        self.labels.iter().filter_map(|l| l.name.as_deref()).collect()
    }

    fn created_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.created_at
    }

    fn updated_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.updated_at
    }
}

impl EventView for PullRequestEvent {
    fn action(&self) -> Option<&str> {
        self.attributes.as_ref()?.action.as_deref()
    }

    fn action_detail(&self) -> Option<&str> {
        self.attributes.as_ref()?.action_detail.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.attributes.as_ref()?.state.as_deref()
    }

    fn org(&self) -> Option<&str> {
        self.project.as_ref()?.namespace.as_deref()
    }

    fn repo(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    fn html_url(&self) -> Option<&str> {
        self.attributes.as_ref()?.url.as_deref()
    }

    fn base(&self) -> Option<&str> {
        self.attributes.as_ref()?.target_branch.as_deref()
    }

    fn head(&self) -> Option<String> {
        let attrs = self.attributes.as_ref()?;
        let path = attrs.source.as_ref()?.path.as_deref()?;
        let branch = attrs.source_branch.as_deref()?;
        Some(format!("{path}/{branch}"))
    }

    fn number(&self) -> Option<String> {
        self.attributes
            .as_ref()
            .and_then(|a| a.number)
            .or_else(|| self.merge_request.as_ref().and_then(|p| p.number))
            .map(|n| n.to_string())
    }

    fn id(&self) -> Option<String> {
        self.attributes.as_ref()?.id.as_ref().map(|n| n.to_string())
    }

    fn author(&self) -> Option<&str> {
        self.user.as_ref()?.display_login()
    }

    fn labels(&self) -> Vec<&str> {
        self.labels.iter().filter_map(|l| l.name.as_deref()).collect()
    }

    fn created_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.created_at
    }

    fn updated_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.updated_at
    }
}

impl EventView for NoteEvent {
    fn action(&self) -> Option<&str> {
        if let Some(action) = self.issue.as_ref().and_then(|i| i.action.as_deref()) {
            return Some(action);
        }
        self.merge_request.as_ref()?.action.as_deref()
    }

    fn state(&self) -> Option<&str> {
        if let Some(state) = self.issue.as_ref().and_then(|i| i.state.as_deref()) {
            return Some(state);
        }
        self.merge_request.as_ref()?.state.as_deref()
    }

    fn org(&self) -> Option<&str> {
        self.project.as_ref()?.namespace.as_deref()
    }

    fn repo(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    fn html_url(&self) -> Option<&str> {
        self.attributes.as_ref()?.url.as_deref()
    }

    fn base(&self) -> Option<&str> {
        self.merge_request.as_ref()?.target_branch.as_deref()
    }

    fn head(&self) -> Option<String> {
        let pr = self.merge_request.as_ref()?;
        let path = pr.source.as_ref()?.path.as_deref()?;
        let branch = pr.source_branch.as_deref()?;
        Some(format!("{path}/{branch}"))
    }

    fn number(&self) -> Option<String> {
        self.merge_request
            .as_ref()
            .and_then(|p| p.number)
            .or_else(|| self.issue.as_ref().and_then(|i| i.number))
            .map(|n| n.to_string())
    }

    fn id(&self) -> Option<String> {
        self.merge_request
            .as_ref()
            .and_then(|p| p.id.as_ref())
            .or_else(|| self.issue.as_ref().and_then(|i| i.id.as_ref()))
            .map(|n| n.to_string())
    }

    fn author(&self) -> Option<&str> {
        if let Some(author) = self
            .issue
            .as_ref()
            .and_then(|i| i.author.as_ref())
            .and_then(|u| u.display_login())
        {
            return Some(author);
        }
        self.merge_request
            .as_ref()?
            .author
            .as_ref()?
            .display_login()
    }

    fn comment_id(&self) -> Option<&str> {
        self.attributes.as_ref()?.comment_id.as_deref()
    }

    fn comment_kind(&self) -> Option<&str> {
        self.attributes.as_ref()?.comment_kind.as_deref()
    }

    fn comment(&self) -> Option<&str> {
        self.attributes.as_ref()?.comment.as_deref()
    }

    fn commenter(&self) -> Option<&str> {
        self.user.as_ref()?.display_login()
    }

    fn created_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.created_at
    }

    fn updated_at(&self) -> Option<Timestamp> {
        self.attributes.as_ref()?.updated_at
    }
}

impl EventView for PushEvent {
    fn org(&self) -> Option<&str> {
        self.project.as_ref()?.namespace.as_deref()
    }

    fn repo(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    fn html_url(&self) -> Option<&str> {
        self.project.as_ref()?.web_url.as_deref()
    }

    // Push deliveries carry a single branch field; the contract reports it
    // as the base branch.
    fn base(&self) -> Option<&str> {
        self.git_branch.as_deref()
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

/// One webhook delivery, parsed into the variant selected by the
/// event-type header. `Unknown` covers unmapped event types and answers
/// every accessor with absent.
#[derive(Debug, Clone)]
pub enum Event {
    Issue(IssueEvent),
    PullRequest(PullRequestEvent),
    Note(NoteEvent),
    Push(PushEvent),
    Unknown,
}

/// No-op view behind [`Event::Unknown`].
struct NullEvent;

impl EventView for NullEvent {}

static NULL_EVENT: NullEvent = NullEvent;

impl Event {
    /// The uniform accessor view of this event.
    pub fn view(&self) -> &dyn EventView {
        match self {
            Event::Issue(e) => e,
            Event::PullRequest(e) => e,
            Event::Note(e) => e,
            Event::Push(e) => e,
            Event::Unknown => &NULL_EVENT,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Event::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_event() -> IssueEvent {
        serde_json::from_str(
            r##"{
                "uuid": "9f2d4c",
                "object_kind": "issue",
                "object_attributes": {
                    "id": 515443,
                    "action": "open",
                    "state": "opened",
                    "iid": 4,
                    "url": "https://forge.example.com/tangerine/widgets/issues/4",
                    "created_at": "2024-10-26T10:28:03+08:00",
                    "updated_at": "2024-10-26T10:28:03+08:00"
                },
                "user": { "username": "alice" },
                "project": {
                    "name": "widgets",
                    "namespace": "tangerine",
                    "path_with_namespace": "tangerine/widgets",
                    "web_url": "https://forge.example.com/tangerine/widgets"
                },
                "labels": [
                    { "id": 1, "name": "bug", "color": "#d73a4a" },
                    { "id": 2, "name": "help wanted", "color": "#008672" }
                ]
            }"##,
        )
        .unwrap()
    }

    fn pr_event() -> PullRequestEvent {
        serde_json::from_str(
            r#"{
                "object_kind": "merge_request",
                "object_attributes": {
                    "id": 190370,
                    "action": "open",
                    "update_reason": "",
                    "state": "opened",
                    "iid": 7,
                    "url": "https://forge.example.com/tangerine/widgets/merge_requests/7",
                    "target_branch": "main",
                    "source": { "path_with_namespace": "tangerine/widgets" },
                    "source_branch": "fix-handle-leak",
                    "created_at": "2024-10-26T10:32:40+08:00",
                    "updated_at": "2024-10-26T10:32:41+08:00"
                },
                "user": { "login": "bob", "username": "bob-mirror" },
                "project": { "name": "widgets", "namespace": "tangerine" },
                "labels": [ { "name": "kind/cleanup" } ]
            }"#,
        )
        .unwrap()
    }

    fn pr_note_event() -> NoteEvent {
        serde_json::from_str(
            r#"{
                "object_kind": "note",
                "object_attributes": {
                    "discussion_id": "71e9657489bcddbe",
                    "note": "/lgtm\n/approve",
                    "noteable_type": "MergeRequest",
                    "url": "https://forge.example.com/tangerine/widgets/merge_requests/7#note_71e9",
                    "created_at": "2024-10-26T11:44:15+08:00",
                    "updated_at": "2024-10-26T11:44:15+08:00"
                },
                "user": { "username": "carol" },
                "project": { "name": "widgets", "namespace": "tangerine" },
                "merge_request": {
                    "action": "open",
                    "state": "opened",
                    "iid": 7,
                    "id": 190370,
                    "target_branch": "main",
                    "source": { "path_with_namespace": "tangerine/widgets" },
                    "source_branch": "fix-handle-leak",
                    "author": { "username": "bob" }
                }
            }"#,
        )
        .unwrap()
    }

    fn issue_note_event() -> NoteEvent {
        serde_json::from_str(
            r#"{
                "object_kind": "note",
                "object_attributes": {
                    "discussion_id": "d3ab73b290d6fcd8",
                    "note": "needs more detail",
                    "noteable_type": "Issue",
                    "url": "https://forge.example.com/tangerine/widgets/issues/4#note_d3ab"
                },
                "user": { "username": "carol" },
                "project": { "name": "widgets", "namespace": "tangerine" },
                "issue": {
                    "state": "opened",
                    "iid": 4,
                    "id": 515443,
                    "author": { "username": "alice" }
                }
            }"#,
        )
        .unwrap()
    }

    fn push_event() -> PushEvent {
        serde_json::from_str(
            r#"{
                "event_name": "push",
                "object_kind": "push",
                "project": {
                    "name": "widgets",
                    "namespace": "tangerine",
                    "web_url": "https://forge.example.com/tangerine/widgets"
                },
                "git_branch": "dev",
                "user_username": "alice"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn issue_event_accessors() {
        let event = issue_event();
        assert_eq!(event.action(), Some("open"));
        assert_eq!(event.action_detail(), None);
        assert_eq!(event.state(), Some("opened"));
        assert_eq!(event.org(), Some("tangerine"));
        assert_eq!(event.repo(), Some("widgets"));
        assert_eq!(
            event.html_url(),
            Some("https://forge.example.com/tangerine/widgets/issues/4")
        );
        assert_eq!(event.number(), Some("4".to_string()));
        assert_eq!(event.id(), Some("515443".to_string()));
        assert_eq!(event.author(), Some("alice"));
        assert_eq!(event.labels(), vec!["bug", "help wanted"]);
        assert_eq!(
            event.created_at().unwrap().to_string(),
            "2024-10-26T10:28:03+08:00"
        );
        assert_eq!(
            event.updated_at().unwrap().to_string(),
            "2024-10-26T10:28:03+08:00"
        );

        // Branch and comment accessors are not meaningful for issues.
        assert_eq!(event.base(), None);
        assert_eq!(event.head(), None);
        assert_eq!(event.comment(), None);
        assert_eq!(event.comment_id(), None);
        assert_eq!(event.comment_kind(), None);
        assert_eq!(event.commenter(), None);
    }

    #[test]
    fn pr_event_accessors() {
        let event = pr_event();
        assert_eq!(event.action(), Some("open"));
        assert_eq!(event.action_detail(), Some(""));
        assert_eq!(event.state(), Some("opened"));
        assert_eq!(event.base(), Some("main"));
        assert_eq!(
            event.head(),
            Some("tangerine/widgets/fix-handle-leak".to_string())
        );
        assert_eq!(event.number(), Some("7".to_string()));
        assert_eq!(event.id(), Some("190370".to_string()));
        // login preferred over username
        assert_eq!(event.author(), Some("bob"));
        assert_eq!(event.labels(), vec!["kind/cleanup"]);
        assert_eq!(event.comment(), None);
    }

    #[test]
    fn pr_head_absent_unless_source_and_branch_present() {
        let mut event = pr_event();
        event.attributes.as_mut().unwrap().source_branch = None;
        assert_eq!(event.head(), None);

        let mut event = pr_event();
        event.attributes.as_mut().unwrap().source = None;
        assert_eq!(event.head(), None);
    }

    #[test]
    fn note_on_pr_accessors() {
        let event = pr_note_event();
        assert_eq!(event.action(), Some("open"));
        assert_eq!(event.state(), Some("opened"));
        assert_eq!(event.base(), Some("main"));
        assert_eq!(
            event.head(),
            Some("tangerine/widgets/fix-handle-leak".to_string())
        );
        assert_eq!(event.number(), Some("7".to_string()));
        assert_eq!(event.id(), Some("190370".to_string()));
        assert_eq!(event.author(), Some("bob"));
        assert_eq!(event.comment_id(), Some("71e9657489bcddbe"));
        assert_eq!(event.comment_kind(), Some("MergeRequest"));
        assert_eq!(event.comment(), Some("/lgtm\n/approve"));
        assert_eq!(event.commenter(), Some("carol"));
        // notes carry no labels
        assert!(event.labels().is_empty());
    }

    #[test]
    fn note_on_issue_accessors() {
        let event = issue_note_event();
        // the issue part has no action field
        assert_eq!(event.action(), None);
        assert_eq!(event.state(), Some("opened"));
        assert_eq!(event.base(), None);
        assert_eq!(event.head(), None);
        assert_eq!(event.number(), Some("4".to_string()));
        assert_eq!(event.id(), Some("515443".to_string()));
        assert_eq!(event.author(), Some("alice"));
        assert_eq!(event.comment_kind(), Some("Issue"));
        assert_eq!(event.comment(), Some("needs more detail"));
        assert_eq!(event.commenter(), Some("carol"));
    }

    #[test]
    fn push_event_accessors() {
        let event = push_event();
        assert_eq!(event.action(), None);
        assert_eq!(event.state(), None);
        assert_eq!(event.org(), Some("tangerine"));
        assert_eq!(event.repo(), Some("widgets"));
        assert_eq!(
            event.html_url(),
            Some("https://forge.example.com/tangerine/widgets")
        );
        assert_eq!(event.base(), Some("dev"));
        assert_eq!(event.head(), None);
        assert_eq!(event.number(), None);
        assert_eq!(event.author(), Some("alice"));
        assert!(event.labels().is_empty());
    }

    #[test]
    fn zero_valued_variants_answer_every_accessor_with_absent() {
        fn assert_all_absent(view: &dyn EventView) {
            assert_eq!(view.action(), None);
            assert_eq!(view.action_detail(), None);
            assert_eq!(view.state(), None);
            assert_eq!(view.org(), None);
            assert_eq!(view.repo(), None);
            assert_eq!(view.html_url(), None);
            assert_eq!(view.base(), None);
            assert_eq!(view.head(), None);
            assert_eq!(view.number(), None);
            assert_eq!(view.id(), None);
            assert_eq!(view.author(), None);
            assert_eq!(view.comment_id(), None);
            assert_eq!(view.comment_kind(), None);
            assert_eq!(view.comment(), None);
            assert_eq!(view.commenter(), None);
            assert!(view.labels().is_empty());
            assert!(view.created_at().is_none());
            assert!(view.updated_at().is_none());
        }

        assert_all_absent(&IssueEvent::default());
        assert_all_absent(&PullRequestEvent::default());
        assert_all_absent(&NoteEvent::default());
        assert_all_absent(&PushEvent::default());
        assert_all_absent(Event::Unknown.view());
    }
}
