use serde::{Deserialize, Serialize};
use statig::prelude::*;

use super::report::{
    ActionOutcome, ActionReport, DenialReason, ReportSink, TracingReporter,
};
use super::types::{content_preview, ActionKind, Actor, DocumentStatus, Role, Stage};

/// Number of characters shown in a status preview unless configured otherwise
pub const DEFAULT_PREVIEW_CHARS: usize = 30;

/// Actions that can be requested on a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentAction {
    SetContent { text: String, actor: Actor },
    RequestReview { actor: Actor },
    Approve { actor: Actor },
    Reject { actor: Actor },
    Unpublish { actor: Actor },
    Archive { actor: Actor },
}

impl DocumentAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            DocumentAction::SetContent { .. } => ActionKind::SetContent,
            DocumentAction::RequestReview { .. } => ActionKind::RequestReview,
            DocumentAction::Approve { .. } => ActionKind::Approve,
            DocumentAction::Reject { .. } => ActionKind::Reject,
            DocumentAction::Unpublish { .. } => ActionKind::Unpublish,
            DocumentAction::Archive { .. } => ActionKind::Archive,
        }
    }

    pub fn actor(&self) -> &Actor {
        match self {
            DocumentAction::SetContent { actor, .. }
            | DocumentAction::RequestReview { actor }
            | DocumentAction::Approve { actor }
            | DocumentAction::Reject { actor }
            | DocumentAction::Unpublish { actor }
            | DocumentAction::Archive { actor } => actor,
        }
    }
}

/// Shared storage for the lifecycle machine.
///
/// The statig-generated `State` tracks which stage handler is active; `stage`
/// mirrors it so status queries never have to reach into the generated state.
/// Both only ever change together, inside a successful transition.
pub struct DocumentStateMachine {
    author: String,
    content: String,
    stage: Stage,
    preview_chars: usize,
    reporter: Box<dyn ReportSink>,
}

impl DocumentStateMachine {
    pub fn new(author: impl Into<String>, reporter: Box<dyn ReportSink>) -> Self {
        Self {
            author: author.into(),
            content: String::new(),
            stage: Stage::Draft,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            reporter,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Read-only snapshot: stage name, author, truncated content preview
    pub fn status(&self) -> DocumentStatus {
        DocumentStatus {
            stage: self.stage,
            author: self.author.clone(),
            preview: content_preview(&self.content, self.preview_chars),
        }
    }

    /// Ownership guard for draft-only actions: Author role and matching name
    fn check_author(&self, action: ActionKind, actor: &Actor) -> Result<(), DenialReason> {
        if actor.role != Role::Author {
            return Err(DenialReason::PermissionDenied {
                role: actor.role,
                action,
                stage: self.stage,
            });
        }
        if actor.name != self.author {
            return Err(DenialReason::AuthorMismatch {
                expected: self.author.clone(),
                actual: actor.name.clone(),
            });
        }
        Ok(())
    }

    /// Role guard for moderation actions; identity is not checked
    fn check_role(
        &self,
        action: ActionKind,
        actor: &Actor,
        allowed: &[Role],
    ) -> Result<(), DenialReason> {
        if allowed.contains(&actor.role) {
            Ok(())
        } else {
            Err(DenialReason::PermissionDenied {
                role: actor.role,
                action,
                stage: self.stage,
            })
        }
    }

    fn emit(&self, action: ActionKind, actor: &Actor, outcome: ActionOutcome) {
        self.reporter.report(&ActionReport {
            action,
            actor: actor.clone(),
            stage: self.stage,
            outcome,
        });
    }

    /// Report success and move the stage mirror; the caller returns the
    /// matching `Transition` (or `Handled` when the stage stays put).
    fn apply(&mut self, action: ActionKind, actor: &Actor, new_stage: Stage) {
        self.emit(action, actor, ActionOutcome::Applied { new_stage });
        self.stage = new_stage;
    }

    fn deny(&self, event: &DocumentAction, reason: DenialReason) {
        self.emit(event.kind(), event.actor(), ActionOutcome::Denied(reason));
    }

    /// Denial for actions that are meaningless in the current stage,
    /// regardless of who asks
    fn deny_invalid(&self, event: &DocumentAction) {
        self.deny(
            event,
            DenialReason::InvalidTransition {
                action: event.kind(),
                stage: self.stage,
            },
        );
    }

    /// Admin may archive from any live stage
    fn handle_archive(&mut self, event: &DocumentAction, actor: &Actor) -> Outcome<State> {
        match self.check_role(ActionKind::Archive, actor, &[Role::Admin]) {
            Ok(()) => {
                self.apply(ActionKind::Archive, actor, Stage::Archived);
                Transition(State::archived())
            }
            Err(reason) => {
                self.deny(event, reason);
                Handled
            }
        }
    }
}

#[state_machine(initial = "State::draft()")]
impl DocumentStateMachine {
    #[state]
    fn draft(&mut self, event: &DocumentAction) -> Outcome<State> {
        match event {
            DocumentAction::SetContent { text, actor } => {
                match self.check_author(ActionKind::SetContent, actor) {
                    Ok(()) => {
                        self.content = text.clone();
                        self.apply(ActionKind::SetContent, actor, Stage::Draft);
                    }
                    Err(reason) => self.deny(event, reason),
                }
                Handled
            }
            DocumentAction::RequestReview { actor } => {
                match self.check_author(ActionKind::RequestReview, actor) {
                    Ok(()) => {
                        self.apply(ActionKind::RequestReview, actor, Stage::Moderation);
                        Transition(State::moderation())
                    }
                    Err(reason) => {
                        self.deny(event, reason);
                        Handled
                    }
                }
            }
            DocumentAction::Archive { actor } => self.handle_archive(event, actor),
            _ => {
                self.deny_invalid(event);
                Handled
            }
        }
    }

    #[state]
    fn moderation(&mut self, event: &DocumentAction) -> Outcome<State> {
        match event {
            DocumentAction::Approve { actor } => {
                match self.check_role(ActionKind::Approve, actor, &[Role::Moderator, Role::Admin]) {
                    Ok(()) => {
                        self.apply(ActionKind::Approve, actor, Stage::Published);
                        Transition(State::published())
                    }
                    Err(reason) => {
                        self.deny(event, reason);
                        Handled
                    }
                }
            }
            DocumentAction::Reject { actor } => {
                match self.check_role(ActionKind::Reject, actor, &[Role::Admin]) {
                    Ok(()) => {
                        self.apply(ActionKind::Reject, actor, Stage::Draft);
                        Transition(State::draft())
                    }
                    Err(reason) => {
                        self.deny(event, reason);
                        Handled
                    }
                }
            }
            DocumentAction::Archive { actor } => self.handle_archive(event, actor),
            _ => {
                self.deny_invalid(event);
                Handled
            }
        }
    }

    #[state]
    fn published(&mut self, event: &DocumentAction) -> Outcome<State> {
        match event {
            DocumentAction::Unpublish { actor } => {
                match self.check_role(ActionKind::Unpublish, actor, &[Role::Admin]) {
                    Ok(()) => {
                        self.apply(ActionKind::Unpublish, actor, Stage::Draft);
                        Transition(State::draft())
                    }
                    Err(reason) => {
                        self.deny(event, reason);
                        Handled
                    }
                }
            }
            DocumentAction::Archive { actor } => self.handle_archive(event, actor),
            _ => {
                self.deny_invalid(event);
                Handled
            }
        }
    }

    #[state]
    fn archived(&mut self, event: &DocumentAction) -> Outcome<State> {
        match event {
            // Already terminal; repeating it is informational, not an error
            DocumentAction::Archive { actor } => {
                self.emit(ActionKind::Archive, actor, ActionOutcome::Redundant);
                Handled
            }
            _ => {
                self.deny_invalid(event);
                Handled
            }
        }
    }
}

/// A document plus its lifecycle machine, exposing the full action surface.
///
/// Every action delegates to the current stage handler; denied actions leave
/// the document untouched and surface only through the report sink.
pub struct Document {
    machine: StateMachine<DocumentStateMachine>,
}

impl Document {
    /// New draft document reporting through structured logs
    pub fn new(author: impl Into<String>) -> Self {
        Self::with_reporter(author, Box::new(TracingReporter))
    }

    pub fn with_reporter(author: impl Into<String>, reporter: Box<dyn ReportSink>) -> Self {
        Self {
            machine: DocumentStateMachine::new(author, reporter).state_machine(),
        }
    }

    /// Full-control constructor for hosts that configure the preview length
    pub fn with_options(
        author: impl Into<String>,
        reporter: Box<dyn ReportSink>,
        preview_chars: usize,
    ) -> Self {
        Self {
            machine: DocumentStateMachine::new(author, reporter)
                .with_preview_chars(preview_chars)
                .state_machine(),
        }
    }

    pub fn set_content(&mut self, text: impl Into<String>, actor: Actor) {
        self.machine.handle(&DocumentAction::SetContent {
            text: text.into(),
            actor,
        });
    }

    pub fn request_review(&mut self, actor: Actor) {
        self.machine.handle(&DocumentAction::RequestReview { actor });
    }

    pub fn approve(&mut self, actor: Actor) {
        self.machine.handle(&DocumentAction::Approve { actor });
    }

    pub fn reject(&mut self, actor: Actor) {
        self.machine.handle(&DocumentAction::Reject { actor });
    }

    pub fn unpublish(&mut self, actor: Actor) {
        self.machine.handle(&DocumentAction::Unpublish { actor });
    }

    pub fn archive(&mut self, actor: Actor) {
        self.machine.handle(&DocumentAction::Archive { actor });
    }

    /// Route an already-built action, e.g. one deserialized by a host
    pub fn handle(&mut self, action: &DocumentAction) {
        self.machine.handle(action);
    }

    pub fn author(&self) -> &str {
        self.machine.inner().author()
    }

    pub fn content(&self) -> &str {
        self.machine.inner().content()
    }

    pub fn stage(&self) -> Stage {
        self.machine.inner().stage()
    }

    pub fn status(&self) -> DocumentStatus {
        self.machine.inner().status()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("author", &self.author())
            .field("stage", &self.stage())
            .field("content_len", &self.content().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_starts_as_empty_draft() {
        let doc = Document::new("Alice");
        assert_eq!(doc.stage(), Stage::Draft);
        assert_eq!(doc.content(), "");
        assert_eq!(doc.author(), "Alice");
    }

    #[test]
    fn accessors_read_through_to_the_machine() {
        let mut doc = Document::new("Alice");
        doc.set_content("draft text", Actor::new(Role::Author, "Alice"));
        doc.request_review(Actor::new(Role::Author, "Alice"));

        assert_eq!(doc.author(), "Alice");
        assert_eq!(doc.content(), "draft text");
        assert_eq!(doc.stage(), Stage::Moderation);
        assert_eq!(
            doc.status(),
            DocumentStatus {
                stage: Stage::Moderation,
                author: "Alice".to_string(),
                preview: "draft text".to_string(),
            }
        );
    }

    #[test]
    fn author_edits_and_submits_their_draft() {
        let mut doc = Document::new("Alice");

        doc.set_content("draft text", Actor::new(Role::Author, "Alice"));
        assert_eq!(doc.stage(), Stage::Draft);
        assert_eq!(doc.content(), "draft text");

        doc.request_review(Actor::new(Role::Author, "Alice"));
        assert_eq!(doc.stage(), Stage::Moderation);
    }

    #[test]
    fn another_author_cannot_touch_the_draft() {
        let mut doc = Document::new("Alice");

        doc.set_content("hijacked", Actor::new(Role::Author, "Mallory"));
        assert_eq!(doc.content(), "");

        doc.request_review(Actor::new(Role::Author, "Mallory"));
        assert_eq!(doc.stage(), Stage::Draft);
    }

    #[test]
    fn moderation_locks_content_and_gates_approval_by_role() {
        let mut doc = Document::new("Alice");
        doc.set_content("draft text", Actor::new(Role::Author, "Alice"));
        doc.request_review(Actor::new(Role::Author, "Alice"));

        // Content is frozen under moderation, even for the author
        doc.set_content("x", Actor::new(Role::Author, "Alice"));
        assert_eq!(doc.content(), "draft text");

        // Wrong role cannot approve
        doc.approve(Actor::new(Role::Author, "Bob"));
        assert_eq!(doc.stage(), Stage::Moderation);

        doc.approve(Actor::new(Role::Moderator, "Charlie"));
        assert_eq!(doc.stage(), Stage::Published);
    }

    #[test]
    fn admin_rejects_back_to_draft_but_moderator_cannot() {
        let mut doc = Document::new("Alice");
        doc.request_review(Actor::new(Role::Author, "Alice"));

        doc.reject(Actor::new(Role::Moderator, "Charlie"));
        assert_eq!(doc.stage(), Stage::Moderation);

        doc.reject(Actor::new(Role::Admin, "Dave"));
        assert_eq!(doc.stage(), Stage::Draft);
    }

    #[test]
    fn admin_unpublishes_back_to_draft() {
        let mut doc = Document::new("Alice");
        doc.request_review(Actor::new(Role::Author, "Alice"));
        doc.approve(Actor::new(Role::Admin, "Dave"));
        assert_eq!(doc.stage(), Stage::Published);

        doc.unpublish(Actor::new(Role::Moderator, "Charlie"));
        assert_eq!(doc.stage(), Stage::Published);

        doc.unpublish(Actor::new(Role::Admin, "Dave"));
        assert_eq!(doc.stage(), Stage::Draft);
    }

    #[test]
    fn admin_archives_from_every_live_stage() {
        let admin = Actor::new(Role::Admin, "Dave");

        let mut from_draft = Document::new("Alice");
        from_draft.archive(admin.clone());
        assert_eq!(from_draft.stage(), Stage::Archived);

        let mut from_moderation = Document::new("Alice");
        from_moderation.request_review(Actor::new(Role::Author, "Alice"));
        from_moderation.archive(admin.clone());
        assert_eq!(from_moderation.stage(), Stage::Archived);

        let mut from_published = Document::new("Alice");
        from_published.request_review(Actor::new(Role::Author, "Alice"));
        from_published.approve(Actor::new(Role::Moderator, "Charlie"));
        from_published.archive(admin);
        assert_eq!(from_published.stage(), Stage::Archived);
    }

    #[test]
    fn archived_document_ignores_everything() {
        let mut doc = Document::new("Alice");
        doc.set_content("final", Actor::new(Role::Author, "Alice"));
        doc.archive(Actor::new(Role::Admin, "Dave"));
        assert_eq!(doc.stage(), Stage::Archived);

        doc.set_content("zombie edit", Actor::new(Role::Author, "Alice"));
        doc.request_review(Actor::new(Role::Author, "Alice"));
        doc.approve(Actor::new(Role::Admin, "Dave"));
        doc.unpublish(Actor::new(Role::Admin, "Dave"));
        // Archiving again is a reported no-op
        doc.archive(Actor::new(Role::Admin, "Dave"));

        assert_eq!(doc.stage(), Stage::Archived);
        assert_eq!(doc.content(), "final");
    }

    #[test]
    fn status_snapshot_is_stable_between_actions() {
        let mut doc = Document::new("Alice");
        doc.set_content("a".repeat(45), Actor::new(Role::Author, "Alice"));

        let first = doc.status();
        let second = doc.status();
        assert_eq!(first, second);
        assert_eq!(first.stage, Stage::Draft);
        assert_eq!(first.author, "Alice");
        assert_eq!(first.preview.chars().count(), DEFAULT_PREVIEW_CHARS + 1);
        assert!(first.preview.ends_with('…'));
    }
}
