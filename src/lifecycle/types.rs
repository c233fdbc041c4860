// Core types for the document lifecycle state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles an actor can hold when calling into the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// May edit and submit their own drafts
    Author,
    /// May approve documents under moderation
    Moderator,
    /// May reject, unpublish, and archive
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Author => write!(f, "Author"),
            Role::Moderator => write!(f, "Moderator"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// The (role, name) pair attempting an action.
///
/// Identity is an opaque string; the only check ever performed against it is
/// equality with the document's author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    pub name: String,
}

impl Actor {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.role, self.name)
    }
}

/// Lifecycle stages a document moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Being written; only the author may touch it
    Draft,
    /// Submitted for review
    Moderation,
    /// Live
    Published,
    /// Retired; no outgoing transitions
    Archived,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Draft => "Draft",
            Stage::Moderation => "Moderation",
            Stage::Published => "Published",
            Stage::Archived => "Archived",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Action names, used in reports and the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    SetContent,
    RequestReview,
    Approve,
    Reject,
    Unpublish,
    Archive,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::SetContent,
        ActionKind::RequestReview,
        ActionKind::Approve,
        ActionKind::Reject,
        ActionKind::Unpublish,
        ActionKind::Archive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::SetContent => "set_content",
            ActionKind::RequestReview => "request_review",
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Unpublish => "unpublish",
            ActionKind::Archive => "archive",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only snapshot of a document for the host to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub stage: Stage,
    pub author: String,
    pub preview: String,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] by {} - \"{}\"",
            self.stage, self.author, self.preview
        )
    }
}

/// Truncate content down to a preview of at most `max_chars` characters,
/// appending an ellipsis when anything was cut.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
