// Outcome reports for lifecycle actions.
//
// Permission and state violations are expected, recoverable events here, not
// exceptional control flow: every action call yields exactly one report on
// the injected sink and never an Err to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::types::{ActionKind, Actor, Role, Stage};

/// Why an action was refused
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    #[error("{action} is not defined while {stage}")]
    InvalidTransition { action: ActionKind, stage: Stage },
    #[error("{role} may not {action} while {stage}")]
    PermissionDenied {
        role: Role,
        action: ActionKind,
        stage: Stage,
    },
    #[error("author mismatch: document belongs to {expected}, not {actual}")]
    AuthorMismatch { expected: String, actual: String },
}

/// What an action call did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Guard passed; the document is now in `new_stage`
    Applied { new_stage: Stage },
    /// Guard failed; nothing changed
    Denied(DenialReason),
    /// Nothing to do (e.g. archiving an archived document); informational
    Redundant,
}

/// One report per action call, success or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: ActionKind,
    pub actor: Actor,
    /// Stage the document was in when the action arrived
    pub stage: Stage,
    pub outcome: ActionOutcome,
}

impl ActionReport {
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, ActionOutcome::Applied { .. })
    }
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ActionOutcome::Applied { new_stage } => write!(
                f,
                "✅ {} by {}: applied, document is now {}",
                self.action, self.actor, new_stage
            ),
            ActionOutcome::Denied(reason) => {
                write!(f, "🚫 {} by {}: denied, {}", self.action, self.actor, reason)
            }
            ActionOutcome::Redundant => write!(
                f,
                "ℹ️ {} by {}: already {}, nothing to do",
                self.action, self.actor, self.stage
            ),
        }
    }
}

/// Sink every report is delivered through.
///
/// The lifecycle never decides how outcomes are displayed; hosts inject
/// whatever sink suits them (structured logs, console, a test recorder).
pub trait ReportSink {
    fn report(&self, report: &ActionReport);
}

/// Default sink: structured logs via `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ReportSink for TracingReporter {
    fn report(&self, report: &ActionReport) {
        match &report.outcome {
            ActionOutcome::Applied { new_stage } => {
                tracing::info!(
                    action = %report.action,
                    role = %report.actor.role,
                    actor = %report.actor.name,
                    from = %report.stage,
                    to = %new_stage,
                    "action applied"
                );
            }
            ActionOutcome::Denied(reason) => {
                tracing::warn!(
                    action = %report.action,
                    role = %report.actor.role,
                    actor = %report.actor.name,
                    stage = %report.stage,
                    reason = %reason,
                    "action denied"
                );
            }
            ActionOutcome::Redundant => {
                tracing::info!(
                    action = %report.action,
                    role = %report.actor.role,
                    actor = %report.actor.name,
                    stage = %report.stage,
                    "redundant action ignored"
                );
            }
        }
    }
}

/// Console sink used by the demo binary: one human-readable line per call
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ReportSink for ConsoleReporter {
    fn report(&self, report: &ActionReport) {
        println!("{report}");
    }
}
