// Document Lifecycle Module - Role-Gated State Machine
//
// A document's permitted actions depend on its lifecycle stage; each stage
// handler owns its own permission logic and transition decisions. Outcomes
// are delivered through an injected report sink for testability.

pub mod report;
pub mod state_machine;
pub mod types;

#[cfg(test)]
pub mod mocks;


pub use report::{
    ActionOutcome, ActionReport, ConsoleReporter, DenialReason, ReportSink, TracingReporter,
};
pub use state_machine::{Document, DocumentAction, DocumentStateMachine, DEFAULT_PREVIEW_CHARS};
pub use types::{ActionKind, Actor, DocumentStatus, Role, Stage};
