// Docflow Library - Role-Gated Document Lifecycle
// This exposes the core components for testing and integration

pub mod config;
pub mod lifecycle;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, init_config, DocflowConfig};
pub use lifecycle::{
    ActionKind, ActionOutcome, ActionReport, Actor, ConsoleReporter, DenialReason, Document,
    DocumentAction, DocumentStatus, ReportSink, Role, Stage, TracingReporter,
};
pub use telemetry::{create_lifecycle_span, generate_correlation_id, init_telemetry};
