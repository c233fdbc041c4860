// Mock report sink for testing - records instead of logging

use std::cell::RefCell;
use std::rc::Rc;

use super::report::{ActionReport, ReportSink};

/// Sink that records every report for later inspection.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// document and keep another to assert on.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Rc<RefCell<Vec<ActionReport>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ActionReport> {
        self.reports.borrow().clone()
    }

    pub fn last(&self) -> Option<ActionReport> {
        self.reports.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    /// Rendered report lines, as a console sink would have printed them
    pub fn lines(&self) -> Vec<String> {
        self.reports.borrow().iter().map(ToString::to_string).collect()
    }
}

impl ReportSink for RecordingReporter {
    fn report(&self, report: &ActionReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}
