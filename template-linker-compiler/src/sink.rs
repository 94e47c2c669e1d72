//! Diagnostic sinks

use parking_lot::Mutex;
use template_linker_core::ErrorReport;

/// Receiver for the reports produced while compiling a template.
///
/// Reporting is fire-and-forget: the adapter keeps going after every call,
/// and the host decides afterwards whether the build should fail.
pub trait DiagnosticSink {
    fn report_error(&self, report: ErrorReport);
}

impl<F> DiagnosticSink for F
where
    F: Fn(ErrorReport),
{
    fn report_error(&self, report: ErrorReport) {
        self(report)
    }
}

/// Sink that records every report in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<ErrorReport>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports received so far
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    pub fn into_reports(self) -> Vec<ErrorReport> {
        self.reports.into_inner()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report_error(&self, report: ErrorReport) {
        self.reports.lock().push(report);
    }
}

/// Sink that emits every report as a `tracing` error event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report_error(&self, report: ErrorReport) {
        match report.frame {
            Some(frame) => tracing::error!("{}: {}\n{}", report.id, report.message, frame),
            None => tracing::error!("{}: {}", report.id, report.message),
        }
    }
}
