//! Injected reporting collaborator.
//!
//! # Responsibility
//! - Give repository code one seam for reporting notable conditions.
//! - Let tests capture reported conditions without a global logger.
//!
//! # Invariants
//! - Reporting never fails and never panics.

use log::{error, info, warn};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};

/// Severity of a reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl Display for ReportLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Sink for conditions the caller may want to surface.
pub trait Reporter {
    fn report(&self, level: ReportLevel, message: &str);

    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.report(ReportLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }

    fn critical(&self, message: &str) {
        self.report(ReportLevel::Critical, message);
    }
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn report(&self, level: ReportLevel, message: &str) {
        (**self).report(level, message);
    }
}

/// Forwards reports to the `log` facade.
///
/// `log` has no critical level, so critical reports go out at `error` with a
/// `severity=critical` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Info => info!("{message}"),
            ReportLevel::Warning => warn!("{message}"),
            ReportLevel::Error => error!("{message}"),
            ReportLevel::Critical => error!("severity=critical {message}"),
        }
    }
}

/// Keeps every report in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<(ReportLevel, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all reports so far.
    pub fn entries(&self) -> Vec<(ReportLevel, String)> {
        self.entries.borrow().clone()
    }

    /// Returns messages reported at exactly `level`.
    pub fn messages_at(&self, level: ReportLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn contains(&self, level: ReportLevel, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(entry_level, message)| *entry_level == level && message.contains(needle))
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryReporter, ReportLevel, Reporter};

    #[test]
    fn memory_reporter_keeps_order_and_levels() {
        let reporter = MemoryReporter::new();
        reporter.info("one");
        reporter.warning("two");
        reporter.critical("three");

        assert_eq!(
            reporter.entries(),
            vec![
                (ReportLevel::Info, "one".to_string()),
                (ReportLevel::Warning, "two".to_string()),
                (ReportLevel::Critical, "three".to_string()),
            ]
        );
        assert_eq!(reporter.messages_at(ReportLevel::Warning), vec!["two"]);
        assert!(reporter.contains(ReportLevel::Critical, "thr"));

        reporter.clear();
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn borrowed_reporter_forwards() {
        let reporter = MemoryReporter::new();
        let borrowed = &reporter;
        borrowed.error("disk full");
        assert!(reporter.contains(ReportLevel::Error, "disk full"));
    }
}
