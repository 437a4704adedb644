//! Terminal aggregation sink for a batch install.
//!
//! The report accumulates one outcome per requested top-level name and never
//! fails; partial failure of a batch is normal operation, not an error path.

use derive_more::Display;
use std::collections::BTreeMap;

/// What happened to one directly requested hook.
#[derive(Debug, Clone, Display, PartialEq, Eq)]
pub enum Outcome {
    #[display("installed")]
    Installed,
    #[display("skipped (already present)")]
    Skipped,
    #[display("failed: {_0}")]
    Failed(String),
}

/// Per-requested-name outcomes of one `add` invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    outcomes: BTreeMap<String, Outcome>,
}

impl InstallReport {
    pub fn installed(&mut self, name: &str) {
        self.record(name, Outcome::Installed);
    }

    pub fn skipped(&mut self, name: &str) {
        self.record(name, Outcome::Skipped);
    }

    pub fn failed(&mut self, name: &str, reason: impl Into<String>) {
        self.record(name, Outcome::Failed(reason.into()));
    }

    fn record(&mut self, name: &str, outcome: Outcome) {
        self.outcomes.insert(name.to_string(), outcome);
    }

    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.outcomes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.outcomes.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn count_installed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Installed))
    }

    pub fn count_skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped))
    }

    pub fn count_failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.values().filter(|outcome| predicate(outcome)).count()
    }

    /// Whether anything at all got installed.
    pub fn any_installed(&self) -> bool {
        self.count_installed() > 0
    }

    /// Print one line per requested name plus a totals line.
    pub fn print_summary(&self) {
        for (name, outcome) in self.iter() {
            println!("{name}: {outcome}");
        }
        println!(
            "{installed} installed, {skipped} skipped, {failed} failed",
            installed = self.count_installed(),
            skipped = self.count_skipped(),
            failed = self.count_failed(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accumulates_one_outcome_per_name() {
        let mut report = InstallReport::default();
        report.installed("useA");
        report.skipped("useB");
        report.failed("useZ", "unknown hook");

        assert_eq!(report.outcome("useA"), Some(&Outcome::Installed));
        assert_eq!(report.outcome("useB"), Some(&Outcome::Skipped));
        assert_eq!(report.outcome("useZ"), Some(&Outcome::Failed("unknown hook".to_string())));
        assert_eq!(report.count_installed(), 1);
        assert_eq!(report.count_skipped(), 1);
        assert_eq!(report.count_failed(), 1);
        assert!(report.any_installed());
    }

    #[test]
    fn later_outcomes_replace_earlier_ones() {
        let mut report = InstallReport::default();
        report.failed("useA", "transient");
        report.installed("useA");
        assert_eq!(report.outcome("useA"), Some(&Outcome::Installed));
    }

    #[test]
    fn outcome_display_is_human_readable() {
        assert_eq!(Outcome::Installed.to_string(), "installed");
        assert_eq!(Outcome::Skipped.to_string(), "skipped (already present)");
        assert_eq!(Outcome::Failed("no entry".to_string()).to_string(), "failed: no entry");
    }
}
