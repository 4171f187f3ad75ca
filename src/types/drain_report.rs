use std::fmt;
use std::time::Duration;

use super::RuleId;

/// Report returned by
/// [`Engine::run_rules_detailed()`](super::Engine::run_rules_detailed).
///
/// Lists the rule behind every firing in the order the agenda released
/// them, plus the wall-clock duration of the drain.
#[derive(Debug, Clone)]
#[must_use]
pub struct DrainReport {
    fired: Vec<RuleId>,
    duration: Duration,
}

impl DrainReport {
    pub(crate) fn new(fired: Vec<RuleId>, duration: Duration) -> Self {
        Self { fired, duration }
    }

    /// Rule ids in firing order. A rule appears once per matched tuple.
    #[must_use]
    pub fn fired(&self) -> &[RuleId] {
        &self.fired
    }

    /// Number of firings, same as [`Engine::run_rules()`](super::Engine::run_rules).
    #[must_use]
    pub fn count(&self) -> usize {
        self.fired.len()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for DrainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.fired.iter().map(ToString::to_string).collect();
        write!(f, "fired {} rules: [{}]", self.fired.len(), ids.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)
    }
}
