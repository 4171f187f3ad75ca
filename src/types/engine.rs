use std::fmt;
use std::sync::Arc;

use super::agenda::Agenda;
use super::config::EngineConfig;
use super::drain_report::DrainReport;
use super::error::EngineError;
use super::rule::{FactId, Rule, RuleId, Trigger};
use super::value::Value;
use super::{Bindings, Term};
use crate::index::{DbClassTable, Signature};

/// A forward-chaining production-rule engine.
///
/// Holds the fact store, the rules, the DBClass index and the agenda. Facts
/// and rules are only ever added. Adding either one queues every match it
/// completes; [`run_rules`](Self::run_rules) fires the queue until it is
/// empty.
///
/// # Example
///
/// ```
/// use ltre::{Engine, Trigger};
///
/// let mut engine = Engine::new();
/// engine.add_rule(
///     Trigger::single("(parent ?p ?c)".parse().unwrap()),
///     vec!["(assert! (child ?c ?p))".parse().unwrap()],
/// );
/// engine.assert_fact("(parent ann bob)".parse().unwrap()).unwrap();
/// assert_eq!(engine.run_rules().unwrap(), 1);
/// assert!(engine.contains_fact(&"(child bob ann)".parse().unwrap()));
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) facts: Vec<Term>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) index: DbClassTable,
    pub(crate) agenda: Agenda,
    pub(crate) rule_counter: u64,
    pub(crate) rules_run: usize,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a rule with an empty environment. Every match against facts
    /// already in the store is queued immediately.
    pub fn add_rule(&mut self, trigger: impl Into<Trigger>, body: Vec<Term>) -> RuleId {
        self.add_rule_in(trigger, body, &Bindings::new())
    }

    /// Add a rule that captures `environment`. The captured bindings seed
    /// every unification against the rule's trigger.
    pub fn add_rule_in(
        &mut self,
        trigger: impl Into<Trigger>,
        body: Vec<Term>,
        environment: &Bindings,
    ) -> RuleId {
        crate::driver::add_rule(self, trigger.into(), Arc::from(body), environment.clone())
    }

    /// Store a ground fact and queue every rule match it completes.
    ///
    /// Facts are not deduplicated: asserting the same fact twice stores it
    /// twice and matches twice.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NonGroundFact`] if `fact` contains a variable.
    pub fn assert_fact(&mut self, fact: Term) -> Result<FactId, EngineError> {
        crate::driver::assert_fact(self, fact)
    }

    /// Fire queued matches, most recent first, until the agenda is empty.
    /// Returns the number of firings.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`] raised by a rule body. Matches not
    /// yet fired stay on the agenda.
    pub fn run_rules(&mut self) -> Result<usize, EngineError> {
        let mut fired = Vec::new();
        crate::driver::run_rules(self, &mut fired)?;
        Ok(fired.len())
    }

    /// Same as [`run_rules`](Self::run_rules), reporting which rules fired
    /// and how long the drain took.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`] raised by a rule body. No report is
    /// produced in that case; firings up to and including the failing one
    /// are still counted by [`rules_run`](Self::rules_run) and keep their
    /// effects.
    pub fn run_rules_detailed(&mut self) -> Result<DrainReport, EngineError> {
        let start = std::time::Instant::now();
        let mut fired = Vec::new();
        crate::driver::run_rules(self, &mut fired)?;
        Ok(DrainReport::new(fired, start.elapsed()))
    }

    /// Evaluate a form with no bindings in scope.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if evaluation fails.
    pub fn eval(&mut self, form: &Term) -> Result<Value, EngineError> {
        crate::evaluate::eval(self, form, &Bindings::new())
    }

    /// Evaluate a form with `bindings` in scope.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if evaluation fails.
    pub fn eval_in(&mut self, form: &Term, bindings: &Bindings) -> Result<Value, EngineError> {
        crate::evaluate::eval(self, form, bindings)
    }

    /// Read every top-level form of `input`, evaluate it and drain the agenda
    /// after each one. Returns the total number of firings.
    ///
    /// # Errors
    ///
    /// Returns [`LtreError`](crate::LtreError) on parse or evaluation failure.
    pub fn run_program(&mut self, input: &str) -> Result<usize, crate::LtreError> {
        let program = crate::parse::parse_with(input, self.config.variable_marker())?;
        let mut fired = 0;
        for form in &program.forms {
            self.eval(form)?;
            fired += self.run_rules()?;
        }
        Ok(fired)
    }

    /// Build a default engine and run `input` in it.
    ///
    /// # Errors
    ///
    /// Returns [`LtreError`](crate::LtreError) on parse or evaluation failure.
    pub fn from_program(input: &str) -> Result<Self, crate::LtreError> {
        let mut engine = Self::new();
        engine.run_program(input)?;
        Ok(engine)
    }

    /// Read a program file and run it.
    ///
    /// # Errors
    ///
    /// Returns [`LtreError`](crate::LtreError) on I/O, parse, or evaluation
    /// failure.
    pub fn load_file(
        &mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<usize, crate::LtreError> {
        let input = std::fs::read_to_string(path)?;
        self.run_program(&input)
    }

    /// Rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        let pos = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.rules.get(pos)
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Facts in assertion order.
    #[must_use]
    pub fn facts(&self) -> &[Term] {
        &self.facts
    }

    #[must_use]
    pub fn fact(&self, id: FactId) -> Option<&Term> {
        self.facts.get(id.index())
    }

    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn contains_fact(&self, fact: &Term) -> bool {
        self.index
            .lookup_facts(&Signature::of(fact))
            .into_iter()
            .any(|id| &self.facts[id.index()] == fact)
    }

    /// Facts that unify with `pattern`, in assertion order.
    #[must_use]
    pub fn fetch(&self, pattern: &Term) -> Vec<&Term> {
        self.index
            .lookup_facts(&Signature::of(pattern))
            .into_iter()
            .map(|id| &self.facts[id.index()])
            .filter(|fact| crate::unify::unify(fact, pattern, &Bindings::new()).is_some())
            .collect()
    }

    /// Matches queued but not yet fired.
    #[must_use]
    pub fn agenda_len(&self) -> usize {
        self.agenda.len()
    }

    /// Firings over the lifetime of this engine.
    #[must_use]
    pub fn rules_run(&self) -> usize {
        self.rules_run
    }

    #[must_use]
    pub fn index(&self) -> &DbClassTable {
        &self.index
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({} rules, {} facts, {} dbclasses)",
            self.config.title(),
            self.rules.len(),
            self.facts.len(),
            self.index.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sym, var};

    fn t(text: &str) -> Term {
        text.parse().unwrap()
    }

    #[test]
    fn rule_ids_start_at_one() {
        let mut engine = Engine::new();
        let first = engine.add_rule(t("(p ?x)"), vec![]);
        let second = engine.add_rule(t("(q ?x)"), vec![]);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(engine.rule(first).map(Rule::id), Some(first));
        assert!(engine.rule(RuleId(0)).is_none());
        assert!(engine.rule(RuleId(3)).is_none());
    }

    #[test]
    fn facts_keep_assertion_order() {
        let mut engine = Engine::new();
        let a = engine.assert_fact(t("(p 1)")).unwrap();
        let b = engine.assert_fact(t("(p 2)")).unwrap();
        assert_eq!(engine.facts(), &[t("(p 1)"), t("(p 2)")]);
        assert_eq!(engine.fact(a), Some(&t("(p 1)")));
        assert_eq!(engine.fact(b), Some(&t("(p 2)")));
    }

    #[test]
    fn non_ground_fact_rejected_and_not_stored() {
        let mut engine = Engine::new();
        let err = engine.assert_fact(var("?x")).unwrap_err();
        assert!(matches!(err, EngineError::NonGroundFact { .. }));
        assert_eq!(engine.fact_count(), 0);
    }

    #[test]
    fn fetch_uses_unification() {
        let mut engine = Engine::new();
        engine.assert_fact(t("(color sky blue)")).unwrap();
        engine.assert_fact(t("(color grass green)")).unwrap();
        engine.assert_fact(t("(size sky big)")).unwrap();

        assert_eq!(engine.fetch(&t("(color ?x ?y)")).len(), 2);
        assert_eq!(engine.fetch(&t("(color ?x blue)")), vec![&t("(color sky blue)")]);
        assert_eq!(engine.fetch(&var("?any")).len(), 3);
        assert!(engine.fetch(&t("(weight ?x)")).is_empty());
    }

    #[test]
    fn contains_fact_is_exact() {
        let mut engine = Engine::new();
        engine.assert_fact(sym("rain")).unwrap();
        assert!(engine.contains_fact(&sym("rain")));
        assert!(!engine.contains_fact(&sym("snow")));
    }

    #[test]
    fn agenda_holds_matches_until_drained() {
        let mut engine = Engine::new();
        engine.add_rule(t("(p ?x)"), vec![]);
        engine.assert_fact(t("(p 1)")).unwrap();
        engine.assert_fact(t("(p 2)")).unwrap();
        assert_eq!(engine.agenda_len(), 2);
        assert_eq!(engine.run_rules().unwrap(), 2);
        assert_eq!(engine.agenda_len(), 0);
        assert_eq!(engine.rules_run(), 2);
    }

    #[test]
    fn detailed_drain_reports_firing_order() {
        let mut engine = Engine::new();
        let r1 = engine.add_rule(t("(p ?x)"), vec![]);
        let r2 = engine.add_rule(t("(q ?x)"), vec![]);
        engine.assert_fact(t("(p 1)")).unwrap();
        engine.assert_fact(t("(q 1)")).unwrap();
        let report = engine.run_rules_detailed().unwrap();
        assert_eq!(report.fired(), &[r2, r1]);
        assert_eq!(report.count(), 2);
    }

    #[test]
    fn failed_detailed_drain_still_counts_firings() {
        let mut engine = Engine::new();
        engine.add_rule(t("(p ?x)"), vec![t("(assert! (q ?x))")]);
        engine.add_rule(t("(bad ?x)"), vec![t("(mod ?x 0)")]);
        engine.assert_fact(t("(bad 1)")).unwrap();
        engine.assert_fact(t("(p 1)")).unwrap();

        let err = engine.run_rules_detailed().unwrap_err();
        assert!(matches!(err, EngineError::DivisionByZero { .. }));
        assert_eq!(engine.rules_run(), 2);
        assert!(engine.contains_fact(&t("(q 1)")));
        assert_eq!(engine.agenda_len(), 0);
    }

    #[test]
    fn rule_dbclasses_hold_its_clauses() {
        let mut engine = Engine::new();
        engine.assert_fact(t("(edge a b)")).unwrap();
        let id = engine.add_rule(
            Trigger::all(vec![t("(edge ?x ?y)"), t("(node ?y)")]).unwrap(),
            vec![],
        );
        let rule = engine.rule(id).unwrap();
        assert_eq!(rule.dbclasses().len(), rule.trigger().len());

        for (class_id, pattern) in rule.dbclasses().iter().zip(rule.trigger().clauses()) {
            let class = engine.index().get(*class_id).unwrap();
            assert_eq!(class.signature(), &Signature::of(pattern));
            assert_eq!(class.clause_count(), 1);
        }

        let signatures: Vec<String> = engine
            .index()
            .iter()
            .map(|class| class.signature().to_string())
            .collect();
        assert_eq!(signatures.len(), 3);
        assert!(signatures.contains(&"(node _)".to_owned()));
    }

    #[test]
    fn display_summarises_state() {
        let mut engine = Engine::with_config(EngineConfig::new().with_title("Demo"));
        engine.add_rule(t("(p ?x)"), vec![]);
        engine.assert_fact(t("(p 1)")).unwrap();
        assert_eq!(engine.to_string(), "Demo(1 rules, 1 facts, 2 dbclasses)");
    }

    #[test]
    fn custom_variable_marker_in_programs() {
        let mut engine = Engine::with_config(EngineConfig::new().with_variable_marker('$'));
        engine
            .run_program("(rule (p $x) (assert! (q $x))) (assert! (p 1))")
            .unwrap();
        assert!(engine.contains_fact(&t("(q 1)")));
    }

    #[test]
    fn engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Engine>();
    }
}
