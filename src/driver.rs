use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::index::Signature;
use crate::join::CrossProduct;
use crate::types::{AgendaEntry, ClauseRef, FactId};
use crate::unify::unify_all;
use crate::{Bindings, Engine, EngineError, Rule, RuleId, Term, Trigger};

/// Create a rule, index its clauses and queue its matches against the
/// current fact store.
pub(crate) fn add_rule(
    engine: &mut Engine,
    trigger: Trigger,
    body: Arc<[Term]>,
    environment: Bindings,
) -> RuleId {
    engine.rule_counter += 1;
    let id = RuleId(engine.rule_counter);

    let dbclasses = trigger
        .clauses()
        .iter()
        .enumerate()
        .map(|(clause, pattern)| {
            engine
                .index
                .insert_clause(Signature::of(pattern), ClauseRef { rule: id, clause })
        })
        .collect();

    let rule = Rule {
        id,
        trigger,
        body,
        environment,
        dbclasses,
    };
    debug!(rule = %id, trigger = %rule.trigger, "rule added");

    let candidates: Vec<Vec<FactId>> = rule
        .trigger
        .clauses()
        .iter()
        .map(|pattern| engine.index.lookup_facts(&Signature::of(pattern)))
        .collect();
    let matches = find_matches(&engine.facts, &rule, &candidates);
    engine.rules.push(rule);
    queue(engine, matches);
    id
}

/// Store a fact, index it and queue every tuple it completes.
///
/// For a rule clause at position `i` compatible with the new fact, the fact
/// is fixed at `i`; earlier positions draw only from older facts and later
/// positions from all facts. A tuple holding the new fact in several places
/// is therefore tried once, under the first of them.
pub(crate) fn assert_fact(engine: &mut Engine, fact: Term) -> Result<FactId, EngineError> {
    if !fact.is_ground() {
        return Err(EngineError::NonGroundFact {
            fact: fact.to_string(),
        });
    }

    let id = FactId(engine.facts.len());
    let signature = Signature::of(&fact);
    debug!(fact = %fact, signature = %signature, "fact asserted");
    engine.facts.push(fact);
    engine.index.insert_fact(signature.clone(), id);

    let mut matches = Vec::new();
    for ClauseRef { rule, clause } in engine.index.lookup_clauses(&signature) {
        let Some(rule) = engine.rule(rule) else {
            continue;
        };
        let candidates: Vec<Vec<FactId>> = rule
            .trigger
            .clauses()
            .iter()
            .enumerate()
            .map(|(pos, pattern)| {
                if pos == clause {
                    return vec![id];
                }
                let mut facts = engine.index.lookup_facts(&Signature::of(pattern));
                if pos < clause {
                    facts.retain(|&f| f < id);
                }
                facts
            })
            .collect();
        matches.extend(find_matches(&engine.facts, rule, &candidates));
    }
    queue(engine, matches);
    Ok(id)
}

/// Unify every candidate tuple against the rule's trigger, seeded with the
/// rule's environment.
pub(crate) fn find_matches(
    facts: &[Term],
    rule: &Rule,
    candidates: &[Vec<FactId>],
) -> Vec<AgendaEntry> {
    let product = CrossProduct::new(candidates);
    trace!(rule = %rule.id, tuples = product.total(), "joining candidates");

    product
        .filter_map(|tuple| {
            let tuple: Vec<&Term> = tuple.iter().map(|id| &facts[id.index()]).collect();
            unify_all(&tuple, rule.trigger.clauses(), &rule.environment)
        })
        .map(|bindings| {
            trace!(rule = %rule.id, bindings = %bindings, "match");
            AgendaEntry {
                rule: rule.id,
                body: Arc::clone(&rule.body),
                bindings,
            }
        })
        .collect()
}

fn queue(engine: &mut Engine, matches: Vec<AgendaEntry>) {
    for entry in matches {
        engine.agenda.push(entry);
    }
}

/// Pop and fire agenda entries until none remain. Rule ids are appended to
/// `fired` in firing order.
pub(crate) fn run_rules(engine: &mut Engine, fired: &mut Vec<RuleId>) -> Result<(), EngineError> {
    while let Some(entry) = engine.agenda.pop() {
        engine.rules_run += 1;
        fired.push(entry.rule);
        trace!(rule = %entry.rule, bindings = %entry.bindings, "firing");

        for form in entry.body.iter() {
            let form = entry.bindings.substitute(form);
            if let Err(err) = crate::evaluate::eval(engine, &form, &entry.bindings) {
                warn!(rule = %entry.rule, form = %form, error = %err, "rule body failed");
                return Err(err);
            }
        }
    }

    if engine.config.debugging() {
        info!(
            title = engine.config.title(),
            fired = fired.len(),
            total = engine.rules_run,
            "{} rules run",
            fired.len()
        );
    } else {
        debug!(fired = fired.len(), total = engine.rules_run, "agenda drained");
    }
    Ok(())
}
