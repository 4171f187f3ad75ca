//! Runs the classic `implies` and double-negation rules and prints what the
//! engine derived. Set `RUST_LOG=ltre=trace` to watch matches and firings.

use ltre::{Engine, EngineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROGRAM: &str = "
; modus ponens: an implication plus its antecedent yields the consequent
(rule (implies ?ante ?conse)
      (rule ?ante (assert! ?conse)))

(rule (not (not ?x)) (assert! ?x))

(assert! (implies (not (not rain)) wet))
(assert! (implies wet slippery))
(assert! (not (not (not (not rain)))))
";

fn main() -> Result<(), ltre::LtreError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ltre=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut engine = Engine::with_config(EngineConfig::new().with_title("demo").with_debugging(true));
    engine.run_program(PROGRAM)?;

    println!("{engine}");
    println!("\nRules:");
    for rule in engine.rules() {
        println!("  {rule}");
    }
    println!("\nFacts:");
    for fact in engine.facts() {
        println!("  {fact}");
    }
    Ok(())
}
