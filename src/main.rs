use clap::Parser;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use log::{error, info};
use patternlock::engine::{
    EngineSettings, GestureOutcome, GestureTrace, InputTranslator, PatternEngine,
    PatternVerifier, VerifierEvent,
};
use patternlock::events::Channel;
use patternlock::model::PatternEvent;
use patternlock::{Destroyable, Result};

fn init_logging() {
    env_logger::init();
}

/// Replays a recorded gesture and prints the resulting pattern.
///
/// Engine settings are read from the file named by `$PATTERNLOCK_CONFIG`.
#[derive(Parser)]
#[command(name = "patternlock")]
#[command(version)]
struct Cli {
    /// JSON gesture trace to replay
    trace: PathBuf,

    /// Serialized secret to verify the drawn pattern against
    secret: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let Cli { trace: trace_path, secret } = cli;
    let trace = GestureTrace::load(&trace_path)?;
    let mut settings = EngineSettings::from_env();
    if let Some(dot_count) = trace.dot_count {
        settings.dot_count = dot_count;
    }

    let (mut engine, pattern_observer) = PatternEngine::with_channel(settings)?;
    engine.set_view_size(trace.width, trace.height, trace.padding);
    let grid_size = engine.grid().size();
    let engine = Rc::new(RefCell::new(engine));

    let (pointer_emitter, pointer_observer) = Channel::new();
    let (outcome_emitter, outcome_observer) = Channel::new();
    let translator = InputTranslator::new(
        engine.clone(),
        outcome_emitter,
        pointer_observer,
        trace.touch_exploration,
    );

    let haptics = Rc::new(Cell::new(0u32));
    {
        let haptics = haptics.clone();
        outcome_observer.subscribe(move |outcome: &GestureOutcome| {
            if outcome.haptic {
                haptics.set(haptics.get() + 1);
            }
        });
    }
    pattern_observer.subscribe(|event: &PatternEvent| info!(target: "replay", "{:?}", event));

    let verifier = secret.map(|secret| {
        let (verifier_emitter, verifier_observer) = Channel::new();
        verifier_observer
            .subscribe(|event: &VerifierEvent| info!(target: "replay", "Verifier: {:?}", event));
        PatternVerifier::new(secret, grid_size, verifier_emitter, pattern_observer.clone())
    });

    trace.replay(&pointer_emitter);
    translator.borrow_mut().destroy();

    println!("pattern: {}", engine.borrow().pattern_string());
    println!("haptic pulses: {}", haptics.get());

    if let Some(verifier) = verifier {
        let verdict = verifier.borrow().last_verdict();
        verifier.borrow_mut().destroy();
        match verdict {
            Some(verdict) => {
                engine.borrow_mut().set_view_mode(verdict.view_mode());
                println!(
                    "verdict: {:?} ({} failed attempts)",
                    verdict,
                    verifier.borrow().failed_attempts()
                );
            }
            None => println!("verdict: no completed pattern"),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "replay", "{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
