use std::{cell::RefCell, rc::Rc};

use log::info;

use crate::{
    destroyable::Destroyable,
    events::{EventEmitter, EventHandler, EventObserver, Unsubscriber},
    model::{pattern_to_string, PatternEvent, PatternViewMode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Unlocked,
    Rejected,
}

impl Verdict {
    /// Display mode the host should switch the engine to after the verdict.
    pub fn view_mode(&self) -> PatternViewMode {
        match self {
            Verdict::Unlocked => PatternViewMode::Correct,
            Verdict::Rejected => PatternViewMode::Wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierEvent {
    Unlocked,
    Rejected { attempts: u32 },
}

/// Checks completed patterns against a stored secret.
///
/// The secret is tied to the grid size it was recorded on. Patterns drawn
/// after the engine reports a different size are always rejected, since the
/// same ids name different dots there.
///
/// Runs inside the engine's notification, so it only records the verdict and
/// re-broadcasts it; it never calls back into the engine.
pub struct PatternVerifier {
    secret: String,
    secret_grid_size: usize,
    grid_size: usize,
    failed_attempts: u32,
    last_verdict: Option<Verdict>,
    verifier_event_emitter: EventEmitter<VerifierEvent>,
    pattern_subscription: Option<Unsubscriber<PatternEvent>>,
}

impl Destroyable for PatternVerifier {
    fn destroy(&mut self) {
        if let Some(subscription) = self.pattern_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl PatternVerifier {
    pub fn new(
        secret: impl Into<String>,
        grid_size: usize,
        verifier_event_emitter: EventEmitter<VerifierEvent>,
        pattern_event_observer: EventObserver<PatternEvent>,
    ) -> Rc<RefCell<Self>> {
        let verifier = Rc::new(RefCell::new(Self {
            secret: secret.into(),
            secret_grid_size: grid_size,
            grid_size,
            failed_attempts: 0,
            last_verdict: None,
            verifier_event_emitter,
            pattern_subscription: None,
        }));

        let subscription = {
            let verifier = verifier.clone();
            pattern_event_observer.subscribe(move |event| {
                verifier.borrow_mut().handle_event(event);
            })
        };
        verifier.borrow_mut().pattern_subscription = Some(subscription);

        verifier
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    fn verify(&mut self, serialized: &str) -> Verdict {
        if self.grid_size == self.secret_grid_size && serialized == self.secret {
            info!(target: "verifier", "Pattern accepted");
            self.failed_attempts = 0;
            Verdict::Unlocked
        } else {
            self.failed_attempts += 1;
            info!(target: "verifier", "Pattern rejected ({} failed attempts)", self.failed_attempts);
            Verdict::Rejected
        }
    }
}

impl EventHandler<PatternEvent> for PatternVerifier {
    fn handle_event(&mut self, event: &PatternEvent) {
        match event {
            PatternEvent::GridConfigured(grid_size) => self.grid_size = *grid_size,
            PatternEvent::Complete(pattern) => {
                let serialized = pattern_to_string(pattern, self.grid_size);
                let verdict = self.verify(&serialized);
                self.last_verdict = Some(verdict);
                let event = match verdict {
                    Verdict::Unlocked => VerifierEvent::Unlocked,
                    Verdict::Rejected => VerifierEvent::Rejected {
                        attempts: self.failed_attempts,
                    },
                };
                self.verifier_event_emitter.emit(&event);
            }
            _ => (),
        }
    }
}
