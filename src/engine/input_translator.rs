use std::{cell::RefCell, rc::Rc};

use log::trace;

use super::pattern_engine::{GestureOutcome, PatternEngine};
use crate::{
    destroyable::Destroyable,
    events::{EventEmitter, EventObserver, Unsubscriber},
    model::{PointerAction, PointerEvent},
};

/// Feeds raw pointer events into a shared [`PatternEngine`] and forwards the
/// resulting redraw/haptic requests.
pub struct InputTranslator {
    engine: Rc<RefCell<PatternEngine>>,
    gesture_outcome_emitter: EventEmitter<GestureOutcome>,
    touch_exploration_enabled: bool,
    input_subscription: Option<Unsubscriber<PointerEvent>>,
}

impl Destroyable for InputTranslator {
    fn destroy(&mut self) {
        if let Some(subscription) = self.input_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl InputTranslator {
    pub fn new(
        engine: Rc<RefCell<PatternEngine>>,
        gesture_outcome_emitter: EventEmitter<GestureOutcome>,
        pointer_event_observer: EventObserver<PointerEvent>,
        touch_exploration_enabled: bool,
    ) -> Rc<RefCell<Self>> {
        let input_translator = Rc::new(RefCell::new(Self {
            engine,
            gesture_outcome_emitter,
            touch_exploration_enabled,
            input_subscription: None,
        }));

        InputTranslator::bind_input_observer(input_translator.clone(), pointer_event_observer);

        input_translator
    }

    fn bind_input_observer(
        input_translator: Rc<RefCell<Self>>,
        pointer_event_observer: EventObserver<PointerEvent>,
    ) {
        let subscription = {
            let input_translator = input_translator.clone();
            pointer_event_observer.subscribe(move |event| {
                input_translator.borrow().handle_pointer_event(event);
            })
        };

        input_translator.borrow_mut().input_subscription = Some(subscription);
    }

    pub fn set_touch_exploration_enabled(&mut self, enabled: bool) {
        self.touch_exploration_enabled = enabled;
    }

    /// Returns whether the event was consumed.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        if !self.engine.borrow().is_input_enabled() {
            trace!(target: "input", "Input disabled, dropping {:?}", event.action);
            return false;
        }

        let action = match event.action {
            PointerAction::HoverEnter | PointerAction::HoverMove | PointerAction::HoverExit
                if !self.touch_exploration_enabled =>
            {
                return false;
            }
            PointerAction::HoverEnter => PointerAction::Down,
            PointerAction::HoverMove => PointerAction::Move,
            PointerAction::HoverExit => PointerAction::Up,
            action => action,
        };

        let outcome = {
            let mut engine = self.engine.borrow_mut();
            match action {
                PointerAction::Down => Some(engine.begin_gesture(event.position)),
                PointerAction::Move => Some(engine.extend_gesture(&event.samples())),
                PointerAction::Up => {
                    engine.end_gesture(false);
                    None
                }
                PointerAction::Cancel => {
                    engine.end_gesture(true);
                    None
                }
                _ => None,
            }
        };

        if let Some(outcome) = outcome {
            if outcome != GestureOutcome::default() {
                self.gesture_outcome_emitter.emit(&outcome);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineSettings;
    use crate::events::Channel;
    use crate::model::{Padding, PatternEvent, Point};

    struct Fixture {
        engine: Rc<RefCell<PatternEngine>>,
        pointer_emitter: EventEmitter<PointerEvent>,
        translator: Rc<RefCell<InputTranslator>>,
        outcomes: Rc<RefCell<Vec<GestureOutcome>>>,
        events: Rc<RefCell<Vec<PatternEvent>>>,
    }

    fn fixture(touch_exploration: bool) -> Fixture {
        let (mut engine, pattern_observer) =
            PatternEngine::with_channel(EngineSettings::default()).unwrap();
        engine.set_view_size(300.0, 300.0, Padding::default());
        let engine = Rc::new(RefCell::new(engine));

        let (pointer_emitter, pointer_observer) = Channel::new();
        let (outcome_emitter, outcome_observer) = Channel::new();
        let translator = InputTranslator::new(
            engine.clone(),
            outcome_emitter,
            pointer_observer,
            touch_exploration,
        );

        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = outcomes.clone();
        outcome_observer.subscribe(move |outcome: &GestureOutcome| {
            sink.borrow_mut().push(outcome.clone())
        });
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        pattern_observer.subscribe(move |event: &PatternEvent| sink.borrow_mut().push(event.clone()));

        Fixture {
            engine,
            pointer_emitter,
            translator,
            outcomes,
            events,
        }
    }

    #[test]
    fn test_touch_gesture_completes_pattern() {
        let f = fixture(false);
        f.pointer_emitter.emit(&PointerEvent::down(50.0, 50.0));
        f.pointer_emitter.emit(
            &PointerEvent::move_to(250.0, 50.0).with_history(vec![Point::new(150.0, 50.0)]),
        );
        f.pointer_emitter.emit(&PointerEvent::up(250.0, 50.0));

        assert_eq!(f.engine.borrow().pattern_string(), "012");
        assert!(matches!(
            f.events.borrow().last(),
            Some(PatternEvent::Complete(pattern)) if pattern.len() == 3
        ));
        assert_eq!(f.outcomes.borrow().len(), 2);
        assert!(f.outcomes.borrow().iter().all(|outcome| outcome.haptic));
    }

    #[test]
    fn test_cancel_clears() {
        let f = fixture(false);
        f.pointer_emitter.emit(&PointerEvent::down(50.0, 50.0));
        f.pointer_emitter.emit(&PointerEvent::cancel());

        assert!(f.engine.borrow().current_pattern().is_empty());
        assert_eq!(f.events.borrow().last(), Some(&PatternEvent::Cleared));
    }

    #[test]
    fn test_hover_needs_touch_exploration() {
        let f = fixture(false);
        let hover = PointerEvent::new(PointerAction::HoverEnter, 50.0, 50.0);
        assert!(!f.translator.borrow().handle_pointer_event(&hover));
        assert!(f.events.borrow().is_empty());

        f.translator.borrow_mut().set_touch_exploration_enabled(true);
        assert!(f.translator.borrow().handle_pointer_event(&hover));
        let exit = hover.with_action(PointerAction::HoverExit);
        f.translator.borrow().handle_pointer_event(&exit);
        assert_eq!(f.engine.borrow().pattern_string(), "0");
        assert!(!f.engine.borrow().is_pointer_down());
    }

    #[test]
    fn test_disabled_input_is_ignored() {
        let f = fixture(false);
        f.engine.borrow_mut().set_input_enabled(false);
        assert!(!f
            .translator
            .borrow()
            .handle_pointer_event(&PointerEvent::down(50.0, 50.0)));
        assert!(f.events.borrow().is_empty());
        assert!(!f.engine.borrow().is_pointer_down());
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let f = fixture(false);
        f.translator.borrow_mut().destroy();
        f.pointer_emitter.emit(&PointerEvent::down(50.0, 50.0));
        assert!(f.events.borrow().is_empty());
    }
}
