use std::cell::RefCell;
use std::rc::Rc;

use super::Dot;
use crate::events::{EventObserver, Unsubscriber};

/// Everything a pattern engine reports. Payloads are snapshots; holding on to
/// them never aliases engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEvent {
    /// A new gesture hit its first dot. Follows that dot's `Progress`.
    Started,
    /// A dot (hit or gap-filled) was appended; carries the pattern so far.
    Progress(Vec<Dot>),
    /// Gesture ended with at least one dot and was not cancelled.
    Complete(Vec<Dot>),
    /// Gesture produced no dots, was cancelled, or the engine was reset.
    Cleared,
    /// The grid was resized to `n x n`; dot ids from earlier patterns no
    /// longer apply.
    GridConfigured(usize),
}

/// Callback-style view of [`PatternEvent`].
///
/// Implementations must not call back into the engine that is notifying them.
pub trait PatternListener {
    fn on_started(&mut self) {}
    fn on_progress(&mut self, _pattern: &[Dot]) {}
    fn on_complete(&mut self, _pattern: &[Dot]) {}
    fn on_cleared(&mut self) {}
    fn on_grid_configured(&mut self, _grid_size: usize) {}
}

impl PatternEvent {
    pub fn dispatch<L: PatternListener + ?Sized>(&self, listener: &mut L) {
        match self {
            PatternEvent::Started => listener.on_started(),
            PatternEvent::Progress(pattern) => listener.on_progress(pattern),
            PatternEvent::Complete(pattern) => listener.on_complete(pattern),
            PatternEvent::Cleared => listener.on_cleared(),
            PatternEvent::GridConfigured(grid_size) => listener.on_grid_configured(*grid_size),
        }
    }
}

/// Routes pattern events from `observer` to `listener`.
pub fn observe_pattern<L>(
    observer: &EventObserver<PatternEvent>,
    listener: Rc<RefCell<L>>,
) -> Unsubscriber<PatternEvent>
where
    L: PatternListener + 'static,
{
    observer.subscribe(move |event| event.dispatch(&mut *listener.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::model::DotGrid;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PatternListener for Recorder {
        fn on_started(&mut self) {
            self.calls.push("started".into());
        }
        fn on_progress(&mut self, pattern: &[Dot]) {
            self.calls.push(format!("progress {}", pattern.len()));
        }
        fn on_complete(&mut self, pattern: &[Dot]) {
            self.calls.push(format!("complete {}", pattern.len()));
        }
        fn on_cleared(&mut self) {
            self.calls.push("cleared".into());
        }
        fn on_grid_configured(&mut self, grid_size: usize) {
            self.calls.push(format!("grid {}", grid_size));
        }
    }

    #[test]
    fn test_listener_receives_events_in_order() {
        let grid = DotGrid::new(3).unwrap();
        let (emitter, observer) = Channel::<PatternEvent>::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let subscription = observe_pattern(&observer, recorder.clone());

        let a = grid.of(0, 0).unwrap();
        let b = grid.of(0, 1).unwrap();
        emitter.emit(&PatternEvent::Started);
        emitter.emit(&PatternEvent::Progress(vec![a]));
        emitter.emit(&PatternEvent::Progress(vec![a, b]));
        emitter.emit(&PatternEvent::Complete(vec![a, b]));
        emitter.emit(&PatternEvent::Cleared);
        emitter.emit(&PatternEvent::GridConfigured(4));

        assert_eq!(
            recorder.borrow().calls,
            vec![
                "started",
                "progress 1",
                "progress 2",
                "complete 2",
                "cleared",
                "grid 4"
            ]
        );

        assert!(subscription.unsubscribe());
        emitter.emit(&PatternEvent::Cleared);
        assert_eq!(recorder.borrow().calls.len(), 6);
    }
}
