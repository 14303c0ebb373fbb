use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::events::EventEmitter;
use crate::model::{Padding, PointerEvent};

/// A recorded gesture: the view it was drawn on plus the raw pointer events.
///
/// ```json
/// {
///   "width": 300, "height": 300,
///   "events": [
///     { "action": "down", "position": { "x": 50, "y": 50 } },
///     { "action": "move", "position": { "x": 250, "y": 50 },
///       "history": [{ "x": 150, "y": 50 }] },
///     { "action": "up", "position": { "x": 250, "y": 50 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTrace {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub padding: Padding,
    /// Overrides the configured grid size when present.
    #[serde(default)]
    pub dot_count: Option<usize>,
    #[serde(default)]
    pub touch_exploration: bool,
    pub events: Vec<PointerEvent>,
}

impl GestureTrace {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let trace = Self::parse(&contents)?;
        debug!(
            target: "trace",
            "Loaded {} pointer events from {:?}",
            trace.events.len(),
            path
        );
        Ok(trace)
    }

    /// Emits every recorded event in order.
    pub fn replay(&self, pointer_event_emitter: &EventEmitter<PointerEvent>) {
        for event in &self.events {
            pointer_event_emitter.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::model::{Point, PointerAction};
    use std::cell::RefCell;
    use std::rc::Rc;

    const TRACE: &str = r#"{
        "width": 300, "height": 300,
        "events": [
            { "action": "down", "position": { "x": 50, "y": 50 } },
            { "action": "move", "position": { "x": 250, "y": 50 },
              "history": [{ "x": 150, "y": 50 }] },
            { "action": "up", "position": { "x": 250, "y": 50 } }
        ]
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let trace = GestureTrace::parse(TRACE).unwrap();
        assert_eq!(trace.width, 300.0);
        assert_eq!(trace.padding, Padding::default());
        assert_eq!(trace.dot_count, None);
        assert!(!trace.touch_exploration);
        assert_eq!(trace.events.len(), 3);
        assert_eq!(trace.events[1].action, PointerAction::Move);
        assert_eq!(trace.events[1].history, vec![Point::new(150.0, 50.0)]);
        assert!(trace.events[0].history.is_empty());
    }

    #[test]
    fn test_replay_in_order() {
        let trace = GestureTrace::parse(TRACE).unwrap();
        let (emitter, observer) = Channel::new();
        let actions = Rc::new(RefCell::new(Vec::new()));
        let sink = actions.clone();
        observer.subscribe(move |event: &PointerEvent| sink.borrow_mut().push(event.action));

        trace.replay(&emitter);
        assert_eq!(
            *actions.borrow(),
            vec![PointerAction::Down, PointerAction::Move, PointerAction::Up]
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let json = r#"{"width": 1, "height": 1, "events": [{"action": "wiggle", "position": {"x": 0, "y": 0}}]}"#;
        assert!(GestureTrace::parse(json).is_err());
    }
}
