use serde::{Deserialize, Serialize};

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
    HoverEnter,
    HoverMove,
    HoverExit,
}

/// One raw pointer event. `history` holds the batched samples delivered with
/// a move, oldest first; `position` is always the most recent sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    #[serde(default)]
    pub history: Vec<Point>,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f32, y: f32) -> Self {
        Self {
            action,
            position: Point::new(x, y),
            history: Vec::new(),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerAction::Down, x, y)
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        Self::new(PointerAction::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerAction::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(PointerAction::Cancel, 0.0, 0.0)
    }

    pub fn with_history(mut self, history: Vec<Point>) -> Self {
        self.history = history;
        self
    }

    /// Historical samples followed by the current position.
    pub fn samples(&self) -> Vec<Point> {
        let mut samples = self.history.clone();
        samples.push(self.position);
        samples
    }

    pub fn with_action(&self, action: PointerAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }
}
