use std::time::Duration;

use super::Point;

/// Request for the renderer to play the "selected" animation of one dot: grow
/// from `from_size` to `to_size` and back, each leg taking `size_duration`,
/// while the incoming path line slides from `line_start` to `line_target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedTransition {
    pub from_size: f32,
    pub to_size: f32,
    pub size_duration: Duration,
    pub line_start: Point,
    pub line_target: Point,
    pub line_duration: Duration,
}

/// Per-dot visual state. The engine only writes to it to start or cancel a
/// transition; everything else belongs to whoever animates it.
#[derive(Debug, Clone, PartialEq)]
pub struct DotState {
    pub size: f32,
    pub line_end: Option<Point>,
    pub transition: Option<SelectedTransition>,
}

impl DotState {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            line_end: None,
            transition: None,
        }
    }

    pub fn cancel_line_animation(&mut self) {
        if self.transition.take().is_some() {
            self.line_end = None;
        }
    }
}
