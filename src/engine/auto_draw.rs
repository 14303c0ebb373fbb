use std::time::Duration;

use crate::model::{Dot, GridLayout, Point};

pub const MILLIS_PER_CIRCLE_ANIMATING: u64 = 700;

/// One frame of the auto-draw replay: the dots connected so far and, while
/// moving between two dots, where the path head currently is.
///
/// The replay loops every `(len + 1) * 700ms`; the extra slot holds the
/// finished pattern on screen before starting over.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoDrawFrame {
    pub drawn: Vec<Dot>,
    pub in_progress_point: Option<Point>,
}

impl AutoDrawFrame {
    pub fn compute(pattern: &[Dot], elapsed: Duration, layout: &GridLayout) -> Self {
        let one_cycle = (pattern.len() as u64 + 1) * MILLIS_PER_CIRCLE_ANIMATING;
        let spot_in_cycle = elapsed.as_millis() as u64 % one_cycle;
        let num_circles = (spot_in_cycle / MILLIS_PER_CIRCLE_ANIMATING) as usize;

        let drawn = pattern[..num_circles.min(pattern.len())].to_vec();
        let in_progress_point = if num_circles > 0 && num_circles < pattern.len() {
            let percentage = (spot_in_cycle % MILLIS_PER_CIRCLE_ANIMATING) as f32
                / MILLIS_PER_CIRCLE_ANIMATING as f32;
            let current = pattern[num_circles - 1];
            let next = pattern[num_circles];
            let from = layout.center(current.row, current.column);
            let to = layout.center(next.row, next.column);
            Some(from.lerp(&to, percentage))
        } else {
            None
        };

        Self {
            drawn,
            in_progress_point,
        }
    }

    pub fn is_drawn(&self, dot: &Dot) -> bool {
        self.drawn.contains(dot)
    }
}
