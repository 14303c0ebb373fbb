use log::{debug, trace};
use std::collections::HashSet;
use std::time::Instant;

use super::auto_draw::AutoDrawFrame;
use super::settings::EngineSettings;
use crate::error::{PatternLockError, Result};
use crate::events::{Channel, EventEmitter, EventObserver};
use crate::helpers::step_towards;
use crate::model::{
    pattern_to_string, string_to_pattern, Dot, DotColor, DotGrid, DotState, GridLayout,
    HitLookup, Padding, PatternEvent, PatternLockSnapshot, PatternViewMode, Point, Rect,
    SelectedTransition,
};

/// What a single pointer call did, for the host to act on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureOutcome {
    /// Most recent dot hit by the pointer (gap fills are not reported here).
    pub hit: Option<Dot>,
    /// Region that needs to be redrawn, if any.
    pub dirty: Option<Rect>,
    /// Whether the host should play tactile feedback.
    pub haptic: bool,
}

/// Turns pointer samples on an `n x n` grid of dots into a pattern.
///
/// All calls run to completion synchronously, including listener
/// notification. Listeners receive copies of the pattern and must not call
/// back into the engine while being notified.
pub struct PatternEngine {
    settings: EngineSettings,
    grid: DotGrid,
    layout: GridLayout,
    pattern: Vec<Dot>,
    hit_lookup: HitLookup,
    dot_states: Vec<DotState>, // row-major, same indexing as the grid
    view_mode: PatternViewMode,
    pointer_down: bool,
    pattern_in_progress: bool,
    in_progress_point: Option<Point>,
    invalidate: Rect,
    animating_period_start: Option<Instant>,
    pattern_event_emitter: EventEmitter<PatternEvent>,
}

impl PatternEngine {
    pub fn new(
        settings: EngineSettings,
        pattern_event_emitter: EventEmitter<PatternEvent>,
    ) -> Result<Self> {
        settings.validate()?;
        let grid = DotGrid::new(settings.dot_count)?;
        let size = grid.size();
        Ok(Self {
            layout: GridLayout::new(size, settings.hit_factor),
            pattern: Vec::with_capacity(size * size),
            hit_lookup: HitLookup::new(size),
            dot_states: vec![DotState::new(settings.dot_normal_size); size * size],
            view_mode: PatternViewMode::default(),
            pointer_down: false,
            pattern_in_progress: false,
            in_progress_point: None,
            invalidate: Rect::default(),
            animating_period_start: None,
            grid,
            settings,
            pattern_event_emitter,
        })
    }

    /// Builds an engine together with the observer side of its event channel.
    pub fn with_channel(
        settings: EngineSettings,
    ) -> Result<(Self, EventObserver<PatternEvent>)> {
        let (emitter, observer) = Channel::new();
        Ok((Self::new(settings, emitter)?, observer))
    }

    /// Resizes the grid. Pattern, hit table and dot states are reallocated and
    /// any gesture in flight is dropped without a `Cleared`; listeners get
    /// `GridConfigured` instead.
    pub fn configure(&mut self, grid_size: usize) -> Result<()> {
        let grid = DotGrid::new(grid_size)?;
        debug!(target: "pattern_engine", "Configuring {}x{} grid", grid_size, grid_size);
        self.settings.dot_count = grid_size;
        self.grid = grid;
        self.pattern = Vec::with_capacity(grid_size * grid_size);
        self.hit_lookup = HitLookup::new(grid_size);
        self.dot_states = vec![DotState::new(self.settings.dot_normal_size); grid_size * grid_size];
        self.layout.set_grid_size(grid_size);
        self.pointer_down = false;
        self.pattern_in_progress = false;
        self.in_progress_point = None;
        self.invalidate.set_empty();
        self.pattern_event_emitter
            .emit(&PatternEvent::GridConfigured(grid_size));
        Ok(())
    }

    pub fn set_view_size(&mut self, width: f32, height: f32, padding: Padding) {
        self.layout.resize(width, height, padding);
        trace!(
            target: "pattern_engine",
            "View resized to {}x{}; cell {}x{}",
            width,
            height,
            self.layout.cell_width(),
            self.layout.cell_height()
        );
    }

    /// Size the view should take when offered `width x height`.
    pub fn measure(&self, width: u32, height: u32) -> (u32, u32) {
        if !self.settings.aspect_ratio_enabled {
            return (width, height);
        }
        self.settings.aspect_ratio.measure(width, height)
    }

    pub fn begin_gesture(&mut self, point: Point) -> GestureOutcome {
        self.reset_pattern();
        self.pointer_down = true;

        let hit = self.detect_and_add_hit(point);
        if hit.is_none() {
            self.pattern_in_progress = false;
            self.notify_pattern_cleared();
        }
        self.in_progress_point = Some(point);

        GestureOutcome {
            hit,
            dirty: hit.map(|dot| self.layout.cell_rect(dot.row, dot.column)),
            haptic: hit.is_some() && self.settings.tactile_feedback_enabled,
        }
    }

    /// Feeds the samples of one move event, oldest first. Each sample can add
    /// at most one gap-fill dot and one hit dot, and sees the state left by
    /// the samples before it.
    pub fn extend_gesture(&mut self, samples: &[Point]) -> GestureOutcome {
        let mut outcome = GestureOutcome::default();
        if !self.pointer_down {
            trace!(target: "pattern_engine", "Ignoring move without an active gesture");
            return outcome;
        }

        let radius = self.settings.path_width;
        let mut temp_invalidate = Rect::default();
        let mut invalidate_now = false;

        for sample in samples {
            let hit = self.detect_and_add_hit(*sample);
            if hit.is_some() {
                outcome.hit = hit;
                outcome.haptic |= self.settings.tactile_feedback_enabled;
            }

            let moved = match self.in_progress_point {
                Some(previous) => {
                    (sample.x - previous.x).abs() > self.settings.drag_threshold
                        || (sample.y - previous.y).abs() > self.settings.drag_threshold
                }
                None => true,
            };
            invalidate_now |= moved;

            if self.pattern_in_progress {
                if let Some(last) = self.pattern.last() {
                    temp_invalidate.union(&self.segment_rect(last, sample, radius, hit));
                }
            }
        }

        if let Some(last_sample) = samples.last() {
            self.in_progress_point = Some(*last_sample);
        }

        if invalidate_now {
            self.invalidate.union(&temp_invalidate);
            if !self.invalidate.is_empty() {
                outcome.dirty = Some(self.invalidate);
            }
            self.invalidate = temp_invalidate;
        }
        outcome
    }

    pub fn extend_gesture_to(&mut self, point: Point) -> GestureOutcome {
        self.extend_gesture(&[point])
    }

    /// Pointer up (`cancel == false`) or pointer cancel (`cancel == true`).
    pub fn end_gesture(&mut self, cancel: bool) {
        self.pointer_down = false;
        if cancel {
            self.pattern_in_progress = false;
            self.reset_pattern();
            self.notify_pattern_cleared();
            return;
        }
        if !self.pattern.is_empty() {
            self.pattern_in_progress = false;
            self.cancel_line_animations();
            self.notify_pattern_detected();
        }
    }

    pub fn reset(&mut self) {
        self.pattern_in_progress = false;
        self.reset_pattern();
        self.notify_pattern_cleared();
    }

    /// Replaces the pattern programmatically, e.g. to show a stored secret.
    pub fn set_pattern(&mut self, mode: PatternViewMode, pattern: &[Dot]) -> Result<()> {
        self.set_pattern_at(mode, pattern, Instant::now())
    }

    pub fn set_pattern_at(
        &mut self,
        mode: PatternViewMode,
        pattern: &[Dot],
        now: Instant,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for dot in pattern {
            if !self.grid.owns(dot) {
                return Err(PatternLockError::OutOfRange {
                    row: dot.row,
                    column: dot.column,
                    max: self.grid.size() - 1,
                });
            }
            if !seen.insert(*dot) {
                return Err(PatternLockError::InvalidPattern(format!(
                    "dot {} appears more than once",
                    dot
                )));
            }
        }

        self.pattern.clear();
        self.pattern.extend_from_slice(pattern);
        self.hit_lookup.clear();
        for dot in pattern {
            self.hit_lookup.mark(dot);
        }
        self.set_view_mode_at(mode, now);
        Ok(())
    }

    pub fn set_view_mode(&mut self, mode: PatternViewMode) {
        self.set_view_mode_at(mode, Instant::now());
    }

    /// `now` becomes the start of the replay when switching to `AutoDraw`.
    pub fn set_view_mode_at(&mut self, mode: PatternViewMode, now: Instant) {
        self.view_mode = mode;
        if mode == PatternViewMode::AutoDraw {
            if let Some(first) = self.pattern.first() {
                self.animating_period_start = Some(now);
                self.in_progress_point = Some(self.layout.center(first.row, first.column));
            }
        }
    }

    /// Current replay frame, or `None` outside of auto-draw.
    pub fn auto_draw_frame(&self, now: Instant) -> Option<AutoDrawFrame> {
        if self.view_mode != PatternViewMode::AutoDraw {
            return None;
        }
        let start = self.animating_period_start?;
        Some(AutoDrawFrame::compute(
            &self.pattern,
            now.saturating_duration_since(start),
            &self.layout,
        ))
    }

    pub fn set_stealth_mode(&mut self, enabled: bool) {
        self.settings.stealth_mode = enabled;
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.settings.input_enabled = enabled;
    }

    pub fn set_tactile_feedback_enabled(&mut self, enabled: bool) {
        self.settings.tactile_feedback_enabled = enabled;
    }

    pub fn current_pattern(&self) -> &[Dot] {
        &self.pattern
    }

    pub fn pattern_string(&self) -> String {
        pattern_to_string(&self.pattern, self.grid.size())
    }

    pub fn is_in_progress(&self) -> bool {
        self.pattern_in_progress
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn is_input_enabled(&self) -> bool {
        self.settings.input_enabled
    }

    pub fn is_in_stealth_mode(&self) -> bool {
        self.settings.stealth_mode
    }

    pub fn view_mode(&self) -> PatternViewMode {
        self.view_mode
    }

    pub fn grid(&self) -> &DotGrid {
        &self.grid
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn in_progress_point(&self) -> Option<Point> {
        self.in_progress_point
    }

    pub fn dot_of(&self, row: usize, column: usize) -> Result<Dot> {
        self.grid.of(row, column)
    }

    pub fn dot_of_id(&self, id: usize) -> Result<Dot> {
        self.grid.of_id(id)
    }

    pub fn is_hit(&self, dot: &Dot) -> bool {
        self.hit_lookup.is_hit(dot)
    }

    pub fn dot_state(&self, dot: &Dot) -> Option<&DotState> {
        self.state_index(dot).map(|index| &self.dot_states[index])
    }

    pub fn dot_state_mut(&mut self, dot: &Dot) -> Option<&mut DotState> {
        self.state_index(dot).map(|index| &mut self.dot_states[index])
    }

    /// Dots with a "selected" transition the renderer has not finished yet.
    pub fn pending_transitions(&self) -> Vec<(Dot, SelectedTransition)> {
        self.grid
            .iter()
            .zip(self.dot_states.iter())
            .filter_map(|(dot, state)| state.transition.map(|transition| (dot, transition)))
            .collect()
    }

    pub fn finish_transition(&mut self, dot: &Dot) {
        let normal_size = self.settings.dot_normal_size;
        if let Some(state) = self.dot_state_mut(dot) {
            state.transition = None;
            state.line_end = None;
            state.size = normal_size;
        }
    }

    /// Colour for a dot or path segment under the current mode.
    pub fn dot_color(&self, part_of_pattern: bool) -> DotColor {
        if !part_of_pattern || self.settings.stealth_mode || self.pattern_in_progress {
            return DotColor::Normal;
        }
        match self.view_mode {
            PatternViewMode::Wrong => DotColor::Wrong,
            PatternViewMode::Correct | PatternViewMode::AutoDraw => DotColor::Correct,
        }
    }

    /// Opacity of the trailing segment from the last dot to the pointer.
    pub fn last_segment_alpha(&self) -> Option<f32> {
        let last = self.pattern.last()?;
        let point = self.in_progress_point?;
        let last_center = self.layout.center(last.row, last.column);
        Some(self.layout.last_segment_alpha(&point, &last_center))
    }

    pub fn snapshot(&self) -> PatternLockSnapshot {
        PatternLockSnapshot {
            serialized_pattern: self.pattern_string(),
            display_mode: self.view_mode,
            input_enabled: self.settings.input_enabled,
            in_stealth_mode: self.settings.stealth_mode,
            tactile_feedback_enabled: self.settings.tactile_feedback_enabled,
        }
    }

    pub fn restore(&mut self, snapshot: &PatternLockSnapshot) -> Result<()> {
        let pattern = string_to_pattern(&snapshot.serialized_pattern, &self.grid)?;
        self.set_pattern(PatternViewMode::Correct, &pattern)?;
        self.view_mode = snapshot.display_mode;
        self.settings.input_enabled = snapshot.input_enabled;
        self.settings.stealth_mode = snapshot.in_stealth_mode;
        self.settings.tactile_feedback_enabled = snapshot.tactile_feedback_enabled;
        Ok(())
    }

    fn state_index(&self, dot: &Dot) -> Option<usize> {
        if self.grid.owns(dot) {
            Some(dot.id(self.grid.size()))
        } else {
            None
        }
    }

    fn check_for_new_hit(&self, point: Point) -> Option<Dot> {
        let (row, column) = self.layout.hit(&point)?;
        if self.hit_lookup.get(row, column) {
            return None;
        }
        self.grid.of(row, column).ok()
    }

    /// The dot skipped over when moving from `last` to `dot`, if any. An axis
    /// steps towards the target when it jumped by exactly two and the other
    /// axis did not move by exactly one.
    fn gap_fill_dot(&self, last: &Dot, dot: &Dot) -> Option<Dot> {
        let d_row = dot.row.abs_diff(last.row);
        let d_column = dot.column.abs_diff(last.column);

        let mut fill_row = last.row;
        let mut fill_column = last.column;
        if d_row == 2 && d_column != 1 {
            fill_row = step_towards(last.row, dot.row);
        }
        if d_column == 2 && d_row != 1 {
            fill_column = step_towards(last.column, dot.column);
        }

        if (fill_row, fill_column) == (last.row, last.column)
            || !self.grid.contains(fill_row, fill_column)
        {
            return None;
        }
        self.grid.of(fill_row, fill_column).ok()
    }

    fn detect_and_add_hit(&mut self, point: Point) -> Option<Dot> {
        let dot = self.check_for_new_hit(point)?;

        let last = self.pattern.last().copied();
        if let Some(fill) = last.and_then(|last| self.gap_fill_dot(&last, &dot)) {
            if !self.hit_lookup.is_hit(&fill) {
                self.add_cell_to_pattern(fill);
            }
        }

        self.add_cell_to_pattern(dot);
        if last.is_none() {
            // first dot goes out as progress before the gesture is announced
            self.pattern_in_progress = true;
            self.notify_pattern_started();
        }
        Some(dot)
    }

    fn add_cell_to_pattern(&mut self, dot: Dot) {
        self.hit_lookup.mark(&dot);
        self.pattern.push(dot);
        if !self.settings.stealth_mode {
            self.start_dot_selected_animation(&dot);
        }
        self.notify_pattern_progress();
    }

    fn start_dot_selected_animation(&mut self, dot: &Dot) {
        let target = self.layout.center(dot.row, dot.column);
        let transition = SelectedTransition {
            from_size: self.settings.dot_normal_size,
            to_size: self.settings.dot_selected_size,
            size_duration: self.settings.dot_animation_duration,
            line_start: self.in_progress_point.unwrap_or(target),
            line_target: target,
            line_duration: self.settings.path_end_animation_duration,
        };
        if let Some(state) = self.dot_state_mut(dot) {
            state.line_end = Some(transition.line_start);
            state.transition = Some(transition);
        }
    }

    fn cancel_line_animations(&mut self) {
        self.dot_states
            .iter_mut()
            .for_each(DotState::cancel_line_animation);
    }

    /// Box around the segment from the last dot to `sample`, widened by the
    /// path width, plus the whole cell of a dot hit by this sample.
    fn segment_rect(&self, last: &Dot, sample: &Point, radius: f32, hit: Option<Dot>) -> Rect {
        let last_center = self.layout.center(last.row, last.column);
        let mut left = last_center.x.min(sample.x) - radius;
        let mut right = last_center.x.max(sample.x) + radius;
        let mut top = last_center.y.min(sample.y) - radius;
        let mut bottom = last_center.y.max(sample.y) + radius;

        if let Some(hit) = hit {
            let half_width = self.layout.cell_width() * 0.5;
            let half_height = self.layout.cell_height() * 0.5;
            let hit_center = self.layout.center(hit.row, hit.column);
            left = left.min(hit_center.x - half_width);
            right = right.max(hit_center.x + half_width);
            top = top.min(hit_center.y - half_height);
            bottom = bottom.max(hit_center.y + half_height);
        }

        Rect::new(left as i32, top as i32, right as i32, bottom as i32)
    }

    fn reset_pattern(&mut self) {
        self.pattern.clear();
        self.hit_lookup.clear();
        self.view_mode = PatternViewMode::Correct;
    }

    fn announce(&self, message: &str) {
        debug!(target: "pattern_engine", "{}", message);
    }

    fn notify_pattern_started(&self) {
        self.announce("Pattern drawing started");
        self.pattern_event_emitter.emit(&PatternEvent::Started);
    }

    fn notify_pattern_progress(&self) {
        self.announce("Dot added");
        self.pattern_event_emitter
            .emit(&PatternEvent::Progress(self.pattern.clone()));
    }

    fn notify_pattern_detected(&self) {
        self.announce("Pattern detected");
        self.pattern_event_emitter
            .emit(&PatternEvent::Complete(self.pattern.clone()));
    }

    fn notify_pattern_cleared(&self) {
        self.announce("Pattern cleared");
        self.pattern_event_emitter.emit(&PatternEvent::Cleared);
    }
}
