use serde::{Deserialize, Serialize};

use crate::helpers::Lerp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(&self, target: &Point, t: f32) -> Point {
        Point {
            x: self.x.lerp(target.x, t),
            y: self.y.lerp(target.y, t),
        }
    }
}

/// Integer rectangle in view coordinates. A rect with `left >= right` or
/// `top >= bottom` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn set_empty(&mut self) {
        *self = Rect::default();
    }

    /// Grows `self` to enclose `other`. Empty rects contribute nothing.
    pub fn union(&mut self, other: &Rect) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    pub fn contains(&self, point: &Point) -> bool {
        !self.is_empty()
            && point.x >= self.left as f32
            && point.x < self.right as f32
            && point.y >= self.top as f32
            && point.y < self.bottom as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Padding {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
}

impl Padding {
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Maps view coordinates onto grid cells.
///
/// Each row owns a horizontal band `cell_height` tall; only the centred
/// `hit_factor` fraction of that band registers a touch, the rest is margin.
/// Columns work the same way horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    grid_size: usize,
    hit_factor: f32,
    padding: Padding,
    cell_width: f32,
    cell_height: f32,
}

impl GridLayout {
    pub fn new(grid_size: usize, hit_factor: f32) -> Self {
        Self {
            grid_size,
            hit_factor,
            padding: Padding::default(),
            cell_width: 0.0,
            cell_height: 0.0,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    pub fn set_grid_size(&mut self, grid_size: usize) {
        let width = self.cell_width * self.grid_size as f32;
        let height = self.cell_height * self.grid_size as f32;
        self.grid_size = grid_size;
        self.recompute(width, height);
    }

    pub fn resize(&mut self, width: f32, height: f32, padding: Padding) {
        self.padding = padding;
        self.recompute(
            width - padding.left - padding.right,
            height - padding.top - padding.bottom,
        );
    }

    fn recompute(&mut self, content_width: f32, content_height: f32) {
        let n = self.grid_size.max(1) as f32;
        self.cell_width = content_width.max(0.0) / n;
        self.cell_height = content_height.max(0.0) / n;
    }

    pub fn center_x(&self, column: usize) -> f32 {
        self.padding.left + column as f32 * self.cell_width + self.cell_width / 2.0
    }

    pub fn center_y(&self, row: usize) -> f32 {
        self.padding.top + row as f32 * self.cell_height + self.cell_height / 2.0
    }

    pub fn center(&self, row: usize, column: usize) -> Point {
        Point::new(self.center_x(column), self.center_y(row))
    }

    fn band_hit(&self, coordinate: f32, origin: f32, span: f32) -> Option<usize> {
        // not laid out yet
        if span <= 0.0 {
            return None;
        }
        let hit_size = span * self.hit_factor;
        let offset = origin + (span - hit_size) / 2.0;
        (0..self.grid_size).find(|&i| {
            let start = offset + span * i as f32;
            coordinate >= start && coordinate <= start + hit_size
        })
    }

    pub fn row_hit(&self, y: f32) -> Option<usize> {
        self.band_hit(y, self.padding.top, self.cell_height)
    }

    pub fn column_hit(&self, x: f32) -> Option<usize> {
        self.band_hit(x, self.padding.left, self.cell_width)
    }

    /// `(row, column)` of the cell whose hit area contains `point`, if any.
    pub fn hit(&self, point: &Point) -> Option<(usize, usize)> {
        let row = self.row_hit(point.y)?;
        let column = self.column_hit(point.x)?;
        Some((row, column))
    }

    /// Whole cell around the dot centre.
    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        let center = self.center(row, column);
        let half_width = self.cell_width / 2.0;
        let half_height = self.cell_height / 2.0;
        Rect::new(
            (center.x - half_width) as i32,
            (center.y - half_height) as i32,
            (center.x + half_width) as i32,
            (center.y + half_height) as i32,
        )
    }

    /// Opacity of the trailing segment from the last dot to the pointer. It
    /// fades in once the pointer is more than 0.3 cells away.
    pub fn last_segment_alpha(&self, point: &Point, last: &Point) -> f32 {
        if self.cell_width <= 0.0 {
            return 0.0;
        }
        let fraction = point.distance_to(last) / self.cell_width;
        ((fraction - 0.3) * 4.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_300() -> GridLayout {
        let mut layout = GridLayout::new(3, 0.6);
        layout.resize(300.0, 300.0, Padding::default());
        layout
    }

    #[test]
    fn test_cell_geometry() {
        let layout = layout_300();
        assert_eq!(layout.cell_width(), 100.0);
        assert_eq!(layout.cell_height(), 100.0);
        assert_eq!(layout.center(0, 0), Point::new(50.0, 50.0));
        assert_eq!(layout.center(2, 1), Point::new(150.0, 250.0));
        assert_eq!(layout.cell_rect(1, 1), Rect::new(100, 100, 200, 200));
    }

    #[test]
    fn test_padding_shifts_cells() {
        let mut layout = GridLayout::new(3, 0.6);
        layout.resize(320.0, 320.0, Padding::uniform(10.0));
        assert_eq!(layout.cell_width(), 100.0);
        assert_eq!(layout.center(0, 0), Point::new(60.0, 60.0));
        assert_eq!(layout.hit(&Point::new(60.0, 60.0)), Some((0, 0)));
    }

    #[test]
    fn test_hit_inside_centre_band() {
        let layout = layout_300();
        assert_eq!(layout.hit(&Point::new(50.0, 50.0)), Some((0, 0)));
        assert_eq!(layout.hit(&Point::new(250.0, 150.0)), Some((1, 2)));
        assert_eq!(layout.hit(&Point::new(25.0, 75.0)), Some((0, 0)));
    }

    #[test]
    fn test_margin_never_hits() {
        let layout = layout_300();
        // band for cell 0 is [20, 80]; the outer 20px on each side is margin
        assert_eq!(layout.hit(&Point::new(19.0, 50.0)), None);
        assert_eq!(layout.hit(&Point::new(81.0, 50.0)), None);
        assert_eq!(layout.hit(&Point::new(50.0, 99.0)), None);
        assert_eq!(layout.hit(&Point::new(100.0, 100.0)), None);
        assert_eq!(layout.hit(&Point::new(-5.0, 50.0)), None);
        assert_eq!(layout.hit(&Point::new(50.0, 400.0)), None);
    }

    #[test]
    fn test_row_and_column_are_independent() {
        let layout = layout_300();
        assert_eq!(layout.row_hit(150.0), Some(1));
        assert_eq!(layout.column_hit(5.0), None);
        assert_eq!(layout.hit(&Point::new(5.0, 150.0)), None);
    }

    #[test]
    fn test_empty_layout_has_no_hits() {
        let layout = GridLayout::new(3, 0.6);
        assert_eq!(layout.hit(&Point::new(10.0, 10.0)), None);
        assert_eq!(layout.hit(&Point::new(0.0, 0.0)), None);
        assert_eq!(layout.row_hit(0.0), None);
    }

    #[test]
    fn test_rect_union_ignores_empty() {
        let mut rect = Rect::default();
        rect.union(&Rect::new(10, 10, 20, 20));
        assert_eq!(rect, Rect::new(10, 10, 20, 20));
        rect.union(&Rect::default());
        assert_eq!(rect, Rect::new(10, 10, 20, 20));
        rect.union(&Rect::new(0, 15, 12, 40));
        assert_eq!(rect, Rect::new(0, 10, 20, 40));
        rect.set_empty();
        assert!(rect.is_empty());
    }

    #[test]
    fn test_last_segment_alpha() {
        let layout = layout_300();
        let last = Point::new(50.0, 50.0);
        assert_eq!(layout.last_segment_alpha(&Point::new(60.0, 50.0), &last), 0.0);
        assert_eq!(layout.last_segment_alpha(&Point::new(200.0, 50.0), &last), 1.0);
        let halfway = layout.last_segment_alpha(&Point::new(92.5, 50.0), &last);
        assert!((halfway - 0.5).abs() < 1e-4);
    }
}
