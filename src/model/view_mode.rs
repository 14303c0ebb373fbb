use serde::{Deserialize, Serialize};

/// How the current pattern is displayed. `AutoDraw` replays the pattern
/// instead of following live input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PatternViewMode {
    Correct,
    AutoDraw,
    Wrong,
}

impl Default for PatternViewMode {
    fn default() -> Self {
        PatternViewMode::AutoDraw
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    WidthBias,
    HeightBias,
}

impl AspectRatio {
    /// Returns the `(width, height)` to use for a view offered `width x height`.
    pub fn measure(&self, width: u32, height: u32) -> (u32, u32) {
        let shorter = width.min(height);
        match self {
            AspectRatio::Square => (shorter, shorter),
            AspectRatio::WidthBias => (width, shorter),
            AspectRatio::HeightBias => (shorter, height),
        }
    }
}

/// Logical colour for a dot or path segment; the renderer maps it to a paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotColor {
    Normal,
    Correct,
    Wrong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_measure() {
        assert_eq!(AspectRatio::Square.measure(300, 500), (300, 300));
        assert_eq!(AspectRatio::WidthBias.measure(300, 500), (300, 300));
        assert_eq!(AspectRatio::WidthBias.measure(500, 300), (500, 300));
        assert_eq!(AspectRatio::HeightBias.measure(300, 500), (300, 500));
        assert_eq!(AspectRatio::HeightBias.measure(500, 300), (300, 300));
    }
}
