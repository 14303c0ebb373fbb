mod dot;
mod dot_state;
mod geometry;
mod hit_lookup;
pub mod pattern_codec;
mod pattern_event;
mod pointer_event;
mod snapshot;
mod view_mode;

pub use dot::{Dot, DotGrid};
pub use dot_state::{DotState, SelectedTransition};
pub use geometry::{GridLayout, Padding, Point, Rect};
pub use hit_lookup::HitLookup;
pub use pattern_codec::{pattern_to_string, string_to_pattern};
pub use pattern_event::{observe_pattern, PatternEvent, PatternListener};
pub use pointer_event::{PointerAction, PointerEvent};
pub use snapshot::PatternLockSnapshot;
pub use view_mode::{AspectRatio, DotColor, PatternViewMode};
