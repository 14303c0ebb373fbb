mod destroyable;
pub mod engine;
pub mod error;
pub mod events;
pub mod helpers;
pub mod model;

pub use destroyable::Destroyable;
pub use engine::{EngineSettings, PatternEngine};
pub use error::{PatternLockError, Result};
pub use model::{Dot, PatternEvent, PatternViewMode};
