mod auto_draw;
mod gesture_trace;
mod input_translator;
mod pattern_engine;
mod pattern_verifier;
mod settings;

pub use auto_draw::{AutoDrawFrame, MILLIS_PER_CIRCLE_ANIMATING};
pub use gesture_trace::GestureTrace;
pub use input_translator::InputTranslator;
pub use pattern_engine::{GestureOutcome, PatternEngine};
pub use pattern_verifier::{PatternVerifier, Verdict, VerifierEvent};
pub use settings::{EngineSettings, CONFIG_PATH_ENV};
