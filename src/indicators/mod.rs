pub mod engine;
pub mod error;
pub mod interpret;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use engine::compute_indicators;
pub use error::IndicatorError;
pub use interpret::{interpret, interpret_kind, IndicatorKind, DEFAULT_INTERPRETATION};
