pub mod bollinger;

pub use bollinger::{band_position, calculate_bollinger, calculate_bollinger_default, BollingerBands};
