pub mod cross;
pub mod ema;
pub mod sma;

pub use cross::{check_golden_cross, check_golden_cross_default};
pub use ema::{calculate_ema, ema_series};
pub use sma::{calculate_sma, rolling_std};
