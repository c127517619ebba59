pub mod constants;
pub mod logging;
pub mod progress;
pub mod rounding;

pub use constants::*;
pub use logging::init_tracing;
pub use progress::ProgressReporter;
pub use rounding::{has_two_decimals, mean_or_zero, round2};
