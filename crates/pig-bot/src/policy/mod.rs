mod threshold;

pub use pig_core::policy::HoldPolicy;
pub use threshold::{DEFAULT_THRESHOLD, ThresholdError, ThresholdPolicy};
