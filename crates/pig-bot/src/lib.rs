pub mod policy;

pub use policy::{DEFAULT_THRESHOLD, ThresholdError, ThresholdPolicy};
