use pig_core::policy::HoldPolicy;
use thiserror::Error;
use tracing::{Level, event};

pub const DEFAULT_THRESHOLD: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("{0:?} is not a whole number")]
    NotANumber(String),
    #[error("threshold must be positive, got {0}")]
    NotPositive(i64),
    #[error("threshold {0} is too large")]
    TooLarge(i64),
}

/// Keeps rolling until the turn total reaches a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    threshold: u32,
}

impl ThresholdPolicy {
    pub fn new(threshold: i64) -> Result<Self, ThresholdError> {
        if threshold <= 0 {
            return Err(ThresholdError::NotPositive(threshold));
        }
        let threshold =
            u32::try_from(threshold).map_err(|_| ThresholdError::TooLarge(threshold))?;
        Ok(Self { threshold })
    }

    pub fn parse(raw: &str) -> Result<Self, ThresholdError> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ThresholdError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }

    /// Parses user input, falling back to the default threshold instead of
    /// failing. The rejection is handed back so the caller can tell the user.
    pub fn from_input(raw: &str) -> (Self, Option<ThresholdError>) {
        Self::from_input_or(raw, Self::default())
    }

    pub fn from_input_or(raw: &str, fallback: Self) -> (Self, Option<ThresholdError>) {
        match Self::parse(raw) {
            Ok(policy) => (policy, None),
            Err(err) => {
                event!(
                    target: "pig_bot::threshold",
                    Level::WARN,
                    input = raw.trim(),
                    error = %err,
                    fallback = fallback.threshold,
                    "threshold rejected, using default"
                );
                (fallback, Some(err))
            }
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl HoldPolicy for ThresholdPolicy {
    fn decide_hold(&self, turn_score: u32) -> bool {
        let hold = turn_score >= self.threshold;
        event!(
            target: "pig_bot::hold",
            Level::DEBUG,
            threshold = self.threshold,
            turn_score,
            hold
        );
        hold
    }

    fn describe(&self) -> String {
        format!("hold at {}", self.threshold)
    }
}
