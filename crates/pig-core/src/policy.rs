use core::fmt;

/// Decides when an automated player stops rolling and banks its turn.
pub trait HoldPolicy: fmt::Debug + Send {
    /// Returns `true` once `turn_score` is worth banking.
    fn decide_hold(&self, turn_score: u32) -> bool;

    /// Short human readable label used in logs.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

