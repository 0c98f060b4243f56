use crate::model::dice::BUST_FACE;

/// Unbanked points collected during the current turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnAccumulator {
    total: u32,
}

impl TurnAccumulator {
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// Applies a roll and hands it back so the caller can spot a bust.
    pub fn apply(&mut self, roll: u8) -> u8 {
        if roll == BUST_FACE {
            self.total = 0;
        } else {
            self.total = self.total.saturating_add(u32::from(roll));
        }
        roll
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Takes the turn total out of the accumulator, leaving it at zero.
    pub fn bank(&mut self) -> u32 {
        std::mem::take(&mut self.total)
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
