use core::fmt;
use serde::{Deserialize, Serialize};

/// Best result and games won for one identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub best_score: u32,
    pub games_played: u32,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            best_score: 0,
            games_played: 0,
        }
    }

    pub fn register_win(&mut self, name: &str, score: u32) {
        self.best_score = self.best_score.max(score);
        self.games_played += 1;
        name.clone_into(&mut self.name);
    }

    pub fn summary(&self) -> RecordSummary<'_> {
        RecordSummary { record: self }
    }
}

/// Console line for a record, rendered on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary<'a> {
    record: &'a ScoreRecord,
}

impl RecordSummary<'_> {
    pub fn record(&self) -> &ScoreRecord {
        self.record
    }
}

impl fmt::Display for RecordSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Best Score: {}, Games Played: {}",
            self.record.name, self.record.best_score, self.record.games_played
        )
    }
}
