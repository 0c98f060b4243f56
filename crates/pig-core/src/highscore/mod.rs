mod record;
mod store;

pub use record::{RecordSummary, ScoreRecord};
pub use store::{DEFAULT_HIGHSCORE_FILE, HighScoreStore, StoreError};
