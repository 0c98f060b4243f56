use super::record::{RecordSummary, ScoreRecord};
use crate::model::player::Player;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read high scores from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path:?} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write high scores to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Identity key to record, kept in insertion order so the file and the
/// listing come out in the order players first won.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ScoreTable {
    entries: Vec<(String, ScoreRecord)>,
}

impl ScoreTable {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&self, key: &str) -> Option<&ScoreRecord> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    fn entry_index(&mut self, key: &str, name: &str) -> usize {
        match self.position(key) {
            Some(index) => index,
            None => {
                self.entries
                    .push((key.to_string(), ScoreRecord::new(name)));
                self.entries.len() - 1
            }
        }
    }

    /// Parsed through an insertion-ordered `Map` so the file order survives.
    fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(key, value)| serde_json::from_value(value).map(|record| (key, record)))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    fn to_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        self.entries
            .iter()
            .map(|(key, record)| {
                let value = serde_json::to_value(record)?;
                Ok::<_, serde_json::Error>((key.clone(), value))
            })
            .collect()
    }
}

/// JSON-backed high score table, rewritten in full after every update.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    table: ScoreTable,
}

impl HighScoreStore {
    /// Store that has nothing recorded yet and will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: ScoreTable::default(),
        }
    }

    /// Loads the table; a missing file is an empty table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no high score file yet");
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let table = match ScoreTable::from_json(&text) {
            Ok(table) => table,
            Err(source) => return Err(StoreError::Parse { path, source }),
        };
        debug!(path = %path.display(), records = table.entries.len(), "high scores loaded");
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    pub fn get(&self, identity: &str) -> Option<&ScoreRecord> {
        self.table.get(identity)
    }

    /// Credits `player` with a win under its identity key and saves.
    ///
    /// The in-memory table is updated before the write, so on a write error it
    /// is ahead of the file.
    pub fn record_win(&mut self, player: &Player) -> Result<&ScoreRecord, StoreError> {
        let index = self.table.entry_index(player.identity(), player.name());
        self.table.entries[index]
            .1
            .register_win(player.name(), player.banked());
        self.save()?;

        let (key, record) = &self.table.entries[index];
        info!(
            identity = key.as_str(),
            best_score = record.best_score,
            games_played = record.games_played,
            "high score recorded"
        );
        Ok(record)
    }

    /// Summaries in insertion order; clone the iterator to walk it again.
    pub fn summaries(&self) -> impl Iterator<Item = RecordSummary<'_>> + Clone + '_ {
        self.table
            .entries
            .iter()
            .map(|(_, record)| record.summary())
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.table.to_map()?.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = self.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{HighScoreStore, StoreError};
    use crate::model::player::Player;
    use std::fs;
    use tempfile::tempdir;

    fn winner(name: &str, score: u32) -> Player {
        let mut player = Player::human(name);
        player.cheat(score);
        player
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::load(dir.path().join("scores.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.summaries().count(), 0);
    }

    #[test]
    fn malformed_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();
        let err = HighScoreStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn directory_in_place_of_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = HighScoreStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn record_win_creates_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = HighScoreStore::load(&path).unwrap();

        let record = store.record_win(&winner("Ada", 104)).unwrap().clone();

        assert_eq!(record.best_score, 104);
        assert_eq!(record.games_played, 1);
        let reloaded = HighScoreStore::load(&path).unwrap();
        assert_eq!(reloaded.get("Ada"), Some(&record));
    }

    #[test]
    fn failed_write_is_an_error_and_memory_stays_ahead() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();
        let path = blocker.join("scores.json");
        let mut store = HighScoreStore::load(&path).unwrap();

        let err = store.record_win(&winner("Ada", 100)).unwrap_err();

        assert!(matches!(err, StoreError::Write { ref path, .. } if path.ends_with("scores.json")));
        let record = store.get("Ada").unwrap();
        assert_eq!(record.best_score, 100);
        assert_eq!(record.games_played, 1);
        assert!(!path.exists());
    }

    #[test]
    fn lower_scores_only_bump_games_played() {
        let dir = tempdir().unwrap();
        let mut store = HighScoreStore::load(dir.path().join("scores.json")).unwrap();
        store.record_win(&winner("Ada", 120)).unwrap();
        store.record_win(&winner("Ada", 100)).unwrap();
        let record = store.record_win(&winner("Ada", 100)).unwrap();
        assert_eq!(record.best_score, 120);
        assert_eq!(record.games_played, 3);
    }

    #[test]
    fn renamed_player_keeps_history_under_identity() {
        let dir = tempdir().unwrap();
        let mut store = HighScoreStore::load(dir.path().join("scores.json")).unwrap();
        store.record_win(&winner("Ada", 100)).unwrap();

        let mut renamed = winner("Ada", 110);
        renamed.rename("Countess");
        store.record_win(&renamed).unwrap();

        assert_eq!(store.len(), 1);
        let record = store.get("Ada").unwrap();
        assert_eq!(record.name, "Countess");
        assert_eq!(record.games_played, 2);
    }

    #[test]
    fn file_keeps_insertion_order_and_four_space_indent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let mut store = HighScoreStore::load(&path).unwrap();
        store.record_win(&winner("Zed", 100)).unwrap();
        store.record_win(&winner("Ada", 100)).unwrap();

        let reloaded = HighScoreStore::load(&path).unwrap();
        let order: Vec<String> = reloaded.summaries().map(|s| s.to_string()).collect();
        assert!(order[0].starts_with("Zed"));
        assert!(order[1].starts_with("Ada"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"Zed\": {\n        \"name\": \"Zed\""));
        assert!(text.find("\"Zed\"").unwrap() < text.find("\"Ada\"").unwrap());

        let listing: Vec<String> = store.summaries().map(|s| s.to_string()).collect();
        assert_eq!(
            listing,
            vec![
                "Zed - Best Score: 100, Games Played: 1",
                "Ada - Best Score: 100, Games Played: 1"
            ]
        );
    }

    #[test]
    fn summaries_can_be_walked_twice() {
        let dir = tempdir().unwrap();
        let mut store = HighScoreStore::load(dir.path().join("scores.json")).unwrap();
        store.record_win(&winner("Ada", 100)).unwrap();
        let summaries = store.summaries();
        assert_eq!(summaries.clone().count(), 1);
        assert_eq!(summaries.count(), 1);
    }
}
