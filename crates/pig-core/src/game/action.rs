use core::fmt;
use core::str::FromStr;
use thiserror::Error;

/// A single move by a human-controlled player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Roll,
    Hold,
    Cheat,
    Quit,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Roll, Action::Hold, Action::Cheat, Action::Quit];

    pub const fn key(self) -> char {
        match self {
            Action::Roll => 'r',
            Action::Hold => 'h',
            Action::Cheat => 'c',
            Action::Quit => 'q',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Roll => "roll",
            Action::Hold => "hold",
            Action::Cheat => "cheat",
            Action::Quit => "quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised action {input:?}; expected one of r, h, c, q")]
pub struct ActionParseError {
    pub input: String,
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => Action::ALL
                .iter()
                .copied()
                .find(|action| action.key() == c.to_ascii_lowercase()),
            _ => None,
        };
        parsed.ok_or_else(|| ActionParseError {
            input: trimmed.to_string(),
        })
    }
}
