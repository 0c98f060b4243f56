pub mod action;
pub mod events;
pub mod state;

pub use action::{Action, ActionParseError};
pub use events::{ActionSource, EventSink, GameEvent};
pub use state::{CHEAT_BONUS, Game, GameError, GameRules, RoundOutcome, RoundStatus, WINNING_SCORE};
