use crate::game::action::Action;
use crate::model::player::Player;
use core::fmt;

/// Everything the game reports back to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    TurnStarted { player: String },
    Rolled { player: String, roll: u8, turn_total: u32 },
    Busted { player: String },
    Held { player: String, banked: u32 },
    Cheated { player: String, bonus: u32, banked: u32 },
    RoundWon { player: String, score: u32 },
    TurnLimitReached { limit: u32 },
    RoundAborted,
}

impl GameEvent {
    /// Name of the player the event is about, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            GameEvent::TurnStarted { player }
            | GameEvent::Rolled { player, .. }
            | GameEvent::Busted { player }
            | GameEvent::Held { player, .. }
            | GameEvent::Cheated { player, .. }
            | GameEvent::RoundWon { player, .. } => Some(player.as_str()),
            GameEvent::RoundStarted { .. }
            | GameEvent::TurnLimitReached { .. }
            | GameEvent::RoundAborted => None,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoundStarted { round } => write!(f, "--- Round {round} ---"),
            GameEvent::TurnStarted { player } => write!(f, "\n{player}'s turn 🎮"),
            GameEvent::Rolled {
                player,
                roll,
                turn_total,
            } => write!(f, "{player} rolled a {roll}. 🎲 Turn total: {turn_total}"),
            GameEvent::Busted { player } => {
                write!(f, "{player} rolled a 1. 🎲 No points this turn.")
            }
            GameEvent::Held { player, banked } => {
                write!(f, "{player} holds. Total score: {banked} 📈")
            }
            GameEvent::Cheated { player, bonus, .. } => {
                write!(f, "{player} uses CHEAT! +{bonus} points! 🚀")
            }
            GameEvent::RoundWon { player, score } => {
                write!(f, "🏆 {player} wins with a score of {score}!")
            }
            GameEvent::TurnLimitReached { limit } => {
                write!(f, "No winner after {limit} turns.")
            }
            GameEvent::RoundAborted => f.write_str("Game has been quit."),
        }
    }
}

/// Supplies the next action for a player without a hold policy.
pub trait ActionSource {
    fn next_action(&mut self, player: &Player) -> Action;
}

/// Receives display events as the game produces them.
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}
