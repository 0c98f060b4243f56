use crate::game::events::GameEvent;
use crate::model::dice::{BUST_FACE, Dice};
use crate::model::turn::TurnAccumulator;
use crate::policy::HoldPolicy;
use core::fmt;

/// Who decides when a player stops rolling.
#[derive(Debug)]
pub enum Control {
    /// Actions come from outside the game, one at a time.
    Human,
    /// Rolls until the policy says hold or the turn busts.
    Automated(Box<dyn HoldPolicy>),
}

impl Control {
    pub fn automated(policy: impl HoldPolicy + 'static) -> Self {
        Control::Automated(Box::new(policy))
    }
}

#[derive(Debug)]
pub struct Player {
    identity: String,
    name: String,
    banked: u32,
    turn: TurnAccumulator,
    control: Control,
}

impl Player {
    /// The identity key is taken from the first name and never changes.
    pub fn new(name: impl Into<String>, control: Control) -> Self {
        let name = name.into();
        Self {
            identity: name.clone(),
            name,
            banked: 0,
            turn: TurnAccumulator::new(),
            control,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, Control::Human)
    }

    pub fn automated(name: impl Into<String>, policy: impl HoldPolicy + 'static) -> Self {
        Self::new(name, Control::automated(policy))
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn banked(&self) -> u32 {
        self.banked
    }

    pub fn turn_total(&self) -> u32 {
        self.turn.total()
    }

    pub fn is_automated(&self) -> bool {
        matches!(self.control, Control::Automated(_))
    }

    pub fn roll<D: Dice + ?Sized>(&mut self, dice: &mut D) -> GameEvent {
        let roll = self.turn.apply(dice.roll());
        if roll == BUST_FACE {
            GameEvent::Busted {
                player: self.name.clone(),
            }
        } else {
            GameEvent::Rolled {
                player: self.name.clone(),
                roll,
                turn_total: self.turn.total(),
            }
        }
    }

    pub fn hold(&mut self) -> GameEvent {
        self.banked = self.banked.saturating_add(self.turn.bank());
        GameEvent::Held {
            player: self.name.clone(),
            banked: self.banked,
        }
    }

    /// Adds `bonus` straight to the banked score; the turn total is left alone.
    /// The banked score saturates at `u32::MAX`.
    pub fn cheat(&mut self, bonus: u32) -> GameEvent {
        self.banked = self.banked.saturating_add(bonus);
        GameEvent::Cheated {
            player: self.name.clone(),
            bonus,
            banked: self.banked,
        }
    }

    pub fn reset(&mut self) {
        self.banked = 0;
        self.turn.reset();
    }

    /// Humans never hold voluntarily here; their choice arrives as an action.
    pub fn decide_hold(&self) -> bool {
        match &self.control {
            Control::Human => false,
            Control::Automated(policy) => policy.decide_hold(self.turn.total()),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.banked)
    }
}
