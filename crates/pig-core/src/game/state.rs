use crate::game::action::Action;
use crate::game::events::{ActionSource, EventSink, GameEvent};
use crate::model::dice::Dice;
use crate::model::player::Player;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const WINNING_SCORE: u32 = 100;
pub const CHEAT_BONUS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub winning_score: u32,
    pub cheat_bonus: u32,
    /// Abort the round after this many completed turns without a winner.
    pub turn_limit: Option<u32>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            cheat_bonus: CHEAT_BONUS,
            turn_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// No round has been started yet.
    Idle,
    AwaitingAction(usize),
    Won(usize),
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner(usize),
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("no round has been started")]
    NotStarted,
    #[error("the round is already over")]
    RoundFinished,
}

/// Alternates turns across the players until someone reaches the winning
/// score or a human quits. Automated turns are played out as soon as they
/// come up, so the game only ever waits on human actions.
#[derive(Debug)]
pub struct Game<D: Dice> {
    players: Vec<Player>,
    dice: D,
    rules: GameRules,
    status: RoundStatus,
    active: usize,
    round_number: u32,
    turns_taken: u32,
}

impl<D: Dice> Game<D> {
    pub fn new(players: Vec<Player>, dice: D) -> Result<Self, GameError> {
        Self::with_rules(players, dice, GameRules::default())
    }

    pub fn with_rules(players: Vec<Player>, dice: D, rules: GameRules) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            players,
            dice,
            rules,
            status: RoundStatus::Idle,
            active: 0,
            round_number: 0,
            turns_taken: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status {
            RoundStatus::Won(index) => Some(RoundOutcome::Winner(index)),
            RoundStatus::Aborted => Some(RoundOutcome::Aborted),
            RoundStatus::Idle | RoundStatus::AwaitingAction(_) => None,
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            RoundStatus::Won(index) => self.players.get(index),
            _ => None,
        }
    }

    /// Resets every player and opens a new round with the first player.
    pub fn start_round(&mut self) -> Vec<GameEvent> {
        for player in &mut self.players {
            player.reset();
        }
        self.round_number += 1;
        self.turns_taken = 0;
        self.active = 0;

        let mut events = vec![GameEvent::RoundStarted {
            round: self.round_number,
        }];
        debug!(round = self.round_number, players = self.players.len(), "round started");
        self.begin_turn(&mut events);
        self.play_automated_turns(&mut events);
        events
    }

    /// Applies one human action for the active player.
    pub fn submit(&mut self, action: Action) -> Result<Vec<GameEvent>, GameError> {
        match self.status {
            RoundStatus::Idle => Err(GameError::NotStarted),
            RoundStatus::Won(_) | RoundStatus::Aborted => Err(GameError::RoundFinished),
            RoundStatus::AwaitingAction(index) => Ok(self.apply(index, action)),
        }
    }

    /// Plays a full round, pulling human actions from `input`.
    pub fn play_round<A, S>(&mut self, input: &mut A, sink: &mut S) -> RoundOutcome
    where
        A: ActionSource + ?Sized,
        S: EventSink + ?Sized,
    {
        for event in self.start_round() {
            sink.emit(&event);
        }

        loop {
            match self.status {
                RoundStatus::AwaitingAction(index) => {
                    let action = input.next_action(&self.players[index]);
                    for event in self.apply(index, action) {
                        sink.emit(&event);
                    }
                }
                RoundStatus::Won(index) => return RoundOutcome::Winner(index),
                RoundStatus::Aborted | RoundStatus::Idle => return RoundOutcome::Aborted,
            }
        }
    }

    fn apply(&mut self, index: usize, action: Action) -> Vec<GameEvent> {
        let mut events = Vec::new();
        debug!(player = self.players[index].name(), %action, "action received");

        match action {
            Action::Quit => {
                self.status = RoundStatus::Aborted;
                events.push(GameEvent::RoundAborted);
                return events;
            }
            Action::Roll => {
                let event = self.players[index].roll(&mut self.dice);
                let busted = matches!(event, GameEvent::Busted { .. });
                events.push(event);
                if busted {
                    self.end_turn(&mut events);
                }
            }
            Action::Hold => {
                events.push(self.players[index].hold());
                if !self.check_winner(index, &mut events) {
                    self.end_turn(&mut events);
                }
            }
            Action::Cheat => {
                events.push(self.players[index].cheat(self.rules.cheat_bonus));
            }
        }

        if matches!(self.status, RoundStatus::AwaitingAction(active) if active == index) {
            self.check_winner(index, &mut events);
        }
        self.play_automated_turns(&mut events);
        events
    }

    fn play_automated_turns(&mut self, events: &mut Vec<GameEvent>) {
        while let RoundStatus::AwaitingAction(index) = self.status {
            if !self.players[index].is_automated() {
                break;
            }
            self.play_automated_turn(index, events);
        }
    }

    fn play_automated_turn(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        loop {
            let event = self.players[index].roll(&mut self.dice);
            let busted = matches!(event, GameEvent::Busted { .. });
            events.push(event);
            if busted {
                break;
            }
            if self.players[index].decide_hold() {
                events.push(self.players[index].hold());
                if self.check_winner(index, events) {
                    return;
                }
                break;
            }
        }
        self.end_turn(events);
    }

    fn check_winner(&mut self, index: usize, events: &mut Vec<GameEvent>) -> bool {
        let player = &self.players[index];
        if player.banked() < self.rules.winning_score {
            return false;
        }
        info!(
            player = player.name(),
            score = player.banked(),
            round = self.round_number,
            "round won"
        );
        events.push(GameEvent::RoundWon {
            player: player.name().to_string(),
            score: player.banked(),
        });
        self.status = RoundStatus::Won(index);
        true
    }

    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.turns_taken += 1;
        if let Some(limit) = self.rules.turn_limit {
            if self.turns_taken >= limit {
                warn!(limit, round = self.round_number, "turn limit reached without a winner");
                self.status = RoundStatus::Aborted;
                events.push(GameEvent::TurnLimitReached { limit });
                events.push(GameEvent::RoundAborted);
                return;
            }
        }
        self.active = (self.active + 1) % self.players.len();
        self.begin_turn(events);
    }

    fn begin_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.status = RoundStatus::AwaitingAction(self.active);
        events.push(GameEvent::TurnStarted {
            player: self.players[self.active].name().to_string(),
        });
    }
}
