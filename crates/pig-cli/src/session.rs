use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use pig_core::game::{ActionSource, Game, RoundOutcome, RoundStatus};
use pig_core::highscore::HighScoreStore;
use pig_core::model::dice::Die;
use tracing::info;

use crate::config::PigConfig;
use crate::console::Console;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub quit: bool,
}

/// One process worth of play: setup, then rounds until a quit or a declined
/// replay. High scores are saved after every win.
pub struct Session<R, W> {
    config: PigConfig,
    store: HighScoreStore,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: PigConfig, store: HighScoreStore, console: Console<R, W>) -> Self {
        Self {
            config,
            store,
            console,
        }
    }

    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    pub fn run(&mut self) -> Result<SessionSummary> {
        let players = self
            .console
            .setup_players(&self.config.computer)
            .context("setting up players")?;
        let dice = match self.config.seed {
            Some(seed) => Die::with_seed(seed),
            None => Die::from_entropy(),
        };
        let mut game = Game::with_rules(players, dice, self.config.game_rules())?;
        let mut summary = SessionSummary::default();

        loop {
            let events = game.start_round();
            self.console.show_events(&events)?;
            while let RoundStatus::AwaitingAction(index) = game.status() {
                let action = self.console.next_action(&game.players()[index]);
                let events = game.submit(action)?;
                self.console.show_events(&events)?;
            }
            if let Some(err) = self.console.take_failure() {
                return Err(err).context("console I/O failed during the round");
            }
            summary.rounds_played += 1;

            match game.outcome() {
                Some(RoundOutcome::Winner(index)) => {
                    summary.rounds_won += 1;
                    let winner = &game.players()[index];
                    self.store
                        .record_win(winner)
                        .with_context(|| format!("saving high score for {}", winner.name()))?;
                    self.console.show_highscores(&self.store)?;
                }
                Some(RoundOutcome::Aborted) | None => {
                    summary.quit = true;
                    break;
                }
            }

            if !self.console.confirm_replay()? {
                self.console.say("Thanks for playing! 🖐️")?;
                break;
            }
        }

        info!(
            rounds_played = summary.rounds_played,
            rounds_won = summary.rounds_won,
            quit = summary.quit,
            "session finished"
        );
        Ok(summary)
    }
}
