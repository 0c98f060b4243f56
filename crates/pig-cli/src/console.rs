use std::io::{self, BufRead, ErrorKind, Write};

use pig_bot::ThresholdPolicy;
use pig_core::game::{Action, ActionSource, EventSink, GameEvent};
use pig_core::highscore::HighScoreStore;
use pig_core::model::player::Player;
use tracing::warn;

use crate::config::ComputerConfig;

const INVALID_ACTION: &str = "Invalid input, please enter 'r', 'h', 'c', or 'q'.";

/// Line-oriented terminal front end: prompts on `output`, reads from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
    failure: Option<io::Error>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            failure: None,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// The first I/O error swallowed while acting as an action source or sink.
    pub fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Prints `text` and reads one line; `None` once input is exhausted.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_required(&mut self, text: &str) -> io::Result<String> {
        self.prompt(text)?.ok_or_else(|| {
            io::Error::new(ErrorKind::UnexpectedEof, "input closed during game setup")
        })
    }

    /// Asks for player one and the opponent.
    pub fn setup_players(&mut self, computer: &ComputerConfig) -> io::Result<Vec<Player>> {
        let first = self.prompt_required("Enter Player 1's name: ")?;
        let first = non_blank(first, "Player 1");

        let mode = self.prompt_required("Play against (1) Computer or (2) another Player? ")?;
        let opponent = if mode == "1" {
            let name = self.prompt_required(&format!(
                "Enter the computer's name (blank for {}): ",
                computer.name
            ))?;
            let name = non_blank(name, &computer.name);

            let raw = self.prompt_required("Choose computer intelligence threshold (1-30): ")?;
            let fallback = computer.fallback_policy();
            let (policy, rejection) = ThresholdPolicy::from_input_or(&raw, fallback);
            if rejection.is_some() {
                self.say(format!(
                    "Invalid input. Setting to default ({}).",
                    fallback.threshold()
                ))?;
            }
            Player::automated(name, policy)
        } else {
            let name = self.prompt_required("Enter Player 2's name: ")?;
            Player::human(non_blank(name, "Player 2"))
        };

        Ok(vec![Player::human(first), opponent])
    }

    /// Only an explicit "yes" starts another round.
    pub fn confirm_replay(&mut self) -> io::Result<bool> {
        let answer = self.prompt("Do you want to play again? (yes/no): ")?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")))
    }

    pub fn show_highscores(&mut self, store: &HighScoreStore) -> io::Result<()> {
        self.say("High scores:")?;
        for summary in store.summaries() {
            self.say(summary.to_string())?;
        }
        Ok(())
    }

    pub fn show_events(&mut self, events: &[GameEvent]) -> io::Result<()> {
        for event in events {
            self.say(event.to_string())?;
        }
        Ok(())
    }

    fn remember(&mut self, err: io::Error) {
        warn!(error = %err, "console I/O failed");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }
}

impl<R: BufRead, W: Write> ActionSource for Console<R, W> {
    /// Re-prompts until a valid action arrives. Closed input counts as quitting.
    fn next_action(&mut self, player: &Player) -> Action {
        let text = format!(
            "{}, roll, hold, or cheat? (r/h/c) or quit game (q): ",
            player.name()
        );
        loop {
            match self.prompt(&text) {
                Ok(Some(raw)) => match raw.parse::<Action>() {
                    Ok(action) => return action,
                    Err(_) => {
                        if let Err(err) = self.say(INVALID_ACTION) {
                            self.remember(err);
                            return Action::Quit;
                        }
                    }
                },
                Ok(None) => return Action::Quit,
                Err(err) => {
                    self.remember(err);
                    return Action::Quit;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> EventSink for Console<R, W> {
    fn emit(&mut self, event: &GameEvent) {
        if let Err(err) = self.say(event.to_string()) {
            self.remember(err);
        }
    }
}

fn non_blank(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
