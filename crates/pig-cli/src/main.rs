use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pig_cli::config::PigConfig;
use pig_cli::console::Console;
use pig_cli::logging::init_logging;
use pig_cli::session::Session;
use pig_core::AppInfo;
use pig_core::highscore::HighScoreStore;

/// Pig dice game against a friend or the computer.
#[derive(Debug, Parser)]
#[command(name = "pig", author, version, about = "Pig dice game with persistent high scores")]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override where high scores are stored.
    #[arg(long, value_name = "FILE")]
    highscores: Option<PathBuf>,

    /// Seed the dice for a reproducible game.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the score needed to win a round.
    #[arg(long, value_name = "POINTS")]
    winning_score: Option<u32>,

    /// Write structured JSON logs to the configured log file.
    #[arg(long)]
    log_structured: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => PigConfig::from_path(path)?,
        None => PigConfig::default(),
    };

    if let Some(path) = cli.highscores {
        config.highscores.path = path;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(points) = cli.winning_score {
        config.rules.winning_score = points;
    }

    if cli.log_structured {
        config.logging.enable_structured = true;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    tracing::info!(
        app = AppInfo::name(),
        version = AppInfo::version(),
        highscores = %config.highscores.path.display(),
        "starting"
    );

    let store = HighScoreStore::load(&config.highscores.path).with_context(|| {
        format!(
            "loading high scores from {}",
            config.highscores.path.display()
        )
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());
    let mut session = Session::new(config, store, console);
    session.run()?;

    Ok(())
}
