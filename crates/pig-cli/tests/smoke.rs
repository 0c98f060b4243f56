use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn pig(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pig").expect("pig binary built");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--highscores")
        .arg(dir.join("highscore.json"));
    cmd
}

#[test]
fn quitting_exits_cleanly_without_touching_scores() {
    let dir = tempdir().expect("temp dir");

    pig(dir.path())
        .write_stdin("Ada\n2\nGrace\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada's turn"))
        .stdout(predicate::str::contains("Game has been quit."));

    assert!(!dir.path().join("highscore.json").exists());
}

#[test]
fn winning_round_persists_high_score() {
    let dir = tempdir().expect("temp dir");

    pig(dir.path())
        .write_stdin("Ada\n2\nGrace\nc\nc\nc\nc\nc\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("🏆 Ada wins with a score of 100!"))
        .stdout(predicate::str::contains("Ada - Best Score: 100, Games Played: 1"))
        .stdout(predicate::str::contains("Thanks for playing!"));

    let text = fs::read_to_string(dir.path().join("highscore.json")).expect("scores written");
    let scores: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(scores["Ada"]["name"], "Ada");
    assert_eq!(scores["Ada"]["best_score"], 100);
    assert_eq!(scores["Ada"]["games_played"], 1);
}

#[test]
fn replay_accumulates_games_played() {
    let dir = tempdir().expect("temp dir");
    let cheats = "c\n".repeat(5);

    pig(dir.path())
        .write_stdin(format!("Ada\n2\nGrace\n{cheats}yes\n{cheats}no\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada - Best Score: 100, Games Played: 2"));
}

#[test]
fn bad_threshold_falls_back_to_default() {
    let dir = tempdir().expect("temp dir");

    pig(dir.path())
        .args(["--seed", "5"])
        .write_stdin("Ada\n1\n\nplenty\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input. Setting to default (20)."))
        .stdout(predicate::str::contains("Game has been quit."));
}

#[test]
fn malformed_high_scores_are_fatal() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("highscore.json"), "not json").expect("write scores");

    pig(dir.path())
        .write_stdin("Ada\n2\nGrace\nq\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading high scores"));
}

#[test]
fn config_file_changes_the_rules() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("pig.yaml");
    fs::write(&config, "rules:\n  winning_score: 40\n").expect("write config");

    pig(dir.path())
        .arg("--config")
        .arg(&config)
        .write_stdin("Ada\n2\nGrace\nc\nc\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("🏆 Ada wins with a score of 40!"));
}
