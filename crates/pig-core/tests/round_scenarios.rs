use pig_core::game::{Action, ActionSource, Game, GameEvent, RoundOutcome, RoundStatus};
use pig_core::highscore::HighScoreStore;
use pig_core::model::dice::{Die, ScriptedDice};
use pig_core::model::player::Player;
use pig_core::policy::HoldPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fs;
use tempfile::tempdir;

#[derive(Debug)]
struct Threshold(u32);

impl HoldPolicy for Threshold {
    fn decide_hold(&self, turn_score: u32) -> bool {
        turn_score >= self.0
    }
}

struct Scripted(VecDeque<Action>);

impl ActionSource for Scripted {
    fn next_action(&mut self, _player: &Player) -> Action {
        self.0.pop_front().unwrap_or(Action::Quit)
    }
}

#[test]
fn bust_after_two_rolls_banks_nothing() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::load(dir.path().join("highscore.json")).unwrap();
    assert!(store.is_empty());

    let players = vec![
        Player::human("Ada"),
        Player::automated("Computer", Threshold(20)),
    ];
    let mut game = Game::new(players, ScriptedDice::new([5, 6, 1])).unwrap();
    game.start_round();

    game.submit(Action::Roll).unwrap();
    let events = game.submit(Action::Roll).unwrap();
    assert_eq!(game.players()[0].turn_total(), 11);
    assert!(matches!(events[0], GameEvent::Rolled { turn_total: 11, .. }));

    let events = game.submit(Action::Roll).unwrap();
    assert!(matches!(events[0], GameEvent::Busted { .. }));
    assert_eq!(game.players()[0].banked(), 0);
    assert_eq!(game.players()[0].turn_total(), 0);
    // The exhausted script busts the computer straight away, handing the turn back.
    assert_eq!(game.status(), RoundStatus::AwaitingAction(0));
}

#[test]
fn holding_past_one_hundred_wins_the_round() {
    // 4 cheats = 80 banked, then 5 rolls of 5 = 25 in the turn.
    let mut game = Game::new(
        vec![Player::human("Ada"), Player::human("Grace")],
        ScriptedDice::new([5, 5, 5, 5, 5]),
    )
    .unwrap();
    let mut actions = Scripted(
        [Action::Cheat; 4]
            .into_iter()
            .chain([Action::Roll; 5])
            .chain([Action::Hold])
            .collect(),
    );
    let mut events = Vec::new();

    let outcome = game.play_round(&mut actions, &mut events);

    assert_eq!(outcome, RoundOutcome::Winner(0));
    assert_eq!(game.winner().map(Player::banked), Some(105));
    assert_eq!(
        events.last(),
        Some(&GameEvent::RoundWon {
            player: "Ada".to_string(),
            score: 105
        })
    );
}

#[test]
fn existing_record_is_updated_by_a_new_win() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.json");
    fs::write(
        &path,
        r#"{"Alice": {"name":"Alice","best_score":50,"games_played":3}}"#,
    )
    .unwrap();
    let mut store = HighScoreStore::load(&path).unwrap();

    let mut alice = Player::human("Alice");
    alice.cheat(60);
    let record = store.record_win(&alice).unwrap();

    assert_eq!(record.best_score, 60);
    assert_eq!(record.games_played, 4);
    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["Alice"]["best_score"], 60);
    assert_eq!(on_disk["Alice"]["games_played"], 4);
}

#[test]
fn quit_mid_turn_aborts_and_freezes_scores() {
    let mut game = Game::new(
        vec![Player::human("Ada"), Player::human("Grace")],
        ScriptedDice::new([4, 4, 4]),
    )
    .unwrap();
    let mut actions = Scripted([Action::Roll, Action::Cheat, Action::Quit, Action::Hold].into());
    let mut events = Vec::new();

    let outcome = game.play_round(&mut actions, &mut events);

    assert_eq!(outcome, RoundOutcome::Aborted);
    assert_eq!(events.last(), Some(&GameEvent::RoundAborted));
    assert_eq!(game.players()[0].banked(), 20);
    assert_eq!(game.players()[0].turn_total(), 4);
    assert_eq!(actions.0, VecDeque::from([Action::Hold]));
}

#[test]
fn winner_is_reported_only_at_or_above_the_winning_score() {
    let mut picker = StdRng::seed_from_u64(11);
    for seed in 0..200u64 {
        let players = vec![
            Player::human("Ada"),
            Player::automated("Computer", Threshold(15 + (seed % 10) as u32)),
        ];
        let mut game = Game::new(players, Die::with_seed(seed)).unwrap();
        game.start_round();

        let mut steps = 0;
        while let RoundStatus::AwaitingAction(_) = game.status() {
            for player in game.players() {
                assert!(player.banked() < 100, "{player} should already have won");
            }
            let action = match picker.gen_range(0..10) {
                0..=5 => Action::Roll,
                6..=8 => Action::Hold,
                _ => Action::Cheat,
            };
            game.submit(action).unwrap();
            steps += 1;
            assert!(steps < 10_000, "round with seed {seed} never finished");
        }

        match game.status() {
            RoundStatus::Won(index) => assert!(game.players()[index].banked() >= 100),
            other => panic!("unexpected status {other:?}"),
        }
    }
}
