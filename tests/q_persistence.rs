//! Trained agents must survive a save/load cycle byte-for-byte in their
//! learned values, and loading must reject incompatible files.

use gambit::{
    Error, Game, Player, Policy, StateKey,
    config::QLearningConfig,
    connect4::Connect4,
    opponents::RandomPolicy,
    pipeline::{MatchRunner, RunConfig},
    q_learning::QLearningAgent,
    tictactoe::BoardState,
};

fn sorted_entries<G: Game>(agent: &QLearningAgent<G>) -> Vec<((StateKey, G::Move), f64)> {
    let mut entries: Vec<_> = agent
        .q_table()
        .entries()
        .map(|(key, &value)| (key.clone(), value))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn train_against_random(num_games: usize) -> QLearningAgent<BoardState> {
    let mut agent: QLearningAgent<BoardState> = QLearningConfig::default()
        .with_learning_rate(0.3)
        .build_agent()
        .unwrap()
        .with_seed(17);
    let mut opponent = RandomPolicy::with_seed(18);

    let mut runner = MatchRunner::new(RunConfig {
        num_games,
        seed: Some(100),
        agent_player: Player::X,
    });
    runner.run(&mut agent, &mut opponent).unwrap();
    agent
}

#[test]
fn save_load_preserves_every_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trained.mpk");

    let agent = train_against_random(100);
    assert!(!agent.q_table().is_empty());
    agent.save_to_file(&path).unwrap();

    let loaded = QLearningAgent::<BoardState>::load_from_file(&path).unwrap();
    assert_eq!(sorted_entries(&agent), sorted_entries(&loaded));
    assert_eq!(loaded.epsilon(), agent.epsilon());
}

#[test]
fn loaded_agent_plays_greedily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trained.mpk");

    let agent = train_against_random(200);
    agent.save_to_file(&path).unwrap();

    let mut loaded = QLearningAgent::<BoardState>::load_from_file(&path).unwrap();
    assert!(!loaded.is_training());

    // Greedy play is deterministic: repeated selection in the same position
    // always yields the same move
    let state = BoardState::new();
    let first = loaded.select_move(&state).unwrap();
    for _ in 0..10 {
        assert_eq!(loaded.select_move(&state).unwrap(), first);
    }
}

#[test]
fn loading_rejects_other_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ttt.mpk");

    let agent = QLearningConfig::default()
        .build_agent::<BoardState>()
        .unwrap();
    agent.save_to_file(&path).unwrap();

    assert!(matches!(
        QLearningAgent::<Connect4>::load_from_file(&path),
        Err(Error::SavedGameMismatch { .. })
    ));
}

#[test]
fn loading_garbage_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.mpk");
    std::fs::write(&path, b"not messagepack").unwrap();

    assert!(matches!(
        QLearningAgent::<BoardState>::load_from_file(&path),
        Err(Error::Persistence { .. })
    ));
}

#[test]
fn resumed_training_continues_from_saved_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trained.mpk");

    let agent = train_against_random(50);
    agent.save_to_file(&path).unwrap();

    let mut resumed = QLearningAgent::<BoardState>::load_from_file(&path).unwrap();
    resumed.set_training(true);
    let before = resumed.q_table().len();

    let mut opponent = RandomPolicy::with_seed(99);
    let mut runner = MatchRunner::new(RunConfig {
        num_games: 50,
        seed: Some(200),
        agent_player: Player::X,
    });
    runner.run(&mut resumed, &mut opponent).unwrap();

    assert!(resumed.q_table().len() >= before);
}
