//! Train a Q-learning agent at Tic-Tac-Toe against the heuristic opponent,
//! then evaluate it against both baselines and save the trained table.

use anyhow::{Context, Result};
use gambit::{
    Player, Policy,
    config::QLearningConfig,
    opponents::{HeuristicPolicy, RandomPolicy},
    pipeline::{MatchRunner, ProgressObserver, RunConfig},
    q_learning::QLearningAgent,
    tictactoe::BoardState,
};

const TRAINING_GAMES: usize = 50_000;
const EVAL_GAMES: usize = 1_000;
const SEED: u64 = 42;

fn evaluate(
    agent: &mut QLearningAgent<BoardState>,
    opponent: &mut dyn Policy<BoardState>,
    seed: u64,
) -> Result<()> {
    let mut runner = MatchRunner::new(RunConfig {
        num_games: EVAL_GAMES,
        seed: Some(seed),
        agent_player: Player::X,
    });
    let result = runner.run(agent, opponent)?;
    println!(
        "vs {:<10} win {:>5.1}%  draw {:>5.1}%  loss {:>5.1}%",
        result.opponent,
        100.0 * result.win_rate(),
        100.0 * result.draw_rate(),
        100.0 * result.loss_rate(),
    );
    Ok(())
}

fn main() -> Result<()> {
    let mut agent: QLearningAgent<BoardState> = QLearningConfig::default()
        .build_agent()?
        .with_seed(SEED);
    let mut trainer = HeuristicPolicy::with_seed(SEED + 1);

    println!("Training for {TRAINING_GAMES} games against the heuristic opponent...");
    let mut runner = MatchRunner::new(RunConfig {
        num_games: TRAINING_GAMES,
        seed: Some(SEED),
        agent_player: Player::X,
    });
    runner.add_observer(Box::new(ProgressObserver::new()?));
    let training = runner.run(&mut agent, &mut trainer)?;

    println!(
        "Training finished: win rate {:.1}%, final epsilon {:.4}, {} table entries",
        100.0 * training.win_rate(),
        agent.epsilon(),
        agent.q_table().len(),
    );

    agent.set_training(false);
    evaluate(&mut agent, &mut RandomPolicy::new(), SEED + 100)?;
    evaluate(&mut agent, &mut HeuristicPolicy::new(), SEED + 200)?;

    agent
        .save_to_file("tictactoe_agent.mpk")
        .context("saving trained agent")?;
    training
        .save_json("tictactoe_training.json")
        .context("saving training summary")?;
    println!("Saved agent to tictactoe_agent.mpk");

    Ok(())
}
