//! Train a Q-learning agent at Connect 4 and pit it against depth-limited
//! minimax with the threat evaluator.

use anyhow::{Context, Result};
use gambit::{
    Player, Policy,
    config::{QLearningConfig, SearchConfig},
    connect4::{Connect4, ThreatEvaluator},
    opponents::{HeuristicPolicy, RandomPolicy},
    pipeline::{MatchRunner, ProgressObserver, RunConfig},
    q_learning::QLearningAgent,
    search::MinimaxPolicy,
};

const TRAINING_GAMES: usize = 100_000;
const EVAL_GAMES: usize = 500;
const SEED: u64 = 7;

fn evaluate(
    agent: &mut QLearningAgent<Connect4>,
    opponent: &mut dyn Policy<Connect4>,
    seed: u64,
) -> Result<()> {
    let mut runner = MatchRunner::new(RunConfig {
        num_games: EVAL_GAMES,
        seed: Some(seed),
        agent_player: Player::X,
    });
    let result = runner.run(agent, opponent)?;
    println!(
        "vs {:<18} win {:>5.1}%  draw {:>5.1}%  loss {:>5.1}%",
        result.opponent,
        100.0 * result.win_rate(),
        100.0 * result.draw_rate(),
        100.0 * result.loss_rate(),
    );
    Ok(())
}

fn main() -> Result<()> {
    let search = SearchConfig::default();
    let mut agent: QLearningAgent<Connect4> = QLearningConfig::default()
        .with_epsilon_decay(0.9999)
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
    evaluate(
        &mut agent,
        &mut MinimaxPolicy::new(ThreatEvaluator, search.depth_limit, search.alpha_beta),
        SEED + 300,
    )?;

    agent
        .save_to_file("connect4_agent.mpk")
        .context("saving trained agent")?;
    training
        .save_json("connect4_training.json")
        .context("saving training summary")?;
    println!("Saved agent to connect4_agent.mpk");

    Ok(())
}
