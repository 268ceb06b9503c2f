//! Run scripted planner episodes and report the win rate.

use clap::Parser;

use hotzone::core::GameConfig;
use hotzone::env::{play_episode, HotZoneEnv};
use hotzone::search::{BeamPlanner, PlannerConfig};

#[derive(Parser)]
#[command(author, version, about = "Play hotzone episodes with the beam planner", long_about = None)]
struct Args {
    /// Episodes to play
    #[arg(short, long, default_value_t = 10)]
    episodes: u32,

    /// Seed of the first episode; later episodes fork from it
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Epidemic markers in the player deck
    #[arg(long, default_value_t = 3)]
    epidemics: usize,

    /// Planner lookahead in plies
    #[arg(long, default_value_t = 8)]
    depth: u32,

    /// Planner children kept per ply
    #[arg(long, default_value_t = 3)]
    beam_width: usize,

    /// Step limit per episode
    #[arg(long, default_value_t = 1_000)]
    max_steps: usize,
}

fn main() -> hotzone::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = GameConfig::default()
        .with_seed(args.seed)
        .with_epidemics(args.epidemics);
    let planner = BeamPlanner::new(
        PlannerConfig::default()
            .with_depth(args.depth)
            .with_beam_width(args.beam_width),
    );
    let mut env = HotZoneEnv::europe(config)?;

    let mut wins = 0;
    let mut rounds = 0;
    for episode in 0..args.episodes {
        if episode > 0 {
            env.reset(None)?;
        }
        let summary = play_episode(&mut env, &planner, args.max_steps)?;
        if summary.won() {
            wins += 1;
        }
        rounds += summary.rounds;
        println!(
            "episode {:>3}: {:<32} rounds {:>2}  cures {}  outbreaks {}  reward {:>7.2}",
            episode + 1,
            summary.result.map_or("unfinished".to_string(), |r| format!("{:?}", r)),
            summary.rounds,
            summary.cures,
            summary.outbreaks,
            summary.total_reward
        );
    }

    let played = args.episodes.max(1) as f64;
    println!(
        "win rate {:.1}% ({}/{}), {:.1} rounds per episode",
        100.0 * wins as f64 / played,
        wins,
        args.episodes,
        rounds as f64 / played
    );
    Ok(())
}
