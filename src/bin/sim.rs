//! Headless simulator: run seeded AI games against random fleets and
//! report shots-to-win statistics per difficulty as JSON.

use broadside::{
    init_logging, place_fleet_random, resolve, BitGrid, Board, Difficulty, TargetView,
    TargetingState, BOARD_SIZE,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(about = "Simulate AI targeting runs and print aggregate stats")]
struct Args {
    /// Games per difficulty.
    #[arg(long, default_value_t = 200)]
    games: usize,
    /// Base RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Restrict to one difficulty (easy, medium, hard, top).
    #[arg(long)]
    difficulty: Option<String>,
}

/// Shots the AI needs to sink a randomly placed fleet.
fn run_game(difficulty: Difficulty, seed: u64) -> anyhow::Result<usize> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    place_fleet_random(&mut board, &mut rng)?;
    let mut targeting = TargetingState::new(difficulty);
    let empty = BitGrid::<u128, BOARD_SIZE>::new();

    let mut shots = 0;
    loop {
        let hits = board.hits();
        let misses = board.misses();
        let view = TargetView {
            hits: &hits,
            misses: &misses,
            own_moves: shots,
            opponent_hits: &empty,
        };
        let (row, col) = targeting.select_target(view, &mut rng)?;
        let report = resolve(&mut board, row, col)?;
        targeting.observe(&report);
        shots += 1;
        if board.all_sunk() {
            return Ok(shots);
        }
    }
}

fn parse_difficulty(name: &str) -> anyhow::Result<Difficulty> {
    match name {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        "top" => Ok(Difficulty::Top),
        other => anyhow::bail!("unknown difficulty: {}", other),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let tiers: Vec<(&str, Difficulty)> = match &args.difficulty {
        Some(name) => vec![(name.as_str(), parse_difficulty(name)?)],
        None => vec![
            ("easy", Difficulty::Easy),
            ("medium", Difficulty::Medium),
            ("hard", Difficulty::Hard),
            ("top", Difficulty::Top),
        ],
    };

    let mut results = serde_json::Map::new();
    for (name, difficulty) in tiers {
        let mut total = 0usize;
        let mut min = usize::MAX;
        let mut max = 0usize;
        for game in 0..args.games {
            let shots = run_game(difficulty, args.seed.wrapping_add(game as u64))?;
            total += shots;
            min = min.min(shots);
            max = max.max(shots);
        }
        let avg = total as f64 / args.games as f64;
        results.insert(
            name.to_string(),
            json!({ "avg_shots": avg, "min": min, "max": max }),
        );
    }

    let out = json!({
        "games": args.games,
        "seed": args.seed,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
