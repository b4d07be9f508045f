use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use whist_parser::StrategyAst;
use whist_sim::{BatchConfig, BatchRunner};

#[derive(Parser)]
#[command(name = "whist")]
#[command(about = "Bid Whist strategy comparison over mirrored deals", long_about = None)]
struct Args {
    /// Strategy for side A: a built-in name (standard, aggressive,
    /// conservative) or a path to a strategy file
    #[arg(short = 'a', long = "strategy-a", default_value = "standard")]
    strategy_a: String,

    /// Strategy for side B: a built-in name or a path to a strategy file
    #[arg(short = 'b', long = "strategy-b", default_value = "aggressive")]
    strategy_b: String,

    /// Number of base deck pools; each is played at four rotations, twice
    #[arg(short = 'n', long = "games", default_value = "250")]
    games: usize,

    /// Mirrored pairs simulated per parallel wave
    #[arg(long = "batch-size", default_value = "64")]
    batch_size: usize,

    /// Worker threads (defaults to the rayon global pool size)
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Random seed for deck generation (defaults to current time)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Stop once this many winner-flipping pairs are found
    #[arg(long = "max-interesting")]
    max_interesting: Option<usize>,
}

fn load_strategy(name_or_path: &str) -> StrategyAst {
    let source = match whist_sim::strategies::builtin(name_or_path) {
        Some(text) => text.to_string(),
        None => match fs::read_to_string(Path::new(name_or_path)) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Cannot read strategy file {}: {}", name_or_path, e);
                std::process::exit(1);
            }
        },
    };

    match whist_parser::parse_strategy(&source) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("{}: {}", name_or_path, e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            eprintln!("Cannot configure thread pool: {}", e);
            std::process::exit(1);
        }
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_micros() as u64
    });
    eprintln!("Seed: {}", seed);

    let strategy_a = load_strategy(&args.strategy_a);
    let strategy_b = load_strategy(&args.strategy_b);

    let config = BatchConfig {
        num_games: args.games,
        batch_size: args.batch_size,
        seed,
        max_interesting: args.max_interesting,
    };

    eprintln!(
        "Comparing {} vs {} over {} deck pools ({} mirrored pairs)",
        args.strategy_a,
        args.strategy_b,
        args.games,
        args.games * 4
    );

    let summary = BatchRunner::new(&strategy_a, &strategy_b, config).run();

    println!("Games simulated:     {}", summary.total_games);
    println!(
        "{} wins: {} ({:.1}%)",
        args.strategy_a,
        summary.wins[0],
        summary.win_rate(0) * 100.0
    );
    println!(
        "{} wins: {} ({:.1}%)",
        args.strategy_b,
        summary.wins[1],
        summary.win_rate(1) * 100.0
    );
    println!("Strategy decided:    {}", summary.strategy_matters_count);
    println!("Cards decided:       {}", summary.card_advantage_dominated_count);

    for outcome in &summary.interesting {
        println!(
            "  pool {} rotation {}: A-seated winner {} / B-seated winner {} ({} / {} hands)",
            outcome.game_index,
            outcome.rotation,
            outcome.winner_a,
            outcome.winner_b,
            outcome.hands_a,
            outcome.hands_b
        );
    }
}
