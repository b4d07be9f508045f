//! Self-check binary: simulates games with the built-in strategies, then
//! re-derives every decision of every recorded hand through the same
//! driver and compares against the records. Exits non-zero on divergence.

use clap::Parser;
use whist_core::DeckGenerator;
use whist_sim::{simulate_game, strategies, verify_game, URLS_PER_GAME};

#[derive(Parser)]
#[command(name = "whist-replay-check")]
#[command(about = "Replays simulated games to verify engine determinism", long_about = None)]
struct Args {
    /// Number of games to simulate and replay per strategy pairing
    #[arg(short = 'n', long = "games", default_value = "20")]
    games: usize,

    /// Random seed for deck generation
    #[arg(short = 's', long = "seed", default_value = "1")]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    let mut gen = DeckGenerator::new(args.seed);

    let mut asts = Vec::new();
    for &name in strategies::BUILTIN_NAMES {
        let source = match strategies::builtin(name) {
            Some(text) => text,
            None => continue,
        };
        match whist_parser::parse_strategy(source) {
            Ok(ast) => asts.push((name, ast)),
            Err(e) => {
                eprintln!("{}: {}", name, e);
                std::process::exit(1);
            }
        }
    }

    let mut checked = 0;
    let mut failures = 0;

    for game_index in 0..args.games {
        let decks: Vec<String> = (0..URLS_PER_GAME).map(|_| gen.next_deck()).collect();

        for (name_a, ast_a) in &asts {
            for (name_b, ast_b) in &asts {
                let seats = [Some(ast_a), Some(ast_b), Some(ast_a), Some(ast_b)];
                let result = simulate_game(&seats, &decks, game_index % 4);
                checked += 1;
                if let Err(mismatch) = verify_game(&result, &seats) {
                    failures += 1;
                    eprintln!(
                        "game {} ({} vs {}): {}",
                        game_index, name_a, name_b, mismatch
                    );
                }
            }
        }
    }

    eprintln!("Replayed {} games, {} mismatches", checked, failures);
    if failures > 0 {
        std::process::exit(1);
    }
}
