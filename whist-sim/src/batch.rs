//! Mirrored strategy comparison. Every base deck pool is played at four
//! rotations, and each rotation twice with the strategies' seats swapped.
//! A pair where the swap flips the winner is evidence the strategy choice
//! mattered; a pair where it does not is chalked up to the cards.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use whist_core::{rotate_deck, DeckGenerator};
use whist_parser::StrategyAst;

use crate::driver::Seats;
use crate::simulator::simulate_game;
use crate::types::{ComparisonSummary, PairOutcome};

/// Deck strings reserved per game: enough for a long game with redeals.
pub const URLS_PER_GAME: usize = 30;
const ROTATIONS: usize = 4;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Base deck pools; each yields four mirrored pairs (one per rotation).
    pub num_games: usize,
    /// Units simulated per rayon wave; results are re-ordered by serial
    /// after each wave so output never depends on thread scheduling.
    pub batch_size: usize,
    pub seed: u64,
    /// Stop early once this many winner-flipping pairs are collected.
    pub max_interesting: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> BatchConfig {
        BatchConfig { num_games: 100, batch_size: 64, seed: 1, max_interesting: None }
    }
}

pub struct BatchRunner<'a> {
    strategy_a: &'a StrategyAst,
    strategy_b: &'a StrategyAst,
    config: BatchConfig,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        strategy_a: &'a StrategyAst,
        strategy_b: &'a StrategyAst,
        config: BatchConfig,
    ) -> BatchRunner<'a> {
        BatchRunner { strategy_a, strategy_b, config }
    }

    pub fn run(&self) -> ComparisonSummary {
        let mut gen = DeckGenerator::new(self.config.seed);
        let urls: Vec<String> = (0..self.config.num_games * URLS_PER_GAME)
            .map(|_| gen.next_deck())
            .collect();

        let total_units = self.config.num_games * ROTATIONS;
        let batch_size = self.config.batch_size.max(1);
        let abort = AtomicBool::new(false);
        let mut summary = ComparisonSummary::default();

        for wave_start in (0..total_units).step_by(batch_size) {
            if abort.load(Ordering::Relaxed) {
                break;
            }
            let wave_end = (wave_start + batch_size).min(total_units);

            let mut outcomes: Vec<PairOutcome> = (wave_start..wave_end)
                .into_par_iter()
                .map(|serial| self.run_pair(serial, &urls))
                .collect();
            outcomes.sort_by_key(|o| o.serial);

            for outcome in outcomes {
                // Per-game win attribution: in run A strategy A holds the
                // even seats, in run B the odd seats.
                summary.total_games += 2;
                summary.wins[if outcome.winner_a == 0 { 0 } else { 1 }] += 1;
                summary.wins[if outcome.winner_b == 0 { 1 } else { 0 }] += 1;

                if outcome.winner_a != outcome.winner_b {
                    summary.strategy_matters_count += 1;
                    summary.interesting.push(outcome);
                    if let Some(cap) = self.config.max_interesting {
                        if summary.interesting.len() >= cap {
                            abort.store(true, Ordering::Relaxed);
                        }
                    }
                } else {
                    summary.card_advantage_dominated_count += 1;
                }
            }
        }
        summary
    }

    fn run_pair(&self, serial: usize, urls: &[String]) -> PairOutcome {
        let game_index = serial / ROTATIONS;
        let rotation = serial % ROTATIONS;

        let slice = &urls[game_index * URLS_PER_GAME..(game_index + 1) * URLS_PER_GAME];
        let rotated: Vec<String> = slice
            .iter()
            .map(|u| rotate_deck(u, rotation as i64))
            .collect();

        let seats_a: Seats = [
            Some(self.strategy_a),
            Some(self.strategy_b),
            Some(self.strategy_a),
            Some(self.strategy_b),
        ];
        let seats_b: Seats = [
            Some(self.strategy_b),
            Some(self.strategy_a),
            Some(self.strategy_b),
            Some(self.strategy_a),
        ];

        let result_a = simulate_game(&seats_a, &rotated, rotation);
        let result_b = simulate_game(&seats_b, &rotated, rotation);

        PairOutcome {
            serial,
            game_index,
            rotation,
            winner_a: result_a.winner_team,
            winner_b: result_b.winner_team,
            hands_a: result_a.hands.len(),
            hands_b: result_b.hands.len(),
        }
    }
}
