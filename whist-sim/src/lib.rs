//! Batch simulation for Bid Whist strategies: whole-game simulation,
//! mirrored seat-swap comparisons, deterministic deck pools, and a replay
//! driver that re-derives recorded games decision by decision.

pub mod batch;
pub mod driver;
pub mod replay;
pub mod simulator;
pub mod strategies;
pub mod types;

pub use batch::{BatchConfig, BatchRunner, URLS_PER_GAME};
pub use replay::{replay_hand, verify_game, ReplayMismatch};
pub use simulator::{simulate_game, MAX_HANDS, MAX_REDEALS};
pub use types::{ComparisonSummary, GameResult, HandRecord, PairOutcome};
