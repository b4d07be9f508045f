//! The Bid Whist rule engine: a strict state machine over deal, auction,
//! trump selection, kitty discard, trick play and scoring. Strategy
//! evaluation lives in whist-eval; this crate only enforces the rules and
//! snapshots decision contexts.

pub mod ai;
pub mod context;
pub mod game;

pub use context::build_context;
pub use game::{sort_hand, ActionError, BidWhist, Stage, HAND_SIZE, KITTY_SIZE, WINNING_SCORE};
