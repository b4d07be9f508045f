use whist_core::{Card, Direction, Suit, TrickPlay};

/// Full record of one completed hand, detailed enough to replay it
/// action-for-action against a fresh engine.
#[derive(Debug, Clone)]
pub struct HandRecord {
    pub deck_url: String,
    pub dealer: usize,
    /// Bid amounts in the order they were placed (-1 is the dealer's take).
    pub bids: Vec<i64>,
    pub declarer: usize,
    pub bid_amount: i64,
    pub trump: Suit,
    pub direction: Direction,
    pub discards: Vec<Card>,
    pub plays: Vec<TrickPlay>,
    pub books_won: [i64; 2],
    pub team_scores_after: [i64; 2],
}

/// Outcome of one simulated game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub winner_team: usize,
    pub team_scores: [i64; 2],
    pub hands: Vec<HandRecord>,
    pub redeals: usize,
    pub decks_used: usize,
    /// The game was cut off by the hand cap or an exhausted deck pool; the
    /// winner is then whichever team led on points.
    pub capped: bool,
}

/// One mirrored pair: the same rotated decks played twice with the two
/// strategies' seats swapped.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub serial: usize,
    pub game_index: usize,
    pub rotation: usize,
    pub winner_a: usize,
    pub winner_b: usize,
    pub hands_a: usize,
    pub hands_b: usize,
}

/// Aggregate of a strategy comparison run.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSummary {
    /// Individual games simulated (two per mirrored pair).
    pub total_games: usize,
    /// Games won by strategy A and strategy B respectively, regardless of
    /// which seats they occupied.
    pub wins: [usize; 2],
    /// Pairs where swapping seats flipped the winner.
    pub strategy_matters_count: usize,
    /// Pairs where the cards decided the game no matter who played them.
    pub card_advantage_dominated_count: usize,
    pub interesting: Vec<PairOutcome>,
}

impl ComparisonSummary {
    pub fn win_rate(&self, strategy: usize) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.wins[strategy] as f64 / self.total_games as f64
    }
}
