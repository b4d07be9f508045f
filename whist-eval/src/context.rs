use whist_core::{card_value, compare_cards, trick_winner, BidInfo, Card, Direction, Suit, TrickPlay};

/// A snapshot of everything a strategy may look at for one decision.
///
/// The engine builds one of these per decision; the evaluator never touches
/// game state directly. Card values and comparisons follow the direction in
/// force (uptown until trump is chosen).
#[derive(Debug, Clone, Default)]
pub struct StrategyContext {
    pub player_id: usize,
    pub dealer: usize,
    pub declarer: Option<usize>,
    pub hand: Vec<Card>,
    pub current_trick: Vec<TrickPlay>,
    /// Cards played to completed tricks plus the current one. Declarer's
    /// hidden discards are not included.
    pub played_cards: Vec<Card>,
    pub lead_suit: Option<Suit>,
    pub trump_suit: Option<Suit>,
    pub direction: Direction,
    pub current_high_bid: i64,
    pub bids: Vec<BidInfo>,
    pub partner_bid: i64,
    pub partner_winning: bool,
    pub partner_led: bool,
    pub on_declarer_team: bool,
    pub is_dealer: bool,
    pub has_trump: bool,
    pub is_first_trick: bool,
}

impl StrategyContext {
    pub fn card_value(&self, card: Card) -> i64 {
        card_value(card, self.direction)
    }

    pub fn compare(&self, a: Card, b: Card) -> i64 {
        compare_cards(a, b, self.trump_suit, self.direction)
    }

    /// Index into `current_trick` of the play currently winning it.
    pub fn current_winner(&self) -> Option<usize> {
        trick_winner(&self.current_trick, self.trump_suit, self.direction)
    }

    pub fn partner_id(&self) -> usize {
        (self.player_id + 2) % 4
    }

    /// Partner's card in the current trick, if they have played.
    pub fn partner_card(&self) -> Option<Card> {
        let partner = self.partner_id();
        self.current_trick
            .iter()
            .find(|p| p.player == partner)
            .map(|p| p.card)
    }

    pub fn holds_suit(&self, suit: Suit) -> bool {
        self.hand.iter().any(|c| c.suit == suit)
    }
}
