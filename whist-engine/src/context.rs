use whist_core::trick_winner;
use whist_eval::StrategyContext;

use crate::game::BidWhist;

/// Snapshot the game from one player's seat for strategy evaluation.
pub fn build_context(game: &BidWhist, player: usize) -> StrategyContext {
    let partner = (player + 2) % 4;
    let trick = game.current_trick();

    let mut partner_winning = false;
    let mut partner_led = false;
    if !trick.is_empty() {
        partner_led = trick[0].player == partner;
        if let Some(idx) = trick_winner(trick, game.trump(), game.direction()) {
            partner_winning = trick[idx].player == partner;
        }
    }

    // Partner's most recent real bid, 0 if they only passed.
    let mut partner_bid = 0;
    for bid in game.bids() {
        if bid.player == partner && !bid.passed {
            partner_bid = bid.amount;
        }
    }

    let hand = game.hand(player).to_vec();
    let has_trump = game
        .trump()
        .map(|t| hand.iter().any(|c| c.suit == t))
        .unwrap_or(false);

    StrategyContext {
        player_id: player,
        dealer: game.dealer(),
        declarer: game.declarer(),
        partner_winning,
        partner_led,
        partner_bid,
        on_declarer_team: game
            .declarer()
            .map(|d| d % 2 == player % 2)
            .unwrap_or(false),
        is_dealer: player == game.dealer(),
        has_trump,
        is_first_trick: game.is_first_trick(),
        current_trick: trick.to_vec(),
        played_cards: game.played_cards().to_vec(),
        lead_suit: game.lead_suit(),
        trump_suit: game.trump(),
        direction: game.direction(),
        current_high_bid: game.current_high_bid(),
        bids: game.bids().to_vec(),
        hand,
    }
}
