//! Built-in heuristics, used whenever a strategy has no answer for a
//! decision (or no strategy is attached at all).

use whist_core::{Card, Direction, Suit};
use whist_eval::builtins::{filter_non_trump, filter_suit, filter_trump, strongest, weakest, winners};
use whist_eval::StrategyContext;

/// Conservative auction fallback. The dealer takes a cheap standing bid or
/// opens for 1; other seats nudge the bid up to a small per-seat cap.
pub fn default_bid(ctx: &StrategyContext) -> i64 {
    if ctx.is_dealer && ctx.bids.len() == 3 {
        if ctx.current_high_bid > 0 {
            if ctx.current_high_bid <= 3 {
                return -1;
            }
            return 0;
        }
        return 1;
    }

    let max_bid = match ctx.player_id {
        2 => 2,
        3 => 3,
        _ => 1,
    };
    if ctx.current_high_bid >= max_bid {
        0
    } else {
        (ctx.current_high_bid + 1).min(max_bid)
    }
}

/// Longest suit as trump; direction from the rough shape of the hand, with
/// downtown demoted to no-aces when the hand lacks aces to anchor it.
pub fn default_trump(ctx: &StrategyContext) -> (Suit, Direction) {
    let mut best = Suit::Spades;
    let mut max = 0;
    for suit in Suit::ALL {
        let count = ctx.hand.iter().filter(|c| c.suit == suit).count();
        if count > max {
            max = count;
            best = suit;
        }
    }

    let low = ctx.hand.iter().filter(|c| (2..=7).contains(&c.rank)).count();
    let high = ctx.hand.len() - low;
    let aces = ctx.hand.iter().filter(|c| c.rank == 1).count();

    let direction = if low > high {
        if aces >= 2 {
            Direction::Downtown
        } else {
            Direction::DowntownNoAces
        }
    } else {
        Direction::Uptown
    };
    (best, direction)
}

/// Four weakest non-trump cards; trump only leaves the hand when fewer than
/// four non-trump cards exist.
pub fn default_discards(ctx: &StrategyContext) -> Vec<Card> {
    let mut non_trump = filter_non_trump(&ctx.hand, ctx.trump_suit);
    non_trump.sort_by_key(|&c| ctx.card_value(c));
    let mut picks: Vec<Card> = non_trump.into_iter().take(4).collect();

    if picks.len() < 4 {
        let mut trump = filter_trump(&ctx.hand, ctx.trump_suit);
        trump.sort_by_key(|&c| ctx.card_value(c));
        let needed = 4 - picks.len();
        picks.extend(trump.into_iter().take(needed));
    }
    picks
}

/// Default card choice: declarer's side pulls trump from the top, defenders
/// duck cheaply; follow with the weakest card that still wins, trump in
/// only when partner is not already holding the trick.
pub fn default_play(ctx: &StrategyContext) -> Option<Card> {
    if ctx.current_trick.is_empty() {
        if ctx.on_declarer_team && ctx.has_trump {
            let trump = filter_trump(&ctx.hand, ctx.trump_suit);
            return strongest(&trump, ctx);
        }
        return weakest(&ctx.hand, ctx);
    }

    let lead = ctx.lead_suit?;
    let suit_cards = filter_suit(&ctx.hand, lead);
    if !suit_cards.is_empty() {
        let winning = winners(&suit_cards, ctx);
        if !winning.is_empty() {
            return weakest(&winning, ctx);
        }
        return weakest(&suit_cards, ctx);
    }

    if !ctx.partner_winning && ctx.has_trump {
        let trump = filter_trump(&ctx.hand, ctx.trump_suit);
        return weakest(&trump, ctx);
    }
    weakest(&ctx.hand, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whist_core::{BidInfo, TrickPlay};

    fn card(id: &str) -> Card {
        Card::from_id(id).unwrap()
    }

    fn hand_of(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card(id)).collect()
    }

    #[test]
    fn test_default_bid_caps_by_seat() {
        let mut ctx = StrategyContext { player_id: 3, ..Default::default() };
        assert_eq!(default_bid(&ctx), 1);
        ctx.current_high_bid = 2;
        assert_eq!(default_bid(&ctx), 3);
        ctx.current_high_bid = 3;
        assert_eq!(default_bid(&ctx), 0);
    }

    #[test]
    fn test_default_bid_dealer_takes_cheap_bids() {
        let bids = vec![
            BidInfo { player: 3, amount: 0, passed: true },
            BidInfo { player: 2, amount: 2, passed: false },
            BidInfo { player: 1, amount: 0, passed: true },
        ];
        let mut ctx = StrategyContext {
            player_id: 0,
            is_dealer: true,
            current_high_bid: 2,
            bids,
            ..Default::default()
        };
        assert_eq!(default_bid(&ctx), -1);
        ctx.current_high_bid = 4;
        assert_eq!(default_bid(&ctx), 0);
        ctx.current_high_bid = 0;
        assert_eq!(default_bid(&ctx), 1);
    }

    #[test]
    fn test_default_trump_longest_suit() {
        let ctx = StrategyContext {
            hand: hand_of(&[
                "hearts_8", "hearts_9", "hearts_10", "hearts_11", "hearts_12",
                "spades_1", "spades_13", "clubs_9", "clubs_10", "diamonds_8",
                "diamonds_9", "diamonds_11",
            ]),
            ..Default::default()
        };
        let (suit, direction) = default_trump(&ctx);
        assert_eq!(suit, Suit::Hearts);
        assert_eq!(direction, Direction::Uptown);
    }

    #[test]
    fn test_default_trump_low_hand_without_aces() {
        let ctx = StrategyContext {
            hand: hand_of(&[
                "hearts_2", "hearts_3", "hearts_4", "hearts_5", "hearts_6",
                "spades_2", "spades_3", "clubs_4", "clubs_5", "diamonds_2",
                "diamonds_3", "diamonds_13",
            ]),
            ..Default::default()
        };
        let (_, direction) = default_trump(&ctx);
        assert_eq!(direction, Direction::DowntownNoAces);
    }

    #[test]
    fn test_default_discards_spare_trump() {
        let ctx = StrategyContext {
            hand: hand_of(&[
                "clubs_2", "clubs_3", "hearts_4", "hearts_5", "spades_6", "diamonds_7",
            ]),
            trump_suit: Some(Suit::Clubs),
            ..Default::default()
        };
        let picks = default_discards(&ctx);
        assert_eq!(picks, hand_of(&["hearts_4", "hearts_5", "spades_6", "diamonds_7"]));
    }

    #[test]
    fn test_default_play_follows_with_cheapest_winner() {
        let ctx = StrategyContext {
            hand: hand_of(&["hearts_9", "hearts_12", "hearts_2"]),
            current_trick: vec![TrickPlay { player: 1, card: card("hearts_8") }],
            lead_suit: Some(Suit::Hearts),
            ..Default::default()
        };
        assert_eq!(default_play(&ctx), Some(card("hearts_9")));
    }

    #[test]
    fn test_default_play_trumps_in_when_partner_losing() {
        let ctx = StrategyContext {
            hand: hand_of(&["clubs_2", "clubs_9", "diamonds_5"]),
            current_trick: vec![TrickPlay { player: 1, card: card("hearts_8") }],
            lead_suit: Some(Suit::Hearts),
            trump_suit: Some(Suit::Clubs),
            has_trump: true,
            ..Default::default()
        };
        assert_eq!(default_play(&ctx), Some(card("clubs_2")));
    }
}
