//! Card-set pipeline operations and the built-in function library.

use rustc_hash::FxHashSet;
use whist_core::{Card, Direction, Suit};

use crate::StrategyContext;

pub fn filter_suit(cards: &[Card], suit: Suit) -> Vec<Card> {
    cards.iter().copied().filter(|c| c.suit == suit).collect()
}

pub fn filter_trump(cards: &[Card], trump: Option<Suit>) -> Vec<Card> {
    match trump {
        Some(t) => filter_suit(cards, t),
        None => Vec::new(),
    }
}

pub fn filter_non_trump(cards: &[Card], trump: Option<Suit>) -> Vec<Card> {
    match trump {
        Some(t) => cards.iter().copied().filter(|c| c.suit != t).collect(),
        None => cards.to_vec(),
    }
}

/// Highest-valued card; on ties the earliest card in the set wins.
pub fn strongest(cards: &[Card], ctx: &StrategyContext) -> Option<Card> {
    cards.iter().copied().reduce(|best, c| {
        if ctx.card_value(c) > ctx.card_value(best) {
            c
        } else {
            best
        }
    })
}

pub fn weakest(cards: &[Card], ctx: &StrategyContext) -> Option<Card> {
    cards.iter().copied().reduce(|best, c| {
        if ctx.card_value(c) < ctx.card_value(best) {
            c
        } else {
            best
        }
    })
}

/// Highest card that does not beat partner's trick card by exactly one step.
/// Falls back to plain strongest when partner has not played or every card
/// would overtake them.
pub fn strongest_safe(cards: &[Card], ctx: &StrategyContext) -> Option<Card> {
    let Some(partner) = ctx.partner_card() else {
        return strongest(cards, ctx);
    };
    let partner_val = ctx.card_value(partner);
    let safe: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|c| !(c.suit == partner.suit && ctx.card_value(*c) == partner_val + 1))
        .collect();
    if safe.is_empty() {
        return strongest(cards, ctx);
    }
    strongest(&safe, ctx)
}

/// Cards that would beat the current trick winner. The whole set when the
/// trick is empty.
pub fn winners(cards: &[Card], ctx: &StrategyContext) -> Vec<Card> {
    let Some(idx) = ctx.current_winner() else {
        return cards.to_vec();
    };
    let win_card = ctx.current_trick[idx].card;
    cards
        .iter()
        .copied()
        .filter(|c| ctx.compare(*c, win_card) > 0)
        .collect()
}

pub fn losers(cards: &[Card], ctx: &StrategyContext) -> Vec<Card> {
    let Some(idx) = ctx.current_winner() else {
        return cards.to_vec();
    };
    let win_card = ctx.current_trick[idx].card;
    cards
        .iter()
        .copied()
        .filter(|c| ctx.compare(*c, win_card) <= 0)
        .collect()
}

fn seen_cards(ctx: &StrategyContext, include_trick: bool) -> FxHashSet<Card> {
    let mut seen: FxHashSet<Card> = ctx.played_cards.iter().copied().collect();
    seen.extend(ctx.hand.iter().copied());
    if include_trick {
        seen.extend(ctx.current_trick.iter().map(|p| p.card));
    }
    seen
}

/// Cards with no higher unseen card left in their suit.
pub fn boss(cards: &[Card], ctx: &StrategyContext) -> Vec<Card> {
    let seen = seen_cards(ctx, true);
    cards
        .iter()
        .copied()
        .filter(|&card| {
            let val = ctx.card_value(card);
            (1..=13).all(|rank| {
                let other = Card::new(card.suit, rank);
                other == card || seen.contains(&other) || ctx.card_value(other) <= val
            })
        })
        .collect()
}

pub fn above(cards: &[Card], pivot: Card, ctx: &StrategyContext) -> Vec<Card> {
    let val = ctx.card_value(pivot);
    cards
        .iter()
        .copied()
        .filter(|c| c.suit == pivot.suit && ctx.card_value(*c) > val)
        .collect()
}

pub fn below(cards: &[Card], pivot: Card, ctx: &StrategyContext) -> Vec<Card> {
    let val = ctx.card_value(pivot);
    cards
        .iter()
        .copied()
        .filter(|c| c.suit == pivot.suit && ctx.card_value(*c) < val)
        .collect()
}

/// Unseen cards in this card's suit that outrank it.
pub fn cards_above(card: Card, ctx: &StrategyContext) -> i64 {
    let seen = seen_cards(ctx, true);
    let val = ctx.card_value(card);
    (1..=13)
        .map(|rank| Card::new(card.suit, rank))
        .filter(|&other| other != card && !seen.contains(&other) && ctx.card_value(other) > val)
        .count() as i64
}

pub fn gap(a: Card, b: Card, ctx: &StrategyContext) -> i64 {
    (ctx.card_value(a) - ctx.card_value(b)).abs()
}

pub fn suit_count(suit: Suit, ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.suit == suit).count() as i64
}

/// Longest suit in hand; ties keep the earlier suit in spades, hearts,
/// diamonds, clubs order. An empty hand answers spades.
pub fn best_suit(ctx: &StrategyContext) -> Suit {
    let mut best = Suit::Spades;
    let mut max = 0;
    for suit in Suit::ALL {
        let count = suit_count(suit, ctx);
        if count > max {
            max = count;
            best = suit;
        }
    }
    best
}

pub fn low_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| (2..=5).contains(&c.rank)).count() as i64
}

pub fn high_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.rank == 1 || c.rank >= 11).count() as i64
}

pub fn ace_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.rank == 1).count() as i64
}

pub fn deuce_trey_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.rank == 2 || c.rank == 3).count() as i64
}

pub fn king_ace_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.rank == 13 || c.rank == 1).count() as i64
}

pub fn king_count(ctx: &StrategyContext) -> i64 {
    ctx.hand.iter().filter(|c| c.rank == 13).count() as i64
}

pub fn have_card(id: &str, ctx: &StrategyContext) -> bool {
    ctx.hand.iter().any(|c| c.id() == id)
}

/// Downtown when the hand is heavier in low spot cards than in honors,
/// uptown otherwise.
pub fn best_direction(ctx: &StrategyContext) -> Direction {
    if low_count(ctx) > high_count(ctx) {
        Direction::Downtown
    } else {
        Direction::Uptown
    }
}

pub fn max_suit_count(ctx: &StrategyContext) -> i64 {
    Suit::ALL
        .iter()
        .map(|&s| suit_count(s, ctx))
        .max()
        .unwrap_or(0)
}

/// Shortest suit actually held; 0 only for an empty hand.
pub fn min_suit_count(ctx: &StrategyContext) -> i64 {
    Suit::ALL
        .iter()
        .map(|&s| suit_count(s, ctx))
        .filter(|&n| n > 0)
        .min()
        .unwrap_or(0)
}

/// Trump cards not yet accounted for by this hand, the table, or the trick.
pub fn outstanding_trump(ctx: &StrategyContext) -> i64 {
    let Some(trump) = ctx.trump_suit else {
        return 0;
    };
    let seen = seen_cards(ctx, true);
    (1..=13)
        .map(|rank| Card::new(trump, rank))
        .filter(|c| !seen.contains(c))
        .count() as i64
}

/// Unseen cards that could still beat the current trick winner: higher cards
/// of the winner's suit, plus every outstanding trump when the winner is not
/// trump.
pub fn outstanding_threats(ctx: &StrategyContext) -> i64 {
    let Some(idx) = ctx.current_winner() else {
        return 0;
    };
    let win_card = ctx.current_trick[idx].card;
    let seen = seen_cards(ctx, true);
    let win_val = ctx.card_value(win_card);

    let mut count = (1..=13)
        .map(|rank| Card::new(win_card.suit, rank))
        .filter(|&c| !seen.contains(&c) && ctx.card_value(c) > win_val)
        .count() as i64;

    if let Some(trump) = ctx.trump_suit {
        if win_card.suit != trump {
            count += (1..=13)
                .map(|rank| Card::new(trump, rank))
                .filter(|c| !seen.contains(c))
                .count() as i64;
        }
    }
    count
}

fn non_trump_suits(ctx: &StrategyContext) -> Vec<Suit> {
    Suit::ALL
        .iter()
        .copied()
        .filter(|&s| Some(s) != ctx.trump_suit)
        .collect()
}

/// Cards worth keeping as stoppers. Per non-trump suit: the best card plus
/// as many next-best cards as there are higher unseen cards protecting it.
/// Suits whose best card is already boss contribute nothing.
pub fn stopper_cards(ctx: &StrategyContext) -> Vec<Card> {
    // Trick cards do not count as seen here; the discard happens pre-play.
    let seen = seen_cards(ctx, false);
    let mut result = Vec::new();

    for suit in non_trump_suits(ctx) {
        let mut suit_cards = filter_suit(&ctx.hand, suit);
        if suit_cards.is_empty() {
            continue;
        }
        suit_cards.sort_by_key(|&c| -ctx.card_value(c));
        let best_val = ctx.card_value(suit_cards[0]);

        let protectors_needed = (1..=13)
            .map(|rank| Card::new(suit, rank))
            .filter(|&c| !seen.contains(&c) && ctx.card_value(c) > best_val)
            .count();
        if protectors_needed == 0 {
            continue;
        }

        result.push(suit_cards[0]);
        for &card in suit_cards.iter().skip(1).take(protectors_needed) {
            result.push(card);
        }
    }
    result
}

/// The `n` weakest cards of each non-trump suit.
pub fn suit_keepers(n: i64, ctx: &StrategyContext) -> Vec<Card> {
    let n = n.max(0) as usize;
    let mut keepers = Vec::new();
    for suit in non_trump_suits(ctx) {
        let mut suit_cards = filter_suit(&ctx.hand, suit);
        suit_cards.sort_by_key(|&c| ctx.card_value(c));
        keepers.extend(suit_cards.into_iter().take(n));
    }
    keepers
}

/// All cards of the shortest non-trump suit(s) held, for voiding.
pub fn void_candidates(ctx: &StrategyContext) -> Vec<Card> {
    let suits = non_trump_suits(ctx);
    let counts: Vec<i64> = suits.iter().map(|&s| suit_count(s, ctx)).collect();
    let Some(min_count) = counts.iter().copied().filter(|&n| n > 0).min() else {
        return Vec::new();
    };
    let mut candidates = Vec::new();
    for (&suit, &count) in suits.iter().zip(&counts) {
        if count == min_count {
            candidates.extend(filter_suit(&ctx.hand, suit));
        }
    }
    candidates
}
