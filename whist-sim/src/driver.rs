//! Decision driver: asks a seat's strategy first and falls back to the
//! built-in heuristics when the strategy has no answer or an illegal one.
//! Both the simulator and the replay checker act through these functions,
//! so a strategy bug can never wedge a game.

use whist_core::Card;
use whist_engine::{ai, build_context, BidWhist};
use whist_eval::{evaluate_bid, evaluate_discard, evaluate_play, evaluate_trump};
use whist_parser::StrategyAst;

pub type Seats<'a> = [Option<&'a StrategyAst>; 4];

/// Bid for the current player. Always returns a legal amount; pass is the
/// last resort.
pub fn choose_bid(game: &BidWhist, player: usize, strategy: Option<&StrategyAst>) -> i64 {
    let ctx = build_context(game, player);
    let legal = game.valid_bids(player);

    if let Some(ast) = strategy {
        if let Some(amount) = evaluate_bid(ast, &ctx) {
            if legal.contains(&amount) {
                return amount;
            }
        }
    }

    let fallback = ai::default_bid(&ctx);
    if legal.contains(&fallback) {
        fallback
    } else {
        0
    }
}

pub fn choose_trump(
    game: &BidWhist,
    player: usize,
    strategy: Option<&StrategyAst>,
) -> (whist_core::Suit, whist_core::Direction) {
    let ctx = build_context(game, player);
    if let Some(ast) = strategy {
        if let Some(choice) = evaluate_trump(ast, &ctx) {
            return choice;
        }
    }
    ai::default_trump(&ctx)
}

/// Exactly four cards from the declarer's 16, strategy scoring first and
/// the weakest-non-trump heuristic otherwise.
pub fn choose_discards(game: &BidWhist, player: usize, strategy: Option<&StrategyAst>) -> Vec<Card> {
    let ctx = build_context(game, player);
    if let Some(ast) = strategy {
        if let Some(cards) = evaluate_discard(ast, &ctx) {
            if cards.len() == 4 {
                return cards;
            }
        }
    }
    ai::default_discards(&ctx)
}

/// A legal card for the current player. The strategy's pick is discarded if
/// it is not in hand or breaks the follow rule.
pub fn choose_play(game: &BidWhist, player: usize, strategy: Option<&StrategyAst>) -> Option<Card> {
    let ctx = build_context(game, player);

    if let Some(ast) = strategy {
        if let Some(card) = evaluate_play(ast, &ctx) {
            if ctx.hand.contains(&card) && game.is_valid_move(player, card) {
                return Some(card);
            }
        }
    }

    if let Some(card) = ai::default_play(&ctx) {
        if ctx.hand.contains(&card) && game.is_valid_move(player, card) {
            return Some(card);
        }
    }
    ctx.hand
        .iter()
        .copied()
        .find(|&c| game.is_valid_move(player, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whist_parser::parse_strategy;

    const DECK: &str = "oVKtOPzUAJYMDWsTNFIGbqcSaifXEkHQnLuRplryChmwBdvxjZge";

    #[test]
    fn test_illegal_strategy_bid_falls_back() {
        let mut game = BidWhist::new(1);
        game.deal(DECK).unwrap();
        game.place_bid(0, 5).unwrap();

        // Strategy wants 2, which the standing 5 makes illegal.
        let ast = parse_strategy("bid:\n  default: bid 2\n").unwrap();
        let bid = choose_bid(&game, 3, Some(&ast));
        assert!(game.valid_bids(3).contains(&bid));
        assert_ne!(bid, 2);
    }

    #[test]
    fn test_strategy_play_must_follow_suit() {
        let mut game = BidWhist::new(1);
        game.deal(DECK).unwrap();
        game.place_bid(0, 6).unwrap();
        for p in [3, 2, 1] {
            game.place_bid(p, 0).unwrap();
        }
        game.set_trump(0, whist_core::Suit::Clubs, whist_core::Direction::Downtown)
            .unwrap();
        let discards = choose_discards(&game, 0, None);
        game.discard(0, &discards).unwrap();
        game.play_card(0, Card::from_id("clubs_1").unwrap()).unwrap();

        // A strategy leading its strongest overall would renege; the driver
        // must hand back something legal instead.
        let ast = parse_strategy("play:\n  following:\n    default: play hand.strongest\n  void:\n    default: play hand.strongest\n  leading:\n    default: play hand.strongest\n").unwrap();
        let card = choose_play(&game, 3, Some(&ast)).unwrap();
        assert!(game.is_valid_move(3, card));
    }
}
