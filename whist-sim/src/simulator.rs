//! Drives whole games: deal, auction, trump, discard, twelve tricks,
//! score, next hand, until a team reaches seven or a safety cap trips.

use whist_engine::{BidWhist, Stage};

use crate::driver::{choose_bid, choose_discards, choose_play, choose_trump, Seats};
use crate::types::{GameResult, HandRecord};

/// Consecutive all-pass redeals tolerated before giving up on a game.
pub const MAX_REDEALS: usize = 10;
/// Hands per game before the game is called on points.
pub const MAX_HANDS: usize = 100;

/// Simulate one game. `decks` is the pool of deck strings to deal from, in
/// order; every deal (including all-pass redeals) consumes one. The game is
/// called on points if the pool or the hand cap runs out.
pub fn simulate_game(seats: &Seats, decks: &[String], dealer: usize) -> GameResult {
    let mut game = BidWhist::new(dealer);
    let mut hands: Vec<HandRecord> = Vec::new();
    let mut redeals = 0;
    let mut cursor = 0;
    let mut capped = false;

    'game: while !game.is_game_over() && hands.len() < MAX_HANDS {
        // Deal and bid, redealing on four passes.
        let mut redeals_this_hand = 0;
        let (deck_url, bids) = loop {
            let Some(url) = decks.get(cursor) else {
                capped = true;
                break 'game;
            };
            cursor += 1;
            if game.deal(url).is_err() {
                capped = true;
                break 'game;
            }

            let mut bids = Vec::with_capacity(4);
            while game.stage() == Stage::Bidding {
                let player = game.current_player();
                let amount = choose_bid(&game, player, seats[player]);
                bids.push(amount);
                if game.place_bid(player, amount).is_err() {
                    // choose_bid only returns legal amounts; pass to be safe.
                    if let Some(last) = bids.last_mut() {
                        *last = 0;
                    }
                    let _ = game.place_bid(player, 0);
                }
            }

            if game.stage() == Stage::Deal {
                redeals += 1;
                redeals_this_hand += 1;
                if redeals_this_hand >= MAX_REDEALS {
                    capped = true;
                    break 'game;
                }
                continue;
            }
            break (url.clone(), bids);
        };

        let Some(declarer) = game.declarer() else {
            capped = true;
            break;
        };
        let dealer_this_hand = game.dealer();
        let bid_amount = game.current_high_bid();

        let (trump, direction) = choose_trump(&game, declarer, seats[declarer]);
        if game.set_trump(declarer, trump, direction).is_err() {
            capped = true;
            break;
        }

        let discards = choose_discards(&game, declarer, seats[declarer]);
        if game.discard(declarer, &discards).is_err() {
            capped = true;
            break;
        }

        let mut plays = Vec::with_capacity(48);
        while game.stage() == Stage::Play {
            let player = game.current_player();
            let Some(card) = choose_play(&game, player, seats[player]) else {
                capped = true;
                break 'game;
            };
            if game.play_card(player, card).is_err() {
                capped = true;
                break 'game;
            }
            plays.push(whist_core::TrickPlay { player, card });
        }

        hands.push(HandRecord {
            deck_url,
            dealer: dealer_this_hand,
            bids,
            declarer,
            bid_amount,
            trump,
            direction,
            discards,
            plays,
            books_won: game.books_won(),
            team_scores_after: game.team_scores(),
        });

        if !game.is_game_over() {
            game.start_new_hand();
        }
    }

    let scores = game.team_scores();
    let winner_team = game
        .winner_team()
        .unwrap_or(if scores[0] >= scores[1] { 0 } else { 1 });

    GameResult {
        winner_team,
        team_scores: scores,
        hands,
        redeals,
        decks_used: cursor,
        capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whist_core::DeckGenerator;
    use whist_parser::parse_strategy;

    fn deck_pool(seed: u64, count: usize) -> Vec<String> {
        let mut gen = DeckGenerator::new(seed);
        (0..count).map(|_| gen.next_deck()).collect()
    }

    #[test]
    fn test_heuristic_game_completes() {
        let decks = deck_pool(11, 30);
        let seats: Seats = [None, None, None, None];
        let result = simulate_game(&seats, &decks, 0);
        assert!(!result.capped);
        assert!(!result.hands.is_empty());
        assert!(result.winner_team < 2);
        assert!(result.team_scores[result.winner_team] >= 7);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let decks = deck_pool(23, 30);
        let ast = parse_strategy(crate::strategies::STANDARD).unwrap();
        let seats: Seats = [Some(&ast), None, Some(&ast), None];
        let a = simulate_game(&seats, &decks, 2);
        let b = simulate_game(&seats, &decks, 2);
        assert_eq!(a.winner_team, b.winner_team);
        assert_eq!(a.team_scores, b.team_scores);
        assert_eq!(a.hands.len(), b.hands.len());
        assert_eq!(a.decks_used, b.decks_used);
        for (x, y) in a.hands.iter().zip(&b.hands) {
            assert_eq!(x.plays, y.plays);
            assert_eq!(x.bids, y.bids);
        }
    }

    #[test]
    fn test_hand_records_are_replayable_shapes() {
        let decks = deck_pool(7, 30);
        let ast = parse_strategy(crate::strategies::AGGRESSIVE).unwrap();
        let seats: Seats = [Some(&ast), Some(&ast), Some(&ast), Some(&ast)];
        let result = simulate_game(&seats, &decks, 1);
        for hand in &result.hands {
            assert_eq!(hand.discards.len(), 4);
            assert_eq!(hand.plays.len(), 48);
            assert_eq!(hand.bids.len(), 4);
            assert_eq!(hand.books_won[0] + hand.books_won[1], 12);
        }
    }

    #[test]
    fn test_empty_pool_caps_game() {
        let seats: Seats = [None, None, None, None];
        let result = simulate_game(&seats, &[], 0);
        assert!(result.capped);
        assert_eq!(result.winner_team, 0);
        assert!(result.hands.is_empty());
    }
}
