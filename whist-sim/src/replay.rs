//! Independent replay driver. Each recorded hand is re-run from its deck
//! string with the same seat strategies, one decision at a time, and every
//! re-derived decision is compared against the record: the bid sequence,
//! the declarer, trump and direction, the discard set, the ordered card
//! plays, then books and scores. The simulator and this driver share only
//! the per-decision functions in `driver`, so a divergence means one of
//! the paths is non-deterministic or the record was not faithful.

use std::fmt;

use whist_core::{Card, Direction, Suit, TrickPlay};
use whist_engine::{ActionError, BidWhist, Stage};

use crate::driver::{choose_bid, choose_discards, choose_play, choose_trump, Seats};
use crate::types::{GameResult, HandRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayMismatch {
    Action { hand: usize, err: ActionError },
    Bid { hand: usize, index: usize, recorded: i64, replayed: i64 },
    Declarer { hand: usize, recorded: usize, replayed: Option<usize> },
    Trump { hand: usize, recorded: (Suit, Direction), replayed: (Suit, Direction) },
    Discards { hand: usize, recorded: Vec<Card>, replayed: Vec<Card> },
    Play { hand: usize, index: usize, recorded: TrickPlay, replayed: TrickPlay },
    HandNotScored { hand: usize, stage: Stage },
    Books { hand: usize, recorded: [i64; 2], replayed: [i64; 2] },
    Scores { hand: usize, recorded: [i64; 2], replayed: [i64; 2] },
}

impl fmt::Display for ReplayMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplayMismatch::Action { hand, err } => {
                write!(f, "hand {}: replayed action rejected: {}", hand, err)
            }
            ReplayMismatch::Bid { hand, index, recorded, replayed } => write!(
                f,
                "hand {}: bid {} re-derived as {} but {} was recorded",
                hand, index, replayed, recorded
            ),
            ReplayMismatch::Declarer { hand, recorded, replayed } => match replayed {
                Some(p) => write!(f, "hand {}: declarer {} replayed as {}", hand, recorded, p),
                None => write!(f, "hand {}: declarer {} replayed as all-pass", hand, recorded),
            },
            ReplayMismatch::Trump { hand, recorded, replayed } => write!(
                f,
                "hand {}: trump {} {} replayed as {} {}",
                hand, recorded.0, recorded.1, replayed.0, replayed.1
            ),
            ReplayMismatch::Discards { hand, recorded, replayed } => write!(
                f,
                "hand {}: discards {:?} replayed as {:?}",
                hand, recorded, replayed
            ),
            ReplayMismatch::Play { hand, index, recorded, replayed } => write!(
                f,
                "hand {}: play {} was {} by seat {} but replayed as {} by seat {}",
                hand, index, recorded.card, recorded.player, replayed.card, replayed.player
            ),
            ReplayMismatch::HandNotScored { hand, stage } => {
                write!(f, "hand {}: replay ended in stage {}", hand, stage)
            }
            ReplayMismatch::Books { hand, recorded, replayed } => write!(
                f,
                "hand {}: books {:?} replayed as {:?}",
                hand, recorded, replayed
            ),
            ReplayMismatch::Scores { hand, recorded, replayed } => write!(
                f,
                "hand {}: scores {:?} replayed as {:?}",
                hand, recorded, replayed
            ),
        }
    }
}

impl std::error::Error for ReplayMismatch {}

/// Re-derive one recorded hand on `game`, comparing every decision against
/// the record as it is made. The game must be ready to deal with the
/// record's dealer; on success it is left in `Scoring` with the hand's
/// books and scores applied.
pub fn replay_hand(
    game: &mut BidWhist,
    hand: usize,
    record: &HandRecord,
    seats: &Seats,
) -> Result<(), ReplayMismatch> {
    game.deal(&record.deck_url)
        .map_err(|err| ReplayMismatch::Action { hand, err })?;

    let mut index = 0;
    while game.stage() == Stage::Bidding {
        let player = game.current_player();
        let replayed = choose_bid(game, player, seats[player]);
        let recorded = record.bids.get(index).copied().unwrap_or(0);
        if replayed != recorded {
            return Err(ReplayMismatch::Bid { hand, index, recorded, replayed });
        }
        game.place_bid(player, replayed)
            .map_err(|err| ReplayMismatch::Action { hand, err })?;
        index += 1;
    }

    let Some(declarer) = game.declarer() else {
        // The re-derived auction passed out but the record has a declarer.
        return Err(ReplayMismatch::Declarer {
            hand,
            recorded: record.declarer,
            replayed: None,
        });
    };
    if declarer != record.declarer {
        return Err(ReplayMismatch::Declarer {
            hand,
            recorded: record.declarer,
            replayed: Some(declarer),
        });
    }

    let replayed = choose_trump(game, declarer, seats[declarer]);
    if replayed != (record.trump, record.direction) {
        return Err(ReplayMismatch::Trump {
            hand,
            recorded: (record.trump, record.direction),
            replayed,
        });
    }
    game.set_trump(declarer, replayed.0, replayed.1)
        .map_err(|err| ReplayMismatch::Action { hand, err })?;

    let discards = choose_discards(game, declarer, seats[declarer]);
    if discards != record.discards {
        return Err(ReplayMismatch::Discards {
            hand,
            recorded: record.discards.clone(),
            replayed: discards,
        });
    }
    game.discard(declarer, &discards)
        .map_err(|err| ReplayMismatch::Action { hand, err })?;

    let mut index = 0;
    while game.stage() == Stage::Play {
        let player = game.current_player();
        let Some(card) = choose_play(game, player, seats[player]) else {
            return Err(ReplayMismatch::HandNotScored { hand, stage: game.stage() });
        };
        let replayed = TrickPlay { player, card };
        if let Some(&recorded) = record.plays.get(index) {
            if recorded != replayed {
                return Err(ReplayMismatch::Play { hand, index, recorded, replayed });
            }
        }
        game.play_card(player, card)
            .map_err(|err| ReplayMismatch::Action { hand, err })?;
        index += 1;
    }

    if game.stage() != Stage::Scoring {
        return Err(ReplayMismatch::HandNotScored { hand, stage: game.stage() });
    }
    if game.books_won() != record.books_won {
        return Err(ReplayMismatch::Books {
            hand,
            recorded: record.books_won,
            replayed: game.books_won(),
        });
    }
    if game.team_scores() != record.team_scores_after {
        return Err(ReplayMismatch::Scores {
            hand,
            recorded: record.team_scores_after,
            replayed: game.team_scores(),
        });
    }
    Ok(())
}

/// Re-derive every hand of a simulated game with the same strategies on one
/// persistent engine, so cross-hand state (cumulative scores, the direction
/// carried until the next trump selection) is exercised too. All-pass
/// redeals advanced the dealer without leaving a record, so the dealer is
/// realigned to each record before its deal; the dealer cycles through all
/// four seats, keeping the alignment loop bounded.
pub fn verify_game(result: &GameResult, seats: &Seats) -> Result<(), ReplayMismatch> {
    let first_dealer = result.hands.first().map(|h| h.dealer).unwrap_or(0);
    let mut game = BidWhist::new(first_dealer);

    for (i, hand) in result.hands.iter().enumerate() {
        if i > 0 {
            game.start_new_hand();
            while game.dealer() != hand.dealer {
                game.start_new_hand();
            }
        }
        replay_hand(&mut game, i, hand, seats)?;
    }
    Ok(())
}
