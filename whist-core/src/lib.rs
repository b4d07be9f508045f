//! Core card types, rank ordering, and the 52-letter deck codec shared by
//! the rule engine, strategy evaluator, and simulator.

pub mod card;
pub mod codec;
pub mod deck;
pub mod ordering;

pub use card::{BidInfo, Card, Direction, Suit, TrickPlay};
pub use codec::{decode_deck, encode_deck, rotate_deck, DeckError};
pub use deck::DeckGenerator;
pub use ordering::{card_value, compare_cards, trick_winner};
