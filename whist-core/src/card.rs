use std::fmt;

/// The four suits, in the tie-break order used throughout the engine
/// (spades first, then hearts, diamonds, clubs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }

    pub fn from_name(name: &str) -> Option<Suit> {
        match name {
            "spades" => Some(Suit::Spades),
            "hearts" => Some(Suit::Hearts),
            "diamonds" => Some(Suit::Diamonds),
            "clubs" => Some(Suit::Clubs),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rank ordering in force for a hand.
///
/// Uptown is the familiar ace-high order. Downtown inverts the spot cards
/// (deuce best) while the ace stays high. Downtown-noaces inverts everything,
/// ace worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Uptown,
    Downtown,
    DowntownNoAces,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Uptown => "uptown",
            Direction::Downtown => "downtown",
            Direction::DowntownNoAces => "downtown-noaces",
        }
    }

    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "uptown" => Some(Direction::Uptown),
            "downtown" => Some(Direction::Downtown),
            "downtown-noaces" => Some(Direction::DowntownNoAces),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single card. Rank runs 1..=13 with 1 = ace; how ranks order against
/// each other is a property of the `Direction` in force, not of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Card {
        debug_assert!((1..=13).contains(&rank));
        Card { suit, rank }
    }

    /// Stable identifier of the form `suit_rank`, e.g. `hearts_1`.
    pub fn id(self) -> String {
        format!("{}_{}", self.suit.name(), self.rank)
    }

    pub fn from_id(id: &str) -> Option<Card> {
        let (suit, rank) = id.split_once('_')?;
        let suit = Suit::from_name(suit)?;
        let rank: u8 = rank.parse().ok()?;
        if !(1..=13).contains(&rank) {
            return None;
        }
        Some(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.suit.name(), self.rank)
    }
}

/// One card played into the current trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickPlay {
    pub player: usize,
    pub card: Card,
}

/// One entry in the auction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidInfo {
    pub player: usize,
    pub amount: i64,
    pub passed: bool,
}
