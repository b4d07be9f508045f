use crate::codec::card_to_letter;
use crate::{Card, Suit};

/// Deterministic deck generator. Seeded once; each call to `next_deck`
/// produces a fresh 52-letter deck string from a Fisher-Yates shuffle.
///
/// The generator is a xorshift64* stream, which is plenty for simulation
/// shuffles and keeps runs reproducible from a single u64 seed.
pub struct DeckGenerator {
    state: u64,
}

impl DeckGenerator {
    pub fn new(seed: u64) -> DeckGenerator {
        // A zero state would lock xorshift at zero forever.
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        DeckGenerator { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Uniform index in 0..bound via rejection sampling.
    fn next_index(&mut self, bound: u64) -> u64 {
        let zone = u64::MAX - u64::MAX % bound;
        loop {
            let x = self.next_u64();
            if x < zone {
                return x % bound;
            }
        }
    }

    /// Shuffle a full deck and encode it as a deck string.
    pub fn next_deck(&mut self) -> String {
        let mut cards = full_deck();
        for i in (1..cards.len()).rev() {
            let j = self.next_index(i as u64 + 1) as usize;
            cards.swap(i, j);
        }
        cards.into_iter().map(card_to_letter).collect()
    }
}

/// All 52 cards in alphabet order: hearts, spades, clubs, diamonds, each
/// ranked 1..=13.
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in [Suit::Hearts, Suit::Spades, Suit::Clubs, Suit::Diamonds] {
        for rank in 1..=13 {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_deck;

    #[test]
    fn test_generated_decks_are_valid() {
        let mut gen = DeckGenerator::new(42);
        for _ in 0..20 {
            let url = gen.next_deck();
            assert!(decode_deck(&url).is_ok(), "bad deck {}", url);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeckGenerator::new(7);
        let mut b = DeckGenerator::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_deck(), b.next_deck());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DeckGenerator::new(1);
        let mut b = DeckGenerator::new(2);
        assert_ne!(a.next_deck(), b.next_deck());
    }

    #[test]
    fn test_zero_seed_still_shuffles() {
        let mut gen = DeckGenerator::new(0);
        let first = gen.next_deck();
        let second = gen.next_deck();
        assert_ne!(first, second);
    }

    #[test]
    fn test_full_deck_is_52_distinct() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let mut ids: Vec<String> = deck.iter().map(|c| c.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 52);
    }
}
