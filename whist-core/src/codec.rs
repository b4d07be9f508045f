use std::fmt;

use regex::Regex;

use crate::{Card, Suit};

/// Errors from decoding a 52-character deck string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    BadLength(usize),
    BadLetter(char),
    DuplicateCard(Card),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeckError::BadLength(len) => {
                write!(f, "deck string must be 52 letters, got {}", len)
            }
            DeckError::BadLetter(ch) => write!(f, "invalid card letter '{}'", ch),
            DeckError::DuplicateCard(card) => write!(f, "duplicate card {} in deck", card),
        }
    }
}

impl std::error::Error for DeckError {}

/// Encode a card as its deck letter.
///
/// The alphabet packs each suit into a contiguous block of 13 letters:
/// `a-m` = hearts 1-13, `n-z` = spades, `A-M` = clubs, `N-Z` = diamonds.
pub fn card_to_letter(card: Card) -> char {
    let base = match card.suit {
        Suit::Hearts => b'a',
        Suit::Spades => b'n',
        Suit::Clubs => b'A',
        Suit::Diamonds => b'N',
    };
    (base + card.rank - 1) as char
}

/// Decode a single deck letter.
pub fn letter_to_card(letter: char) -> Result<Card, DeckError> {
    let (suit, base) = match letter {
        'a'..='m' => (Suit::Hearts, b'a'),
        'n'..='z' => (Suit::Spades, b'n'),
        'A'..='M' => (Suit::Clubs, b'A'),
        'N'..='Z' => (Suit::Diamonds, b'N'),
        _ => return Err(DeckError::BadLetter(letter)),
    };
    let rank = (letter as u8) - base + 1;
    Ok(Card::new(suit, rank))
}

/// Decode a full deck string into 52 distinct cards, in string order.
pub fn decode_deck(url: &str) -> Result<Vec<Card>, DeckError> {
    let shape = Regex::new(r"^[A-Za-z]{52}$").unwrap();
    if !shape.is_match(url) {
        // Distinguish length problems from alphabet problems in the error.
        if url.chars().count() != 52 {
            return Err(DeckError::BadLength(url.chars().count()));
        }
        let bad = url
            .chars()
            .find(|ch| !ch.is_ascii_alphabetic())
            .unwrap_or('?');
        return Err(DeckError::BadLetter(bad));
    }

    let mut cards = Vec::with_capacity(52);
    let mut seen = [false; 52];
    for letter in url.chars() {
        let card = letter_to_card(letter)?;
        let index = suit_block(card.suit) * 13 + usize::from(card.rank) - 1;
        if seen[index] {
            return Err(DeckError::DuplicateCard(card));
        }
        seen[index] = true;
        cards.push(card);
    }
    Ok(cards)
}

/// Encode 52 cards back into a deck string.
pub fn encode_deck(cards: &[Card]) -> Result<String, DeckError> {
    if cards.len() != 52 {
        return Err(DeckError::BadLength(cards.len()));
    }
    Ok(cards.iter().map(|&c| card_to_letter(c)).collect())
}

/// Rotate a deck string so seat 0 receives the cards seat `rotation`
/// originally held.
///
/// Chars 0..48 are dealt round-robin (card i goes to seat i % 4), so a cyclic
/// left shift of the dealt portion by `rotation` relabels the seats. The
/// 4-card kitty (chars 48..52) is untouched. The rotation is normalized mod
/// 4, so 0 and 4 are both the identity.
pub fn rotate_deck(url: &str, rotation: i64) -> String {
    let r = rotation.rem_euclid(4) as usize;
    if r == 0 {
        return url.to_string();
    }
    debug_assert_eq!(url.len(), 52);
    let dealt = &url[..48];
    let kitty = &url[48..];
    format!("{}{}{}", &dealt[r..], &dealt[..r], kitty)
}

fn suit_block(suit: Suit) -> usize {
    match suit {
        Suit::Hearts => 0,
        Suit::Spades => 1,
        Suit::Clubs => 2,
        Suit::Diamonds => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_URL: &str = "oVKtOPzUAJYMDWsTNFIGbqcSaifXEkHQnLuRplryChmwBdvxjZge";

    #[test]
    fn test_letter_round_trip_all_52() {
        for letter in ('a'..='z').chain('A'..='Z') {
            let card = letter_to_card(letter).unwrap();
            assert_eq!(card_to_letter(card), letter);
        }
    }

    #[test]
    fn test_letter_blocks() {
        assert_eq!(letter_to_card('a').unwrap(), Card::new(Suit::Hearts, 1));
        assert_eq!(letter_to_card('m').unwrap(), Card::new(Suit::Hearts, 13));
        assert_eq!(letter_to_card('n').unwrap(), Card::new(Suit::Spades, 1));
        assert_eq!(letter_to_card('z').unwrap(), Card::new(Suit::Spades, 13));
        assert_eq!(letter_to_card('A').unwrap(), Card::new(Suit::Clubs, 1));
        assert_eq!(letter_to_card('M').unwrap(), Card::new(Suit::Clubs, 13));
        assert_eq!(letter_to_card('N').unwrap(), Card::new(Suit::Diamonds, 1));
        assert_eq!(letter_to_card('Z').unwrap(), Card::new(Suit::Diamonds, 13));
        assert_eq!(letter_to_card('0'), Err(DeckError::BadLetter('0')));
    }

    #[test]
    fn test_decode_encode_round_trip() {
        let cards = decode_deck(TEST_URL).unwrap();
        assert_eq!(cards.len(), 52);
        assert_eq!(encode_deck(&cards).unwrap(), TEST_URL);
    }

    #[test]
    fn test_decode_rejects_short_string() {
        assert_eq!(decode_deck("abc"), Err(DeckError::BadLength(3)));
    }

    #[test]
    fn test_decode_rejects_non_letter() {
        let mut url = TEST_URL.to_string();
        url.replace_range(0..1, "0");
        assert_eq!(decode_deck(&url), Err(DeckError::BadLetter('0')));
    }

    #[test]
    fn test_decode_rejects_duplicate() {
        let mut url = TEST_URL.to_string();
        let second = url.chars().next().unwrap();
        url.replace_range(1..2, &second.to_string());
        assert_eq!(
            decode_deck(&url),
            Err(DeckError::DuplicateCard(letter_to_card(second).unwrap()))
        );
    }

    #[test]
    fn test_rotate_identity() {
        assert_eq!(rotate_deck(TEST_URL, 0), TEST_URL);
        assert_eq!(rotate_deck(TEST_URL, 4), TEST_URL);
        assert_eq!(rotate_deck(TEST_URL, -4), TEST_URL);
    }

    #[test]
    fn test_rotate_preserves_kitty() {
        for r in 0..4 {
            let rotated = rotate_deck(TEST_URL, r);
            assert_eq!(&rotated[48..], &TEST_URL[48..]);
        }
    }

    #[test]
    fn test_rotate_shifts_dealt_portion() {
        let rotated = rotate_deck(TEST_URL, 1);
        assert_eq!(&rotated[..47], &TEST_URL[1..48]);
        assert_eq!(&rotated[47..48], &TEST_URL[..1]);
    }

    #[test]
    fn test_rotate_negative_normalizes() {
        assert_eq!(rotate_deck(TEST_URL, -1), rotate_deck(TEST_URL, 3));
        assert_eq!(rotate_deck(TEST_URL, 7), rotate_deck(TEST_URL, 3));
    }
}
