use crate::{Card, Direction, Suit, TrickPlay};

/// Value of a card under the given direction. Higher value wins within a
/// suit.
///
/// Uptown: ace = 14, else rank. Downtown: ace = 14, else 14 - rank (deuce
/// best). Downtown-noaces: ace = 1, else 14 - rank.
pub fn card_value(card: Card, direction: Direction) -> i64 {
    match direction {
        Direction::Uptown => {
            if card.rank == 1 {
                14
            } else {
                i64::from(card.rank)
            }
        }
        Direction::Downtown => {
            if card.rank == 1 {
                14
            } else {
                14 - i64::from(card.rank)
            }
        }
        Direction::DowntownNoAces => {
            if card.rank == 1 {
                1
            } else {
                14 - i64::from(card.rank)
            }
        }
    }
}

/// Compare two cards under (trump, direction). Positive means `a` beats `b`.
///
/// Trump beats any non-trump; same suit compares by value. Two different
/// non-trump suits return 0: neither beats the other, which is exactly what
/// trick evaluation and the winners/losers filters rely on.
pub fn compare_cards(a: Card, b: Card, trump: Option<Suit>, direction: Direction) -> i64 {
    if let Some(trump) = trump {
        if a.suit == trump && b.suit != trump {
            return 1;
        }
        if b.suit == trump && a.suit != trump {
            return -1;
        }
    }
    if a.suit == b.suit {
        return card_value(a, direction) - card_value(b, direction);
    }
    0
}

/// Index within `trick` of the play currently winning it, or `None` for an
/// empty trick. The led card is the baseline; a later card takes over only
/// by strictly beating the current best.
pub fn trick_winner(trick: &[TrickPlay], trump: Option<Suit>, direction: Direction) -> Option<usize> {
    if trick.is_empty() {
        return None;
    }
    let mut winner = 0;
    for i in 1..trick.len() {
        if compare_cards(trick[i].card, trick[winner].card, trump, direction) > 0 {
            winner = i;
        }
    }
    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_card_value_uptown() {
        assert_eq!(card_value(c(Suit::Spades, 1), Direction::Uptown), 14);
        assert_eq!(card_value(c(Suit::Spades, 13), Direction::Uptown), 13);
        assert_eq!(card_value(c(Suit::Spades, 2), Direction::Uptown), 2);
    }

    #[test]
    fn test_card_value_downtown() {
        assert_eq!(card_value(c(Suit::Hearts, 1), Direction::Downtown), 14);
        assert_eq!(card_value(c(Suit::Hearts, 2), Direction::Downtown), 12);
        assert_eq!(card_value(c(Suit::Hearts, 13), Direction::Downtown), 1);
    }

    #[test]
    fn test_card_value_downtown_noaces() {
        assert_eq!(card_value(c(Suit::Clubs, 1), Direction::DowntownNoAces), 1);
        assert_eq!(card_value(c(Suit::Clubs, 2), Direction::DowntownNoAces), 12);
        assert_eq!(card_value(c(Suit::Clubs, 13), Direction::DowntownNoAces), 1);
    }

    #[test]
    fn test_trump_beats_non_trump() {
        let trump = Some(Suit::Clubs);
        let a = c(Suit::Clubs, 2);
        let b = c(Suit::Spades, 1);
        assert!(compare_cards(a, b, trump, Direction::Uptown) > 0);
        assert!(compare_cards(b, a, trump, Direction::Uptown) < 0);
    }

    #[test]
    fn test_different_non_trump_suits_are_neutral() {
        let cmp = compare_cards(
            c(Suit::Hearts, 1),
            c(Suit::Diamonds, 2),
            Some(Suit::Clubs),
            Direction::Uptown,
        );
        assert_eq!(cmp, 0);
    }

    #[test]
    fn test_trick_winner_follows_lead_suit() {
        let trick = vec![
            TrickPlay { player: 0, card: c(Suit::Hearts, 5) },
            TrickPlay { player: 3, card: c(Suit::Hearts, 10) },
            TrickPlay { player: 2, card: c(Suit::Diamonds, 1) }, // off suit
            TrickPlay { player: 1, card: c(Suit::Hearts, 2) },
        ];
        assert_eq!(trick_winner(&trick, None, Direction::Uptown), Some(1));
    }

    #[test]
    fn test_trick_winner_trump_takes_over() {
        let trick = vec![
            TrickPlay { player: 0, card: c(Suit::Hearts, 1) },
            TrickPlay { player: 3, card: c(Suit::Clubs, 2) },
        ];
        assert_eq!(
            trick_winner(&trick, Some(Suit::Clubs), Direction::Uptown),
            Some(1)
        );
    }

    #[test]
    fn test_trick_winner_empty() {
        assert_eq!(trick_winner(&[], None, Direction::Uptown), None);
    }
}
