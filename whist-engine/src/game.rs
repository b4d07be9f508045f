use std::fmt;

use whist_core::{
    decode_deck, trick_winner, BidInfo, Card, DeckError, Direction, Suit, TrickPlay,
};

pub const TEAM_COUNT: usize = 2;
pub const PLAYER_COUNT: usize = 4;
pub const HAND_SIZE: usize = 12;
pub const KITTY_SIZE: usize = 4;
pub const WINNING_SCORE: i64 = 7;

/// Hand lifecycle. `Deal` waits for the driver to supply a deck string;
/// everything after that is driven by player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Deal,
    Bidding,
    TrumpSelection,
    Discarding,
    Play,
    Scoring,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Deal => "deal",
            Stage::Bidding => "bidding",
            Stage::TrumpSelection => "trump-selection",
            Stage::Discarding => "discarding",
            Stage::Play => "play",
            Stage::Scoring => "scoring",
        };
        write!(f, "{}", name)
    }
}

/// A rejected player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    WrongStage { expected: Stage, actual: Stage },
    NotYourTurn { player: usize, current: usize },
    BadDeck(DeckError),
    BidOutOfRange { amount: i64 },
    BidTooLow { amount: i64, high: i64 },
    TakeNotAllowed,
    NotDeclarer { player: usize },
    WrongDiscardCount { count: usize },
    CardNotInHand { card: Card },
    MustFollowSuit { suit: Suit },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActionError::WrongStage { expected, actual } => {
                write!(f, "wrong stage: expected {}, game is in {}", expected, actual)
            }
            ActionError::NotYourTurn { player, current } => {
                write!(f, "not player {}'s turn (player {} to act)", player, current)
            }
            ActionError::BadDeck(err) => write!(f, "bad deck: {}", err),
            ActionError::BidOutOfRange { amount } => write!(f, "bid {} out of range", amount),
            ActionError::BidTooLow { amount, high } => {
                write!(f, "bid {} does not beat the standing bid of {}", amount, high)
            }
            ActionError::TakeNotAllowed => write!(f, "only the dealer may take a standing bid"),
            ActionError::NotDeclarer { player } => {
                write!(f, "player {} is not the declarer", player)
            }
            ActionError::WrongDiscardCount { count } => {
                write!(f, "must discard exactly 4 cards, got {}", count)
            }
            ActionError::CardNotInHand { card } => write!(f, "card {} not in hand", card),
            ActionError::MustFollowSuit { suit } => write!(f, "must follow {}", suit),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<DeckError> for ActionError {
    fn from(err: DeckError) -> ActionError {
        ActionError::BadDeck(err)
    }
}

/// One partnership game of Bid Whist: repeated hands of deal, auction,
/// trump selection, kitty discard and twelve tricks, scored until a team
/// reaches seven points.
#[derive(Debug, Clone)]
pub struct BidWhist {
    stage: Stage,
    hands: [Vec<Card>; PLAYER_COUNT],
    tricks: [Vec<Card>; PLAYER_COUNT],
    kitty: Vec<Card>,
    current_trick: Vec<TrickPlay>,
    current_player: usize,
    dealer: usize,
    declarer: Option<usize>,
    trump: Option<Suit>,
    direction: Direction,
    bids: Vec<BidInfo>,
    current_high_bid: i64,
    high_bidder: Option<usize>,
    team_scores: [i64; TEAM_COUNT],
    books_won: [i64; TEAM_COUNT],
    played: Vec<Card>,
    lead_suit: Option<Suit>,
    game_over: bool,
    winner_team: Option<usize>,
}

impl BidWhist {
    pub fn new(dealer: usize) -> BidWhist {
        BidWhist {
            stage: Stage::Deal,
            hands: Default::default(),
            tricks: Default::default(),
            kitty: Vec::new(),
            current_trick: Vec::new(),
            current_player: dealer,
            dealer: dealer % PLAYER_COUNT,
            declarer: None,
            trump: None,
            direction: Direction::Uptown,
            bids: Vec::new(),
            current_high_bid: 0,
            high_bidder: None,
            team_scores: [0; TEAM_COUNT],
            books_won: [0; TEAM_COUNT],
            played: Vec::new(),
            lead_suit: None,
            game_over: false,
            winner_team: None,
        }
    }

    // === accessors ===

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn declarer(&self) -> Option<usize> {
        self.declarer
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn hand(&self, player: usize) -> &[Card] {
        &self.hands[player]
    }

    pub fn tricks_pile(&self, player: usize) -> &[Card] {
        &self.tricks[player]
    }

    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }

    pub fn current_trick(&self) -> &[TrickPlay] {
        &self.current_trick
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_suit
    }

    pub fn bids(&self) -> &[BidInfo] {
        &self.bids
    }

    pub fn current_high_bid(&self) -> i64 {
        self.current_high_bid
    }

    pub fn team_scores(&self) -> [i64; TEAM_COUNT] {
        self.team_scores
    }

    pub fn books_won(&self) -> [i64; TEAM_COUNT] {
        self.books_won
    }

    pub fn played_cards(&self) -> &[Card] {
        &self.played
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner_team(&self) -> Option<usize> {
        self.winner_team
    }

    /// No tricks have been completed yet. Declarer's four discards sit in
    /// their tricks pile from the start, so they do not count.
    pub fn is_first_trick(&self) -> bool {
        match self.declarer {
            Some(declarer) => self
                .tricks
                .iter()
                .enumerate()
                .all(|(p, pile)| pile.len() == if p == declarer { KITTY_SIZE } else { 0 }),
            None => self.tricks.iter().all(|pile| pile.is_empty()),
        }
    }

    // === dealing ===

    /// Deal a 52-letter deck string: card i of the first 48 goes to seat
    /// i mod 4, the last four form the kitty. Moves to bidding, first bid
    /// to the dealer's right.
    pub fn deal(&mut self, url: &str) -> Result<(), ActionError> {
        if self.stage != Stage::Deal {
            return Err(ActionError::WrongStage { expected: Stage::Deal, actual: self.stage });
        }
        let cards = decode_deck(url)?;

        for (i, &card) in cards.iter().take(PLAYER_COUNT * HAND_SIZE).enumerate() {
            self.hands[i % PLAYER_COUNT].push(card);
        }
        self.kitty = cards[PLAYER_COUNT * HAND_SIZE..].to_vec();
        for hand in &mut self.hands {
            sort_hand(hand, self.direction);
        }

        self.stage = Stage::Bidding;
        self.current_player = (self.dealer + 3) % PLAYER_COUNT;
        Ok(())
    }

    // === bidding ===

    /// The dealer, bidding last, may claim a standing bid instead of
    /// raising it.
    pub fn can_dealer_take(&self, player: usize) -> bool {
        player == self.dealer && self.bids.len() == PLAYER_COUNT - 1 && self.current_high_bid > 0
    }

    /// Bids this player could legally place right now: 0 is pass, -1 is the
    /// dealer's take, otherwise the amount must beat the standing bid.
    pub fn valid_bids(&self, player: usize) -> Vec<i64> {
        if self.stage != Stage::Bidding || player != self.current_player {
            return Vec::new();
        }
        let mut bids = vec![0];
        if self.can_dealer_take(player) {
            bids.push(-1);
        }
        bids.extend((self.current_high_bid + 1).max(1)..=6);
        bids
    }

    /// Place a bid: 1-6, 0 to pass, or -1 for the dealer's take. The fourth
    /// bid closes the auction; four passes redeal with the next dealer.
    pub fn place_bid(&mut self, player: usize, amount: i64) -> Result<(), ActionError> {
        if self.stage != Stage::Bidding {
            return Err(ActionError::WrongStage { expected: Stage::Bidding, actual: self.stage });
        }
        if player != self.current_player {
            return Err(ActionError::NotYourTurn { player, current: self.current_player });
        }

        if amount == -1 {
            if !self.can_dealer_take(player) {
                return Err(ActionError::TakeNotAllowed);
            }
            // The take records the amount it claims.
            self.bids.push(BidInfo { player, amount: self.current_high_bid, passed: false });
            self.high_bidder = Some(player);
        } else if amount == 0 {
            self.bids.push(BidInfo { player, amount: 0, passed: true });
        } else {
            if !(1..=6).contains(&amount) {
                return Err(ActionError::BidOutOfRange { amount });
            }
            if amount <= self.current_high_bid {
                return Err(ActionError::BidTooLow { amount, high: self.current_high_bid });
            }
            self.bids.push(BidInfo { player, amount, passed: false });
            self.current_high_bid = amount;
            self.high_bidder = Some(player);
        }

        if self.bids.len() == PLAYER_COUNT {
            self.finalize_bidding();
        } else {
            self.current_player = (self.current_player + 3) % PLAYER_COUNT;
        }
        Ok(())
    }

    fn finalize_bidding(&mut self) {
        let Some(declarer) = self.high_bidder else {
            // Everyone passed: next dealer, fresh deal.
            self.start_new_hand();
            return;
        };
        self.declarer = Some(declarer);
        let kitty: Vec<Card> = self.kitty.drain(..).collect();
        self.hands[declarer].extend(kitty);
        sort_hand(&mut self.hands[declarer], self.direction);
        self.stage = Stage::TrumpSelection;
        self.current_player = declarer;
    }

    // === trump selection and discard ===

    /// Declarer names trump and direction. All hands re-sort under the new
    /// direction; declarer must now discard.
    pub fn set_trump(
        &mut self,
        player: usize,
        trump: Suit,
        direction: Direction,
    ) -> Result<(), ActionError> {
        if self.stage != Stage::TrumpSelection {
            return Err(ActionError::WrongStage {
                expected: Stage::TrumpSelection,
                actual: self.stage,
            });
        }
        if self.declarer != Some(player) {
            return Err(ActionError::NotDeclarer { player });
        }

        self.trump = Some(trump);
        self.direction = direction;
        for hand in &mut self.hands {
            sort_hand(hand, direction);
        }
        self.stage = Stage::Discarding;
        self.current_player = player;
        Ok(())
    }

    /// Declarer lays away exactly four cards. They go face down into the
    /// declarer's tricks pile and count as the first book at scoring time.
    pub fn discard(&mut self, player: usize, cards: &[Card]) -> Result<(), ActionError> {
        if self.stage != Stage::Discarding {
            return Err(ActionError::WrongStage {
                expected: Stage::Discarding,
                actual: self.stage,
            });
        }
        if self.declarer != Some(player) {
            return Err(ActionError::NotDeclarer { player });
        }
        if cards.len() != KITTY_SIZE {
            return Err(ActionError::WrongDiscardCount { count: cards.len() });
        }
        for &card in cards {
            if !self.hands[player].contains(&card) {
                return Err(ActionError::CardNotInHand { card });
            }
        }

        for &card in cards {
            if let Some(idx) = self.hands[player].iter().position(|&c| c == card) {
                self.hands[player].remove(idx);
            }
            self.tricks[player].push(card);
        }

        self.stage = Stage::Play;
        self.current_player = player;
        self.lead_suit = None;
        Ok(())
    }

    // === trick play ===

    /// Whether this card is legal for the player right now: anything on a
    /// lead, otherwise the lead suit must be followed when held.
    pub fn is_valid_move(&self, player: usize, card: Card) -> bool {
        if self.current_trick.is_empty() {
            return true;
        }
        match self.lead_suit {
            Some(lead) if self.hands[player].iter().any(|c| c.suit == lead) => card.suit == lead,
            _ => true,
        }
    }

    /// Play a card into the trick. Returns the trick winner's seat when this
    /// was the fourth card.
    pub fn play_card(&mut self, player: usize, card: Card) -> Result<Option<usize>, ActionError> {
        if self.stage != Stage::Play {
            return Err(ActionError::WrongStage { expected: Stage::Play, actual: self.stage });
        }
        if player != self.current_player {
            return Err(ActionError::NotYourTurn { player, current: self.current_player });
        }
        let Some(idx) = self.hands[player].iter().position(|&c| c == card) else {
            return Err(ActionError::CardNotInHand { card });
        };
        if !self.is_valid_move(player, card) {
            let suit = self.lead_suit.unwrap_or(card.suit);
            return Err(ActionError::MustFollowSuit { suit });
        }

        self.hands[player].remove(idx);
        self.current_trick.push(TrickPlay { player, card });
        self.played.push(card);
        if self.current_trick.len() == 1 {
            self.lead_suit = Some(card.suit);
        }

        if self.current_trick.len() == PLAYER_COUNT {
            Ok(self.finalize_trick())
        } else {
            self.current_player = (self.current_player + 3) % PLAYER_COUNT;
            Ok(None)
        }
    }

    fn finalize_trick(&mut self) -> Option<usize> {
        let idx = trick_winner(&self.current_trick, self.trump, self.direction)?;
        let winner = self.current_trick[idx].player;

        self.books_won[winner % TEAM_COUNT] += 1;
        let trick: Vec<Card> = self.current_trick.drain(..).map(|p| p.card).collect();
        self.tricks[winner].extend(trick);
        self.lead_suit = None;
        self.current_player = winner;

        if self.hands.iter().all(|h| h.is_empty()) {
            self.score_hand();
        }
        Some(winner)
    }

    // === scoring ===

    /// Contract is bid + 6 books; the laid-away kitty counts as one book
    /// for the declaring team. A made contract scores books over six, a
    /// set hands the bid to the defenders. First team to seven wins.
    fn score_hand(&mut self) {
        self.stage = Stage::Scoring;
        let Some(declarer) = self.declarer else {
            return;
        };
        let team = declarer % TEAM_COUNT;
        let declarer_books = self.books_won[team] + 1;
        let contract = self.current_high_bid + 6;

        if declarer_books >= contract {
            self.team_scores[team] += declarer_books - 6;
        } else {
            self.team_scores[1 - team] += self.current_high_bid;
        }

        for (t, &score) in self.team_scores.iter().enumerate() {
            if score >= WINNING_SCORE {
                self.game_over = true;
                self.winner_team = Some(t);
            }
        }
    }

    /// Reset for the next hand: dealer passes to the right, auction and
    /// trick state clear, trump is forgotten. The direction persists until
    /// the next declarer names a new one. The driver supplies the deck.
    pub fn start_new_hand(&mut self) {
        self.dealer = (self.dealer + 3) % PLAYER_COUNT;
        self.stage = Stage::Deal;
        self.hands = Default::default();
        self.tricks = Default::default();
        self.kitty.clear();
        self.current_trick.clear();
        self.current_player = self.dealer;
        self.declarer = None;
        self.trump = None;
        self.bids.clear();
        self.current_high_bid = 0;
        self.high_bidder = None;
        self.books_won = [0; TEAM_COUNT];
        self.played.clear();
        self.lead_suit = None;
    }
}

/// Display order: spades, hearts, clubs, diamonds; ranks ascending within a
/// suit, except that downtown shows the ace at the top.
pub fn sort_hand(hand: &mut [Card], direction: Direction) {
    hand.sort_by_key(|&c| {
        let suit = match c.suit {
            Suit::Spades => 1,
            Suit::Hearts => 2,
            Suit::Clubs => 3,
            Suit::Diamonds => 4,
        };
        let rank = if direction == Direction::Downtown && c.rank == 1 {
            14
        } else {
            i64::from(c.rank)
        };
        (suit, rank)
    });
}
