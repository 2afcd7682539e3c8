use crate::{Gen, GenlabError, Generate, Result};
use std::fmt;

pub const HAND_SIZE: usize = 5;
pub const RANK_MIN: u8 = 1;
pub const RANK_MAX: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Generate)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn ordinal(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Suit> {
        Suit::ALL.get(usize::from(ordinal)).copied()
    }

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Generate)]
pub struct Card {
    pub suit: Suit,
    #[gen(range(RANK_MIN, RANK_MAX))]
    pub rank: u8,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            1 => write!(f, "A{}", self.suit.symbol()),
            11 => write!(f, "J{}", self.suit.symbol()),
            12 => write!(f, "Q{}", self.suit.symbol()),
            13 => write!(f, "K{}", self.suit.symbol()),
            n => write!(f, "{n}{}", self.suit.symbol()),
        }
    }
}

/// Exactly [`HAND_SIZE`] cards in draw order. Repeats are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = GenlabError;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        if cards.len() != HAND_SIZE {
            return Err(GenlabError::InvalidArgument {
                message: format!("a hand holds {HAND_SIZE} cards, got {}", cards.len()),
            });
        }
        Ok(Hand { cards })
    }
}

/// Suit and rank drawn independently.
pub fn card() -> Gen<Card> {
    Card::generate()
}

pub fn hand() -> Gen<Hand> {
    Gen::vec_exact(HAND_SIZE, card()).map(|cards| Hand { cards })
}
