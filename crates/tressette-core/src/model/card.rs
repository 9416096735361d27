use crate::model::points::Points;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    InvalidRank(u8),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidRank(value) => {
                write!(f, "rank {value} is not part of the 40-card deck (expected 1-10)")
            }
        }
    }
}

impl std::error::Error for CardError {}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn from_value(value: u8, suit: Suit) -> Result<Self, CardError> {
        Rank::from_value(value)
            .map(|rank| Card::new(rank, suit))
            .ok_or(CardError::InvalidRank(value))
    }

    pub const fn strength(self) -> i8 {
        self.rank.strength()
    }

    pub const fn point_value(self) -> Points {
        self.rank.point_value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
