use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Denari = 0,
    Coppe = 1,
    Bastoni = 2,
    Spade = 3,
}

impl Suit {
    /// Deck generation order.
    pub const ALL: [Suit; 4] = [Suit::Denari, Suit::Coppe, Suit::Bastoni, Suit::Spade];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Denari),
            1 => Some(Suit::Coppe),
            2 => Some(Suit::Bastoni),
            3 => Some(Suit::Spade),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Denari => "Denari",
            Suit::Coppe => "Coppe",
            Suit::Bastoni => "Bastoni",
            Suit::Spade => "Spade",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Denari => "D",
            Suit::Coppe => "C",
            Suit::Bastoni => "B",
            Suit::Spade => "S",
        };
        f.write_str(symbol)
    }
}
