use crate::model::points::Points;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Asso = 1,
    Due = 2,
    Tre = 3,
    Quattro = 4,
    Cinque = 5,
    Sei = 6,
    Sette = 7,
    Fante = 8,
    Cavallo = 9,
    Re = 10,
}

impl Rank {
    pub const ORDERED: [Rank; 10] = [
        Rank::Asso,
        Rank::Due,
        Rank::Tre,
        Rank::Quattro,
        Rank::Cinque,
        Rank::Sei,
        Rank::Sette,
        Rank::Fante,
        Rank::Cavallo,
        Rank::Re,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Asso),
            2 => Some(Rank::Due),
            3 => Some(Rank::Tre),
            4 => Some(Rank::Quattro),
            5 => Some(Rank::Cinque),
            6 => Some(Rank::Sei),
            7 => Some(Rank::Sette),
            8 => Some(Rank::Fante),
            9 => Some(Rank::Cavallo),
            10 => Some(Rank::Re),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Trick-taking strength. Quattro through Sette share 0; the earliest
    /// played of equal cards keeps the trick.
    pub const fn strength(self) -> i8 {
        match self {
            Rank::Asso => 3,
            Rank::Due => 2,
            Rank::Tre => 1,
            Rank::Quattro | Rank::Cinque | Rank::Sei | Rank::Sette => 0,
            Rank::Fante => -1,
            Rank::Cavallo => -2,
            Rank::Re => -3,
        }
    }

    pub const fn point_value(self) -> Points {
        match self {
            Rank::Asso | Rank::Tre => Points::ONE,
            Rank::Fante | Rank::Cavallo | Rank::Re => Points::THIRD,
            _ => Points::ZERO,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rank::Asso => "Asso",
            Rank::Due => "Due",
            Rank::Tre => "Tre",
            Rank::Quattro => "Quattro",
            Rank::Cinque => "Cinque",
            Rank::Sei => "Sei",
            Rank::Sette => "Sette",
            Rank::Fante => "Fante",
            Rank::Cavallo => "Cavallo",
            Rank::Re => "Re",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Asso => "A",
            Rank::Fante => "F",
            Rank::Cavallo => "C",
            Rank::Re => "R",
            other => return write!(f, "{}", other.value()),
        };
        f.write_str(text)
    }
}
