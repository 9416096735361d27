use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::points::Points;
use crate::model::strategy::{BotStrategy, HumanStrategy, PlayStrategy, Strategy};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Human,
    Bot,
}

impl Role {
    pub const fn strategy(self) -> Strategy {
        match self {
            Role::Human => Strategy::Human(HumanStrategy),
            Role::Bot => Strategy::Bot(BotStrategy),
        }
    }

    pub const fn is_bot(self) -> bool {
        matches!(self, Role::Bot)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Human => "human",
            Role::Bot => "bot",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    role: Role,
    score: Points,
    rounds_won: u32,
    hand: Hand,
    strategy: Strategy,
}

impl Participant {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            score: Points::ZERO,
            rounds_won: 0,
            hand: Hand::new(),
            strategy: role.strategy(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(Role::Human, name)
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self::new(Role::Bot, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn score(&self) -> Points {
        self.score
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub(crate) fn receive(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub(crate) fn discard(&mut self, committed: Card) -> Vec<Card> {
        self.strategy.discard(&mut self.hand, committed)
    }

    pub(crate) fn auto_pick(&self) -> Option<Card> {
        self.strategy.auto_pick(&self.hand)
    }

    pub(crate) fn add_points(&mut self, points: Points) {
        self.score += points;
    }

    pub(crate) fn record_round_win(&mut self) {
        self.rounds_won += 1;
    }

    /// Zeroes the score and empties the hand; round wins carry over.
    pub(crate) fn reset_for_round(&mut self) {
        self.score = Points::ZERO;
        self.hand.clear();
    }

    pub fn view(&self) -> ParticipantView {
        ParticipantView {
            name: self.name.clone(),
            role: self.role,
            score: self.score,
            rounds_won: self.rounds_won,
            hand: self.hand.cards().to_vec(),
        }
    }
}

/// Detached copy of a participant handed to observers and hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub name: String,
    pub role: Role,
    pub score: Points,
    pub rounds_won: u32,
    pub hand: Vec<Card>,
}
