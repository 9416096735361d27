pub mod board;
pub mod card;
pub mod deck;
pub mod hand;
pub mod participant;
pub mod points;
pub mod rank;
pub mod strategy;
pub mod suit;
pub mod trick;
