#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::config::EngineConfig;
pub use game::engine::{PlayOutcome, RoundEngine, RoundPhase, RoundSummary};
pub use game::error::{EngineError, PlayRejection};
pub use game::events::EngineEvent;
pub use game::roster::RosterEntry;
