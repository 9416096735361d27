use crate::game::deal::cards_per_participant;
use crate::game::error::EngineError;
use crate::model::participant::{Participant, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One seat of the initial roster, in seating order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub role: Role,
}

impl RosterEntry {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Human,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Bot,
        }
    }
}

/// Checks table size and name uniqueness, then seats everyone.
pub fn seat_roster(roster: &[RosterEntry]) -> Result<Vec<Participant>, EngineError> {
    cards_per_participant(roster.len())?;

    let mut seen = HashSet::new();
    for entry in roster {
        if entry.name.trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(EngineError::DuplicateName(entry.name.clone()));
        }
    }

    Ok(roster
        .iter()
        .map(|entry| Participant::new(entry.role, entry.name.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{RosterEntry, seat_roster};
    use crate::game::error::EngineError;
    use crate::model::participant::Role;

    #[test]
    fn seats_in_roster_order() {
        let seated = seat_roster(&[RosterEntry::human("Ada"), RosterEntry::bot("Bruno")]).unwrap();
        assert_eq!(seated[0].name(), "Ada");
        assert_eq!(seated[0].role(), Role::Human);
        assert_eq!(seated[1].role(), Role::Bot);
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert_eq!(
            seat_roster(&[RosterEntry::human("Ada")]).unwrap_err(),
            EngineError::UnsupportedPlayerCount(1)
        );
        let five: Vec<_> = (0..5).map(|i| RosterEntry::bot(format!("B{i}"))).collect();
        assert_eq!(
            seat_roster(&five).unwrap_err(),
            EngineError::UnsupportedPlayerCount(5)
        );
    }

    #[test]
    fn rejects_blank_and_duplicate_names() {
        assert_eq!(
            seat_roster(&[RosterEntry::human("Ada"), RosterEntry::bot("  ")]).unwrap_err(),
            EngineError::EmptyName
        );
        assert_eq!(
            seat_roster(&[RosterEntry::human("Ada"), RosterEntry::bot("Ada")]).unwrap_err(),
            EngineError::DuplicateName("Ada".to_string())
        );
    }
}
