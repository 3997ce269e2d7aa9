//! Action representation.
//!
//! Every move in the game is a single small integer. The interpretation
//! is phase-dependent: during bidding the ids `0..=4` name bids, during
//! dealing `0` is the lone chance outcome, and everywhere else an id in
//! `[0, 78)` names a card of the deck. The engine stores and compares
//! ids; the phase handlers assign meaning.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A single action id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u8);

impl ActionId {
    /// Create a new action ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded action for history tracking.
///
/// Used for replay/debugging and for opponent-consistency checks in
/// search layers built on top of the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action; `None` for the dealing chance move.
    pub actor: Option<PlayerId>,

    /// The action taken.
    pub action: ActionId,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(actor: Option<PlayerId>, action: ActionId) -> Self {
        Self { actor, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_id_basics() {
        let action = ActionId::new(57);

        assert_eq!(action.index(), 57);
        assert_eq!(action.raw(), 57);
        assert_eq!(format!("{}", action), "57");
    }

    #[test]
    fn test_action_id_ordering() {
        assert!(ActionId::new(3) < ActionId::new(4));
        assert_eq!(ActionId::new(9), ActionId::new(9));
    }

    #[test]
    fn test_action_record() {
        let chance = ActionRecord::new(None, ActionId::new(0));
        let played = ActionRecord::new(Some(PlayerId::new(2)), ActionId::new(14));

        assert_eq!(chance.actor, None);
        assert_eq!(played.actor, Some(PlayerId::new(2)));
        assert_eq!(played.action, ActionId::new(14));
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Some(PlayerId::new(1)), ActionId::new(42));

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
