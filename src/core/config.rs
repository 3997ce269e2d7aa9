//! Game configuration.
//!
//! French Tarot is played here in its fixed four-seat form; the only
//! externally configurable knob is the deal seed (see
//! [`TarotGameBuilder`](crate::game::TarotGameBuilder)). The
//! configuration is an immutable value copied cheaply into the state at
//! construction, so no state ever shares mutable ownership of it.

use serde::{Deserialize, Serialize};

/// Number of seats at the table.
pub const NUM_PLAYERS: usize = 4;

/// Number of cards set aside face down as the dog (le chien).
pub const DOG_SIZE: usize = 6;

/// Immutable table configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats at the table.
    pub num_players: usize,

    /// Cards in the dog.
    pub dog_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: NUM_PLAYERS,
            dog_size: DOG_SIZE,
        }
    }
}

impl GameConfig {
    /// Cards dealt to each hand.
    #[must_use]
    pub fn cards_per_player(&self) -> usize {
        (crate::cards::DECK_SIZE - self.dog_size) / self.num_players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = GameConfig::default();

        assert_eq!(config.num_players, 4);
        assert_eq!(config.dog_size, 6);
        assert_eq!(config.cards_per_player(), 18);
    }

    #[test]
    fn test_deal_covers_deck() {
        let config = GameConfig::default();

        assert_eq!(
            config.num_players * config.cards_per_player() + config.dog_size,
            crate::cards::DECK_SIZE
        );
    }
}
