//! Bids and their contracts.
//!
//! Five bids, ranked by their scoring multiplier: Pass (0), Petit (1),
//! Garde (2), Garde Sans (4), Garde Contre (6). Only the two lowest
//! real bids see the dog; the two Gardes above play without exchanging
//! it. During the bidding phase, action ids `0..=4` name these bids in
//! rank order.

use serde::{Deserialize, Serialize};

use crate::core::ActionId;

/// Number of distinct bids, Pass included.
pub const NUM_BIDS: usize = 5;

/// A bid in the auction.
///
/// Declaration order is rank order, so the derived `Ord` gives
/// "strictly higher bid" directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bid {
    Pass,
    Petit,
    Garde,
    GardeSans,
    GardeContre,
}

impl Bid {
    /// All bids in rank (and action-id) order.
    pub const ALL: [Bid; NUM_BIDS] = [
        Bid::Pass,
        Bid::Petit,
        Bid::Garde,
        Bid::GardeSans,
        Bid::GardeContre,
    ];

    /// Scoring multiplier applied to the base score magnitude.
    #[must_use]
    pub fn multiplier(self) -> i64 {
        match self {
            Bid::Pass => 0,
            Bid::Petit => 1,
            Bid::Garde => 2,
            Bid::GardeSans => 4,
            Bid::GardeContre => 6,
        }
    }

    /// Whether this bid's contract exchanges with the dog.
    #[must_use]
    pub fn requires_exchange(self) -> bool {
        matches!(self, Bid::Petit | Bid::Garde)
    }

    /// The bid named by a bidding-phase action id.
    ///
    /// Panics on an id outside `0..=4`; that is a caller bug.
    #[must_use]
    pub fn from_action(action: ActionId) -> Self {
        *Bid::ALL
            .get(action.index())
            .unwrap_or_else(|| panic!("action {action} is not a bid"))
    }

    /// The bidding-phase action id of this bid.
    #[must_use]
    pub fn action(self) -> ActionId {
        let index = Bid::ALL
            .iter()
            .position(|&b| b == self)
            .expect("bid is in ALL");
        ActionId::new(index as u8)
    }
}

impl std::fmt::Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Bid::Pass => "Pass",
            Bid::Petit => "Petit",
            Bid::Garde => "Garde",
            Bid::GardeSans => "Garde Sans",
            Bid::GardeContre => "Garde Contre",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        let multipliers: Vec<_> = Bid::ALL.iter().map(|b| b.multiplier()).collect();
        assert_eq!(multipliers, vec![0, 1, 2, 4, 6]);
    }

    #[test]
    fn test_rank_order_matches_multiplier_order() {
        for pair in Bid::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].multiplier() < pair[1].multiplier());
        }
    }

    #[test]
    fn test_exchange_contracts() {
        assert!(!Bid::Pass.requires_exchange());
        assert!(Bid::Petit.requires_exchange());
        assert!(Bid::Garde.requires_exchange());
        assert!(!Bid::GardeSans.requires_exchange());
        assert!(!Bid::GardeContre.requires_exchange());
    }

    #[test]
    fn test_action_round_trip() {
        for (index, &bid) in Bid::ALL.iter().enumerate() {
            assert_eq!(bid.action(), ActionId::new(index as u8));
            assert_eq!(Bid::from_action(bid.action()), bid);
        }
    }

    #[test]
    #[should_panic(expected = "is not a bid")]
    fn test_from_action_out_of_range_panics() {
        Bid::from_action(ActionId::new(5));
    }
}
