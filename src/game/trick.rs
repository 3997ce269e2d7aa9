//! The current trick and its resolution.
//!
//! A trick is at most one card per seat, in play order starting from
//! the leader. Resolution walks the cards once: a trump beats any
//! non-trump, a higher trump beats a lower one, and among non-trumps
//! only lead-suit cards compete by rank. Off-suit non-trump cards never
//! win. The Excuse resolves as trump rank 0 under the same rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::card_for_action;
use crate::core::{ActionId, PlayerId};

/// One trick in play order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerId,
    cards: SmallVec<[ActionId; 4]>,
}

impl Trick {
    /// Start an empty trick led by `leader`.
    #[must_use]
    pub fn new(leader: PlayerId) -> Self {
        Self {
            leader,
            cards: SmallVec::new(),
        }
    }

    /// The seat that led (or will lead) this trick.
    #[must_use]
    pub fn leader(&self) -> PlayerId {
        self.leader
    }

    /// Cards played so far, in play order.
    #[must_use]
    pub fn cards(&self) -> &[ActionId] {
        &self.cards
    }

    /// Number of cards played so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card has been played yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether every seat has played.
    #[must_use]
    pub fn is_complete(&self, num_players: usize) -> bool {
        self.cards.len() == num_players
    }

    /// Whether the trick contains the given card.
    #[must_use]
    pub fn contains(&self, action: ActionId) -> bool {
        self.cards.contains(&action)
    }

    /// The lead card.
    ///
    /// Panics on an empty trick; querying a lead before any card is
    /// played is a caller bug.
    #[must_use]
    pub fn lead(&self) -> ActionId {
        assert!(!self.is_empty(), "lead card of an empty trick");
        self.cards[0]
    }

    /// The seat that played (or will play) the card at `index`.
    #[must_use]
    pub fn player_at(&self, index: usize, num_players: usize) -> PlayerId {
        assert!(index < num_players, "trick index {index} out of range");
        PlayerId::new(((self.leader.index() + index) % num_players) as u8)
    }

    /// Add the next card in play order.
    pub fn push(&mut self, action: ActionId) {
        self.cards.push(action);
    }

    /// Resolve the winning seat and card.
    ///
    /// Panics on an empty trick; resolving before any card is played is
    /// a caller bug.
    #[must_use]
    pub fn winner(&self, num_players: usize) -> (PlayerId, ActionId) {
        assert!(!self.is_empty(), "cannot resolve an empty trick");

        let lead_suit = card_for_action(self.cards[0]).suit;
        let mut best_index = 0;
        let mut best = card_for_action(self.cards[0]);

        for (index, &action) in self.cards.iter().enumerate().skip(1) {
            let card = card_for_action(action);
            let beats = if card.suit.is_trump() {
                !best.suit.is_trump() || card.rank > best.rank
            } else {
                !best.suit.is_trump() && card.suit == lead_suit && card.rank > best.rank
            };
            if beats {
                best_index = index;
                best = card;
            }
        }

        (
            self.player_at(best_index, num_players),
            self.cards[best_index],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::action_from_short_name;

    fn trick_of(leader: u8, names: &[&str]) -> Trick {
        let mut trick = Trick::new(PlayerId::new(leader));
        for name in names {
            trick.push(action_from_short_name(name).unwrap());
        }
        trick
    }

    #[test]
    fn test_lead_suit_highest_rank_wins() {
        let trick = trick_of(0, &["H5", "H10", "H2", "C14"]);
        let (winner, card) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(1));
        assert_eq!(card, action_from_short_name("H10").unwrap());
    }

    #[test]
    fn test_trump_beats_lead_suit() {
        let trick = trick_of(2, &["H14", "T2", "H13", "H12"]);
        let (winner, card) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(3));
        assert_eq!(card, action_from_short_name("T2").unwrap());
    }

    #[test]
    fn test_higher_trump_beats_lower() {
        let trick = trick_of(0, &["T5", "T14", "T9", "T21"]);
        let (winner, card) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(3));
        assert_eq!(card, action_from_short_name("T21").unwrap());
    }

    #[test]
    fn test_off_suit_never_wins() {
        let trick = trick_of(1, &["S2", "C14", "D14", "H14"]);
        let (winner, card) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(1));
        assert_eq!(card, action_from_short_name("S2").unwrap());
    }

    #[test]
    fn test_excuse_never_beats_another_trump() {
        let trick = trick_of(0, &["T3", "T0", "H14", "S14"]);
        let (winner, card) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(0));
        assert_eq!(card, action_from_short_name("T3").unwrap());
    }

    #[test]
    fn test_excuse_beats_plain_suits_when_led() {
        // Trump rank 0 is still a trump under the resolution rules.
        let trick = trick_of(0, &["T0", "H5", "H9", "H14"]);
        let (winner, _) = trick.winner(4);

        assert_eq!(winner, PlayerId::new(0));
    }

    #[test]
    fn test_player_at_wraps_table() {
        let trick = trick_of(3, &["H1", "H2"]);

        assert_eq!(trick.player_at(0, 4), PlayerId::new(3));
        assert_eq!(trick.player_at(1, 4), PlayerId::new(0));
        assert_eq!(trick.player_at(3, 4), PlayerId::new(2));
    }

    #[test]
    fn test_completion() {
        let mut trick = Trick::new(PlayerId::new(0));
        assert!(trick.is_empty());
        assert!(!trick.is_complete(4));

        for name in ["H1", "H2", "H3", "H4"] {
            trick.push(action_from_short_name(name).unwrap());
        }
        assert!(trick.is_complete(4));
        assert_eq!(trick.lead(), action_from_short_name("H1").unwrap());
    }

    #[test]
    #[should_panic(expected = "cannot resolve an empty trick")]
    fn test_empty_trick_resolution_panics() {
        Trick::new(PlayerId::new(0)).winner(4);
    }

    #[test]
    #[should_panic(expected = "lead card of an empty trick")]
    fn test_empty_trick_lead_panics() {
        Trick::new(PlayerId::new(0)).lead();
    }
}
