//! The fixed 78-card French Tarot deck.
//!
//! Cards map bijectively onto action ids in `[0, 78)` via suit-then-rank
//! order: Hearts `0..14`, Diamonds `14..28`, Spades `28..42`, Clubs
//! `42..56`, Trumps `56..78` (id = 56 + trump rank, the Excuse being
//! trump rank 0). Point values are held in integer half-points so all
//! scoring arithmetic is exact: the deck totals 91 points (182
//! half-points).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::core::ActionId;

/// Total cards in the deck.
pub const DECK_SIZE: usize = 78;

/// Ordinary (non-trump) suits.
pub const NUM_SUITS: usize = 4;

/// Ranks per ordinary suit (1 through king).
pub const NUM_RANKS: usize = 14;

/// Trump cards, ranks 0 (the Excuse) through 21.
pub const NUM_TRUMPS: usize = 22;

/// King rank in the ordinary suits.
pub const KING_RANK: u8 = 14;

/// Card points in the whole deck, in half-points.
pub const TOTAL_POINTS_X2: i64 = 182;

/// Action id of trump 1, Le Petit.
pub const PETIT_ACTION: ActionId = ActionId::new(57);

/// Card suit. `Trumps` covers ranks 0–21 including the Excuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
    Trumps,
}

impl Suit {
    /// The four ordinary suits in action-id order.
    pub const PLAIN: [Suit; NUM_SUITS] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    /// Whether this is the trump suit.
    #[must_use]
    pub fn is_trump(self) -> bool {
        self == Suit::Trumps
    }

    fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
            Suit::Trumps => 'T',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Trumps => "Trumps",
        };
        write!(f, "{name}")
    }
}

/// A single card: suit plus rank.
///
/// Rank runs 1–14 in the ordinary suits and 0–21 in trumps. Everything
/// else about a card (points, bout status, names) derives from those
/// two fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    /// Point value in half-points (plain 1, jack 3, knight 5, queen 7,
    /// king 9; bouts 9, other trumps 1).
    #[must_use]
    pub fn points_x2(self) -> i64 {
        if self.is_bout() {
            return 9;
        }
        match self.suit {
            Suit::Trumps => 1,
            _ => match self.rank {
                11 => 3,
                12 => 5,
                13 => 7,
                KING_RANK => 9,
                _ => 1,
            },
        }
    }

    /// One of the three point-threshold cards: trump 1 (Le Petit),
    /// trump 21 (Le Monde), or the Excuse.
    #[must_use]
    pub fn is_bout(self) -> bool {
        self.suit.is_trump() && (self.rank == 0 || self.rank == 1 || self.rank == 21)
    }

    /// The Excuse, the unique trump of rank 0.
    #[must_use]
    pub fn is_fool(self) -> bool {
        self.suit.is_trump() && self.rank == 0
    }

    /// Compact name such as `H14` or `T0`, usable with
    /// [`action_from_short_name`].
    #[must_use]
    pub fn short_name(self) -> String {
        format!("{}{}", self.suit.letter(), self.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.suit, self.rank) {
            (Suit::Trumps, 0) => write!(f, "L'Excuse"),
            (Suit::Trumps, 1) => write!(f, "Le Petit"),
            (Suit::Trumps, 21) => write!(f, "Le Monde"),
            (Suit::Trumps, rank) => write!(f, "{rank} of Trumps"),
            (suit, 11) => write!(f, "Jack of {suit}"),
            (suit, 12) => write!(f, "Knight of {suit}"),
            (suit, 13) => write!(f, "Queen of {suit}"),
            (suit, KING_RANK) => write!(f, "King of {suit}"),
            (suit, rank) => write!(f, "{rank} of {suit}"),
        }
    }
}

/// The card named by an action id.
///
/// Panics on an out-of-range id; that is a caller bug, not a game state.
#[must_use]
pub fn card_for_action(action: ActionId) -> Card {
    let id = action.index();
    assert!(id < DECK_SIZE, "card action id {id} out of range");

    if id < NUM_SUITS * NUM_RANKS {
        Card {
            suit: Suit::PLAIN[id / NUM_RANKS],
            rank: (id % NUM_RANKS + 1) as u8,
        }
    } else {
        Card {
            suit: Suit::Trumps,
            rank: (id - NUM_SUITS * NUM_RANKS) as u8,
        }
    }
}

/// The action id of a card; inverse of [`card_for_action`].
#[must_use]
pub fn action_for_card(card: Card) -> ActionId {
    let id = match card.suit {
        Suit::Trumps => {
            assert!(card.rank < NUM_TRUMPS as u8, "trump rank {} out of range", card.rank);
            NUM_SUITS * NUM_RANKS + card.rank as usize
        }
        suit => {
            assert!(
                (1..=NUM_RANKS as u8).contains(&card.rank),
                "rank {} out of range for {suit}",
                card.rank
            );
            let suit_index = Suit::PLAIN
                .iter()
                .position(|&s| s == suit)
                .expect("ordinary suit");
            suit_index * NUM_RANKS + card.rank as usize - 1
        }
    };
    ActionId::new(id as u8)
}

/// Look up a card action by its compact name (`"H14"`, `"T0"`, ...).
///
/// Diagnostics and test construction only.
#[must_use]
pub fn action_from_short_name(name: &str) -> Option<ActionId> {
    static NAMES: OnceLock<FxHashMap<String, ActionId>> = OnceLock::new();
    NAMES
        .get_or_init(|| {
            (0..DECK_SIZE)
                .map(|id| {
                    let action = ActionId::new(id as u8);
                    (card_for_action(action).short_name(), action)
                })
                .collect()
        })
        .get(name)
        .copied()
}

/// Sum of card points over a pile, in half-points.
#[must_use]
pub fn card_points_x2(actions: &[ActionId]) -> i64 {
    actions.iter().map(|&a| card_for_action(a).points_x2()).sum()
}

/// Number of bouts in a pile.
#[must_use]
pub fn bout_count(actions: &[ActionId]) -> usize {
    actions.iter().filter(|&&a| card_for_action(a).is_bout()).count()
}

/// Number of trump-suit cards in a pile (the Excuse included).
#[must_use]
pub fn trump_count(actions: &[ActionId]) -> usize {
    actions
        .iter()
        .filter(|&&a| card_for_action(a).suit.is_trump())
        .count()
}
