//! Card model, deck enumeration, and the seeded deal.

pub mod deal;
pub mod deck;

pub use deal::{deal, deal_until_valid, hand_has_trump, DealtCards};
pub use deck::{
    action_for_card, action_from_short_name, bout_count, card_for_action, card_points_x2,
    trump_count, Card, Suit, DECK_SIZE, KING_RANK, NUM_RANKS, NUM_SUITS, NUM_TRUMPS, PETIT_ACTION,
    TOTAL_POINTS_X2,
};
