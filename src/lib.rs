//! # tarot-engine
//!
//! A deterministic rules engine for four-player French Tarot, built for
//! RL/MCTS training hosts.
//!
//! ## Design Principles
//!
//! 1. **One entry point**: all mutation goes through
//!    [`TarotState::apply_action`]; every move is a small action id
//!    whose meaning is phase-dependent.
//!
//! 2. **Closed phases**: the phase is a sum type carrying only the data
//!    valid in that phase, so handlers cannot touch another phase's
//!    bookkeeping.
//!
//! 3. **Deterministic chance**: the deal is the only randomness. The
//!    RNG is owned exclusively by the state, seeded explicitly or once
//!    from entropy, and the accepted deal seed is recorded.
//!
//! 4. **Fatal contract violations**: an illegal action, an empty-trick
//!    query, or an out-of-range id is a caller bug and panics. Expected
//!    negative outcomes (an all-pass void hand, discard-eligibility
//!    fallbacks) are ordinary state transitions.
//!
//! ## Modules
//!
//! - `core`: seat ids, action ids, RNG, configuration
//! - `cards`: the fixed 78-card deck and the seeded deal
//! - `game`: bidding, exchange, trick play, scoring, and the state

pub mod cards;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ActionId, ActionRecord, GameConfig, GameRng, GameRngState, PlayerId, PlayerMap, DOG_SIZE,
    NUM_PLAYERS,
};

pub use crate::cards::{
    action_for_card, action_from_short_name, bout_count, card_for_action, card_points_x2, deal,
    deal_until_valid, trump_count, Card, DealtCards, Suit, DECK_SIZE, PETIT_ACTION,
    TOTAL_POINTS_X2,
};

pub use crate::game::{
    distribute, score_hand, Bid, Contract, Handful, HandOutcome, Phase, ScoreSheet,
    TarotGameBuilder, TarotState, Trick, Turn, DEAL_ACTION, POINTS_NEEDED_BY_BOUTS,
};
