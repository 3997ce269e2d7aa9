//! Seeded shuffle and deal.
//!
//! A deal is a Fisher–Yates shuffle of the 78 action ids followed by a
//! block partition: the first `dog_size` cards form the dog, the rest
//! splits into equal contiguous hands. Hands and dog are sorted
//! ascending afterwards so legal-action sets come out ordered.
//!
//! A deal that leaves any hand without a single trump would make a
//! degenerate game; [`deal_until_valid`] rejects such deals and redraws
//! with a fresh seed from the state-owned RNG stream until every hand
//! holds a trump. The loop is a rule of the game, not error recovery.

use serde::{Deserialize, Serialize};

use super::deck::{trump_count, DECK_SIZE};
use crate::core::{ActionId, GameConfig, GameRng};

/// Result of one deal: the dog plus one hand per seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCards {
    pub dog: Vec<ActionId>,
    pub hands: Vec<Vec<ActionId>>,
}

/// Deal once from the given seed. Deterministic: identical seed,
/// identical deal.
#[must_use]
pub fn deal(config: &GameConfig, seed: u64) -> DealtCards {
    let mut cards: Vec<ActionId> = (0..DECK_SIZE).map(|id| ActionId::new(id as u8)).collect();
    fisher_yates(&mut cards, &mut GameRng::new(seed));

    let mut dog: Vec<ActionId> = cards[..config.dog_size].to_vec();
    dog.sort();

    let per_player = config.cards_per_player();
    let hands: Vec<Vec<ActionId>> = cards[config.dog_size..]
        .chunks(per_player)
        .map(|chunk| {
            let mut hand = chunk.to_vec();
            hand.sort();
            hand
        })
        .collect();

    DealtCards { dog, hands }
}

/// Whether a hand holds at least one trump (the Excuse counts).
#[must_use]
pub fn hand_has_trump(hand: &[ActionId]) -> bool {
    trump_count(hand) > 0
}

/// Deal, redrawing seeds from `rng` until no hand is trumpless.
///
/// Returns the seed that produced the accepted deal alongside the deal
/// itself, so the state can record it.
pub fn deal_until_valid(config: &GameConfig, rng: &mut GameRng) -> (u64, DealtCards) {
    loop {
        let seed = rng.next_seed();
        let dealt = deal(config, seed);
        if dealt.hands.iter().all(|hand| hand_has_trump(hand)) {
            return (seed, dealt);
        }
    }
}

/// In-place Fisher–Yates: at each step `i` from high to low, swap with a
/// uniform index in the inclusive range `[0, i]`.
fn fisher_yates(cards: &mut [ActionId], rng: &mut GameRng) {
    for i in (1..cards.len()).rev() {
        let j = rng.index_below(i + 1);
        cards.swap(i, j);
    }
}
