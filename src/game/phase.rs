//! Game phases.
//!
//! The phase is a closed sum type: each variant carries only the data
//! that is valid while that phase is active, so a handler can never
//! touch another phase's bookkeeping. A single dispatch in the state
//! routes action application to the matching handler.

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, PlayerId, PlayerMap};

use super::bid::Bid;
use super::score::ScoreSheet;
use super::trick::Trick;

/// Whose move it is, in the host's terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// A seat must act.
    Player(PlayerId),
    /// The deal is pending; the single chance outcome must be applied.
    Chance,
    /// The game is over.
    Terminal,
}

/// Auction bookkeeping.
///
/// The auction runs around the table starting at the seat after the
/// dealer, skipping seats that have passed. Every bid must strictly
/// exceed the highest bid placed so far this round; a withdrawn bid
/// (its owner passed later) still counts toward that maximum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddingState {
    /// Seat to act.
    pub to_act: PlayerId,

    /// Each seat's last recorded action; `None` until it first acts.
    pub last_action: PlayerMap<Option<Bid>>,

    /// Highest bid placed so far, withdrawn bids included.
    pub highest: Bid,
}

impl BiddingState {
    /// Open the auction at the seat after the dealer.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        Self {
            to_act: PlayerId::new(0).next(num_players),
            last_action: PlayerMap::with_default(num_players),
            highest: Bid::Pass,
        }
    }

    /// Whether every seat's last recorded action is Pass.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.last_action.iter().all(|(_, a)| *a == Some(Bid::Pass))
    }

    /// The taker and bid, once exactly one seat's last action is a bid
    /// and every other seat has passed.
    #[must_use]
    pub fn sole_standing_bid(&self) -> Option<(PlayerId, Bid)> {
        let mut standing = None;
        for (player, action) in self.last_action.iter() {
            match action {
                None => return None,
                Some(Bid::Pass) => {}
                Some(bid) => {
                    if standing.is_some() {
                        return None;
                    }
                    standing = Some((player, *bid));
                }
            }
        }
        standing
    }

    /// Move `to_act` to the next seat that has not passed.
    ///
    /// Callers check the terminal auction conditions first, so such a
    /// seat exists.
    pub fn advance_past_passed(&mut self) {
        let num_players = self.last_action.player_count();
        for _ in 0..num_players {
            self.to_act = self.to_act.next(num_players);
            if self.last_action[self.to_act] != Some(Bid::Pass) {
                return;
            }
        }
        panic!("no seat left to act in the auction");
    }
}

/// Exchange bookkeeping: cards the taker has discarded this phase.
///
/// Discarded cards have already left the taker's hand, so a duplicate
/// discard cannot arise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardState {
    pub discarded: Vec<ActionId>,
}

/// Trick-play bookkeeping: the trick currently on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlayState {
    pub trick: Trick,
}

/// Terminal bookkeeping: the settled returns, and the score breakdown
/// when a contract was played (`None` for a void all-pass hand).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedState {
    pub returns_x2: Vec<i64>,
    pub score: Option<ScoreSheet>,
}

/// The game phase, with per-phase data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Dealing,
    Bidding(BiddingState),
    Discard(DiscardState),
    TrickPlay(TrickPlayState),
    Finished(FinishedState),
}

impl Phase {
    /// Phase name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Dealing => "Dealing",
            Phase::Bidding(_) => "Bidding",
            Phase::Discard(_) => "Discard",
            Phase::TrickPlay(_) => "TrickPlay",
            Phase::Finished(_) => "Finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
