//! Scoring of a finished hand.
//!
//! All arithmetic is in integer half-points. The taker's pile is scored
//! against a threshold fixed solely by how many bouts it holds, the
//! difference is scaled by the bid multiplier, the three bonuses are
//! added, and the sign of the whole is the sign of the contract
//! outcome. The result is distributed zero-sum: the taker moves
//! `(n - 1)` shares, each defender one share the other way.

use serde::{Deserialize, Serialize};

use crate::cards::{bout_count, card_points_x2};
use crate::core::{ActionId, PlayerId};

use super::bid::Bid;

/// Points needed to make the contract, indexed by bouts in the taker's
/// pile (0–3), in whole points.
pub const POINTS_NEEDED_BY_BOUTS: [i64; 4] = [56, 51, 41, 36];

/// Slam bonus when declared and achieved.
pub const SLAM_DECLARED_BONUS: i64 = 400;

/// Slam bonus when achieved without declaring.
pub const SLAM_UNDECLARED_BONUS: i64 = 200;

/// Slam penalty when declared and missed.
pub const SLAM_MISSED_PENALTY: i64 = -200;

/// Bonus for taking the final trick with Le Petit.
pub const PETIT_AU_BOUT_BONUS: i64 = 10;

/// A declared handful (poignée) threshold.
///
/// The bonus pays only when the taker's trump count at the start of
/// play equals the declared threshold exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handful {
    Single,
    Double,
    Triple,
}

impl Handful {
    /// Trump count the declaration names.
    #[must_use]
    pub fn threshold(self) -> usize {
        match self {
            Handful::Single => 10,
            Handful::Double => 13,
            Handful::Triple => 15,
        }
    }

    /// Bonus in whole points.
    #[must_use]
    pub fn bonus(self) -> i64 {
        match self {
            Handful::Single => 20,
            Handful::Double => 30,
            Handful::Triple => 40,
        }
    }
}

/// Everything the scoring formula consumes about a finished hand.
#[derive(Clone, Copy, Debug)]
pub struct HandOutcome<'a> {
    /// The taker's won pile: trick wins plus any exchange discards.
    pub taker_pile: &'a [ActionId],
    /// Cards still in the dog (empty after an exchange contract).
    pub dog: &'a [ActionId],
    /// The winning bid.
    pub bid: Bid,
    /// Whether the taker declared a slam.
    pub slam_declared: bool,
    /// The declared handful, if any.
    pub handful_declared: Option<Handful>,
    /// Trumps in the taker's hand when trick play started.
    pub taker_trumps_at_start: usize,
    /// Whether the taker won the final trick and it contained Le Petit.
    pub taker_took_petit_au_bout: bool,
    /// Whether the taker won every trick.
    pub taker_won_every_trick: bool,
}

/// Full score breakdown for a finished hand, in half-points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub raw_points_x2: i64,
    pub bouts: usize,
    pub points_needed_x2: i64,
    pub multiplier: i64,
    pub contract_made: bool,
    pub base_x2: i64,
    pub slam_bonus_x2: i64,
    pub handful_bonus_x2: i64,
    pub petit_au_bout_x2: i64,
    /// Signed per-defender score: sign of the contract outcome applied
    /// to base plus bonuses.
    pub signed_total_x2: i64,
}

impl std::fmt::Display for ScoreSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} points with {} bout(s), {} needed: contract {} for {}",
            self.raw_points_x2 as f64 / 2.0,
            self.bouts,
            self.points_needed_x2 / 2,
            if self.contract_made { "made" } else { "lost" },
            self.signed_total_x2 as f64 / 2.0,
        )
    }
}

/// Score a finished hand.
///
/// Dog attachment follows the contract: after an exchange the dog is
/// already empty (the discards sit in the taker's pile); Garde Sans
/// credits the untouched dog to the taker; Garde Contre leaves it to
/// the defenders.
#[must_use]
pub fn score_hand(outcome: &HandOutcome<'_>) -> ScoreSheet {
    let mut raw_points_x2 = card_points_x2(outcome.taker_pile);
    let mut bouts = bout_count(outcome.taker_pile);
    if outcome.bid == Bid::GardeSans {
        raw_points_x2 += card_points_x2(outcome.dog);
        bouts += bout_count(outcome.dog);
    }

    let points_needed_x2 = POINTS_NEEDED_BY_BOUTS[bouts] * 2;
    let contract_made = raw_points_x2 >= points_needed_x2;

    let multiplier = outcome.bid.multiplier();
    let base_x2 = (raw_points_x2 - points_needed_x2).abs() * multiplier;

    let slam_bonus_x2 = 2 * if outcome.taker_won_every_trick {
        if outcome.slam_declared {
            SLAM_DECLARED_BONUS
        } else {
            SLAM_UNDECLARED_BONUS
        }
    } else if outcome.slam_declared {
        SLAM_MISSED_PENALTY
    } else {
        0
    };

    let handful_bonus_x2 = 2 * outcome
        .handful_declared
        .filter(|handful| outcome.taker_trumps_at_start == handful.threshold())
        .map_or(0, Handful::bonus);

    let petit_au_bout_x2 = if outcome.taker_took_petit_au_bout {
        2 * PETIT_AU_BOUT_BONUS
    } else {
        0
    };

    let sign = if contract_made { 1 } else { -1 };
    let signed_total_x2 = sign * (base_x2 + handful_bonus_x2 + slam_bonus_x2 + petit_au_bout_x2);

    ScoreSheet {
        raw_points_x2,
        bouts,
        points_needed_x2,
        multiplier,
        contract_made,
        base_x2,
        slam_bonus_x2,
        handful_bonus_x2,
        petit_au_bout_x2,
        signed_total_x2,
    }
}

/// Distribute a signed score zero-sum across the table, in half-points.
#[must_use]
pub fn distribute(sheet: &ScoreSheet, taker: PlayerId, num_players: usize) -> Vec<i64> {
    PlayerId::all(num_players)
        .map(|player| {
            if player == taker {
                sheet.signed_total_x2 * (num_players as i64 - 1)
            } else {
                -sheet.signed_total_x2
            }
        })
        .collect()
}
