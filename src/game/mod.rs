//! The rules of the game: bidding, exchange, trick play, scoring.

pub mod bid;
pub mod phase;
pub mod score;
pub mod state;
pub mod trick;

pub use bid::{Bid, NUM_BIDS};
pub use phase::{BiddingState, DiscardState, FinishedState, Phase, TrickPlayState, Turn};
pub use score::{
    distribute, score_hand, Handful, HandOutcome, ScoreSheet, PETIT_AU_BOUT_BONUS,
    POINTS_NEEDED_BY_BOUTS, SLAM_DECLARED_BONUS, SLAM_MISSED_PENALTY, SLAM_UNDECLARED_BONUS,
};
pub use state::{Contract, TarotGameBuilder, TarotState, DEAL_ACTION};
pub use trick::Trick;
