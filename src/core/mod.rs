//! Engine plumbing: seats, actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;

pub use action::{ActionId, ActionRecord};
pub use config::{GameConfig, DOG_SIZE, NUM_PLAYERS};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
