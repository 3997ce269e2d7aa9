//! The game state and its single apply-action entry point.
//!
//! `TarotState` is the mutable aggregate: phase, hands, won piles, dog,
//! contract and bonus declarations, plus the exclusively-owned RNG that
//! seeds the deal. All mutation funnels through [`TarotState::apply_action`];
//! a single dispatch on the phase sum type routes each action to the
//! matching handler. Applying an action outside the current legal set is
//! a caller bug and panics.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{
    card_for_action, deal_until_valid, trump_count, Suit, KING_RANK, PETIT_ACTION,
};
use crate::core::{ActionId, ActionRecord, GameConfig, GameRng, PlayerId, PlayerMap};

use super::bid::Bid;
use super::phase::{BiddingState, DiscardState, FinishedState, Phase, TrickPlayState, Turn};
use super::score::{self, Handful, ScoreSheet};
use super::trick::Trick;

/// The single chance outcome available while dealing.
pub const DEAL_ACTION: ActionId = ActionId::new(0);

/// The winning bid and its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub taker: PlayerId,
    pub bid: Bid,
}

/// Builder for a fresh game.
///
/// The seed is the only configuration surface; without one, the RNG is
/// seeded once from process entropy and owned by the state thereafter.
#[derive(Clone, Debug, Default)]
pub struct TarotGameBuilder {
    seed: Option<u64>,
}

impl TarotGameBuilder {
    /// Create a builder with entropy seeding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit seed for a fully reproducible game.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the initial state, ready for the dealing chance move.
    #[must_use]
    pub fn build(self) -> TarotState {
        let config = GameConfig::default();
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        TarotState {
            config,
            rng,
            phase: Phase::Dealing,
            deal_seed: None,
            hands: PlayerMap::with_default(config.num_players),
            won: PlayerMap::with_default(config.num_players),
            dog: Vec::new(),
            contract: None,
            slam_declared: false,
            handful_declared: None,
            taker_trumps_at_start: None,
            petit_au_bout_winner: None,
            cards_played: 0,
            history: Vector::new(),
        }
    }
}

enum BidOutcome {
    AllPassed,
    Taken(Contract),
    Continue,
}

/// Complete game state.
///
/// Every card id sits in exactly one of: a hand, the dog, the current
/// trick, or a won pile. The action history uses a persistent vector so
/// cloning the state for search stays cheap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TarotState {
    config: GameConfig,
    rng: GameRng,
    phase: Phase,

    /// Seed that produced the accepted deal.
    deal_seed: Option<u64>,

    hands: PlayerMap<Vec<ActionId>>,
    won: PlayerMap<Vec<ActionId>>,
    dog: Vec<ActionId>,

    contract: Option<Contract>,
    slam_declared: bool,
    handful_declared: Option<Handful>,

    /// Trumps in the taker's hand when trick play started.
    taker_trumps_at_start: Option<usize>,

    /// Winner of the final trick, when it contained Le Petit.
    petit_au_bout_winner: Option<PlayerId>,

    /// Cards played into tricks so far; gates the bonus declarations.
    cards_played: u32,

    history: Vector<ActionRecord>,
}

impl TarotState {
    /// Start building a fresh game.
    #[must_use]
    pub fn builder() -> TarotGameBuilder {
        TarotGameBuilder::new()
    }

    // === Host interface ===

    /// Whose move it is.
    #[must_use]
    pub fn current_player(&self) -> Turn {
        match &self.phase {
            Phase::Dealing => Turn::Chance,
            Phase::Bidding(bidding) => Turn::Player(bidding.to_act),
            Phase::Discard(_) => Turn::Player(self.taker()),
            Phase::TrickPlay(play) => {
                Turn::Player(play.trick.player_at(play.trick.len(), self.config.num_players))
            }
            Phase::Finished(_) => Turn::Terminal,
        }
    }

    /// Legal action ids in ascending order; empty iff terminal.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<ActionId> {
        match &self.phase {
            Phase::Dealing => vec![DEAL_ACTION],
            Phase::Bidding(bidding) => Self::legal_bids(bidding),
            Phase::Discard(discard) => self.legal_discards(discard),
            Phase::TrickPlay(play) => self.legal_trick_cards(play),
            Phase::Finished(_) => Vec::new(),
        }
    }

    /// Apply one action.
    ///
    /// Panics if the action is not currently legal; that is a caller
    /// bug, and the engine does not attempt to continue.
    pub fn apply_action(&mut self, action: ActionId) {
        assert!(
            self.legal_actions().contains(&action),
            "action {action} is not legal in the {} phase",
            self.phase.name()
        );

        let actor = match self.current_player() {
            Turn::Player(player) => Some(player),
            Turn::Chance => None,
            Turn::Terminal => unreachable!("terminal states have no legal actions"),
        };
        self.history.push_back(ActionRecord::new(actor, action));

        match self.phase {
            Phase::Dealing => self.apply_deal(),
            Phase::Bidding(_) => self.apply_in_bidding(action),
            Phase::Discard(_) => self.apply_in_discard(action),
            Phase::TrickPlay(_) => self.apply_in_trick(action),
            Phase::Finished(_) => unreachable!("terminal states have no legal actions"),
        }
    }

    /// Whether the game has finished.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Per-seat signed scores in points; all zero until terminal.
    #[must_use]
    pub fn returns(&self) -> Vec<f64> {
        match &self.phase {
            Phase::Finished(finished) => finished
                .returns_x2
                .iter()
                .map(|&half| half as f64 / 2.0)
                .collect(),
            _ => vec![0.0; self.config.num_players],
        }
    }

    /// Snapshot the state.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        bincode::serialize(self).expect("tarot state serializes")
    }

    /// Restore a snapshot produced by [`TarotState::serialize`].
    ///
    /// Panics on bytes that did not come from `serialize`; feeding a
    /// foreign snapshot is a caller bug.
    #[must_use]
    pub fn deserialize(bytes: &[u8]) -> TarotState {
        bincode::deserialize(bytes).expect("snapshot was produced by serialize")
    }

    // === Bonus declarations ===

    /// Declare a slam for the taker.
    ///
    /// Valid from the instant the contract is decided until the first
    /// card of the first trick is played.
    pub fn declare_slam(&mut self) {
        self.assert_declaration_window("slam");
        self.slam_declared = true;
    }

    /// Declare a handful for the taker.
    ///
    /// Same window as [`TarotState::declare_slam`].
    pub fn declare_handful(&mut self, handful: Handful) {
        self.assert_declaration_window("handful");
        self.handful_declared = Some(handful);
    }

    fn assert_declaration_window(&self, what: &str) {
        assert!(
            self.contract.is_some(),
            "{what} declared before a contract was decided"
        );
        assert!(
            self.cards_played == 0,
            "{what} declared after trick play started"
        );
    }

    // === Accessors ===

    /// Table configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// A seat's hand, ascending.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[ActionId] {
        &self.hands[player]
    }

    /// A seat's won pile (trick wins; for the taker, also exchange
    /// discards).
    #[must_use]
    pub fn won_pile(&self, player: PlayerId) -> &[ActionId] {
        &self.won[player]
    }

    /// Cards currently in the dog.
    #[must_use]
    pub fn dog(&self) -> &[ActionId] {
        &self.dog
    }

    /// The trick on the table, if trick play is running.
    #[must_use]
    pub fn current_trick(&self) -> Option<&Trick> {
        match &self.phase {
            Phase::TrickPlay(play) => Some(&play.trick),
            _ => None,
        }
    }

    /// The winning bid and taker, once the auction has settled.
    #[must_use]
    pub fn contract(&self) -> Option<Contract> {
        self.contract
    }

    /// Seed that produced the accepted deal.
    #[must_use]
    pub fn deal_seed(&self) -> Option<u64> {
        self.deal_seed
    }

    /// Every applied action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Score breakdown of a finished contract hand.
    #[must_use]
    pub fn score_sheet(&self) -> Option<&ScoreSheet> {
        match &self.phase {
            Phase::Finished(finished) => finished.score.as_ref(),
            _ => None,
        }
    }

    /// Whether a slam has been declared.
    #[must_use]
    pub fn slam_declared(&self) -> bool {
        self.slam_declared
    }

    /// The declared handful, if any.
    #[must_use]
    pub fn handful_declared(&self) -> Option<Handful> {
        self.handful_declared
    }

    fn taker(&self) -> PlayerId {
        self.contract.expect("phase requires a contract").taker
    }

    // === Legality ===

    fn legal_bids(bidding: &BiddingState) -> Vec<ActionId> {
        let mut actions = vec![Bid::Pass.action()];
        actions.extend(
            Bid::ALL
                .iter()
                .filter(|&&bid| bid > bidding.highest)
                .map(|bid| bid.action()),
        );
        actions
    }

    /// Discard eligibility tiers: plain (non-trump, non-king) cards
    /// first; kings once plain cards cannot cover the remaining
    /// discards; non-bout trumps as the final tier. Bouts are never
    /// discardable.
    fn legal_discards(&self, discard: &DiscardState) -> Vec<ActionId> {
        let remaining = self.config.dog_size - discard.discarded.len();
        let hand = &self.hands[self.taker()];

        let mut eligible: Vec<ActionId> = hand
            .iter()
            .copied()
            .filter(|&a| {
                let card = card_for_action(a);
                !card.suit.is_trump() && card.rank != KING_RANK
            })
            .collect();

        if eligible.len() < remaining {
            eligible.extend(hand.iter().copied().filter(|&a| {
                let card = card_for_action(a);
                !card.suit.is_trump() && card.rank == KING_RANK
            }));
            eligible.sort();
        }

        if eligible.len() < remaining {
            eligible.extend(hand.iter().copied().filter(|&a| {
                let card = card_for_action(a);
                card.suit.is_trump() && !card.is_bout()
            }));
            eligible.sort();
        }

        eligible
    }

    fn legal_trick_cards(&self, play: &TrickPlayState) -> Vec<ActionId> {
        let seat = play.trick.player_at(play.trick.len(), self.config.num_players);
        let hand = &self.hands[seat];

        if play.trick.is_empty() {
            // The leader may open with any card.
            return hand.clone();
        }

        let (can_follow, has_trump) = self.follow_constraints(seat, &play.trick);
        let lead_suit = card_for_action(play.trick.lead()).suit;

        if can_follow {
            hand.iter()
                .copied()
                .filter(|&a| card_for_action(a).suit == lead_suit)
                .collect()
        } else if has_trump {
            hand.iter()
                .copied()
                .filter(|&a| card_for_action(a).suit.is_trump())
                .collect()
        } else {
            hand.clone()
        }
    }

    /// `(can_follow, must_trump)` for a seat facing a non-empty trick.
    ///
    /// Panics on an empty trick; there is no suit to follow yet.
    fn follow_constraints(&self, seat: PlayerId, trick: &Trick) -> (bool, bool) {
        assert!(!trick.is_empty(), "follow-suit check on an empty trick");

        let lead_suit = card_for_action(trick.lead()).suit;
        let hand = &self.hands[seat];

        let can_follow = hand.iter().any(|&a| card_for_action(a).suit == lead_suit);
        let has_trump =
            !can_follow && hand.iter().any(|&a| card_for_action(a).suit == Suit::Trumps);

        (can_follow, has_trump)
    }

    // === Phase handlers ===

    fn apply_deal(&mut self) {
        let (seed, dealt) = deal_until_valid(&self.config, &mut self.rng);

        self.deal_seed = Some(seed);
        self.hands = PlayerMap::new(self.config.num_players, |p| dealt.hands[p.index()].clone());
        self.dog = dealt.dog;
        self.phase = Phase::Bidding(BiddingState::new(self.config.num_players));
    }

    fn apply_in_bidding(&mut self, action: ActionId) {
        let bid = Bid::from_action(action);

        let outcome = {
            let Phase::Bidding(bidding) = &mut self.phase else {
                unreachable!("bidding handler outside the bidding phase");
            };

            let seat = bidding.to_act;
            bidding.last_action[seat] = Some(bid);
            if bid > bidding.highest {
                bidding.highest = bid;
            }

            if bidding.all_passed() {
                BidOutcome::AllPassed
            } else if let Some((taker, bid)) = bidding.sole_standing_bid() {
                BidOutcome::Taken(Contract { taker, bid })
            } else {
                bidding.advance_past_passed();
                BidOutcome::Continue
            }
        };

        match outcome {
            BidOutcome::AllPassed => self.finish_void(),
            BidOutcome::Taken(contract) => self.finish_bidding(contract),
            BidOutcome::Continue => {}
        }
    }

    fn finish_bidding(&mut self, contract: Contract) {
        self.contract = Some(contract);

        if contract.bid.requires_exchange() {
            let hand = &mut self.hands[contract.taker];
            hand.append(&mut self.dog);
            hand.sort();
            self.phase = Phase::Discard(DiscardState::default());
        } else {
            // The two higher bids play without seeing the dog; it stays
            // put until scoring.
            self.start_trick_play();
        }
    }

    fn apply_in_discard(&mut self, action: ActionId) {
        let taker = self.taker();
        remove_from_hand(&mut self.hands[taker], action);
        self.won[taker].push(action);

        let done = {
            let Phase::Discard(discard) = &mut self.phase else {
                unreachable!("discard handler outside the discard phase");
            };
            discard.discarded.push(action);
            discard.discarded.len() == self.config.dog_size
        };

        if done {
            self.start_trick_play();
        }
    }

    fn start_trick_play(&mut self) {
        let taker = self.taker();
        self.taker_trumps_at_start = Some(trump_count(&self.hands[taker]));
        self.phase = Phase::TrickPlay(TrickPlayState {
            trick: Trick::new(taker),
        });
    }

    fn apply_in_trick(&mut self, action: ActionId) {
        let num_players = self.config.num_players;
        let Phase::TrickPlay(play) = &mut self.phase else {
            unreachable!("trick handler outside the trick-play phase");
        };

        let seat = play.trick.player_at(play.trick.len(), num_players);
        remove_from_hand(&mut self.hands[seat], action);
        play.trick.push(action);
        self.cards_played += 1;

        if !play.trick.is_complete(num_players) {
            return;
        }

        let (winner, _) = play.trick.winner(num_players);
        let petit_played = play.trick.contains(PETIT_ACTION);
        for &card in play.trick.cards() {
            self.won[winner].push(card);
        }

        let final_trick = self.hands.iter().all(|(_, hand)| hand.is_empty());
        if final_trick {
            if petit_played {
                self.petit_au_bout_winner = Some(winner);
            }
            self.finish_scoring();
        } else {
            play.trick = Trick::new(winner);
        }
    }

    fn finish_void(&mut self) {
        self.phase = Phase::Finished(FinishedState {
            returns_x2: vec![0; self.config.num_players],
            score: None,
        });
    }

    fn finish_scoring(&mut self) {
        let contract = self.contract.expect("scoring requires a contract");
        let taker = contract.taker;

        let taker_won_every_trick = self
            .won
            .iter()
            .all(|(player, pile)| player == taker || pile.is_empty());

        let sheet = score::score_hand(&score::HandOutcome {
            taker_pile: &self.won[taker],
            dog: &self.dog,
            bid: contract.bid,
            slam_declared: self.slam_declared,
            handful_declared: self.handful_declared,
            taker_trumps_at_start: self.taker_trumps_at_start.unwrap_or(0),
            taker_took_petit_au_bout: self.petit_au_bout_winner == Some(taker),
            taker_won_every_trick,
        });

        let returns_x2 = score::distribute(&sheet, taker, self.config.num_players);
        self.phase = Phase::Finished(FinishedState {
            returns_x2,
            score: Some(sheet),
        });
    }
}

impl std::fmt::Display for TarotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "phase: {}", self.phase)?;

        if let Some(contract) = self.contract {
            writeln!(f, "contract: {} by {}", contract.bid, contract.taker)?;
        }

        for (player, hand) in self.hands.iter() {
            writeln!(f, "{player} hand: {}", join_cards(hand))?;
        }
        writeln!(f, "dog: {}", join_cards(&self.dog))?;

        match &self.phase {
            Phase::TrickPlay(play) => {
                writeln!(
                    f,
                    "trick (led by {}): {}",
                    play.trick.leader(),
                    join_cards(play.trick.cards())
                )?;
            }
            Phase::Finished(finished) => {
                if let Some(sheet) = &finished.score {
                    writeln!(f, "score: {sheet}")?;
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn join_cards(actions: &[ActionId]) -> String {
    actions
        .iter()
        .map(|&a| card_for_action(a).short_name())
        .collect::<Vec<_>>()
        .join(" ")
}

fn remove_from_hand(hand: &mut Vec<ActionId>, action: ActionId) {
    let position = hand
        .iter()
        .position(|&a| a == action)
        .expect("played card comes from the acting hand");
    hand.remove(position);
}
