//! Property tests: the deal, trick resolution, and whole playthroughs.

use proptest::prelude::*;

use tarot_engine::{
    card_for_action, deal, deal_until_valid, trump_count, ActionId, Bid, GameConfig, GameRng,
    Phase, PlayerId, TarotState, Trick, Turn, DEAL_ACTION, DECK_SIZE,
};

/// Deterministic pseudo-random policy: pick an index from the seed and
/// step without touching the state's RNG.
fn pick(seed: u64, step: u64, len: usize) -> usize {
    let mixed = seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(step.wrapping_mul(0xD134_2543_DE82_EF95));
    (mixed % len as u64) as usize
}

proptest! {
    #[test]
    fn deal_partitions_the_deck(seed in any::<u64>()) {
        let config = GameConfig::default();
        let dealt = deal(&config, seed);

        prop_assert_eq!(dealt.dog.len(), config.dog_size);
        prop_assert_eq!(dealt.hands.len(), config.num_players);

        let mut all: Vec<ActionId> = dealt.dog.clone();
        for hand in &dealt.hands {
            prop_assert_eq!(hand.len(), config.cards_per_player());
            all.extend(hand);
        }
        all.sort();
        let full: Vec<ActionId> = (0..DECK_SIZE).map(|id| ActionId::new(id as u8)).collect();
        prop_assert_eq!(all, full);
    }

    #[test]
    fn accepted_deals_have_no_trumpless_hand(seed in any::<u64>()) {
        let config = GameConfig::default();
        let mut rng = GameRng::new(seed);
        let (used_seed, dealt) = deal_until_valid(&config, &mut rng);

        for hand in &dealt.hands {
            prop_assert!(trump_count(hand) > 0);
        }
        // The accepted deal replays from its recorded seed.
        prop_assert_eq!(deal(&config, used_seed), dealt);
    }

    #[test]
    fn playthroughs_terminate_zero_sum(seed in any::<u64>()) {
        let mut state = TarotState::builder().seed(seed).build();
        state.apply_action(DEAL_ACTION);

        let mut step = 0u64;
        while !state.is_terminal() {
            prop_assert!(step < 200, "game did not terminate");
            let legal = state.legal_actions();
            prop_assert!(!legal.is_empty());

            // In the auction, Pass is always legal and every other
            // offer strictly exceeds the running maximum.
            let highest = match state.phase() {
                Phase::Bidding(bidding) => Some(bidding.highest),
                _ => None,
            };
            if let Some(highest) = highest {
                prop_assert_eq!(legal[0], Bid::Pass.action());
                for &action in &legal[1..] {
                    prop_assert!(Bid::from_action(action) > highest);
                }
            }

            let action = legal[pick(seed, step, legal.len())];
            state.apply_action(action);
            step += 1;
        }

        prop_assert_eq!(state.current_player(), Turn::Terminal);
        let returns = state.returns();
        prop_assert_eq!(returns.len(), 4);
        prop_assert_eq!(returns.iter().sum::<f64>(), 0.0);

        // A void hand settles at zero for everyone; a played contract
        // weights the taker by three defender shares.
        if let Some(contract) = state.contract() {
            let taker = contract.taker;
            for player in PlayerId::all(4) {
                if player != taker {
                    prop_assert_eq!(
                        returns[taker.index()],
                        -3.0 * returns[player.index()]
                    );
                }
            }
        } else {
            prop_assert_eq!(returns, vec![0.0; 4]);
        }
    }

    #[test]
    fn snapshots_restore_equivalent_states(seed in any::<u64>(), prefix in 0usize..40) {
        let mut state = TarotState::builder().seed(seed).build();
        state.apply_action(DEAL_ACTION);

        let mut step = 0u64;
        while !state.is_terminal() && (step as usize) < prefix {
            let legal = state.legal_actions();
            let action = legal[pick(seed, step, legal.len())];
            state.apply_action(action);
            step += 1;
        }

        let mut restored = TarotState::deserialize(&state.serialize());
        prop_assert_eq!(&state, &restored);
        prop_assert_eq!(state.legal_actions(), restored.legal_actions());
        prop_assert_eq!(state.current_player(), restored.current_player());

        // Both copies finish the game identically under the same policy.
        while !state.is_terminal() {
            let legal = state.legal_actions();
            let action = legal[pick(seed, step, legal.len())];
            state.apply_action(action);
            restored.apply_action(action);
            step += 1;
        }
        prop_assert!(restored.is_terminal());
        prop_assert_eq!(state.returns(), restored.returns());
    }

    #[test]
    fn trick_winner_properties(
        cards in proptest::sample::subsequence((0..DECK_SIZE as u8).collect::<Vec<_>>(), 4),
        rotation in 0usize..4,
    ) {
        let mut trick = Trick::new(PlayerId::new(0));
        for index in 0..4 {
            trick.push(ActionId::new(cards[(index + rotation) % 4]));
        }

        let (_, winning) = trick.winner(4);
        let winner = card_for_action(winning);
        let lead = card_for_action(trick.cards()[0]);
        let played: Vec<_> = trick.cards().iter().map(|&a| card_for_action(a)).collect();

        let any_trump = played.iter().any(|c| c.suit.is_trump());
        if any_trump {
            // A trump never loses to a non-trump; among trumps the
            // highest rank wins.
            prop_assert!(winner.suit.is_trump());
            let best_trump_rank = played
                .iter()
                .filter(|c| c.suit.is_trump())
                .map(|c| c.rank)
                .max()
                .unwrap();
            prop_assert_eq!(winner.rank, best_trump_rank);
        } else {
            // No trumps: the highest lead-suit card wins, and an
            // off-suit card never does.
            prop_assert_eq!(winner.suit, lead.suit);
            let best_lead_rank = played
                .iter()
                .filter(|c| c.suit == lead.suit)
                .map(|c| c.rank)
                .max()
                .unwrap();
            prop_assert_eq!(winner.rank, best_lead_rank);
        }
    }
}
