//! Random playouts checking the invariants every reachable state must hold.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use yard_core::belief::{BeliefEngine, BeliefError};
use yard_core::game::{GameConfig, GameState, StartPosition};
use yard_core::graph::TransportGraph;
use yard_core::model::mode::TravelMode;
use yard_core::model::participant::Role;
use yard_core::model::reveal::RevealSchedule;
use yard_core::model::ticket::TicketBook;

const CITY: &str = "\
12
TAXI; 1 : : 2
TAXI; 2 : : 3
TAXI; 3 : : 4
TAXI; 4 : : 5
TAXI; 5 : : 6
TAXI; 6 : : 1
TAXI; 7 : : 8
TAXI; 8 : : 9
TAXI; 9 : : 10
TAXI; 10 : : 11
TAXI; 11 : : 12
TAXI; 12 : : 7
BUS; 1 : : 7
BUS; 3 : 2 8 : 9
BUS; 5 : : 11
UNDERGROUND; 1 : : 9
UNDERGROUND; 9 : : 5
FERRY; 6 : : 12
FERRY; 4 : : 10
";

fn config() -> GameConfig {
    GameConfig {
        evader_tickets: TicketBook::new()
            .with(TravelMode::Taxi, 4)
            .with(TravelMode::Bus, 3)
            .with(TravelMode::Underground, 2)
            .with(TravelMode::Black, 3),
        seeker_tickets: TicketBook::new()
            .with(TravelMode::Taxi, 6)
            .with(TravelMode::Bus, 3)
            .with(TravelMode::Underground, 1),
        evader_start: StartPosition::Random,
        seeker_starts: vec![StartPosition::Random; 3],
        reveal_moves: RevealSchedule::new([3, 7]),
        max_moves: 10,
    }
}

#[test]
fn random_playouts_preserve_invariants() {
    let graph = Arc::new(TransportGraph::parse(CITY).expect("city parses"));
    let config = config();

    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(Arc::clone(&graph), &config, &mut rng).expect("setup");
        let mut belief = BeliefEngine::for_game(&state);
        let mut index = 0usize;

        for _ in 0..200 {
            let role = Role::of_index(index);
            if state.evaluate_end_state(role).is_terminal() {
                break;
            }

            let legal = state.legal_moves(index);
            let seekers = state.seeker_positions();
            for mv in &legal {
                assert!(!seekers.contains(&mv.to), "seed {seed}: {mv} lands on a seeker");
            }

            if let Some(mv) = legal.choose(&mut rng).copied() {
                let before = state.participant(index).unwrap().tickets().count(mv.mode);
                let next = state.apply_move(index, mv).expect("legal move applies");
                let mover = next.participant(index).unwrap();
                assert_eq!(mover.position(), mv.to);
                assert_eq!(mover.tickets().count(mv.mode), before - 1);
                for other in (0..state.participant_count()).filter(|i| *i != index) {
                    assert_eq!(next.participant(other), state.participant(other));
                }
                state = next;

                if index == 0 {
                    match belief.observe(&state) {
                        Ok(consumed) => assert_eq!(consumed, 1),
                        Err(err) => panic!("seed {seed}: {err}"),
                    }
                    let dist = belief.distribution();
                    assert!((dist.total() - 1.0).abs() < 1e-9, "seed {seed}");
                    assert!(
                        dist.probability(state.evader().position()) > 0.0,
                        "seed {seed}: true node lost from belief"
                    );
                    if state.reveals().contains(state.evader_moves()) {
                        assert_eq!(dist.total(), 1.0);
                        assert_eq!(dist.len(), 1);
                    }
                }
            }

            index = (index + 1) % state.participant_count();
        }

        assert!(state.evader_moves() <= config.max_moves, "seed {seed}");
    }
}

#[test]
fn inconsistent_evidence_is_reported_not_fatal() {
    let graph = Arc::new(TransportGraph::parse(CITY).unwrap());
    let mut belief = BeliefEngine::new(
        Arc::clone(&graph),
        RevealSchedule::default(),
        graph.nodes_with_mode(yard_core::model::mode::EdgeKind::Underground),
    );
    belief.update(TravelMode::Underground, None, &[]).unwrap();
    let err = belief
        .update(TravelMode::Taxi, None, &graph.stations().keys().copied().collect::<Vec<_>>())
        .unwrap_err();
    assert_eq!(err, BeliefError::InconsistentEvidence { move_number: 2 });
    belief.reset_uniform();
    assert_eq!(belief.distribution().len(), 12);
}
