use crate::battle::engine::{BattleRules, TurnSequencer};
use crate::battle::rng::ScriptedRng;
use crate::battle::state::{BattleEvent, SequencerState, Side};
use crate::battle::tests::common::{pikachu, session, squirtle, test_chart, TestCombatantBuilder};
use crate::errors::ActionError;
use crate::moves::Move;
use pretty_assertions::assert_eq;

fn ready_sequencer(player_builder: TestCombatantBuilder) -> TurnSequencer {
    let mut sequencer = TurnSequencer::new(
        session(player_builder.build(), squirtle().build()),
        test_chart(),
        BattleRules::default(),
    );
    let mut offer_rng = ScriptedRng::new_for_test(vec![0.0]);
    sequencer.offer_moves(&mut offer_rng).unwrap();
    sequencer
}

#[test]
fn test_full_turn_player_then_opponent() {
    let mut sequencer = ready_sequencer(pikachu());
    // Player base 17 (x2 vs Water), opponent picks its only move, base 10 (neutral).
    let mut rng = ScriptedRng::new_for_test(vec![0.375, 0.0, 0.0]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(
        report.transitions,
        vec![
            SequencerState::PlayerAttacking,
            SequencerState::OpponentAttacking,
            SequencerState::AwaitingPlayerAction,
        ]
    );
    assert_eq!(report.state, SequencerState::AwaitingPlayerAction);
    assert_eq!(sequencer.session().opponent().current_hp(), 66);
    assert_eq!(sequencer.session().player().current_hp(), 90);
    assert_eq!(sequencer.session().turn_number, 2);
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn test_super_effective_hit_from_full_health() {
    let mut sequencer = ready_sequencer(pikachu());
    let mut rng = ScriptedRng::new_for_test(vec![0.375, 0.0, 0.0]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    let opponent_max = sequencer.session().opponent().max_hp();
    let damage = report
        .events
        .events()
        .iter()
        .find_map(|event| match event {
            BattleEvent::DamageDealt { target, damage, .. } if target == "Squirtle" => Some(*damage),
            _ => None,
        })
        .expect("player attack should deal damage");
    assert_eq!(damage, 34);
    assert_eq!(sequencer.session().opponent().current_hp(), opponent_max - 34);
    assert!(report
        .events
        .formatted()
        .contains(&"It's super effective!".to_string()));
}

#[test]
fn test_player_always_moves_first() {
    let mut sequencer = ready_sequencer(pikachu());
    let mut rng = ScriptedRng::new_for_test(vec![0.5, 0.0, 0.5]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    let move_sides: Vec<Side> = report
        .events
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { side, .. } => Some(*side),
            _ => None,
        })
        .collect();
    assert_eq!(move_sides, vec![Side::Player, Side::Opponent]);
    assert_eq!(
        report.events.formatted(),
        vec![
            "Pikachu used Thunder Shock!".to_string(),
            "It's super effective!".to_string(),
            "Squirtle took 40 damage!".to_string(),
            "Squirtle used Tackle!".to_string(),
            "Pikachu took 20 damage!".to_string(),
        ]
    );
}

#[test]
fn test_invalid_move_index_changes_nothing() {
    let mut sequencer = ready_sequencer(pikachu());
    let mut rng = ScriptedRng::new_for_test(vec![]);

    let result = sequencer.select_move(4, &mut rng);

    assert_eq!(result.unwrap_err(), ActionError::InvalidMoveIndex(4));
    assert_eq!(sequencer.state(), SequencerState::AwaitingPlayerAction);
    assert_eq!(sequencer.session().opponent().current_hp(), 100);
    assert_eq!(sequencer.session().turn_number, 1);
}

#[test]
fn test_opponent_without_moves_uses_struggle() {
    let mut sequencer = TurnSequencer::new(
        session(
            pikachu().build(),
            squirtle().with_moves(vec![]).build(),
        ),
        test_chart(),
        BattleRules::default(),
    );
    sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.0]))
        .unwrap();
    // No move-choice draw for struggle: player base, then opponent base.
    let mut rng = ScriptedRng::new_for_test(vec![0.0, 0.5]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    assert!(report.events.events().contains(&BattleEvent::MoveUsed {
        side: Side::Opponent,
        pokemon: "Squirtle".to_string(),
        move_name: Move::struggle().name,
    }));
    assert_eq!(sequencer.session().player().current_hp(), 80);
    assert_eq!(report.state, SequencerState::AwaitingPlayerAction);
}

#[test]
fn test_player_without_moves_is_offered_struggle() {
    let mut sequencer = TurnSequencer::new(
        session(pikachu().with_moves(vec![]).build(), squirtle().build()),
        test_chart(),
        BattleRules::default(),
    );
    let offered = sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![]))
        .unwrap();
    assert_eq!(offered, &[Move::struggle()]);
}

#[test]
fn test_offer_is_resampled_each_time() {
    let moves: Vec<Move> = ["a", "b", "c", "d", "e"].iter().map(|n| Move::new(*n, None)).collect();
    let mut sequencer = TurnSequencer::new(
        session(pikachu().with_moves(moves).build(), squirtle().build()),
        test_chart(),
        BattleRules::default(),
    );

    let first = sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.0, 0.0, 0.0, 0.0]))
        .unwrap()
        .to_vec();
    let second = sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.99, 0.0, 0.0, 0.0]))
        .unwrap()
        .to_vec();

    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 4);
    assert_eq!(first[0].name, "a");
    assert_eq!(second[0].name, "e");
}
