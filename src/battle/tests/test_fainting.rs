use crate::battle::engine::{BattleRules, TurnSequencer};
use crate::battle::rng::ScriptedRng;
use crate::battle::state::{BattleEvent, BattleOutcome, SequencerState, Side};
use crate::battle::tests::common::{pikachu, session, squirtle, test_chart};
use crate::errors::ActionError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn sequencer(player_hp: u16, opponent_hp: u16) -> TurnSequencer {
    let mut sequencer = TurnSequencer::new(
        session(
            pikachu().with_hp(player_hp).build(),
            squirtle().with_hp(opponent_hp).build(),
        ),
        test_chart(),
        BattleRules::default(),
    );
    sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.0]))
        .unwrap();
    sequencer
}

#[test]
fn test_opponent_knocked_out_gets_no_counter_attack() {
    let mut sequencer = sequencer(100, 20);
    // Only the player's damage roll is scripted; an opponent turn would panic.
    let mut rng = ScriptedRng::new_for_test(vec![0.375]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(
        report.transitions,
        vec![
            SequencerState::PlayerAttacking,
            SequencerState::BattleEnded(BattleOutcome::PlayerWon),
        ]
    );
    assert_eq!(sequencer.session().outcome(), BattleOutcome::PlayerWon);
    assert_eq!(sequencer.session().opponent().current_hp(), 0);
    assert_eq!(sequencer.session().player().current_hp(), 100);
    assert!(!report.events.events().iter().any(|event| matches!(
        event,
        BattleEvent::MoveUsed {
            side: Side::Opponent,
            ..
        }
    )));
    assert_eq!(
        report.events.formatted().last(),
        Some(&"You won! Squirtle was defeated!".to_string())
    );
}

#[test]
fn test_player_knocked_out_ends_battle() {
    let mut sequencer = sequencer(5, 100);
    let mut rng = ScriptedRng::new_for_test(vec![0.0, 0.0, 0.0]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(
        report.state,
        SequencerState::BattleEnded(BattleOutcome::OpponentWon)
    );
    assert_eq!(sequencer.session().player().current_hp(), 0);
    assert_eq!(sequencer.session().opponent().current_hp(), 80);
    assert!(report.events.events().contains(&BattleEvent::PokemonFainted {
        side: Side::Player,
        pokemon: "Pikachu".to_string(),
    }));
    assert_eq!(
        report.events.formatted().last(),
        Some(&"You lost! Pikachu was defeated!".to_string())
    );
}

#[test]
fn test_overkill_clamps_health_at_zero() {
    let mut sequencer = sequencer(100, 1);
    let mut rng = ScriptedRng::new_for_test(vec![0.999]);

    sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(sequencer.session().opponent().current_hp(), 0);
}

#[rstest]
#[case::select_move(true)]
#[case::run(false)]
fn test_ended_battle_rejects_every_intent(#[case] select: bool) {
    let mut sequencer = sequencer(100, 20);
    sequencer
        .select_move(0, &mut ScriptedRng::new_for_test(vec![0.375]))
        .unwrap();
    let before = sequencer.session().clone();

    let mut rng = ScriptedRng::new_for_test(vec![]);
    let result = if select {
        sequencer.select_move(0, &mut rng)
    } else {
        sequencer.run(&mut rng)
    };

    assert!(matches!(result, Err(ActionError::InvalidAction(_))));
    assert_eq!(
        sequencer.state(),
        SequencerState::BattleEnded(BattleOutcome::PlayerWon)
    );
    assert_eq!(sequencer.session().player(), before.player());
    assert_eq!(sequencer.session().opponent(), before.opponent());
    assert!(sequencer.offer_moves(&mut rng).is_err());
}
