use crate::battle::engine::{BattleRules, TurnSequencer};
use crate::battle::rng::ScriptedRng;
use crate::battle::state::{BattleEvent, SequencerState};
use crate::battle::tests::common::{session, squirtle, test_chart, TestCombatantBuilder};
use crate::moves::Move;
use crate::type_chart::TypeChart;
use schema::PokemonType;
use std::sync::Arc;

#[test]
fn test_immune_defender_takes_no_damage() {
    let player = TestCombatantBuilder::new("Rattata", vec![PokemonType::Normal])
        .with_moves(vec![Move::new("tackle", None)])
        .build();
    let opponent = TestCombatantBuilder::new("Gastly", vec![PokemonType::Ghost, PokemonType::Poison])
        .with_moves(vec![Move::new("lick", Some(PokemonType::Ghost))])
        .build();
    let mut sequencer = TurnSequencer::new(session(player, opponent), test_chart(), BattleRules::default());
    sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.0]))
        .unwrap();
    let mut rng = ScriptedRng::new_for_test(vec![0.999, 0.0, 0.0]);

    let report = sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(sequencer.session().opponent().current_hp(), 100);
    assert!(report.events.events().contains(&BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 }));
    assert!(report.events.formatted().contains(&"It had no effect!".to_string()));
    assert!(report.events.formatted().contains(&"Gastly took 0 damage!".to_string()));
    assert_eq!(report.state, SequencerState::AwaitingPlayerAction);
}

#[test]
fn test_battle_runs_on_an_empty_chart() {
    let mut sequencer = TurnSequencer::new(
        session(
            TestCombatantBuilder::new("Pikachu", vec![PokemonType::Electric])
                .with_moves(vec![Move::new("thunder-shock", Some(PokemonType::Electric))])
                .build(),
            squirtle().build(),
        ),
        Arc::new(TypeChart::default()),
        BattleRules::default(),
    );
    sequencer
        .offer_moves(&mut ScriptedRng::new_for_test(vec![0.0]))
        .unwrap();
    let mut rng = ScriptedRng::new_for_test(vec![0.5, 0.0, 0.5]);

    sequencer.select_move(0, &mut rng).unwrap();

    assert_eq!(sequencer.session().opponent().current_hp(), 80);
    assert_eq!(sequencer.session().player().current_hp(), 80);
}
