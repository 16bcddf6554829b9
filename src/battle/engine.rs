use crate::battle::ai::{Behavior, RandomMoveAI};
use crate::battle::calculators::resolve_damage;
use crate::battle::rng::BattleRng;
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattleSession, EventBus, SequencerState, Side,
};
use crate::errors::{ActionError, ActionResult};
use crate::moves::{sample_moveset, Move};
use crate::type_chart::TypeChart;
use std::sync::Arc;

/// Tunable odds for a battle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleRules {
    /// Probability that running away succeeds. Tests pin it to 0.0 or 1.0.
    pub flee_chance: f64,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self { flee_chance: 0.5 }
    }
}

/// Everything that happened while resolving one intent.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub events: EventBus,
    /// Every state entered, in order, ending with `state`.
    pub transitions: Vec<SequencerState>,
    pub state: SequencerState,
}

impl TurnReport {
    fn new(state: SequencerState) -> Self {
        Self {
            events: EventBus::new(),
            transitions: Vec::new(),
            state,
        }
    }

    pub fn battle_ended(&self) -> bool {
        matches!(self.state, SequencerState::BattleEnded(_))
    }
}

/// Drives one battle: player acts first, then the opponent, until somebody
/// faints or the player escapes.
pub struct TurnSequencer {
    session: BattleSession,
    chart: Arc<TypeChart>,
    rules: BattleRules,
    state: SequencerState,
    offered_moves: Vec<Move>,
    opponent_ai: Box<dyn Behavior>,
}

impl TurnSequencer {
    pub fn new(session: BattleSession, chart: Arc<TypeChart>, rules: BattleRules) -> Self {
        Self::with_behavior(session, chart, rules, Box::new(RandomMoveAI::new()))
    }

    pub fn with_behavior(
        session: BattleSession,
        chart: Arc<TypeChart>,
        rules: BattleRules,
        opponent_ai: Box<dyn Behavior>,
    ) -> Self {
        tracing::info!(
            battle_id = %session.battle_id,
            player = %session.player().name,
            opponent = %session.opponent().name,
            "battle started"
        );
        Self {
            session,
            chart,
            rules,
            state: SequencerState::AwaitingPlayerAction,
            offered_moves: Vec::new(),
            opponent_ai,
        }
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn into_session(self) -> BattleSession {
        self.session
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn rules(&self) -> BattleRules {
        self.rules
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SequencerState::BattleEnded(_))
    }

    pub fn offered_moves(&self) -> &[Move] {
        &self.offered_moves
    }

    /// Draw a fresh sample of at most four moves for the player to pick from.
    ///
    /// A player with nothing learnable is offered struggle.
    pub fn offer_moves(&mut self, rng: &mut dyn BattleRng) -> ActionResult<&[Move]> {
        self.ensure_accepting("offer moves")?;
        let mut offered = sample_moveset(&self.session.player().moves, rng);
        if offered.is_empty() {
            offered.push(Move::struggle());
        }
        tracing::debug!(
            moves = ?offered.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            "offered moves"
        );
        self.offered_moves = offered;
        Ok(&self.offered_moves)
    }

    /// Player uses the offered move at `index`; the opponent answers unless it fainted.
    pub fn select_move(&mut self, index: usize, rng: &mut dyn BattleRng) -> ActionResult<TurnReport> {
        self.ensure_accepting("select a move")?;
        let move_used = match self.offered_moves.get(index) {
            Some(m) => m.clone(),
            None => {
                tracing::warn!(
                    index,
                    offered = self.offered_moves.len(),
                    "rejected move selection"
                );
                return Err(ActionError::InvalidMoveIndex(index));
            }
        };

        let mut report = TurnReport::new(self.state);
        self.transition(SequencerState::PlayerAttacking, &mut report);
        self.attack(Side::Player, &move_used, rng, &mut report);
        if !self.session.is_over() {
            self.opponent_turn(rng, &mut report);
        }
        Ok(self.end_turn(report))
    }

    /// Try to run. On failure the opponent gets a free attack.
    pub fn run(&mut self, rng: &mut dyn BattleRng) -> ActionResult<TurnReport> {
        self.ensure_accepting("run")?;

        let mut report = TurnReport::new(self.state);
        self.transition(SequencerState::FleeAttempt, &mut report);

        let roll = rng.next_unit("flee attempt");
        if roll < self.rules.flee_chance {
            report.events.push(BattleEvent::FleeSucceeded);
            self.end_battle(BattleOutcome::Escaped, &mut report);
        } else {
            report.events.push(BattleEvent::FleeFailed);
            self.opponent_turn(rng, &mut report);
        }
        Ok(self.end_turn(report))
    }

    fn ensure_accepting(&self, what: &str) -> ActionResult<()> {
        if self.state.accepts_actions() {
            return Ok(());
        }
        tracing::warn!(state = ?self.state, action = what, "rejected intent");
        Err(ActionError::InvalidAction(format!(
            "cannot {} while {:?}",
            what, self.state
        )))
    }

    fn transition(&mut self, next: SequencerState, report: &mut TurnReport) {
        tracing::debug!(from = ?self.state, to = ?next, "sequencer transition");
        self.state = next;
        report.transitions.push(next);
        report.state = next;
    }

    fn opponent_turn(&mut self, rng: &mut dyn BattleRng, report: &mut TurnReport) {
        self.transition(SequencerState::OpponentAttacking, report);
        let move_used =
            self.opponent_ai
                .choose_move(self.session.opponent(), self.session.player(), rng);
        self.attack(Side::Opponent, &move_used, rng, report);
    }

    fn attack(
        &mut self,
        side: Side,
        move_used: &Move,
        rng: &mut dyn BattleRng,
        report: &mut TurnReport,
    ) {
        let target_side = side.other();
        let outcome = resolve_damage(
            self.session.combatant(side),
            self.session.combatant(target_side),
            move_used,
            &self.chart,
            rng,
        );

        report.events.push(BattleEvent::MoveUsed {
            side,
            pokemon: self.session.combatant(side).name.clone(),
            move_name: move_used.name.clone(),
        });
        report.events.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: outcome.multiplier,
        });

        let target = self.session.combatant_mut(target_side);
        let knocked_out = target.take_damage(outcome.damage);
        report.events.push(BattleEvent::DamageDealt {
            target: target.name.clone(),
            damage: outcome.damage,
            remaining_hp: target.current_hp(),
        });

        if knocked_out {
            report.events.push(BattleEvent::PokemonFainted {
                side: target_side,
                pokemon: target.name.clone(),
            });
            let outcome = match side {
                Side::Player => BattleOutcome::PlayerWon,
                Side::Opponent => BattleOutcome::OpponentWon,
            };
            self.end_battle(outcome, report);
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome, report: &mut TurnReport) {
        if !self.session.finish(outcome) {
            return;
        }
        tracing::info!(battle_id = %self.session.battle_id, ?outcome, "battle ended");
        report.events.push(BattleEvent::BattleEnded {
            outcome,
            player: self.session.player().name.clone(),
            opponent: self.session.opponent().name.clone(),
        });
        self.transition(SequencerState::BattleEnded(outcome), report);
    }

    fn end_turn(&mut self, mut report: TurnReport) -> TurnReport {
        if !self.session.is_over() {
            self.session.turn_number += 1;
            self.transition(SequencerState::AwaitingPlayerAction, &mut report);
        }
        report
    }
}
