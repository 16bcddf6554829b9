use crate::battle::catch::{CatchAttempt, CatchEncounter, EncounterOutcome};
use crate::battle::engine::{BattleRules, TurnSequencer};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleOutcome, BattleSession, SequencerState};
use crate::errors::{ActionError, ActionResult};
use crate::moves::Move;
use crate::pokemon::Combatant;
use crate::type_chart::TypeChart;
use crate::unlocked::UnlockedRegistry;
use schema::PokemonType;
use std::sync::Arc;

/// Shown whenever the battle is waiting on the player.
pub const PROMPT_MESSAGE: &str = "What will you do?";

/// What the presentation layer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    SelectMove(usize),
    Run,
    AttemptCatch,
}

/// Information about a combatant for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub current_hp: u16,
    pub max_hp: u16,
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            types: combatant.types.clone(),
            current_hp: combatant.current_hp(),
            max_hp: combatant.max_hp(),
        }
    }
}

/// Everything the front end needs after a battle transition.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSnapshot {
    pub battle_id: String,
    pub turn_number: u32,
    pub player: CombatantView,
    pub opponent: CombatantView,
    pub offered_moves: Vec<Move>,
    /// Headline text: the prompt while waiting, otherwise the final message.
    pub message: String,
    /// Messages produced by the last transition, in order.
    pub log: Vec<String>,
    pub state: SequencerState,
}

/// High-level battle interface: takes intents, owns the randomness, and
/// hands back snapshots.
pub struct BattleRunner {
    sequencer: TurnSequencer,
    rng: Box<dyn BattleRng + Send>,
    last_messages: Vec<String>,
    accumulated_events: Vec<BattleEvent>,
}

impl BattleRunner {
    pub fn new(
        session: BattleSession,
        chart: Arc<TypeChart>,
        rules: BattleRules,
        rng: Box<dyn BattleRng + Send>,
    ) -> Self {
        Self::from_sequencer(TurnSequencer::new(session, chart, rules), rng)
    }

    pub fn from_sequencer(sequencer: TurnSequencer, rng: Box<dyn BattleRng + Send>) -> Self {
        let started = BattleEvent::BattleStarted {
            player: sequencer.session().player().name.clone(),
            opponent: sequencer.session().opponent().name.clone(),
        };
        let mut runner = Self {
            sequencer,
            rng,
            last_messages: started.format().into_iter().collect(),
            accumulated_events: vec![started],
        };
        runner.refresh_offer();
        runner
    }

    pub fn sequencer(&self) -> &TurnSequencer {
        &self.sequencer
    }

    pub fn offered_moves(&self) -> &[Move] {
        self.sequencer.offered_moves()
    }

    pub fn is_battle_ended(&self) -> bool {
        self.sequencer.is_over()
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.sequencer.session().outcome()
    }

    /// Every event since the battle started.
    pub fn events(&self) -> &[BattleEvent] {
        &self.accumulated_events
    }

    /// Apply one intent. Rejected intents leave the battle untouched.
    pub fn submit(&mut self, intent: PlayerIntent) -> ActionResult<BattleSnapshot> {
        let report = match intent {
            PlayerIntent::SelectMove(index) => {
                self.sequencer.select_move(index, self.rng.as_mut())?
            }
            PlayerIntent::Run => self.sequencer.run(self.rng.as_mut())?,
            PlayerIntent::AttemptCatch => {
                tracing::warn!(?intent, "rejected intent during battle");
                return Err(ActionError::InvalidAction(
                    "cannot throw a ball during a battle".to_string(),
                ));
            }
        };

        self.last_messages = report.events.formatted();
        self.accumulated_events.extend(report.events.into_events());
        self.refresh_offer();
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        let session = self.sequencer.session();
        let state = self.sequencer.state();
        let message = if state.accepts_actions() {
            PROMPT_MESSAGE.to_string()
        } else {
            self.last_messages
                .last()
                .cloned()
                .unwrap_or_default()
        };
        BattleSnapshot {
            battle_id: session.battle_id.clone(),
            turn_number: session.turn_number,
            player: session.player().into(),
            opponent: session.opponent().into(),
            offered_moves: self.sequencer.offered_moves().to_vec(),
            message,
            log: self.last_messages.clone(),
            state,
        }
    }

    /// New move sample each time control returns to the player.
    fn refresh_offer(&mut self) {
        if !self.sequencer.state().accepts_actions() {
            return;
        }
        if let Err(err) = self.sequencer.offer_moves(self.rng.as_mut()) {
            tracing::warn!(error = %err, "could not offer moves");
        }
    }
}

/// Everything the front end needs after a catch transition.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchSnapshot {
    pub target_id: u32,
    pub target_name: String,
    pub target_types: Vec<PokemonType>,
    pub last_attempt: Option<CatchAttempt>,
    pub attempts: u32,
    pub message: String,
    pub log: Vec<String>,
    pub outcome: EncounterOutcome,
    /// True when the last throw added a species that wasn't unlocked before.
    pub newly_unlocked: bool,
}

/// Drives a catch encounter and records successful catches.
pub struct CatchRunner {
    encounter: CatchEncounter,
    rng: Box<dyn BattleRng + Send>,
    last_attempt: Option<CatchAttempt>,
    last_messages: Vec<String>,
    newly_unlocked: bool,
}

impl CatchRunner {
    pub fn new(encounter: CatchEncounter, rng: Box<dyn BattleRng + Send>) -> Self {
        let opening = format!("A wild {} appeared!", encounter.target().display_name());
        Self {
            encounter,
            rng,
            last_attempt: None,
            last_messages: vec![opening],
            newly_unlocked: false,
        }
    }

    pub fn encounter(&self) -> &CatchEncounter {
        &self.encounter
    }

    pub fn is_finished(&self) -> bool {
        self.encounter.outcome() != EncounterOutcome::Open
    }

    /// Apply one intent. A caught target is inserted into `registry` and saved;
    /// a failed save is logged and does not undo the catch.
    pub fn submit(
        &mut self,
        intent: PlayerIntent,
        registry: &mut UnlockedRegistry,
    ) -> ActionResult<CatchSnapshot> {
        let report = match intent {
            PlayerIntent::AttemptCatch => self.encounter.attempt(self.rng.as_mut())?,
            PlayerIntent::Run => self.encounter.run(self.rng.as_mut())?,
            PlayerIntent::SelectMove(_) => {
                tracing::warn!(?intent, "rejected intent during catch");
                return Err(ActionError::InvalidAction(
                    "there is no battle to pick a move for".to_string(),
                ));
            }
        };

        self.newly_unlocked = false;
        if report.outcome == EncounterOutcome::Caught {
            let id = self.encounter.target().id;
            self.newly_unlocked = !registry.contains(id);
            if let Err(err) = registry.unlock(id) {
                tracing::error!(id, error = %err, "failed to save unlocked set");
            }
        }

        if report.attempt.is_some() {
            self.last_attempt = report.attempt;
        }
        self.last_messages = report.events.formatted();
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> CatchSnapshot {
        let target = self.encounter.target();
        CatchSnapshot {
            target_id: target.id,
            target_name: target.display_name(),
            target_types: target.pokemon_types(),
            last_attempt: self.last_attempt,
            attempts: self.encounter.attempts(),
            message: self.last_messages.last().cloned().unwrap_or_default(),
            log: self.last_messages.clone(),
            outcome: self.encounter.outcome(),
            newly_unlocked: self.newly_unlocked,
        }
    }
}
