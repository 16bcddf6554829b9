use crate::battle::catch::{calculate_catch_rate, roll_catch_success, roll_target_health};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, EventBus};
use crate::errors::{ActionError, ActionResult};
use schema::SpeciesRecord;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    /// Still accepting throws and run attempts.
    Open,
    Caught,
    Fled,
}

/// One throw. Not kept after it is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchAttempt {
    pub health_percent: f64,
    pub catch_rate: f64,
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct CatchReport {
    pub attempt: Option<CatchAttempt>,
    pub events: EventBus,
    pub outcome: EncounterOutcome,
}

/// A wild species to catch. Throws are unlimited until one lands or the
/// player runs.
#[derive(Debug, Clone)]
pub struct CatchEncounter {
    target: SpeciesRecord,
    outcome: EncounterOutcome,
    attempts: u32,
    flee_chance: f64,
}

impl CatchEncounter {
    pub fn new(target: SpeciesRecord) -> Self {
        Self::with_flee_chance(target, 0.5)
    }

    pub fn with_flee_chance(target: SpeciesRecord, flee_chance: f64) -> Self {
        tracing::info!(target = %target.name, id = target.id, "catch encounter started");
        Self {
            target,
            outcome: EncounterOutcome::Open,
            attempts: 0,
            flee_chance,
        }
    }

    pub fn target(&self) -> &SpeciesRecord {
        &self.target
    }

    pub fn outcome(&self) -> EncounterOutcome {
        self.outcome
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Throw a ball. Health is rolled fresh, then the catch is rolled against it.
    pub fn attempt(&mut self, rng: &mut dyn BattleRng) -> ActionResult<CatchReport> {
        self.ensure_open("throw")?;
        self.attempts += 1;

        let health_fraction = roll_target_health(rng);
        let catch_rate = calculate_catch_rate(health_fraction);
        let success = roll_catch_success(catch_rate, rng);
        let attempt = CatchAttempt {
            health_percent: health_fraction * 100.0,
            catch_rate,
            success,
        };
        tracing::debug!(
            target = %self.target.name,
            attempt = self.attempts,
            health_percent = attempt.health_percent,
            catch_rate,
            success,
            "catch attempt"
        );

        let name = self.target.display_name();
        let mut events = EventBus::new();
        events.push(BattleEvent::CatchAttempted {
            pokemon: name.clone(),
            health_percent: attempt.health_percent,
            catch_rate,
        });
        if success {
            self.outcome = EncounterOutcome::Caught;
            events.push(BattleEvent::CatchSucceeded { pokemon: name });
        } else {
            events.push(BattleEvent::CatchFailed { pokemon: name });
        }

        Ok(CatchReport {
            attempt: Some(attempt),
            events,
            outcome: self.outcome,
        })
    }

    /// Try to leave. A failed run leaves the encounter open.
    pub fn run(&mut self, rng: &mut dyn BattleRng) -> ActionResult<CatchReport> {
        self.ensure_open("run")?;
        let mut events = EventBus::new();
        if rng.next_unit("catch flee attempt") < self.flee_chance {
            self.outcome = EncounterOutcome::Fled;
            events.push(BattleEvent::FleeSucceeded);
        } else {
            events.push(BattleEvent::FleeFailed);
        }
        Ok(CatchReport {
            attempt: None,
            events,
            outcome: self.outcome,
        })
    }

    fn ensure_open(&self, what: &str) -> ActionResult<()> {
        if self.outcome == EncounterOutcome::Open {
            return Ok(());
        }
        tracing::warn!(outcome = ?self.outcome, action = what, "rejected catch intent");
        Err(ActionError::InvalidAction(format!(
            "cannot {} after the encounter ended ({:?})",
            what, self.outcome
        )))
    }
}
