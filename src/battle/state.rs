use crate::pokemon::Combatant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the field a combatant is on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    InProgress,
    PlayerWon,
    OpponentWon,
    Escaped,
}

impl BattleOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleOutcome::InProgress)
    }
}

/// Where the turn sequencer is. Only `AwaitingPlayerAction` accepts intents;
/// `BattleEnded` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    AwaitingPlayerAction,
    PlayerAttacking,
    OpponentAttacking,
    FleeAttempt,
    BattleEnded(BattleOutcome),
}

impl SequencerState {
    pub fn accepts_actions(self) -> bool {
        matches!(self, SequencerState::AwaitingPlayerAction)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        player: String,
        opponent: String,
    },
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
    FleeSucceeded,
    FleeFailed,
    CatchAttempted {
        pokemon: String,
        health_percent: f64,
        catch_rate: f64,
    },
    CatchSucceeded {
        pokemon: String,
    },
    CatchFailed {
        pokemon: String,
    },
    BattleEnded {
        outcome: BattleOutcome,
        player: String,
        opponent: String,
    },
}

impl BattleEvent {
    /// Human-readable text for the event, or None for events that stay silent.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { opponent, .. } => {
                Some(format!("A wild {} appeared!", opponent))
            }
            BattleEvent::MoveUsed {
                pokemon, move_name, ..
            } => Some(format!(
                "{} used {}!",
                pokemon,
                Self::format_move_name(move_name)
            )),
            BattleEvent::AttackTypeEffectiveness { multiplier } => {
                crate::type_chart::Effectiveness::from_multiplier(*multiplier)
                    .message()
                    .map(str::to_string)
            }
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::PokemonFainted { .. } => {
                None // Covered by the BattleEnded text
            }
            BattleEvent::FleeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed => Some("Couldn't escape!".to_string()),
            BattleEvent::CatchAttempted { catch_rate, .. } => Some(format!(
                "You threw a Poke Ball! ({:.0}% chance)",
                catch_rate * 100.0
            )),
            BattleEvent::CatchSucceeded { pokemon } => {
                Some(format!("Congratulations! You caught {}!", pokemon))
            }
            BattleEvent::CatchFailed { pokemon } => {
                Some(format!("Oh no! {} broke free!", pokemon))
            }
            BattleEvent::BattleEnded {
                outcome,
                player,
                opponent,
            } => match outcome {
                BattleOutcome::PlayerWon => {
                    Some(format!("You won! {} was defeated!", opponent))
                }
                BattleOutcome::OpponentWon => {
                    Some(format!("You lost! {} was defeated!", player))
                }
                BattleOutcome::Escaped | BattleOutcome::InProgress => None,
            },
        }
    }

    fn format_move_name(move_name: &str) -> String {
        crate::moves::Move::new(move_name, None).display_name()
    }
}

/// Event log for one turn (or a whole battle).
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Formatted text of every non-silent event, in order.
    pub fn formatted(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Debug form of every event, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// The two combatants of one battle and how it ended.
///
/// Constructed when a battle starts and dropped when it ends or is cancelled;
/// a new battle always gets a new session. Once the outcome is terminal it
/// never changes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleSession {
    pub battle_id: String,
    player: Combatant,
    opponent: Combatant,
    outcome: BattleOutcome,
    pub turn_number: u32,
}

impl BattleSession {
    pub fn new(battle_id: impl Into<String>, player: Combatant, opponent: Combatant) -> Self {
        Self {
            battle_id: battle_id.into(),
            player,
            opponent,
            outcome: BattleOutcome::InProgress,
            turn_number: 1,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Health changes go through the sequencer, hence crate-private.
    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Record the outcome. Ignored (returns false) once the battle already ended.
    pub(crate) fn finish(&mut self, outcome: BattleOutcome) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        true
    }
}
