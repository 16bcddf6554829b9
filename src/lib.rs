// In: src/lib.rs

//! Pokedex Battle
//!
//! A first-generation Pokedex with a turn-based battle against a wild
//! opponent and a catch minigame. Species and type data come from PokeAPI;
//! caught species are remembered between sessions.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod moves;
pub mod pokemon;
pub mod type_chart;
pub mod unlocked;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    NamedApiResource, NamedApiResourceList, PokemonType, SpeciesRecord, TypeRelationsRecord,
};

// --- From this crate's modules (`src/`) ---

// Battle engine and session state.
pub use battle::engine::{BattleRules, TurnReport, TurnSequencer};
pub use battle::rng::{BattleRng, ScriptedRng, SystemRng};
pub use battle::runner::{
    BattleRunner, BattleSnapshot, CatchRunner, CatchSnapshot, CombatantView, PlayerIntent,
};
pub use battle::state::{BattleEvent, BattleOutcome, BattleSession, SequencerState, Side};

// Catch minigame.
pub use battle::catch::{CatchAttempt, CatchEncounter, EncounterOutcome};

// Core runtime types.
pub use moves::Move;
pub use pokemon::Combatant;
pub use type_chart::{Effectiveness, TypeChart};
pub use unlocked::{JsonFileStore, MemoryStore, UnlockedRegistry, UnlockedSet, UnlockedStore};

// Data loading.
pub use config::Config;
pub use data::{CatalogEntry, DataSource, PokeApiClient, RetryPolicy};

// Crate-specific error and result types.
pub use errors::{
    ActionError, ActionResult, DataResult, DataSourceError, LoadError, StoreError, StoreResult,
};
