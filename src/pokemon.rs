use crate::moves::{learnable_moves, Move};
use schema::{capitalize, PokemonType, SpeciesRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a battle.
///
/// `current_hp` is kept within `0..=max_hp`; the only way down is
/// [`Combatant::take_damage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub species_id: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
    current_hp: u16,
    max_hp: u16,
    /// Every move this combatant may use (already filtered to the version group).
    pub moves: Vec<Move>,
}

impl Combatant {
    pub fn new(
        species_id: u32,
        name: impl Into<String>,
        types: Vec<PokemonType>,
        max_hp: u16,
        moves: Vec<Move>,
    ) -> Self {
        Self {
            species_id,
            name: name.into(),
            types,
            current_hp: max_hp,
            max_hp,
            moves,
        }
    }

    /// Build a fresh combatant from fetched species data at full health.
    pub fn from_species(record: &SpeciesRecord, max_hp: u16, version_group: &str) -> Self {
        let mut types = record.pokemon_types();
        types.truncate(2);
        Self::new(
            record.id,
            capitalize(&record.name),
            types,
            max_hp,
            learnable_moves(record, version_group),
        )
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, clamping at zero. Returns true if this knocked it out.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        !was_fainted && self.is_fainted()
    }

    #[cfg(test)]
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self
            .types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(
            f,
            "{} ({}) HP: {}/{}",
            self.name, types, self.current_hp, self.max_hp
        )
    }
}
