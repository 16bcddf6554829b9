use crate::battle::rng::BattleRng;
use schema::{MoveSlot, PokemonType, SpeciesRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most moves a combatant is offered at once.
pub const MAX_MOVES: usize = 4;

/// A battle move. There is no power stat; damage is rolled within a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// PokeAPI slug, e.g. `thunder-shock`.
    pub name: String,
    /// Elemental type when known. The species endpoint doesn't carry it, so
    /// moves built from a species record leave this empty and attack as Normal.
    pub move_type: Option<PokemonType>,
}

impl Move {
    pub fn new(name: impl Into<String>, move_type: Option<PokemonType>) -> Self {
        Self {
            name: name.into(),
            move_type,
        }
    }

    pub fn from_slot(slot: &MoveSlot) -> Self {
        Self::new(slot.move_.name.clone(), None)
    }

    /// Used by a combatant that has nothing valid to pick from.
    pub fn struggle() -> Self {
        Self::new("struggle", Some(PokemonType::Typeless))
    }

    /// Type the move attacks with.
    pub fn attack_type(&self) -> PokemonType {
        self.move_type.unwrap_or(PokemonType::Normal)
    }

    /// `thunder-shock` -> `Thunder Shock`.
    pub fn display_name(&self) -> String {
        self.name
            .split('-')
            .filter(|part| !part.is_empty())
            .map(schema::capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.display_name(), self.attack_type())
    }
}

/// Moves from the species' full list that are learnable in `version_group`.
pub fn learnable_moves(record: &SpeciesRecord, version_group: &str) -> Vec<Move> {
    record
        .moves
        .iter()
        .filter(|slot| slot.learnable_in(version_group))
        .map(Move::from_slot)
        .collect()
}

/// Unordered random sample of at most `MAX_MOVES` moves.
pub fn sample_moveset(moves: &[Move], rng: &mut dyn BattleRng) -> Vec<Move> {
    let mut pool: Vec<Move> = moves.to_vec();
    let take = pool.len().min(MAX_MOVES);
    // Partial Fisher-Yates: the first `take` slots end up a uniform sample.
    for i in 0..take {
        let j = i + rng.next_index(pool.len() - i, "move sample");
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}
