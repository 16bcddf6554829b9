use crate::battle::state::BattleSession;
use crate::moves::Move;
use crate::pokemon::Combatant;
use crate::type_chart::TypeChart;
use schema::{NamedApiResource, PokemonType, SpeciesRecord, TypeSlot};
use std::sync::Arc;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```
/// let pikachu = TestCombatantBuilder::new("Pikachu", vec![PokemonType::Electric])
///     .with_moves(vec![typed_move("thunder-shock", PokemonType::Electric)])
///     .with_hp(20)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    species_id: u32,
    name: String,
    types: Vec<PokemonType>,
    moves: Vec<Move>,
    max_hp: u16,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str, types: Vec<PokemonType>) -> Self {
        Self {
            species_id: 0,
            name: name.to_string(),
            types,
            moves: Vec::new(),
            max_hp: 100,
            current_hp: None,
        }
    }

    pub fn with_id(mut self, species_id: u32) -> Self {
        self.species_id = species_id;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let mut combatant = Combatant::new(
            self.species_id,
            self.name,
            self.types,
            self.max_hp,
            self.moves,
        );
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

pub fn typed_move(name: &str, move_type: PokemonType) -> Move {
    Move::new(name, Some(move_type))
}

pub fn test_chart() -> Arc<TypeChart> {
    Arc::new(crate::type_chart::tests::sample_chart())
}

/// Electric Pikachu with a single Electric move.
pub fn pikachu() -> TestCombatantBuilder {
    TestCombatantBuilder::new("Pikachu", vec![PokemonType::Electric])
        .with_id(25)
        .with_moves(vec![typed_move("thunder-shock", PokemonType::Electric)])
}

/// Water Squirtle with a single Normal move.
pub fn squirtle() -> TestCombatantBuilder {
    TestCombatantBuilder::new("Squirtle", vec![PokemonType::Water])
        .with_id(7)
        .with_moves(vec![typed_move("tackle", PokemonType::Normal)])
}

pub fn session(player: Combatant, opponent: Combatant) -> BattleSession {
    BattleSession::new("test_battle", player, opponent)
}

pub fn species_record(id: u32, name: &str, types: &[&str]) -> SpeciesRecord {
    SpeciesRecord {
        id,
        name: name.to_string(),
        types: types
            .iter()
            .enumerate()
            .map(|(i, t)| TypeSlot {
                slot: i as u8 + 1,
                type_: NamedApiResource {
                    name: t.to_string(),
                    url: String::new(),
                },
            })
            .collect(),
        moves: vec![],
        stats: vec![],
    }
}
