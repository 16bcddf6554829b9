// Pokedex Battle Schema - Shared type definitions
// Elemental types and the PokeAPI response records consumed by the battle
// engine and its data client.

pub use pokemon_types::*;
pub use species_data::*;
pub use type_data::*;

pub mod pokemon_types;
pub mod species_data;
pub mod type_data;
