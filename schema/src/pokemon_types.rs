use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Elemental types as PokeAPI names them.
///
/// `Typeless` stands in for names the API reports that this crate doesn't
/// model (`unknown`, `shadow`, `stellar`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Typeless,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Parse a PokeAPI type name, mapping anything unrecognised to `Typeless`.
    pub fn from_api_name(name: &str) -> PokemonType {
        name.parse().unwrap_or(PokemonType::Typeless)
    }

    /// The lowercase name PokeAPI uses for this type.
    pub fn api_name(&self) -> &'static str {
        self.into()
    }

    /// Every elemental type that can carry damage relations.
    pub fn elemental() -> impl Iterator<Item = PokemonType> {
        PokemonType::iter().filter(|t| *t != PokemonType::Typeless)
    }
}
