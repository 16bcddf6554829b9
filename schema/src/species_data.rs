use crate::PokemonType;
use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference as returned throughout PokeAPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedApiResource {
    /// The numeric id at the end of a resource url, e.g. `.../pokemon/25/` -> 25.
    pub fn trailing_id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// Paged listing (`/pokemon?limit=N`, `/type`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedApiResourceList {
    #[serde(default)]
    pub count: Option<u32>,
    pub results: Vec<NamedApiResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedApiResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    pub version_group: NamedApiResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedApiResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

impl MoveSlot {
    pub fn learnable_in(&self, version_group: &str) -> bool {
        self.version_group_details
            .iter()
            .any(|detail| detail.version_group.name == version_group)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u16,
    pub stat: NamedApiResource,
}

/// The subset of `/pokemon/{id}` the battle demo consumes.
///
/// List fields default to empty so a sparse record still decodes; `id` and
/// `name` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

impl SpeciesRecord {
    /// Types in slot order.
    pub fn pokemon_types(&self) -> Vec<PokemonType> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots
            .into_iter()
            .map(|slot| PokemonType::from_api_name(&slot.type_.name))
            .collect()
    }

    pub fn base_stat(&self, stat_name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|s| s.stat.name == stat_name)
            .map(|s| s.base_stat)
    }

    /// Species name with the first letter upper-cased, as shown to players.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
