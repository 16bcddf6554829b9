use crate::species_data::NamedApiResource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_to: Vec<NamedApiResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedApiResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedApiResource>,
}

/// The subset of `/type/{name}` used to build the effectiveness table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRelationsRecord {
    pub name: String,
    pub damage_relations: DamageRelations,
}
