//! Attack-type effectiveness table built from per-type damage relations.

use schema::{PokemonType, TypeRelationsRecord};
use std::collections::{HashMap, HashSet};

/// Damage relations for one attacking type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRelations {
    pub double_damage_to: HashSet<PokemonType>,
    pub half_damage_to: HashSet<PokemonType>,
    pub no_damage_to: HashSet<PokemonType>,
}

impl TypeRelations {
    /// Convert a PokeAPI record, dropping names that don't map to a modelled type.
    pub fn from_record(record: &TypeRelationsRecord) -> Self {
        let collect = |names: &[schema::NamedApiResource]| {
            names
                .iter()
                .map(|n| PokemonType::from_api_name(&n.name))
                .filter(|t| *t != PokemonType::Typeless)
                .collect::<HashSet<_>>()
        };
        let relations = &record.damage_relations;
        Self {
            double_damage_to: collect(&relations.double_damage_to),
            half_damage_to: collect(&relations.half_damage_to),
            no_damage_to: collect(&relations.no_damage_to),
        }
    }

    /// Multiplier against a single defending type.
    ///
    /// A pair listed in more than one set resolves double, then half, then zero.
    pub fn multiplier_against(&self, defending: PokemonType) -> f64 {
        if self.double_damage_to.contains(&defending) {
            2.0
        } else if self.half_damage_to.contains(&defending) {
            0.5
        } else if self.no_damage_to.contains(&defending) {
            0.0
        } else {
            1.0
        }
    }
}

/// Read-only once built; one instance per session.
///
/// Types with no entry (never loaded, or failed to load) are neutral both as
/// attacker and defender.
#[derive(Debug, Clone, Default)]
pub struct TypeChart {
    relations: HashMap<PokemonType, TypeRelations>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TypeRelationsRecord>) -> Self {
        let mut chart = Self::new();
        for record in records {
            chart.insert_record(record);
        }
        chart
    }

    pub fn insert(&mut self, attacking: PokemonType, relations: TypeRelations) {
        self.relations.insert(attacking, relations);
    }

    /// Add one type's relations. Returns false when the record names a type
    /// this crate doesn't model; such records are skipped.
    pub fn insert_record(&mut self, record: &TypeRelationsRecord) -> bool {
        let attacking = PokemonType::from_api_name(&record.name);
        if attacking == PokemonType::Typeless {
            return false;
        }
        self.insert(attacking, TypeRelations::from_record(record));
        true
    }

    /// Multiplier for one attacking type against one defending type: 0, 0.5, 1 or 2.
    pub fn lookup(&self, attacking: PokemonType, defending: PokemonType) -> f64 {
        self.relations
            .get(&attacking)
            .map(|r| r.multiplier_against(defending))
            .unwrap_or(1.0)
    }

    /// Compound multiplier against every type the defender holds.
    pub fn effectiveness(&self, attacking: PokemonType, defending: &[PokemonType]) -> f64 {
        defending
            .iter()
            .fold(1.0, |acc, t| acc * self.lookup(attacking, *t))
    }

    pub fn contains(&self, attacking: PokemonType) -> bool {
        self.relations.contains_key(&attacking)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

/// Coarse classification of a multiplier, used for the advisory battle message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        match multiplier {
            m if m > 1.0 => Effectiveness::SuperEffective,
            m if m > 0.0 && m < 1.0 => Effectiveness::NotVeryEffective,
            m if m == 0.0 => Effectiveness::NoEffect,
            _ => Effectiveness::Normal,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::SuperEffective => Some("It's super effective!"),
            Effectiveness::NotVeryEffective => Some("It's not very effective..."),
            Effectiveness::NoEffect => Some("It had no effect!"),
            Effectiveness::Normal => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;
    use schema::{DamageRelations, NamedApiResource};

    fn names(list: &[&str]) -> Vec<NamedApiResource> {
        list.iter()
            .map(|n| NamedApiResource {
                name: n.to_string(),
                url: String::new(),
            })
            .collect()
    }

    pub(crate) fn record(name: &str, double: &[&str], half: &[&str], none: &[&str]) -> TypeRelationsRecord {
        TypeRelationsRecord {
            name: name.to_string(),
            damage_relations: DamageRelations {
                double_damage_to: names(double),
                half_damage_to: names(half),
                no_damage_to: names(none),
            },
        }
    }

    /// A slice of the real chart, enough for the scenarios below.
    pub(crate) fn sample_chart() -> TypeChart {
        TypeChart::from_records(&[
            record("normal", &[], &["rock", "steel"], &["ghost"]),
            record("fire", &["grass", "ice", "bug", "steel"], &["fire", "water", "rock", "dragon"], &[]),
            record("water", &["fire", "ground", "rock"], &["water", "grass", "dragon"], &[]),
            record("electric", &["water", "flying"], &["electric", "grass", "dragon"], &["ground"]),
            record("grass", &["water", "ground", "rock"], &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"], &[]),
            record("ice", &["grass", "ground", "flying", "dragon"], &["fire", "water", "ice", "steel"], &[]),
        ])
    }

    #[rstest]
    #[case(PokemonType::Fire, PokemonType::Grass, 2.0)]
    #[case(PokemonType::Fire, PokemonType::Water, 0.5)]
    #[case(PokemonType::Electric, PokemonType::Ground, 0.0)]
    #[case(PokemonType::Normal, PokemonType::Ghost, 0.0)]
    #[case(PokemonType::Normal, PokemonType::Fire, 1.0)]
    fn test_single_type_lookup(#[case] attacking: PokemonType, #[case] defending: PokemonType, #[case] expected: f64) {
        assert_eq!(sample_chart().lookup(attacking, defending), expected);
    }

    #[rstest]
    #[case(PokemonType::Ice, &[PokemonType::Grass, PokemonType::Ground], 4.0)]
    #[case(PokemonType::Grass, &[PokemonType::Fire, PokemonType::Flying], 0.25)]
    #[case(PokemonType::Fire, &[PokemonType::Grass, PokemonType::Water], 1.0)]
    #[case(PokemonType::Electric, &[PokemonType::Water, PokemonType::Ground], 0.0)]
    fn test_dual_types_compound(#[case] attacking: PokemonType, #[case] defending: &[PokemonType], #[case] expected: f64) {
        assert_eq!(sample_chart().effectiveness(attacking, defending), expected);
    }

    #[test]
    fn test_missing_attacking_type_is_neutral() {
        let chart = sample_chart();
        assert!(!chart.contains(PokemonType::Ghost));
        assert_eq!(chart.lookup(PokemonType::Ghost, PokemonType::Psychic), 1.0);
        assert_eq!(chart.effectiveness(PokemonType::Ghost, &[PokemonType::Normal, PokemonType::Psychic]), 1.0);
        // Asking twice doesn't change the answer.
        assert_eq!(chart.lookup(PokemonType::Ghost, PokemonType::Psychic), 1.0);
    }

    #[test]
    fn test_empty_chart_is_neutral() {
        let chart = TypeChart::default();
        assert!(chart.is_empty());
        assert_eq!(chart.effectiveness(PokemonType::Fire, &[PokemonType::Grass]), 1.0);
        assert_eq!(chart.effectiveness(PokemonType::Typeless, &[PokemonType::Typeless]), 1.0);
    }

    #[test]
    fn test_inconsistent_sets_resolve_double_then_half_then_zero() {
        let chart = TypeChart::from_records(&[
            record("fire", &["grass"], &["grass", "water"], &["grass", "water", "rock"]),
        ]);
        assert_eq!(chart.lookup(PokemonType::Fire, PokemonType::Grass), 2.0);
        assert_eq!(chart.lookup(PokemonType::Fire, PokemonType::Water), 0.5);
        assert_eq!(chart.lookup(PokemonType::Fire, PokemonType::Rock), 0.0);
    }

    #[test]
    fn test_unmodelled_records_are_skipped() {
        let mut chart = TypeChart::new();
        assert!(!chart.insert_record(&record("shadow", &["normal"], &[], &[])));
        assert!(chart.insert_record(&record("ghost", &["ghost", "psychic"], &["dark"], &["normal", "unknown"])));
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.lookup(PokemonType::Ghost, PokemonType::Typeless), 1.0);
    }

    #[rstest]
    #[case(4.0, Effectiveness::SuperEffective, Some("It's super effective!"))]
    #[case(2.0, Effectiveness::SuperEffective, Some("It's super effective!"))]
    #[case(1.0, Effectiveness::Normal, None)]
    #[case(0.5, Effectiveness::NotVeryEffective, Some("It's not very effective..."))]
    #[case(0.25, Effectiveness::NotVeryEffective, Some("It's not very effective..."))]
    #[case(0.0, Effectiveness::NoEffect, Some("It had no effect!"))]
    fn test_effectiveness_messages(#[case] multiplier: f64, #[case] expected: Effectiveness, #[case] message: Option<&str>) {
        let effectiveness = Effectiveness::from_multiplier(multiplier);
        assert_eq!(effectiveness, expected);
        assert_eq!(effectiveness.message(), message);
    }
}
