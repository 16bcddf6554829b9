//! Picking species out of the roster.

use crate::battle::rng::BattleRng;
use crate::unlocked::UnlockedSet;
use schema::NamedApiResource;

/// Species still worth encountering: those not yet unlocked, or the whole
/// roster once everything is.
pub fn available_for_encounter<'a>(
    roster: &'a [NamedApiResource],
    unlocked: &UnlockedSet,
) -> Vec<&'a NamedApiResource> {
    let locked: Vec<&NamedApiResource> = roster
        .iter()
        .filter(|entry| {
            entry
                .trailing_id()
                .map_or(true, |id| !unlocked.contains(id))
        })
        .collect();
    if locked.is_empty() {
        return roster.iter().collect();
    }
    locked
}

/// Uniform pick from [`available_for_encounter`]. None only for an empty roster.
pub fn pick_encounter<'a>(
    roster: &'a [NamedApiResource],
    unlocked: &UnlockedSet,
    rng: &mut dyn BattleRng,
) -> Option<&'a NamedApiResource> {
    let available = available_for_encounter(roster, unlocked);
    if available.is_empty() {
        return None;
    }
    let index = rng.next_index(available.len(), "encounter pick");
    Some(available[index])
}

/// Look a species up by name (case-insensitive) or by id.
pub fn find_species<'a>(roster: &'a [NamedApiResource], query: &str) -> Option<&'a NamedApiResource> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u32>() {
        return roster.iter().find(|entry| entry.trailing_id() == Some(id));
    }
    roster
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(query))
}
