use crate::battle::rng::BattleRng;
use crate::moves::Move;
use crate::pokemon::Combatant;
use crate::type_chart::{Effectiveness, TypeChart};

/// Smallest base roll.
pub const BASE_DAMAGE_MIN: u16 = 10;
/// Number of distinct base rolls: base is in `[10, 29]`.
pub const BASE_DAMAGE_SPREAD: u16 = 20;

/// Result of resolving one attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub base: u16,
    pub multiplier: f64,
    pub damage: u16,
}

impl DamageOutcome {
    pub fn effectiveness(&self) -> Effectiveness {
        Effectiveness::from_multiplier(self.multiplier)
    }
}

/// Uniform base damage in `[10, 29]`.
pub fn roll_base_damage(rng: &mut dyn BattleRng) -> u16 {
    let roll = (rng.next_unit("base damage") * BASE_DAMAGE_SPREAD as f64).floor() as u16;
    roll.min(BASE_DAMAGE_SPREAD - 1) + BASE_DAMAGE_MIN
}

/// Damage for `move_used` from `attacker` against `defender`.
///
/// Never fails: a move with no type attacks as Normal, and types missing from
/// the chart count as neutral.
pub fn resolve_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: &Move,
    chart: &TypeChart,
    rng: &mut dyn BattleRng,
) -> DamageOutcome {
    let base = roll_base_damage(rng);
    let attack_type = move_used.attack_type();
    let multiplier = chart.effectiveness(attack_type, &defender.types);
    let damage = (base as f64 * multiplier).floor() as u16;

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_used.name,
        %attack_type,
        base,
        multiplier,
        damage,
        "resolved damage"
    );

    DamageOutcome {
        base,
        multiplier,
        damage,
    }
}
