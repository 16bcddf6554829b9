use crate::battle::rng::BattleRng;

/// Catch chance at half health or above.
pub const BASE_CATCH_RATE: f64 = 0.3;
/// Bonus per unit of health missing below half.
pub const LOW_HEALTH_BONUS: f64 = 0.1;
pub const LOW_HEALTH_THRESHOLD: f64 = 0.5;
pub const MAX_CATCH_RATE: f64 = 0.9;

/// Catch chance for a target at `health_fraction` (0.0 to 1.0) of its health.
///
/// Flat at 0.3 from half health up; below that it grows as health drops.
/// Never above 0.9.
pub fn calculate_catch_rate(health_fraction: f64) -> f64 {
    let mut rate = BASE_CATCH_RATE;
    if health_fraction < LOW_HEALTH_THRESHOLD {
        rate += (LOW_HEALTH_THRESHOLD - health_fraction) * LOW_HEALTH_BONUS;
    }
    rate.min(MAX_CATCH_RATE)
}

/// The target's health isn't tracked outside battle, so each throw sees a
/// fresh random value.
pub fn roll_target_health(rng: &mut dyn BattleRng) -> f64 {
    rng.next_unit("catch target health")
}

/// Returns true if the catch succeeds.
pub fn roll_catch_success(catch_rate: f64, rng: &mut dyn BattleRng) -> bool {
    rng.next_unit("catch roll") < catch_rate
}

/// Get a descriptive catch rate category for display purposes
pub fn get_catch_rate_description(catch_rate: f64) -> &'static str {
    match catch_rate {
        r if r >= 0.34 => "Good",
        r if r >= 0.32 => "Fair",
        _ => "Poor",
    }
}
