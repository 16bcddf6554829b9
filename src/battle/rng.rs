use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision in a battle: damage rolls, move sampling,
/// opponent move choice, flee and catch rolls.
pub trait BattleRng {
    /// Uniform draw in `[0, 1)`. `reason` labels the draw for debugging.
    fn next_unit(&mut self, reason: &str) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize, reason: &str) -> usize {
        let scaled = (self.next_unit(reason) * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }
}

/// OS-seeded generator for real play.
#[derive(Debug, Clone)]
pub struct SystemRng {
    rng: StdRng,
}

impl SystemRng {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible stream, e.g. for replaying a demo run.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng for SystemRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value: f64 = self.rng.random();
        tracing::trace!(value, reason, "rng draw");
        value
    }
}

/// Replays a fixed list of draws. Panics when exhausted so a test that
/// consumes more randomness than it scripted fails loudly.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl ScriptedRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl BattleRng for ScriptedRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_rng_replays_in_order() {
        let mut rng = ScriptedRng::new_for_test(vec![0.1, 0.9]);
        assert_eq!(rng.next_unit("first"), 0.1);
        assert_eq!(rng.remaining(), 1);
        assert_eq!(rng.next_unit("second"), 0.9);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "ScriptedRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = ScriptedRng::new_for_test(vec![]);
        rng.next_unit("nothing scripted");
    }

    #[test]
    fn test_next_index_stays_in_bounds() {
        let mut rng = ScriptedRng::new_for_test(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(rng.next_index(4, "low"), 0);
        assert_eq!(rng.next_index(4, "mid"), 2);
        assert_eq!(rng.next_index(4, "high"), 3);
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_in_range() {
        let mut a = SystemRng::seeded(7);
        let mut b = SystemRng::seeded(7);
        for _ in 0..32 {
            let x = a.next_unit("a");
            assert_eq!(x, b.next_unit("b"));
            assert!((0.0..1.0).contains(&x));
        }
    }
}
