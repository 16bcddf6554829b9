//! Opponent behaviors.

use crate::battle::rng::BattleRng;
use crate::moves::Move;
use crate::pokemon::Combatant;

/// A trait for any system that can pick the opponent's move.
pub trait Behavior: Send + Sync {
    /// Pick the move `attacker` uses against `defender`.
    fn choose_move(&self, attacker: &Combatant, defender: &Combatant, rng: &mut dyn BattleRng)
        -> Move;
}

/// Uniform random choice over the attacker's full valid move list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMoveAI;

impl RandomMoveAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomMoveAI {
    fn choose_move(
        &self,
        attacker: &Combatant,
        _defender: &Combatant,
        rng: &mut dyn BattleRng,
    ) -> Move {
        if attacker.moves.is_empty() {
            tracing::warn!(pokemon = %attacker.name, "no valid moves, falling back to struggle");
            return Move::struggle();
        }
        let index = rng.next_index(attacker.moves.len(), "opponent move choice");
        attacker.moves[index].clone()
    }
}
