//! Enemy decision model.
//!
//! Each enemy turn the model weighs the three stances from a small
//! [`DecisionContext`] (own health and the player's previous action), then
//! draws one stance in proportion to the weights. Nothing carries over between
//! turns except what the caller puts into the context.
//!
//! Weights are integers so the draw is an exact cumulative pick over
//! `[0, total)`; [`StanceWeights::probability`] exposes the normalized view.

use tracing::debug;

use crate::config::StanceRules;
use crate::env::RngOracle;

/// Posture taken for one round.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Stance {
    Attack,
    Defend,
    Parry,
}

/// What the player did last turn, as far as the enemy can tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlayerActionKind {
    Attack,
    Defend,
    Parry,
    Cast,
    Flee,
    Status,
}

impl PlayerActionKind {
    /// The stance that answers this action, if any.
    pub const fn counter_stance(&self) -> Option<Stance> {
        match self {
            Self::Attack => Some(Stance::Defend),
            Self::Defend => Some(Stance::Parry),
            Self::Parry => Some(Stance::Attack),
            Self::Cast | Self::Flee | Self::Status => None,
        }
    }
}

/// Everything the model looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionContext {
    pub health: u32,
    pub max_health: u32,
    pub last_player_action: Option<PlayerActionKind>,
}

impl DecisionContext {
    pub fn new(health: u32, max_health: u32, last_player_action: Option<PlayerActionKind>) -> Self {
        Self {
            health,
            max_health,
            last_player_action,
        }
    }

    /// `health / max_health < threshold_percent / 100`, in integers.
    /// A zero maximum counts as low.
    pub fn is_below(&self, threshold_percent: u32) -> bool {
        if self.max_health == 0 {
            return true;
        }
        (self.health as u64) * 100 < (self.max_health as u64) * threshold_percent as u64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StanceWeights {
    pub attack: u32,
    pub defend: u32,
    pub parry: u32,
}

impl StanceWeights {
    pub fn total(&self) -> u32 {
        self.attack + self.defend + self.parry
    }

    pub fn get(&self, stance: Stance) -> u32 {
        match stance {
            Stance::Attack => self.attack,
            Stance::Defend => self.defend,
            Stance::Parry => self.parry,
        }
    }

    fn bump(&mut self, stance: Stance, amount: u32) {
        match stance {
            Stance::Attack => self.attack += amount,
            Stance::Defend => self.defend += amount,
            Stance::Parry => self.parry += amount,
        }
    }

    /// Normalized weight of `stance`. All three sum to 1.0; an all-zero set
    /// is treated as uniform.
    pub fn probability(&self, stance: Stance) -> f64 {
        let total = self.total();
        if total == 0 {
            return 1.0 / 3.0;
        }
        self.get(stance) as f64 / total as f64
    }

    /// Cumulative pick in attack, defend, parry order. `roll` is taken
    /// modulo the total.
    pub fn pick(&self, roll: u32) -> Stance {
        let total = self.total();
        if total == 0 {
            return Stance::Attack;
        }
        let roll = roll % total;
        if roll < self.attack {
            Stance::Attack
        } else if roll < self.attack + self.defend {
            Stance::Defend
        } else {
            Stance::Parry
        }
    }
}

/// A drawn stance together with the weights it was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub stance: Stance,
    pub weights: StanceWeights,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EnemyDecisionModel {
    rules: StanceRules,
}

impl EnemyDecisionModel {
    pub fn new(rules: StanceRules) -> Self {
        Self { rules }
    }

    pub fn weigh(&self, ctx: &DecisionContext) -> StanceWeights {
        let mut weights = StanceWeights {
            attack: self.rules.base_attack,
            defend: self.rules.base_defend,
            parry: self.rules.base_parry,
        };

        if ctx.is_below(self.rules.low_health_percent) {
            weights.bump(Stance::Defend, self.rules.low_health_defend_bonus);
        }
        if let Some(stance) = ctx.last_player_action.and_then(|a| a.counter_stance()) {
            weights.bump(stance, self.rules.reactive_bonus);
        }

        debug!(
            health = ctx.health,
            max_health = ctx.max_health,
            last = ?ctx.last_player_action,
            attack = weights.attack,
            defend = weights.defend,
            parry = weights.parry,
            "enemy stance weights"
        );
        weights
    }

    /// Weighs the stances and draws one with `rng`.
    pub fn decide<R: RngOracle + ?Sized>(&self, ctx: &DecisionContext, rng: &R, seed: u64) -> Decision {
        let weights = self.weigh(ctx);
        let stance = weights.pick(rng.roll_below(seed, weights.total()));
        debug!(%stance, "enemy stance drawn");
        Decision { stance, weights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};
    use strum::IntoEnumIterator;

    fn model() -> EnemyDecisionModel {
        EnemyDecisionModel::default()
    }

    #[test]
    fn healthy_enemy_uses_base_weights() {
        let w = model().weigh(&DecisionContext::new(30, 30, None));
        assert_eq!((w.attack, w.defend, w.parry), (50, 25, 25));
    }

    #[test]
    fn low_health_and_reaction_stack_on_defend() {
        let ctx = DecisionContext::new(2, 30, Some(PlayerActionKind::Attack));
        let w = model().weigh(&ctx);
        assert_eq!((w.attack, w.defend, w.parry), (50, 60, 25));
    }

    #[test]
    fn reactions_answer_the_previous_move() {
        let defend = model().weigh(&DecisionContext::new(30, 30, Some(PlayerActionKind::Defend)));
        assert_eq!(defend.parry, 40);
        let parry = model().weigh(&DecisionContext::new(30, 30, Some(PlayerActionKind::Parry)));
        assert_eq!(parry.attack, 65);
        let cast = model().weigh(&DecisionContext::new(30, 30, Some(PlayerActionKind::Cast)));
        assert_eq!(cast.total(), 100);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!DecisionContext::new(9, 30, None).is_below(30));
        assert!(DecisionContext::new(8, 30, None).is_below(30));
        assert!(DecisionContext::new(0, 0, None).is_below(30));
    }

    #[test]
    fn probabilities_sum_to_one() {
        let health_cases = [(0, 30), (30, 30), (5, 100), (0, 0)];
        let actions = [
            None,
            Some(PlayerActionKind::Attack),
            Some(PlayerActionKind::Defend),
            Some(PlayerActionKind::Parry),
            Some(PlayerActionKind::Flee),
        ];
        for (health, max) in health_cases {
            for last in actions {
                let w = model().weigh(&DecisionContext::new(health, max, last));
                let sum: f64 = Stance::iter().map(|s| w.probability(s)).sum();
                assert!((sum - 1.0).abs() < 1e-9);
                assert!(w.probability(Stance::Attack) > 0.0);
            }
        }
    }

    #[test]
    fn pick_walks_cumulative_ranges() {
        let w = StanceWeights {
            attack: 50,
            defend: 25,
            parry: 25,
        };
        assert_eq!(w.pick(0), Stance::Attack);
        assert_eq!(w.pick(49), Stance::Attack);
        assert_eq!(w.pick(50), Stance::Defend);
        assert_eq!(w.pick(75), Stance::Parry);
        assert_eq!(w.pick(99), Stance::Parry);
    }

    #[test]
    fn decide_uses_the_oracle() {
        let ctx = DecisionContext::new(30, 30, None);
        let rng = ScriptedRng::new([60]);
        assert_eq!(model().decide(&ctx, &rng, 0).stance, Stance::Defend);

        let first = model().decide(&ctx, &PcgRng, 11);
        let again = model().decide(&ctx, &PcgRng, 11);
        assert_eq!(first, again);
    }
}
