//! Mitigation math for one round.
//!
//! Pure functions: they take the numbers involved and return how a strike
//! splits into blocked and dealt damage. Applying the result is the
//! encounter's job.

use crate::ai::Stance;
use crate::config::{CombatConfig, FleeRules, ParryRules};

/// `floor(power * percent / 100)`, treating negative power as zero and
/// saturating at `u32::MAX`.
pub fn scale(power: impl Into<i64>, percent: u32) -> u32 {
    let power = power.into().max(0).unsigned_abs();
    let scaled = power.saturating_mul(u64::from(percent)) / u64::from(CombatConfig::PERCENT);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

fn clamp_defense(defense: i32) -> u32 {
    defense.max(0).unsigned_abs()
}

/// How a strike was split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mitigation {
    pub raw: u32,
    pub blocked: u32,
    pub dealt: u32,
}

impl Mitigation {
    fn split(raw: u32, blocked: u32) -> Self {
        let blocked = blocked.min(raw);
        Self {
            raw,
            blocked,
            dealt: raw - blocked,
        }
    }

    /// `max(1, raw - defense)`: nothing is reported as blocked.
    fn standard(raw: u32, defense: i32) -> Self {
        let dealt = (i64::from(raw) - i64::from(defense)).max(1);
        let dealt = u32::try_from(dealt).unwrap_or(u32::MAX);
        Self {
            raw,
            blocked: 0,
            dealt,
        }
    }
}

/// The player's strike against the enemy's stance.
///
/// `None` means the enemy took no stance (it was stunned); the standard
/// formula applies, as it does against an attacking enemy.
pub fn mitigate_player_strike(
    raw: u32,
    enemy_stance: Option<Stance>,
    enemy_defense: i32,
    config: &CombatConfig,
) -> Mitigation {
    match enemy_stance {
        Some(Stance::Defend) => Mitigation::split(raw, clamp_defense(enemy_defense)),
        Some(Stance::Parry) => Mitigation::split(raw, scale(raw, config.enemy_parry_block_percent)),
        Some(Stance::Attack) | None => Mitigation::standard(raw, enemy_defense),
    }
}

/// Share of an enemy strike a parry blocks, in percent.
pub fn parry_block_percent(agility_level: u32, rules: &ParryRules) -> u32 {
    rules
        .base_block_percent
        .saturating_add(agility_level.saturating_mul(rules.block_percent_per_agility))
        .min(rules.max_block_percent)
}

/// The player's stance when an enemy strike lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Guard {
    Defend,
    Parry { agility_level: u32 },
    /// Casting, failed flee, stunned: armor still soaks what it can.
    Open,
}

/// An enemy strike against the player's guard.
pub fn mitigate_enemy_strike(
    raw: u32,
    guard: Guard,
    player_defense: i32,
    config: &CombatConfig,
) -> Mitigation {
    match guard {
        Guard::Defend | Guard::Open => Mitigation::split(raw, clamp_defense(player_defense)),
        Guard::Parry { agility_level } => {
            let percent = parry_block_percent(agility_level, &config.parry);
            Mitigation::split(raw, scale(raw, percent))
        }
    }
}

/// Flee chance in basis points, clamped to the configured bounds.
///
/// `base + per_point * (agility - attack / divisor)` computed exactly, so an
/// attack that is not a multiple of the divisor still counts fractionally.
pub fn flee_chance_bp(agility_level: u32, target_attack: i32, rules: &FleeRules) -> u32 {
    let divisor = rules.attack_divisor.max(1) as i64;
    let per_point = rules.per_point_bp as i64;
    let chance = rules.base_bp as i64 + per_point * agility_level as i64
        - per_point * target_attack as i64 / divisor;
    chance.clamp(rules.min_bp as i64, rules.max_bp as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CombatConfig {
        CombatConfig::default()
    }

    #[test]
    fn scaling_floors_and_ignores_negative_power() {
        assert_eq!(scale(10, 110), 11);
        assert_eq!(scale(13, 90), 11);
        assert_eq!(scale(-4, 110), 0);
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(scale(i32::MAX, u32::MAX), u32::MAX);
        assert_eq!(scale(u32::MAX, 50), u32::MAX / 2);

        let m = mitigate_player_strike(u32::MAX, Some(Stance::Attack), -5, &config());
        assert_eq!(m.dealt, u32::MAX);

        let m = mitigate_player_strike(u32::MAX, Some(Stance::Parry), 0, &config());
        assert_eq!(m.blocked, u32::MAX / 2);
        assert_eq!(m.dealt, u32::MAX - u32::MAX / 2);
    }

    #[test]
    fn trading_blows_uses_the_standard_formula() {
        let m = mitigate_player_strike(11, Some(Stance::Attack), 2, &config());
        assert_eq!(m.dealt, 9);
        let m = mitigate_player_strike(3, None, 8, &config());
        assert_eq!(m.dealt, 1);
    }

    #[test]
    fn enemy_defend_can_absorb_everything() {
        let m = mitigate_player_strike(4, Some(Stance::Defend), 6, &config());
        assert_eq!((m.blocked, m.dealt), (4, 0));
    }

    #[test]
    fn enemy_parry_blocks_half() {
        let m = mitigate_player_strike(11, Some(Stance::Parry), 2, &config());
        assert_eq!((m.blocked, m.dealt), (5, 6));
    }

    #[test]
    fn player_parry_scales_with_agility_and_caps() {
        let rules = ParryRules::default();
        assert_eq!(parry_block_percent(1, &rules), 41);
        assert_eq!(parry_block_percent(10, &rules), 50);
        assert_eq!(parry_block_percent(99, &rules), 80);

        let m = mitigate_enemy_strike(20, Guard::Parry { agility_level: 10 }, 5, &config());
        assert_eq!((m.blocked, m.dealt), (10, 10));
    }

    #[test]
    fn open_guard_soaks_with_defense() {
        let m = mitigate_enemy_strike(7, Guard::Open, 5, &config());
        assert_eq!((m.blocked, m.dealt), (5, 2));
        let m = mitigate_enemy_strike(7, Guard::Defend, -3, &config());
        assert_eq!((m.blocked, m.dealt), (0, 7));
    }

    #[test]
    fn flee_chance_is_clamped() {
        let rules = FleeRules::default();
        assert_eq!(flee_chance_bp(1, 8, &rules), 4_500);
        assert_eq!(flee_chance_bp(1, 10, &rules), 4_250);
        assert_eq!(flee_chance_bp(1, 400, &rules), 1_000);
        assert_eq!(flee_chance_bp(99, 0, &rules), 9_000);
        assert_eq!(flee_chance_bp(1, -40, &rules), 9_000);
    }
}
