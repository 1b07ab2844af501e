//! Balance constants and tunable parameters for the combat core.

/// Combat balance parameters.
///
/// Every constant the resolver, the enemy decision model and the skill engine
/// consult lives here so content files can retune a build without touching
/// code. [`CombatConfig::default`] reproduces the shipped balance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Player strike multiplier in percent (110 = +10%).
    pub player_damage_percent: u32,
    /// Enemy strike multiplier in percent (90 = -10%).
    pub enemy_damage_percent: u32,
    /// Share of a player strike an enemy parry absorbs, in percent.
    pub enemy_parry_block_percent: u32,
    /// Player parry rules.
    pub parry: ParryRules,
    /// Flee probability rules.
    pub flee: FleeRules,
    /// Enemy stance weighting rules.
    pub stance: StanceRules,
    /// Skill practice rewards granted during combat.
    pub practice: PracticeRewards,
    /// Chance in percent that a monster with an affordable ability uses it
    /// instead of its basic attack.
    pub monster_ability_chance_percent: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status effect kind, with headroom for future kinds.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    pub const PERCENT: u32 = 100;
    pub const BASIS_POINTS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            player_damage_percent: 110,
            enemy_damage_percent: 90,
            enemy_parry_block_percent: 50,
            parry: ParryRules::default(),
            flee: FleeRules::default(),
            stance: StanceRules::default(),
            practice: PracticeRewards::default(),
            monster_ability_chance_percent: 50,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Player parry: `min(base + agility * per_level, cap)` percent of the raw
/// enemy strike is blocked, with a chance to counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParryRules {
    pub base_block_percent: u32,
    pub block_percent_per_agility: u32,
    pub max_block_percent: u32,
    pub counter_chance_percent: u32,
    /// Counter damage as a percent of the player's attack power.
    pub counter_damage_percent: u32,
}

impl Default for ParryRules {
    fn default() -> Self {
        Self {
            base_block_percent: 40,
            block_percent_per_agility: 1,
            max_block_percent: 80,
            counter_chance_percent: 25,
            counter_damage_percent: 50,
        }
    }
}

/// Flee chance in basis points:
///
/// ```text
/// chance = base + per_point * (agility - target_attack / attack_divisor)
/// clamped to [min, max]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeRules {
    pub base_bp: u32,
    pub per_point_bp: u32,
    pub attack_divisor: u32,
    pub min_bp: u32,
    pub max_bp: u32,
}

impl Default for FleeRules {
    fn default() -> Self {
        Self {
            base_bp: 5_000,
            per_point_bp: 500,
            attack_divisor: 4,
            min_bp: 1_000,
            max_bp: 9_000,
        }
    }
}

/// Weights the enemy decision model starts from and the adjustments it
/// applies each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StanceRules {
    pub base_attack: u32,
    pub base_defend: u32,
    pub base_parry: u32,
    /// Health ratio (percent) below which the enemy favours defending.
    pub low_health_percent: u32,
    pub low_health_defend_bonus: u32,
    /// Bonus given to the stance that answers the player's previous move.
    pub reactive_bonus: u32,
}

impl Default for StanceRules {
    fn default() -> Self {
        Self {
            base_attack: 50,
            base_defend: 25,
            base_parry: 25,
            low_health_percent: 30,
            low_health_defend_bonus: 20,
            reactive_bonus: 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PracticeRewards {
    /// Attack XP for taking a parry stance.
    pub parry_attack_xp: u32,
    /// Magic XP for a successful cast.
    pub cast_magic_xp: u32,
}

impl Default for PracticeRewards {
    fn default() -> Self {
        Self {
            parry_attack_xp: 2,
            cast_magic_xp: 5,
        }
    }
}
