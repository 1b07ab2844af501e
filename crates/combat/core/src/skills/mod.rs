//! Skill progression.
//!
//! Sixteen skills share one experience curve. `xp` is cumulative: it is the
//! total ever earned in the skill, and a skill reaches level `L` once
//! `xp >= total_xp_for_level(L)`.
//!
//! [`Skill::add_xp`] only moves the counters and reports every level crossed.
//! The stat bonus tied to each crossing is applied by the owner, see
//! [`crate::state::Player::add_skill_xp`].

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{CombatError, ErrorSeverity};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SkillKind {
    Attack,
    Defense,
    Agility,
    Magic,
    Crafting,
    Wordbinding,
    Mining,
    Smelting,
    Smithing,
    Thieving,
    Woodcutting,
    Lockpicking,
    Fishing,
    Cooking,
    Herblore,
    Hunting,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("unknown skill '{name}'")]
    UnknownSkill { name: String },
}

impl CombatError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill { .. } => "SKILL_UNKNOWN",
        }
    }
}

/// Total experience needed to reach `level`.
///
/// `floor( sum_{l=1}^{level-1} floor(l + 300 * 2^(l/7)) / 4 )`, saturating
/// at `u64::MAX` for levels far past [`Skill::MAX_LEVEL`].
pub fn total_xp_for_level(level: u32) -> u64 {
    let points = (1..level.max(1))
        .map(|l| (l as f64 + 300.0 * 2f64.powf(l as f64 / 7.0)).floor() as u64)
        .fold(0u64, u64::saturating_add);
    points / 4
}

/// One skill's level and cumulative experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    kind: SkillKind,
    level: u32,
    xp: u64,
}

impl Skill {
    /// Highest reachable level. Experience keeps accumulating past it.
    pub const MAX_LEVEL: u32 = 120;

    pub fn new(kind: SkillKind) -> Self {
        Self { kind, level: 1, xp: 0 }
    }

    /// A skill sitting exactly on the threshold of `level`.
    pub fn at_level(kind: SkillKind, level: u32) -> Self {
        let level = level.clamp(1, Self::MAX_LEVEL);
        Self {
            kind,
            level,
            xp: total_xp_for_level(level),
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Cumulative experience.
    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Cumulative experience at which the next level is reached.
    pub fn xp_to_next_level(&self) -> u64 {
        total_xp_for_level(self.level + 1)
    }

    /// Experience earned past the current level's threshold.
    pub fn xp_into_level(&self) -> u64 {
        self.xp.saturating_sub(total_xp_for_level(self.level))
    }

    /// Adds experience and returns every level reached, in order.
    ///
    /// Non-positive grants are a no-op. Levelling stops at
    /// [`Skill::MAX_LEVEL`].
    pub fn add_xp(&mut self, amount: i64) -> Vec<u32> {
        let mut reached = Vec::new();
        if amount <= 0 {
            return reached;
        }
        self.xp = self.xp.saturating_add(amount as u64);
        while self.level < Self::MAX_LEVEL && self.xp >= self.xp_to_next_level() {
            self.level += 1;
            reached.push(self.level);
        }
        reached
    }
}

/// Stat change applied for one level crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelBonus {
    BaseAttack { base_attack: u32 },
    /// Also fully heals.
    Fortitude { base_defense: u32, max_health: u32 },
    /// Also fully restores mana.
    ManaPool { max_mana: u32 },
    WordSlots { max_words_to_bind: u32 },
    /// No mechanical effect.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub skill: SkillKind,
    pub level: u32,
    pub bonus: LevelBonus,
}

/// Experience granted to one skill and the level-ups it caused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillGain {
    pub amount: u64,
    pub level_ups: Vec<LevelUp>,
}

/// Every skill of a player, one entry per [`SkillKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBook {
    skills: [Skill; SkillKind::COUNT],
}

impl SkillBook {
    pub fn new() -> Self {
        let mut skills = [Skill::new(SkillKind::Attack); SkillKind::COUNT];
        for (slot, kind) in skills.iter_mut().zip(SkillKind::iter()) {
            *slot = Skill::new(kind);
        }
        Self { skills }
    }

    pub fn get(&self, kind: SkillKind) -> &Skill {
        &self.skills[kind as usize]
    }

    pub fn get_mut(&mut self, kind: SkillKind) -> &mut Skill {
        &mut self.skills[kind as usize]
    }

    pub fn level(&self, kind: SkillKind) -> u32 {
        self.get(kind).level()
    }

    /// Replaces one skill's record.
    pub fn set(&mut self, skill: Skill) {
        self.skills[skill.kind() as usize] = skill;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }
}

impl Default for SkillBook {
    fn default() -> Self {
        Self::new()
    }
}
