//! Narrated combat events.
//!
//! The encounter never prints. Every round returns the list of events it
//! produced; a front end renders them with [`core::fmt::Display`] or consumes
//! the structured fields directly.

use core::fmt;

use crate::ai::{Stance, StanceWeights};
use crate::skills::{LevelBonus, LevelUp, SkillKind};
use crate::state::{EffectApplication, StatusEffectTag, StatusTick};

use super::damage::{Guard, Mitigation};
use super::outcome::CombatantSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum CombatEvent {
    Engaged {
        monster: String,
    },
    PlayerTurn {
        round: u32,
    },
    EnemyTurn {
        round: u32,
    },
    /// Turn-start effect processing on `name`.
    Status {
        name: String,
        tick: StatusTick,
    },
    EffectApplied {
        target: String,
        effect: StatusEffectTag,
        application: EffectApplication,
    },
    ActionSkipped {
        name: String,
    },
    PlayerAttacks {
        target: String,
    },
    PlayerDefends,
    PlayerParries,
    SpellCast {
        ability: String,
    },
    NotEnoughMana {
        ability: String,
        cost: u32,
        mana: u32,
    },
    NoSpellsKnown,
    InvalidSpellChoice {
        number: usize,
        known: usize,
    },
    FleeAttempt {
        chance_bp: u32,
        escaped: bool,
    },
    StatusShown {
        player: CombatantSnapshot,
        enemy: CombatantSnapshot,
    },
    EnemyDeliberates {
        name: String,
        weights: StanceWeights,
    },
    EnemyStance {
        name: String,
        stance: Stance,
    },
    PlayerStrike {
        target: String,
        enemy_stance: Option<Stance>,
        mitigation: Mitigation,
    },
    EnemyStrike {
        attacker: String,
        guard: Guard,
        mitigation: Mitigation,
    },
    Counter {
        target: String,
        damage: u32,
    },
    AbilityUsed {
        user: String,
        ability: String,
    },
    AbilityDamage {
        target: String,
        damage: u32,
    },
    Healed {
        name: String,
        amount: u32,
    },
    XpGained {
        skill: SkillKind,
        amount: u64,
    },
    LevelUp(LevelUp),
    Defeated {
        name: String,
    },
    Victory {
        monster: String,
        xp_per_skill: u32,
    },
    LootDropped {
        monster: String,
        items: Vec<String>,
    },
    PlayerDefeated,
    Fled,
}

fn percent(bp: u32) -> u32 {
    bp / 100
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engaged { monster } => write!(f, "You engage the {monster}!"),
            Self::PlayerTurn { round } => write!(f, "=== Round {round}: your turn ==="),
            Self::EnemyTurn { .. } => f.write_str("=== Enemy turn ==="),
            Self::Status { name, tick } => match tick {
                StatusTick::PoisonDamage { damage } => {
                    write!(f, "{name} takes {damage} damage from poison!")
                }
                StatusTick::Stunned => write!(f, "{name} is stunned and cannot act!"),
                StatusTick::AttackSurge => write!(f, "{name} feels a surge of strength!"),
                StatusTick::DefenseBolstered => {
                    write!(f, "{name}'s defenses are bolstered by a magical effect.")
                }
                StatusTick::Expired(tag) => {
                    write!(f, "{name} is no longer affected by {}.", tag.label())
                }
            },
            Self::EffectApplied {
                target,
                effect,
                application,
            } => match application {
                EffectApplication::Added => {
                    write!(f, "{target} is now afflicted with {}!", effect.label())
                }
                EffectApplication::Refreshed => {
                    write!(f, "The {} on {target} has been refreshed.", effect.label())
                }
                EffectApplication::Rejected => {
                    write!(f, "{target} shrugs off the {}.", effect.label())
                }
            },
            Self::ActionSkipped { name } => write!(f, "{name} loses the turn."),
            Self::PlayerAttacks { target } => write!(f, "You attack the {target}!"),
            Self::PlayerDefends => f.write_str("You brace yourself for an attack, focusing on defense."),
            Self::PlayerParries => {
                f.write_str("You take a ready stance, preparing to parry the next blow.")
            }
            Self::SpellCast { ability } => write!(f, "You cast {ability}!"),
            Self::NotEnoughMana {
                ability,
                cost,
                mana,
            } => write!(f, "Not enough mana for {ability} ({mana}/{cost} MP)!"),
            Self::NoSpellsKnown => f.write_str("You don't know any spells!"),
            Self::InvalidSpellChoice { number, known } => {
                write!(f, "Invalid spell choice {number} (you know {known}).")
            }
            Self::FleeAttempt { chance_bp, escaped } => {
                write!(f, "(Your chance to flee is {}%) ", percent(*chance_bp))?;
                if *escaped {
                    f.write_str("You successfully escape from the battle!")
                } else {
                    f.write_str("You failed to escape!")
                }
            }
            Self::StatusShown { player, enemy } => write!(f, "{player}\n{enemy}"),
            Self::EnemyDeliberates { name, weights } => {
                let total = weights.total().max(1);
                write!(
                    f,
                    "({name} considers its options: attack {}%, defend {}%, parry {}%)",
                    weights.attack * 100 / total,
                    weights.defend * 100 / total,
                    weights.parry * 100 / total
                )
            }
            Self::EnemyStance { name, stance } => match stance {
                Stance::Attack => write!(f, "{name} moves to attack."),
                Stance::Defend => write!(f, "{name} takes a defensive stance."),
                Stance::Parry => write!(f, "{name} readies itself to parry."),
            },
            Self::PlayerStrike {
                target,
                enemy_stance,
                mitigation,
            } => match enemy_stance {
                Some(Stance::Defend) => write!(
                    f,
                    "{target} defends, blocking {} damage! Your attack deals {}.",
                    mitigation.blocked, mitigation.dealt
                ),
                Some(Stance::Parry) => write!(
                    f,
                    "{target} parries, blocking {} damage! Your attack deals {}.",
                    mitigation.blocked, mitigation.dealt
                ),
                _ => write!(f, "Your attack hits {target} for {} damage!", mitigation.dealt),
            },
            Self::EnemyStrike {
                attacker,
                guard,
                mitigation,
            } => {
                write!(
                    f,
                    "The {attacker} attacks you for {} potential damage! ",
                    mitigation.raw
                )?;
                match guard {
                    Guard::Defend => write!(
                        f,
                        "You defend, blocking {} and taking {} damage.",
                        mitigation.blocked, mitigation.dealt
                    ),
                    Guard::Parry { .. } => write!(
                        f,
                        "You parry, blocking {} and taking {} damage.",
                        mitigation.blocked, mitigation.dealt
                    ),
                    Guard::Open => write!(
                        f,
                        "Your armor mitigates {}. You take {} damage.",
                        mitigation.blocked, mitigation.dealt
                    ),
                }
            }
            Self::Counter { target, damage } => {
                write!(f, "You counter-attack the {target} for {damage} damage!")
            }
            Self::AbilityUsed { user, ability } => write!(f, "The {user} uses {ability}!"),
            Self::AbilityDamage { target, damage } => write!(f, "{target} takes {damage} damage!"),
            Self::Healed { name, amount } => write!(f, "{name} recovers {amount} health."),
            Self::XpGained { skill, amount } => write!(f, "You gain {amount} {skill} XP."),
            Self::LevelUp(level_up) => {
                write!(
                    f,
                    "** Your {} level has increased to {}! **",
                    level_up.skill, level_up.level
                )?;
                match level_up.bonus {
                    LevelBonus::BaseAttack { base_attack } => {
                        write!(f, " Base Attack is now {base_attack}.")
                    }
                    LevelBonus::Fortitude {
                        base_defense,
                        max_health,
                    } => write!(
                        f,
                        " Base Defense is now {base_defense} and Max HP is now {max_health}."
                    ),
                    LevelBonus::ManaPool { max_mana } => write!(f, " Max Mana is now {max_mana}."),
                    LevelBonus::WordSlots { max_words_to_bind } => {
                        write!(f, " You can now bind {max_words_to_bind} words at once!")
                    }
                    LevelBonus::None => Ok(()),
                }
            }
            Self::Defeated { name } => write!(f, "{name} has been defeated!"),
            Self::Victory {
                monster,
                xp_per_skill,
            } => write!(
                f,
                "You have defeated the {monster}! (+{xp_per_skill} Attack and Defense XP)"
            ),
            Self::LootDropped { monster, items } => {
                write!(f, "The {monster} dropped: {}", items.join(", "))
            }
            Self::PlayerDefeated => f.write_str("You have been defeated."),
            Self::Fled => f.write_str("You escaped."),
        }
    }
}
