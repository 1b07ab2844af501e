//! Encounter state machine.
//!
//! ```text
//! NotEngaged --start_combat--> Engaged --begin_turn--> PlayerTurn
//!      PlayerTurn --submit_player_action--> (EnemyTurn) --> Engaged | Resolved
//! ```
//!
//! One [`Encounter`] exclusively borrows the player and the monster for its
//! whole life, so nothing else can observe or mutate either side while a
//! round is being resolved. Every random draw goes through the injected
//! [`RngOracle`] with a seed derived from the encounter seed, the round, the
//! acting side and a [`RollContext`].

use tracing::{debug, info, warn};

use crate::ai::{DecisionContext, EnemyDecisionModel, PlayerActionKind, Stance};
use crate::config::CombatConfig;
use crate::env::{RngOracle, RollContext, compute_seed};
use crate::skills::SkillKind;
use crate::state::{AbilityEffect, Fighter, Monster, Player, SharedAbility, StatusReport};

use super::action::PlayerAction;
use super::damage::{self, Guard};
use super::event::CombatEvent;
use super::outcome::{
    CombatantSnapshot, EncounterError, EncounterStatus, Resolution, Rewards, RoundOutcome,
};

const PLAYER_SIDE: u32 = 0;
const ENEMY_SIDE: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    NotEngaged,
    /// Between rounds; the next player turn has not started.
    Engaged,
    /// Turn-start processing ran; waiting for the player's action.
    PlayerTurn,
    EnemyTurn,
    Resolved(Resolution),
}

/// A player action that uses the turn, after validation.
#[derive(Clone, Debug)]
enum Committed {
    /// Stunned at turn start.
    Nothing,
    Attack,
    Defend,
    Parry,
    Cast(SharedAbility),
    Flee,
}

impl Committed {
    fn kind(&self) -> Option<PlayerActionKind> {
        match self {
            Self::Nothing => None,
            Self::Attack => Some(PlayerActionKind::Attack),
            Self::Defend => Some(PlayerActionKind::Defend),
            Self::Parry => Some(PlayerActionKind::Parry),
            Self::Cast(_) => Some(PlayerActionKind::Cast),
            Self::Flee => Some(PlayerActionKind::Flee),
        }
    }
}

enum TurnStart {
    Ready,
    Stunned,
    Died,
}

pub struct Encounter<'a, R: RngOracle + ?Sized> {
    player: &'a mut Player,
    monster: &'a mut Monster,
    config: &'a CombatConfig,
    model: EnemyDecisionModel,
    rng: &'a R,
    seed: u64,
    round: u32,
    phase: Phase,
    /// Events produced outside a round (engagement), flushed into the next
    /// outcome.
    pending: Vec<CombatEvent>,
    last_player_action: Option<PlayerActionKind>,
}

impl<'a, R: RngOracle + ?Sized> Encounter<'a, R> {
    pub fn new(
        player: &'a mut Player,
        monster: &'a mut Monster,
        config: &'a CombatConfig,
        rng: &'a R,
        seed: u64,
    ) -> Self {
        Self {
            player,
            monster,
            config,
            model: EnemyDecisionModel::new(config.stance),
            rng,
            seed,
            round: 0,
            phase: Phase::NotEngaged,
            pending: Vec::new(),
            last_player_action: None,
        }
    }

    /// Creates the encounter and engages the monster.
    pub fn engage(
        player: &'a mut Player,
        monster: &'a mut Monster,
        config: &'a CombatConfig,
        rng: &'a R,
        seed: u64,
    ) -> Result<Self, EncounterError> {
        let mut encounter = Self::new(player, monster, config, rng, seed);
        encounter.start_combat()?;
        Ok(encounter)
    }

    /// `NotEngaged -> Engaged`. Fails if the monster is already dead.
    pub fn start_combat(&mut self) -> Result<(), EncounterError> {
        match self.phase {
            Phase::NotEngaged => {}
            Phase::Resolved(resolution) => {
                return Err(EncounterError::AlreadyResolved { resolution });
            }
            _ => return Ok(()),
        }
        if !self.monster.is_alive() {
            return Err(EncounterError::AlreadyDefeated {
                name: self.monster.name().to_string(),
            });
        }

        info!(
            player = self.player.name(),
            monster = self.monster.name(),
            seed = self.seed,
            "encounter engaged"
        );
        self.pending.push(CombatEvent::Engaged {
            monster: self.monster.name().to_string(),
        });
        self.phase = Phase::Engaged;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self.phase {
            Phase::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn monster(&self) -> &Monster {
        &*self.monster
    }

    /// Starts the player's turn: clears per-turn skill tracking and runs the
    /// player's status effects.
    ///
    /// When the player is stunned the whole round resolves here. Calling it
    /// again while an action is awaited changes nothing.
    pub fn begin_turn(&mut self) -> Result<RoundOutcome, EncounterError> {
        self.ensure_active()?;
        let mut events = std::mem::take(&mut self.pending);
        if self.phase == Phase::PlayerTurn {
            return Ok(self.outcome(events, EncounterStatus::Ongoing, false, true, None));
        }

        Ok(match self.start_player_turn(&mut events) {
            TurnStart::Ready => self.outcome(events, EncounterStatus::Ongoing, false, true, None),
            TurnStart::Stunned => self.resolve_round(events, Committed::Nothing),
            TurnStart::Died => self.finish(events, Resolution::Defeat),
        })
    }

    /// Feeds the player's action and resolves the rest of the round.
    ///
    /// If the turn has not started yet it is started first; a stun or a
    /// lethal poison tick then decides the round and `action` is ignored.
    /// `Status` and bad spell choices leave the turn open.
    pub fn submit_player_action(
        &mut self,
        action: PlayerAction,
    ) -> Result<RoundOutcome, EncounterError> {
        self.ensure_active()?;
        let mut events = std::mem::take(&mut self.pending);

        if self.phase == Phase::Engaged {
            match self.start_player_turn(&mut events) {
                TurnStart::Ready => {}
                TurnStart::Stunned => return Ok(self.resolve_round(events, Committed::Nothing)),
                TurnStart::Died => return Ok(self.finish(events, Resolution::Defeat)),
            }
        }

        let committed = match action {
            PlayerAction::Attack => Committed::Attack,
            PlayerAction::Defend => Committed::Defend,
            PlayerAction::Parry => Committed::Parry,
            PlayerAction::Flee => Committed::Flee,
            PlayerAction::Status => {
                events.push(CombatEvent::StatusShown {
                    player: CombatantSnapshot::of(&*self.player),
                    enemy: CombatantSnapshot::of(&*self.monster),
                });
                return Ok(self.outcome(events, EncounterStatus::Ongoing, false, true, None));
            }
            PlayerAction::Cast(number) => {
                let known = self.player.combatant.abilities.len();
                if known == 0 {
                    warn!("cast requested with no spells known");
                    events.push(CombatEvent::NoSpellsKnown);
                    return Ok(self.outcome(events, EncounterStatus::Ongoing, false, true, None));
                }
                if number == 0 || number > known {
                    warn!(number, known, "spell choice out of range");
                    events.push(CombatEvent::InvalidSpellChoice { number, known });
                    return Ok(self.outcome(events, EncounterStatus::Ongoing, false, true, None));
                }
                Committed::Cast(self.player.combatant.abilities[number - 1].clone())
            }
        };

        Ok(self.resolve_round(events, committed))
    }

    fn ensure_active(&self) -> Result<(), EncounterError> {
        match self.phase {
            Phase::NotEngaged => Err(EncounterError::NotEngaged),
            Phase::Resolved(resolution) => Err(EncounterError::AlreadyResolved { resolution }),
            _ => Ok(()),
        }
    }

    fn roll_seed(&self, side: u32, context: RollContext) -> u64 {
        compute_seed(self.seed, self.round as u64, side, context)
    }

    fn start_player_turn(&mut self, events: &mut Vec<CombatEvent>) -> TurnStart {
        self.round += 1;
        self.player.clear_affected_skills();
        events.push(CombatEvent::PlayerTurn { round: self.round });

        let report = self.player.process_turn_effects();
        push_status(events, self.player.name(), &report);

        if !self.player.is_alive() {
            return TurnStart::Died;
        }
        self.phase = Phase::PlayerTurn;
        if report.stunned {
            TurnStart::Stunned
        } else {
            TurnStart::Ready
        }
    }

    fn resolve_round(&mut self, mut events: Vec<CombatEvent>, committed: Committed) -> RoundOutcome {
        debug!(round = self.round, action = ?committed.kind(), "resolving round");

        match &committed {
            Committed::Nothing => events.push(CombatEvent::ActionSkipped {
                name: self.player.name().to_string(),
            }),
            Committed::Attack => events.push(CombatEvent::PlayerAttacks {
                target: self.monster.name().to_string(),
            }),
            Committed::Defend => events.push(CombatEvent::PlayerDefends),
            Committed::Parry => {
                events.push(CombatEvent::PlayerParries);
                self.grant(&mut events, SkillKind::Attack, self.config.practice.parry_attack_xp);
            }
            Committed::Cast(ability) => self.cast(&mut events, ability),
            Committed::Flee => {
                if self.try_flee(&mut events) {
                    return self.finish(events, Resolution::Fled);
                }
            }
        }
        self.last_player_action = committed.kind();

        if !self.monster.is_alive() {
            return self.finish_victory(events);
        }

        // Enemy turn.
        self.phase = Phase::EnemyTurn;
        events.push(CombatEvent::EnemyTurn { round: self.round });
        let report = self.monster.process_turn_effects();
        push_status(&mut events, self.monster.name(), &report);
        if !self.monster.is_alive() {
            return self.finish_victory(events);
        }

        let stance = if report.stunned {
            None
        } else {
            Some(self.decide_stance(&mut events))
        };

        if matches!(committed, Committed::Attack) {
            self.player_strike(&mut events, stance);
            if !self.monster.is_alive() {
                return self.finish_victory(events);
            }
        }

        if let Some(stance) = stance {
            let used_ability = self.try_monster_ability(&mut events);
            if !used_ability && stance == Stance::Attack && self.player.is_alive() {
                self.enemy_strike(&mut events, &committed);
            }
        }

        if !self.monster.is_alive() {
            return self.finish_victory(events);
        }
        if !self.player.is_alive() {
            return self.finish(events, Resolution::Defeat);
        }

        self.phase = Phase::Engaged;
        self.outcome(events, EncounterStatus::Ongoing, true, false, None)
    }

    fn cast(&mut self, events: &mut Vec<CombatEvent>, ability: &SharedAbility) {
        let mana = self.player.combatant.mana.current();
        if !self.player.combatant.mana.try_spend(ability.mana_cost) {
            events.push(CombatEvent::NotEnoughMana {
                ability: ability.name.clone(),
                cost: ability.mana_cost,
                mana,
            });
            return;
        }

        events.push(CombatEvent::SpellCast {
            ability: ability.name.clone(),
        });
        self.grant(events, SkillKind::Magic, self.config.practice.cast_magic_xp);

        match ability.effect {
            Some(AbilityEffect::Damage { amount }) => {
                let damage = self.monster.take_damage(amount, false);
                events.push(CombatEvent::AbilityDamage {
                    target: self.monster.name().to_string(),
                    damage,
                });
            }
            Some(AbilityEffect::Heal { amount }) => {
                let amount = self.player.heal(amount);
                events.push(CombatEvent::Healed {
                    name: self.player.name().to_string(),
                    amount,
                });
            }
            None => {}
        }
        if let Some(template) = ability.status_effect {
            let application = self.monster.apply_effect(template);
            events.push(CombatEvent::EffectApplied {
                target: self.monster.name().to_string(),
                effect: template.kind.tag(),
                application,
            });
        }
    }

    fn try_flee(&mut self, events: &mut Vec<CombatEvent>) -> bool {
        let chance_bp = damage::flee_chance_bp(
            self.player.skill_level(SkillKind::Agility),
            self.monster.attack_power(),
            &self.config.flee,
        );
        let roll = self
            .rng
            .roll_basis_points(self.roll_seed(PLAYER_SIDE, RollContext::Flee));
        let escaped = roll < chance_bp;
        debug!(chance_bp, roll, escaped, "flee attempt");
        events.push(CombatEvent::FleeAttempt { chance_bp, escaped });
        escaped
    }

    fn decide_stance(&mut self, events: &mut Vec<CombatEvent>) -> Stance {
        let health = self.monster.combatant.health;
        let ctx = DecisionContext::new(health.current(), health.maximum(), self.last_player_action);
        let decision = self.model.decide(
            &ctx,
            self.rng,
            self.roll_seed(ENEMY_SIDE, RollContext::EnemyStance),
        );

        let name = self.monster.name().to_string();
        events.push(CombatEvent::EnemyDeliberates {
            name: name.clone(),
            weights: decision.weights,
        });
        if decision.stance != Stance::Attack {
            events.push(CombatEvent::EnemyStance {
                name,
                stance: decision.stance,
            });
        }
        decision.stance
    }

    fn player_strike(&mut self, events: &mut Vec<CombatEvent>, stance: Option<Stance>) {
        let raw = damage::scale(self.player.attack_power(), self.config.player_damage_percent);
        let mitigation =
            damage::mitigate_player_strike(raw, stance, self.monster.defense(), self.config);
        events.push(CombatEvent::PlayerStrike {
            target: self.monster.name().to_string(),
            enemy_stance: stance,
            mitigation,
        });
        if mitigation.dealt > 0 {
            self.monster.take_damage(mitigation.dealt, true);
            self.grant(events, SkillKind::Attack, mitigation.dealt);
        }
    }

    /// Uses a monster ability instead of the basic attack when the roll
    /// allows it. Returns whether one was used.
    fn try_monster_ability(&mut self, events: &mut Vec<CombatEvent>) -> bool {
        let affordable = self.monster.affordable_abilities();
        if affordable.is_empty() {
            return false;
        }
        let roll = self
            .rng
            .roll_percent(self.roll_seed(ENEMY_SIDE, RollContext::MonsterAbility));
        if roll >= self.config.monster_ability_chance_percent {
            return false;
        }
        let pick = self.rng.roll_below(
            self.roll_seed(ENEMY_SIDE, RollContext::AbilityPick),
            affordable.len() as u32,
        ) as usize;
        let ability = &affordable[pick];

        self.monster.combatant.mana.drain(ability.mana_cost);
        events.push(CombatEvent::AbilityUsed {
            user: self.monster.name().to_string(),
            ability: ability.name.clone(),
        });
        debug!(ability = %ability.name, "monster ability");

        match ability.effect {
            Some(AbilityEffect::Damage { amount }) => {
                let damage = self.player.take_damage(amount, false);
                events.push(CombatEvent::AbilityDamage {
                    target: self.player.name().to_string(),
                    damage,
                });
            }
            Some(AbilityEffect::Heal { amount }) => {
                let amount = self.monster.heal(amount);
                events.push(CombatEvent::Healed {
                    name: self.monster.name().to_string(),
                    amount,
                });
            }
            None => {}
        }
        if let Some(template) = ability.status_effect {
            let application = self.player.apply_effect(template);
            events.push(CombatEvent::EffectApplied {
                target: self.player.name().to_string(),
                effect: template.kind.tag(),
                application,
            });
        }
        true
    }

    fn enemy_strike(&mut self, events: &mut Vec<CombatEvent>, committed: &Committed) {
        let raw = damage::scale(self.monster.attack_power(), self.config.enemy_damage_percent);
        let guard = match committed {
            Committed::Defend => Guard::Defend,
            Committed::Parry => Guard::Parry {
                agility_level: self.player.skill_level(SkillKind::Agility),
            },
            _ => Guard::Open,
        };
        let mitigation = damage::mitigate_enemy_strike(raw, guard, self.player.defense(), self.config);

        self.player.take_damage(mitigation.dealt, true);
        events.push(CombatEvent::EnemyStrike {
            attacker: self.monster.name().to_string(),
            guard,
            mitigation,
        });
        self.grant(events, SkillKind::Defense, mitigation.blocked);

        if matches!(guard, Guard::Parry { .. }) && self.player.is_alive() {
            let roll = self
                .rng
                .roll_percent(self.roll_seed(PLAYER_SIDE, RollContext::Counter));
            if roll < self.config.parry.counter_chance_percent {
                let damage = damage::scale(
                    self.player.attack_power(),
                    self.config.parry.counter_damage_percent,
                );
                self.monster.take_damage(damage, true);
                events.push(CombatEvent::Counter {
                    target: self.monster.name().to_string(),
                    damage,
                });
                self.grant(events, SkillKind::Attack, damage);
            }
        }
    }

    fn grant(&mut self, events: &mut Vec<CombatEvent>, skill: SkillKind, amount: u32) {
        if amount == 0 {
            return;
        }
        let gain = self.player.add_skill_xp(skill, amount as i64);
        events.push(CombatEvent::XpGained {
            skill,
            amount: gain.amount,
        });
        events.extend(gain.level_ups.into_iter().map(CombatEvent::LevelUp));
    }

    fn finish_victory(&mut self, mut events: Vec<CombatEvent>) -> RoundOutcome {
        let monster = self.monster.name().to_string();
        let xp_per_skill = self.monster.xp_yield / 2;

        events.push(CombatEvent::Defeated {
            name: monster.clone(),
        });
        events.push(CombatEvent::Victory {
            monster: monster.clone(),
            xp_per_skill,
        });
        self.grant(&mut events, SkillKind::Attack, xp_per_skill);
        self.grant(&mut events, SkillKind::Defense, xp_per_skill);

        let loot = self.monster.drop_loot();
        if !loot.is_empty() {
            events.push(CombatEvent::LootDropped {
                monster,
                items: loot.iter().map(|item| item.name.clone()).collect(),
            });
        }

        let rewards = Rewards {
            xp_per_skill,
            loot,
            final_boss: self.monster.final_boss,
        };
        self.phase = Phase::Resolved(Resolution::Victory);
        info!(round = self.round, monster = self.monster.name(), "encounter won");
        self.outcome(events, EncounterStatus::Victory, true, false, Some(rewards))
    }

    fn finish(&mut self, mut events: Vec<CombatEvent>, resolution: Resolution) -> RoundOutcome {
        match resolution {
            Resolution::Defeat => events.push(CombatEvent::PlayerDefeated),
            Resolution::Fled => events.push(CombatEvent::Fled),
            Resolution::Victory => return self.finish_victory(events),
        }
        self.phase = Phase::Resolved(resolution);
        info!(round = self.round, %resolution, "encounter ended");
        self.outcome(events, resolution.into(), true, false, None)
    }

    fn outcome(
        &self,
        events: Vec<CombatEvent>,
        status: EncounterStatus,
        turn_consumed: bool,
        awaiting_action: bool,
        rewards: Option<Rewards>,
    ) -> RoundOutcome {
        RoundOutcome {
            round: self.round,
            events,
            player: CombatantSnapshot::of(&*self.player),
            enemy: CombatantSnapshot::of(&*self.monster),
            status,
            turn_consumed,
            awaiting_action,
            rewards,
            skills_affected: self.player.skills_affected().iter().copied().collect(),
        }
    }
}

fn push_status(events: &mut Vec<CombatEvent>, name: &str, report: &StatusReport) {
    events.extend(report.ticks.iter().map(|tick| CombatEvent::Status {
        name: name.to_string(),
        tick: *tick,
    }));
}
