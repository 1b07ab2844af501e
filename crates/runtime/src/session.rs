//! Drives encounters from target selection to loot hand-back.
//!
//! A [`CombatSession`] owns nothing of the world. For each fight it borrows
//! the player, a [`Location`] and an [`ActionSource`], runs the encounter
//! state machine until it resolves, and only then notifies listeners and
//! updates the location.

use serde::Serialize;
use tracing::{debug, info, warn};

use combat_core::{
    CombatConfig, CombatError, CombatEvent, Encounter, Item, Player, PlayerAction, Resolution,
    RngOracle, RoundOutcome,
};

use crate::api::{ActionPrompt, ActionSource, Result, RuntimeError};
use crate::listeners::ListenerRegistry;
use crate::world::Location;

/// Golden-ratio increment between consecutive encounter seeds.
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Summary of one finished encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EncounterReport {
    pub monster: String,
    pub resolution: Resolution,
    pub rounds: u32,
    pub seed: u64,
    /// Every event of the encounter in order.
    pub transcript: Vec<CombatEvent>,
    /// Items left in the location on victory.
    pub loot: Vec<Item>,
    /// A final boss fell.
    pub campaign_complete: bool,
}

pub struct CombatSession<'a, R: RngOracle + ?Sized> {
    config: &'a CombatConfig,
    rng: &'a R,
    listeners: ListenerRegistry,
    seed: u64,
    encounters: u64,
}

impl<'a, R: RngOracle + ?Sized> CombatSession<'a, R> {
    pub fn new(config: &'a CombatConfig, rng: &'a R, seed: u64) -> Self {
        Self {
            config,
            rng,
            listeners: ListenerRegistry::new(),
            seed,
            encounters: 0,
        }
    }

    #[must_use]
    pub fn with_listeners(mut self, listeners: ListenerRegistry) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Number of encounters started so far.
    pub fn encounters(&self) -> u64 {
        self.encounters
    }

    /// Seed the next encounter will use. The first one uses the base seed.
    pub fn next_seed(&self) -> u64 {
        self.seed
            .wrapping_add(self.encounters.wrapping_mul(SEED_STRIDE))
    }

    /// Fights the first live monster in `location` whose name contains
    /// `query`. A matching monster that is already dead yields
    /// [`EncounterError::AlreadyDefeated`](combat_core::EncounterError).
    pub async fn engage<L, S>(
        &mut self,
        player: &mut Player,
        location: &mut L,
        query: &str,
        source: &mut S,
    ) -> Result<EncounterReport>
    where
        L: Location + ?Sized,
        S: ActionSource + ?Sized,
    {
        self.engage_observed(player, location, query, source, |_| {})
            .await
    }

    /// Like [`engage`](Self::engage), handing every round outcome to
    /// `observe` as soon as it is produced.
    pub async fn engage_observed<L, S, F>(
        &mut self,
        player: &mut Player,
        location: &mut L,
        query: &str,
        source: &mut S,
        mut observe: F,
    ) -> Result<EncounterReport>
    where
        L: Location + ?Sized,
        S: ActionSource + ?Sized,
        F: FnMut(&RoundOutcome),
    {
        let Some(index) = location.find_target(query) else {
            warn!(query, location = location.name(), "no target to attack");
            return Err(RuntimeError::NoSuchTarget {
                name: query.trim().to_string(),
            });
        };

        let seed = self.next_seed();
        let config = self.config;
        let rng = self.rng;

        let monster = location
            .monster_mut(index)
            .ok_or_else(|| RuntimeError::NoSuchTarget {
                name: query.trim().to_string(),
            })?;
        let monster_name = monster.combatant.name.clone();

        let mut encounter = Encounter::engage(player, monster, config, rng, seed)?;
        self.encounters += 1;
        info!(monster = %monster_name, seed, "session engaged");

        let mut transcript = Vec::new();
        let mut rewards = None;
        let mut outcome = encounter.begin_turn()?;
        let resolution = loop {
            observe(&outcome);
            if outcome.rewards.is_some() {
                rewards = outcome.rewards.take();
            }
            let status = outcome.status;
            let awaiting = outcome.awaiting_action;
            transcript.append(&mut outcome.events);

            if let Some(resolution) = status.resolution() {
                break resolution;
            }

            outcome = if awaiting {
                let prompt =
                    ActionPrompt::new(encounter.round(), encounter.player(), encounter.monster());
                let action = read_action(source, &prompt).await?;
                encounter.submit_player_action(action)?
            } else {
                encounter.begin_turn()?
            };
        };
        let rounds = encounter.round();
        drop(encounter);

        let mut report = EncounterReport {
            monster: monster_name,
            resolution,
            rounds,
            seed,
            transcript,
            loot: Vec::new(),
            campaign_complete: false,
        };

        if let Some(rewards) = rewards {
            if let Some(monster) = location.monsters().get(index) {
                self.listeners.notify_kill(player, monster);
                self.listeners.notify_loot(player, monster, &rewards.loot);
            }
            location.add_items(rewards.loot.clone());
            location.remove_monster(index);
            report.loot = rewards.loot;
            report.campaign_complete = rewards.final_boss;
        }

        info!(
            monster = %report.monster,
            resolution = %report.resolution,
            rounds = report.rounds,
            "session encounter finished"
        );
        Ok(report)
    }
}

/// Asks until the source produces a command that parses.
async fn read_action<S>(source: &mut S, prompt: &ActionPrompt) -> Result<PlayerAction>
where
    S: ActionSource + ?Sized,
{
    loop {
        let input = source.next_input(prompt).await?;
        match input.parse::<PlayerAction>() {
            Ok(action) => {
                debug!(kind = %action.kind(), ?action, "player action");
                return Ok(action);
            }
            Err(error) => {
                let error = RuntimeError::InvalidAction(error);
                warn!(
                    input = %input.trim(),
                    code = error.error_code(),
                    %error,
                    "rejected player input"
                );
                source.rejected(&input, &error);
            }
        }
    }
}
