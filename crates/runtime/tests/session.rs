//! End-to-end sessions: target selection, the action loop, and what a
//! victory leaves behind.

use std::sync::{Arc, Mutex};

use combat_content::{ContentFactory, embedded};
use combat_core::{
    CombatConfig, CombatError, CombatEvent, EncounterError, Fighter, Item, Monster, PcgRng, Player,
    Resolution, ScriptedRng,
};
use combat_runtime::{
    CombatSession, InMemoryLocation, KillListener, ListenerRegistry, Location, LootListener,
    RuntimeError, ScriptedActions,
};

fn rat() -> Monster {
    Monster::new("Rat", 5, 1, 0, 2).with_loot(vec![Item::new("Leather", Default::default())])
}

#[derive(Default)]
struct Journal {
    kills: Mutex<Vec<String>>,
    drops: Mutex<Vec<String>>,
}

impl KillListener for Journal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn on_kill(&self, _player: &Player, monster: &Monster) -> bool {
        self.kills.lock().unwrap().push(monster.name().to_string());
        true
    }
}

impl LootListener for Journal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn on_loot(&self, _player: &Player, _monster: &Monster, items: &[Item]) {
        let mut drops = self.drops.lock().unwrap();
        drops.extend(items.iter().map(|item| item.name.clone()));
    }
}

#[tokio::test]
async fn victory_hands_loot_to_the_location_and_listeners() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let journal = Arc::new(Journal::default());
    let listeners = ListenerRegistry::new()
        .with_kill(journal.clone())
        .with_loot(journal.clone());
    let mut session = CombatSession::new(&config, &rng, 11).with_listeners(listeners);

    let mut player = Player::new("Hero");
    let mut cellar = InMemoryLocation::new("Cellar").with_monster(rat());
    let mut source = ScriptedActions::new(["attack"]);

    let report = session
        .engage(&mut player, &mut cellar, "rat", &mut source)
        .await
        .unwrap();

    assert_eq!(report.resolution, Resolution::Victory);
    assert_eq!(report.monster, "Rat");
    assert_eq!(report.rounds, 1);
    assert_eq!(report.seed, 11);
    assert!(!report.campaign_complete);
    assert_eq!(report.loot.len(), 1);
    assert!(matches!(report.transcript.first(), Some(CombatEvent::Engaged { .. })));
    assert!(
        report
            .transcript
            .iter()
            .any(|e| matches!(e, CombatEvent::Victory { .. }))
    );

    assert!(cellar.monsters().is_empty());
    assert_eq!(cellar.items()[0].name, "Leather");
    assert_eq!(*journal.kills.lock().unwrap(), vec!["Rat".to_string()]);
    assert_eq!(*journal.drops.lock().unwrap(), vec!["Leather".to_string()]);
    assert_eq!(source.remaining(), 0);
}

#[tokio::test]
async fn missing_target_is_reported_before_any_fight() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 1);
    let mut player = Player::new("Hero");
    let mut cellar = InMemoryLocation::new("Cellar").with_monster(rat());
    let mut source = ScriptedActions::new(["attack"]);

    let err = session
        .engage(&mut player, &mut cellar, "dragon", &mut source)
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::NoSuchTarget { ref name } if name == "dragon"));
    assert_eq!(session.encounters(), 0);
    assert_eq!(source.remaining(), 1);
    assert_eq!(cellar.monsters().len(), 1);
}

#[tokio::test]
async fn attacking_a_corpse_reports_it_as_defeated() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 1);
    let mut player = Player::new("Hero");
    let mut corpse = rat();
    corpse.take_damage(5, true);
    let mut cellar = InMemoryLocation::new("Cellar").with_monster(corpse);
    let mut source = ScriptedActions::new(["attack"]);

    let err = session
        .engage(&mut player, &mut cellar, "rat", &mut source)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Encounter(EncounterError::AlreadyDefeated { ref name }) if name == "Rat"
    ));
    assert_eq!(err.to_string(), "The Rat is already defeated.");
    assert_eq!(err.error_code(), "ENCOUNTER_ALREADY_DEFEATED");
    assert_eq!(session.encounters(), 0);
    assert_eq!(source.remaining(), 1);
    assert_eq!(cellar.monsters().len(), 1);
}

#[tokio::test]
async fn malformed_commands_are_asked_again_without_losing_the_turn() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 1);
    let mut player = Player::new("Hero");
    let mut cellar = InMemoryLocation::new("Cellar").with_monster(rat());
    let mut source = ScriptedActions::new(["jump", "", "cast zero", "a"]);

    let report = session
        .engage(&mut player, &mut cellar, "RAT", &mut source)
        .await
        .unwrap();

    assert_eq!(report.resolution, Resolution::Victory);
    assert_eq!(report.rounds, 1);
    assert_eq!(source.rejected_inputs(), ["jump", "", "cast zero"]);
    assert_eq!(
        source.rejection_codes(),
        ["ACTION_UNKNOWN", "ACTION_EMPTY", "ACTION_INVALID_SPELL_NUMBER"]
    );
}

#[tokio::test]
async fn fleeing_leaves_the_monster_behind() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let journal = Arc::new(Journal::default());
    let mut session = CombatSession::new(&config, &rng, 1)
        .with_listeners(ListenerRegistry::new().with_kill(journal.clone()));
    let mut player = Player::new("Hero");
    let mut cellar = InMemoryLocation::new("Cellar").with_monster(rat());
    let mut source = ScriptedActions::new(["flee"]);

    let report = session
        .engage(&mut player, &mut cellar, "rat", &mut source)
        .await
        .unwrap();

    assert_eq!(report.resolution, Resolution::Fled);
    assert!(report.loot.is_empty());
    assert_eq!(cellar.monsters().len(), 1);
    assert!(cellar.items().is_empty());
    assert!(journal.kills.lock().unwrap().is_empty());
}

#[tokio::test]
async fn running_out_of_input_ends_the_session_with_an_error() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 1);
    let mut player = Player::new("Hero");
    let mut cellar =
        InMemoryLocation::new("Cellar").with_monster(Monster::new("Ogre", 500, 1, 0, 10));
    let mut source = ScriptedActions::new(["attack", "defend"]);

    let err = session
        .engage(&mut player, &mut cellar, "ogre", &mut source)
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::InputExhausted));
    assert!(cellar.monsters()[0].is_alive());
}

#[tokio::test]
async fn final_boss_completes_the_campaign() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 1);
    let mut player = Player::new("Hero");
    let mut boss = Monster::new("Thalraxos", 1, 1, 0, 2000);
    boss.final_boss = true;
    let mut lair = InMemoryLocation::new("Lair").with_monster(boss);
    let mut source = ScriptedActions::new(["attack"]);

    let report = session
        .engage(&mut player, &mut lair, "thal", &mut source)
        .await
        .unwrap();

    assert!(report.campaign_complete);
}

#[tokio::test]
async fn consecutive_encounters_get_distinct_seeds() {
    let config = CombatConfig::default();
    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 5);
    let mut player = Player::new("Hero");
    let mut cellar = InMemoryLocation::new("Cellar")
        .with_monster(rat())
        .with_monster(rat());
    let mut source = ScriptedActions::new(["attack", "attack"]);

    let first = session
        .engage(&mut player, &mut cellar, "rat", &mut source)
        .await
        .unwrap();
    let second = session
        .engage(&mut player, &mut cellar, "rat", &mut source)
        .await
        .unwrap();

    assert_eq!(first.seed, 5);
    assert_ne!(first.seed, second.seed);
    assert_eq!(session.encounters(), 2);
    assert_eq!(cellar.items().len(), 2);
}

#[tokio::test]
async fn embedded_goblin_fight_replays_exactly() {
    async fn fight(seed: u64) -> combat_runtime::EncounterReport {
        let config = embedded::config().unwrap();
        let bestiary = embedded::bestiary().unwrap();
        let rng = PcgRng;
        let mut session = CombatSession::new(&config, &rng, seed);
        let mut player = Player::new("Hero");
        let mut glade =
            InMemoryLocation::new("Glade").with_monster(bestiary.spawn("Goblin").unwrap());
        let mut source = ScriptedActions::new(std::iter::repeat_n("attack", 20));

        session
            .engage(&mut player, &mut glade, "goblin", &mut source)
            .await
            .unwrap()
    }

    let first = fight(2024).await;
    let replay = fight(2024).await;

    assert_eq!(first.resolution, Resolution::Victory);
    assert_eq!(first.loot[0].name, "Goblin Scraps");
    assert_eq!(first, replay);
}

#[tokio::test]
async fn data_directory_content_drives_the_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("monsters.ron"),
        r#"(monsters: [(name: "Cave Rat", health: 4, attack: 1, defense: 0, xp_yield: 6, loot: ["Leather"])])"#,
    )
    .unwrap();
    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    let bestiary = factory.load_bestiary().unwrap();

    let rng = ScriptedRng::constant(0);
    let mut session = CombatSession::new(&config, &rng, 3);
    let mut player = Player::new("Hero");
    let mut tunnel =
        InMemoryLocation::new("Tunnel").with_monster(bestiary.spawn("cave rat").unwrap());
    let mut source = ScriptedActions::new(["attack"]);

    let report = session
        .engage(&mut player, &mut tunnel, "cave", &mut source)
        .await
        .unwrap();

    assert_eq!(report.resolution, Resolution::Victory);
    assert_eq!(tunnel.items()[0].name, "Leather");
}
