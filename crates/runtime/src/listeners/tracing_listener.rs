//! Listener that writes kills and drops to the log.

use combat_core::{Fighter, Item, Monster, Player};
use tracing::info;

use super::{KillListener, LootListener};

/// Logs every kill and drop without handling them.
///
/// Registered at a high priority value so it sees kills only when nothing
/// earlier in the chain claimed them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl KillListener for TracingListener {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn on_kill(&self, player: &Player, monster: &Monster) -> bool {
        info!(
            target: "runtime::listeners",
            player = player.name(),
            monster = monster.name(),
            xp_yield = monster.xp_yield,
            final_boss = monster.final_boss,
            "monster defeated"
        );
        false
    }
}

impl LootListener for TracingListener {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_loot(&self, player: &Player, monster: &Monster, items: &[Item]) {
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        info!(
            target: "runtime::listeners",
            player = player.name(),
            monster = monster.name(),
            items = ?names,
            "loot dropped"
        );
    }
}
