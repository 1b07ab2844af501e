//! Listener registry for dispatching post-victory notifications.

use std::sync::Arc;

use combat_core::{Fighter, Item, Monster, Player};
use tracing::debug;

use super::{KillListener, LootListener};

/// Holds the kill chain and the loot observers.
///
/// Kill listeners form a chain of responsibility: they are kept sorted by
/// priority and dispatch stops at the first one that handles the kill.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    kill: Vec<Arc<dyn KillListener>>,
    loot: Vec<Arc<dyn LootListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a kill listener. Equal priorities keep registration order.
    pub fn register_kill(&mut self, listener: Arc<dyn KillListener>) {
        self.kill.push(listener);
        self.kill.sort_by_key(|l| l.priority());
    }

    pub fn register_loot(&mut self, listener: Arc<dyn LootListener>) {
        self.loot.push(listener);
    }

    #[must_use]
    pub fn with_kill(mut self, listener: Arc<dyn KillListener>) -> Self {
        self.register_kill(listener);
        self
    }

    #[must_use]
    pub fn with_loot(mut self, listener: Arc<dyn LootListener>) -> Self {
        self.register_loot(listener);
        self
    }

    /// Runs the kill chain. Returns the name of the listener that handled
    /// the kill, if any.
    pub fn notify_kill(&self, player: &Player, monster: &Monster) -> Option<&'static str> {
        for listener in &self.kill {
            if listener.on_kill(player, monster) {
                debug!(
                    target: "runtime::listeners",
                    listener = listener.name(),
                    monster = monster.name(),
                    "kill handled"
                );
                return Some(listener.name());
            }
        }
        None
    }

    /// Tells every loot listener about a drop. Empty drops are not reported.
    pub fn notify_loot(&self, player: &Player, monster: &Monster, items: &[Item]) {
        if items.is_empty() {
            return;
        }
        for listener in &self.loot {
            listener.on_loot(player, monster, items);
        }
    }

    /// Kill listener names and priorities in dispatch order.
    pub fn kill_listeners(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.kill.iter().map(|l| (l.name(), l.priority()))
    }

    pub fn len(&self) -> usize {
        self.kill.len() + self.loot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kill.is_empty() && self.loot.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        priority: i32,
        handles: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl KillListener for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn on_kill(&self, _player: &Player, _monster: &Monster) -> bool {
            self.log.lock().unwrap().push(self.name);
            self.handles
        }
    }

    fn recorder(
        name: &'static str,
        priority: i32,
        handles: bool,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn KillListener> {
        Arc::new(Recorder {
            name,
            priority,
            handles,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn chain_runs_by_priority_and_stops_when_handled() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = ListenerRegistry::new()
            .with_kill(recorder("late", 10, false, &log))
            .with_kill(recorder("handler", 0, true, &log))
            .with_kill(recorder("early", -5, false, &log));

        let handled = registry.notify_kill(&Player::new("Hero"), &Monster::new("Rat", 5, 1, 0, 2));

        assert_eq!(handled, Some("handler"));
        assert_eq!(*log.lock().unwrap(), vec!["early", "handler"]);
        let order: Vec<_> = registry.kill_listeners().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["early", "handler", "late"]);
    }

    #[test]
    fn unhandled_kill_visits_everyone() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = ListenerRegistry::new()
            .with_kill(recorder("a", 0, false, &log))
            .with_kill(recorder("b", 0, false, &log));

        let handled = registry.notify_kill(&Player::new("Hero"), &Monster::new("Rat", 5, 1, 0, 2));

        assert_eq!(handled, None);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }
}
