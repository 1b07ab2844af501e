//! Asynchronous abstraction for sourcing player intent.
//!
//! The session awaits an [`ActionSource`] whenever the encounter needs the
//! player's next move. That await is the only point where combat yields to
//! the outside world, so the source can be a terminal, a network peer, or a
//! scripted fixture.
use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use combat_core::{CombatError, CombatantSnapshot, Fighter, Player};

use super::errors::{Result, RuntimeError};

/// Everything a source needs to choose the player's next move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPrompt {
    pub round: u32,
    pub player: CombatantSnapshot,
    pub enemy: CombatantSnapshot,
    /// Spells in the order `cast <n>` refers to them.
    pub spells: Vec<SpellOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellOption {
    /// 1-based number accepted by `cast`.
    pub number: usize,
    pub name: String,
    pub mana_cost: u32,
}

impl ActionPrompt {
    pub fn new<E: Fighter + ?Sized>(round: u32, player: &Player, enemy: &E) -> Self {
        let spells = player
            .combatant
            .abilities
            .iter()
            .enumerate()
            .map(|(i, ability)| SpellOption {
                number: i + 1,
                name: ability.name.clone(),
                mana_cost: ability.mana_cost,
            })
            .collect();

        Self {
            round,
            player: CombatantSnapshot::of(player),
            enemy: CombatantSnapshot::of(enemy),
            spells,
        }
    }
}

impl fmt::Display for ActionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Round {} ---", self.round)?;
        writeln!(f, "{}", self.player)?;
        writeln!(f, "{}", self.enemy)?;
        if !self.spells.is_empty() {
            write!(f, "Spells:")?;
            for spell in &self.spells {
                write!(f, " {}) {} ({} MP)", spell.number, spell.name, spell.mana_cost)?;
            }
            writeln!(f)?;
        }
        write!(f, "[a]ttack [d]efend [p]arry [c]ast <n> [f]lee [s]tatus > ")
    }
}

/// Trait for providing the player's raw commands.
///
/// Different implementations can handle:
/// - Terminal input ([`LineActions`])
/// - Scripted/replayed sessions ([`ScriptedActions`])
#[async_trait]
pub trait ActionSource: Send {
    /// Waits for the next command for the turn described by `prompt`.
    async fn next_input(&mut self, prompt: &ActionPrompt) -> Result<String>;

    /// The previous input was refused with `error` (an
    /// [`RuntimeError::InvalidAction`]). The same turn is asked again.
    fn rejected(&mut self, _input: &str, _error: &RuntimeError) {}
}

/// Replays a fixed list of commands.
#[derive(Debug, Default)]
pub struct ScriptedActions {
    inputs: VecDeque<String>,
    rejected: Vec<String>,
    rejection_codes: Vec<&'static str>,
}

impl ScriptedActions {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            rejected: Vec::new(),
            rejection_codes: Vec::new(),
        }
    }

    /// Commands not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Inputs the session refused, in order.
    pub fn rejected_inputs(&self) -> &[String] {
        &self.rejected
    }

    /// Error codes of the refusals, parallel to [`Self::rejected_inputs`].
    pub fn rejection_codes(&self) -> &[&'static str] {
        &self.rejection_codes
    }
}

#[async_trait]
impl ActionSource for ScriptedActions {
    async fn next_input(&mut self, _prompt: &ActionPrompt) -> Result<String> {
        self.inputs.pop_front().ok_or(RuntimeError::InputExhausted)
    }

    fn rejected(&mut self, input: &str, error: &RuntimeError) {
        self.rejected.push(input.to_string());
        self.rejection_codes.push(error.error_code());
    }
}

/// Reads one command per line, writing prompts to a separate stream.
pub struct LineActions<R, W> {
    lines: Lines<R>,
    prompts: W,
    notice: Option<String>,
}

impl<R, W> LineActions<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, prompts: W) -> Self {
        Self {
            lines: reader.lines(),
            prompts,
            notice: None,
        }
    }

    pub fn into_prompts(self) -> W {
        self.prompts
    }
}

impl LineActions<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    /// Commands from stdin, prompts to stderr, leaving stdout to the
    /// transcript.
    pub fn stdio() -> Self {
        Self::new(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stderr(),
        )
    }
}

#[async_trait]
impl<R, W> ActionSource for LineActions<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_input(&mut self, prompt: &ActionPrompt) -> Result<String> {
        let mut text = self.notice.take().unwrap_or_default();
        text.push_str(&prompt.to_string());
        self.prompts
            .write_all(text.as_bytes())
            .await
            .map_err(RuntimeError::Input)?;
        self.prompts.flush().await.map_err(RuntimeError::Input)?;

        match self.lines.next_line().await.map_err(RuntimeError::Input)? {
            Some(line) => Ok(line),
            None => Err(RuntimeError::InputExhausted),
        }
    }

    fn rejected(&mut self, input: &str, error: &RuntimeError) {
        self.notice = Some(format!("'{}': {}\n", input.trim(), error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActionParseError, Monster};

    fn prompt() -> ActionPrompt {
        ActionPrompt::new(1, &Player::new("Hero"), &Monster::new("Goblin", 30, 8, 2, 25))
    }

    #[test]
    fn prompt_lists_known_spells() {
        let prompt = prompt();
        assert_eq!(prompt.spells.len(), 1);
        assert_eq!(prompt.spells[0].number, 1);
        assert_eq!(prompt.spells[0].name, "Firebolt");
        assert!(prompt.to_string().contains("1) Firebolt (5 MP)"));
    }

    #[tokio::test]
    async fn scripted_actions_run_dry() {
        let mut source = ScriptedActions::new(["attack"]);
        assert_eq!(source.next_input(&prompt()).await.unwrap(), "attack");
        assert!(matches!(
            source.next_input(&prompt()).await,
            Err(RuntimeError::InputExhausted)
        ));
    }

    #[tokio::test]
    async fn line_actions_read_lines_and_echo_rejections() {
        let input: &[u8] = b"jump\nc 1\n";
        let mut source = LineActions::new(input, Vec::new());

        let first = source.next_input(&prompt()).await.unwrap();
        assert_eq!(first, "jump");
        source.rejected(
            &first,
            &RuntimeError::InvalidAction(ActionParseError::UnknownAction {
                token: "jump".into(),
            }),
        );
        assert_eq!(source.next_input(&prompt()).await.unwrap(), "c 1");
        assert!(matches!(
            source.next_input(&prompt()).await,
            Err(RuntimeError::InputExhausted)
        ));

        let written = String::from_utf8(source.into_prompts()).unwrap();
        assert!(written.contains("--- Round 1 ---"));
        assert!(written.contains("'jump':"));
    }
}
