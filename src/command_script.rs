use anyhow::{bail, Context, Result};
use cmdplus_core::SimTick;
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandScriptFile {
    #[serde(default)]
    description: Option<String>,
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandScriptStepDef {
    tick: u64,
    command: String,
}

/// A command scheduled for a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub tick: SimTick,
    pub command: String,
}

/// Deterministic command script runner.
///
/// Scripts are a list of `{tick, command}` steps, executed in file order.
/// Ticks only order the steps; several steps may share one.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    description: Option<String>,
    pending: VecDeque<ScriptStep>,
}

impl CommandScriptPlayer {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Load a command script from an in-memory JSON string.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for (index, step) in file.steps.into_iter().enumerate() {
            let command = step.command.trim().to_string();
            if command.is_empty() {
                bail!("command script step {index} is empty");
            }
            if last_tick.is_some_and(|prev| step.tick < prev) {
                bail!("command script steps must be sorted by tick (step {index})");
            }
            last_tick = Some(step.tick);

            pending.push_back(ScriptStep {
                tick: SimTick(step.tick),
                command,
            });
        }

        Ok(Self {
            description: file.description,
            pending,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Tick of the next pending step.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.pending.front().map(|step| step.tick)
    }

    /// Drain and return all steps scheduled for ticks `<= tick`.
    pub fn drain_ready(&mut self, tick: SimTick) -> Vec<ScriptStep> {
        let ready = self
            .pending
            .iter()
            .take_while(|step| step.tick <= tick)
            .count();
        self.pending.drain(..ready).collect()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(steps: Vec<ScriptStep>) -> Vec<String> {
        steps.into_iter().map(|step| step.command).collect()
    }

    #[test]
    fn command_script_rejects_unsorted_ticks() {
        let json = r#"{
            "steps": [
                {"tick": 2, "command": "modifyitem block 0 64 0 slot 0 damage add 1"},
                {"tick": 1, "command": "modifyitem block 0 64 0 slot 0 damage add 2"}
            ]
        }"#;
        let err = CommandScriptPlayer::parse(json).unwrap_err();
        assert!(
            err.to_string().contains("sorted by tick"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn command_script_rejects_empty_scripts_and_commands() {
        assert!(CommandScriptPlayer::parse(r#"{"steps": []}"#).is_err());
        let err = CommandScriptPlayer::parse(r#"{"steps": [{"tick": 0, "command": "   "}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("step 0 is empty"), "{err:#}");
        assert!(CommandScriptPlayer::parse(
            r#"{"steps": [{"tick": 0, "command": "x", "delay": 3}]}"#
        )
        .is_err());
    }

    #[test]
    fn command_script_drains_in_order_and_is_deterministic() {
        let json = r#"{
            "description": "wear down the chest tools",
            "steps": [
                {"tick": 1, "command": "modifyitem block 0 64 0 slot 0 damage add 5"},
                {"tick": 1, "command": " modifyitem block 0 64 0 slot 1 enchantment add sharpness "},
                {"tick": 3, "command": "modifyitem block 0 64 0 slot 0 damage restore 5"}
            ]
        }"#;
        let mut script = CommandScriptPlayer::parse(json).expect("script should parse");
        assert_eq!(script.description(), Some("wear down the chest tools"));
        assert_eq!(script.remaining(), 3);

        assert!(script.drain_ready(SimTick(0)).is_empty());
        assert_eq!(script.next_tick(), Some(SimTick(1)));
        assert_eq!(
            commands(script.drain_ready(SimTick(2))),
            vec![
                "modifyitem block 0 64 0 slot 0 damage add 5".to_string(),
                "modifyitem block 0 64 0 slot 1 enchantment add sharpness".to_string(),
            ]
        );
        assert!(!script.is_finished());
        let last = script.drain_ready(SimTick(3));
        assert_eq!(last[0].tick, SimTick(3));
        assert!(script.is_finished());
        assert_eq!(script.next_tick(), None);
    }
}
