//! Command session shared by script and interactive input.

use anyhow::{Context, Result};
use cmdplus_commands::{CommandDispatcher, CommandOutput, CommandSource};
use cmdplus_core::SimTick;
use cmdplus_testkit::{JsonlSink, SessionRecord, TranscriptRecord};
use cmdplus_world::World;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::command_script::CommandScriptPlayer;
use crate::config::ConsoleConfig;

pub struct Console {
    world: World,
    dispatcher: CommandDispatcher,
    source: CommandSource,
    echo: bool,
    transcript: Option<JsonlSink>,
}

/// What a session did, for the final log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub failed: usize,
}

impl Console {
    pub fn new(world: World, dispatcher: CommandDispatcher, config: &ConsoleConfig) -> Result<Self> {
        let source = match &config.operator.as_player {
            Some(name) => {
                let player = world
                    .player_by_name(name)
                    .with_context(|| format!("No player named {name} in the world"))?;
                CommandSource::as_entity(player)
            }
            None => CommandSource {
                name: config.operator.name.clone(),
                entity: None,
                position: config.operator.position,
            },
        };
        debug!(operator = %source.name, position = ?source.position, "Console source");
        Ok(Self {
            world,
            dispatcher,
            source,
            echo: config.echo,
            transcript: None,
        })
    }

    /// Record every executed command to `sink`, starting with a session header.
    pub fn record_to(&mut self, mut sink: JsonlSink, world_label: &str) -> Result<()> {
        sink.write(&SessionRecord::new(world_label, &self.source.name))?;
        self.transcript = Some(sink);
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn execute(&mut self, tick: SimTick, command: &str) -> Result<CommandOutput> {
        let output = self.dispatcher.execute(command, &mut self.world, &self.source);
        if let Some(sink) = &mut self.transcript {
            sink.write(&TranscriptRecord {
                tick,
                command,
                lines: &output.lines,
                result: output.result,
            })?;
        }
        Ok(output)
    }

    /// Run every step of `script` in tick order.
    pub fn run_script(
        &mut self,
        mut script: CommandScriptPlayer,
        out: &mut impl Write,
    ) -> Result<SessionSummary> {
        if let Some(description) = script.description() {
            info!("Running script: {description}");
        }
        let mut summary = SessionSummary::default();
        while let Some(tick) = script.next_tick() {
            for step in script.drain_ready(tick) {
                self.run_one(step.tick, &step.command, out, &mut summary)?;
            }
        }
        Ok(summary)
    }

    /// Run commands read line by line. Blank lines and `#` comments are
    /// skipped, `help` prints the grammar and `exit` stops early.
    pub fn run_lines(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        for (index, line) in input.lines().enumerate() {
            let line = line.context("Failed to read command input")?;
            let command = line.trim();
            match command {
                "" => continue,
                _ if command.starts_with('#') => continue,
                "exit" | "quit" => break,
                "help" => {
                    for usage in self.dispatcher.usage() {
                        writeln!(out, "{usage}")?;
                    }
                }
                _ => self.run_one(SimTick(index as u64 + 1), command, out, &mut summary)?,
            }
        }
        Ok(summary)
    }

    fn run_one(
        &mut self,
        tick: SimTick,
        command: &str,
        out: &mut impl Write,
        summary: &mut SessionSummary,
    ) -> Result<()> {
        if self.echo {
            writeln!(out, "> {command}")?;
        }
        let output = self.execute(tick, command)?;
        for line in &output.lines {
            writeln!(out, "{line}")?;
        }
        summary.commands += 1;
        if output.result == 0 {
            summary.failed += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdplus_testkit::{demo_world, CHEST_POS};
    use std::io::Cursor;

    fn console(config: &ConsoleConfig) -> Console {
        let (world, _) = demo_world();
        Console::new(world, CommandDispatcher::with_builtin_commands(), config)
            .expect("console builds")
    }

    fn chest_damage(console: &Console, slot: usize) -> Option<u32> {
        console
            .world()
            .block_entity(CHEST_POS)
            .and_then(|block| block.slots())
            .and_then(|slots| slots[slot].as_ref().map(|item| item.damage))
    }

    #[test]
    fn interactive_lines_skip_comments_and_stop_at_exit() {
        let mut console = console(&ConsoleConfig::default());
        let input = Cursor::new(
            "# wear the pickaxe\n\nmodifyitem block 0 64 0 slot 0 damage add 5\nmodifyitem block 0 64 0 slot 3 damage add 1\nexit\nmodifyitem block 0 64 0 slot 0 damage add 5\n",
        );
        let mut out = Vec::new();
        let summary = console.run_lines(input, &mut out).expect("session runs");

        assert_eq!(
            summary,
            SessionSummary {
                commands: 2,
                failed: 1
            }
        );
        assert_eq!(chest_damage(&console, 0), Some(15));
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed.lines().collect::<Vec<_>>(),
            vec!["Damaged 1 item by 5", "Error: No items were modified"]
        );
    }

    #[test]
    fn help_lists_the_grammar() {
        let mut console = console(&ConsoleConfig::default());
        let mut out = Vec::new();
        console
            .run_lines(Cursor::new("help\n"), &mut out)
            .expect("session runs");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed
            .lines()
            .any(|line| line == "modifyitem block <pos: x y z> slot <slot> damage add <amount>"));
    }

    #[test]
    fn script_runs_in_tick_order_with_echo() {
        let mut config = ConsoleConfig::default();
        config.echo = true;
        let mut console = console(&config);
        let script = CommandScriptPlayer::parse(
            r#"{"steps": [
                {"tick": 0, "command": "modifyitem block 0 64 0 slot 0 damage add 5"},
                {"tick": 4, "command": "modifyitem block 0 64 0 slot 0 damage restore 20"}
            ]}"#,
        )
        .unwrap();
        let mut out = Vec::new();
        let summary = console.run_script(script, &mut out).expect("script runs");

        assert_eq!(summary.commands, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(chest_damage(&console, 0), Some(0));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("> modifyitem block 0 64 0 slot 0 damage add 5\n"));
    }

    #[test]
    fn operator_can_run_as_a_player() {
        let mut config = ConsoleConfig::default();
        config.operator.as_player = Some("Alex".to_string());
        let mut console = console(&config);
        let output = console
            .execute(SimTick(1), "modifyitem entity @s slot hotbar.0 damage add 1")
            .unwrap();
        assert_eq!(output.lines, vec!["Damaged 1 item by 1"]);

        config.operator.as_player = Some("Herobrine".to_string());
        let (world, _) = demo_world();
        let err = Console::new(world, CommandDispatcher::with_builtin_commands(), &config)
            .err()
            .expect("unknown player rejected");
        assert!(err.to_string().contains("Herobrine"));
    }
}
