//! Registered command trees and the entry point that runs a line of input.

use tracing::debug;

use crate::arguments::ParsedArguments;
use crate::context::ERROR_PREFIX;
use crate::error::CommandError;
use crate::grammar::{walk_children, CommandFn, CommandInvocation, CommandNode};
use crate::host::{CommandHost, CommandSource};
use crate::modifyitem;
use crate::reader::StringReader;

/// Result of executing a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Feedback and error lines, in the order they were produced.
    pub lines: Vec<String>,
    /// Value returned by the command (0 on failure).
    pub result: i32,
}

impl CommandOutput {
    /// Error lines, without their prefix.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter_map(|line| line.strip_prefix(ERROR_PREFIX))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// A fully parsed command, ready to run.
pub struct ParsedCommand<'d> {
    pub arguments: ParsedArguments,
    command: &'d CommandFn,
}

#[derive(Debug, Default)]
pub struct CommandDispatcher {
    roots: Vec<CommandNode>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with every built-in command registered.
    pub fn with_builtin_commands() -> Self {
        let mut dispatcher = Self::new();
        modifyitem::register(&mut dispatcher);
        dispatcher
    }

    pub fn register(&mut self, root: CommandNode) {
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[CommandNode] {
        &self.roots
    }

    /// Parse one line. A leading `/` is accepted.
    pub fn parse<'d>(&'d self, input: &str) -> Result<ParsedCommand<'d>, CommandError> {
        let line = input.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let reader = StringReader::new(line);
        if !reader.can_read() {
            return Err(reader.error("Unknown command"));
        }
        let (arguments, command) = walk_children(&self.roots, &reader, &ParsedArguments::default())?;
        Ok(ParsedCommand { arguments, command })
    }

    /// Parse and run `input` against `host`. Failures become error lines in
    /// the output rather than a `Result`.
    pub fn execute(
        &self,
        input: &str,
        host: &mut dyn CommandHost,
        source: &CommandSource,
    ) -> CommandOutput {
        let mut output = CommandOutput::default();
        let parsed = match self.parse(input) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(%input, %err, "command rejected by parser");
                output.lines.push(format!("{ERROR_PREFIX}{err}"));
                return output;
            }
        };

        let result = {
            let mut invocation = CommandInvocation {
                args: &parsed.arguments,
                source,
                host,
                output: &mut output,
            };
            (parsed.command)(&mut invocation)
        };
        match result {
            Ok(value) => output.result = value,
            Err(err) => {
                debug!(%input, kind = err.kind(), %err, "command failed");
                output.lines.push(format!("{ERROR_PREFIX}{err}"));
            }
        }
        output
    }

    /// Every executable command path, one per line.
    pub fn usage(&self) -> Vec<String> {
        self.roots.iter().flat_map(CommandNode::usage_paths).collect()
    }
}
