//! Command grammar tree and the depth-first parser that walks it.

use std::fmt;
use std::sync::Arc;

use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::dispatcher::CommandOutput;
use crate::error::CommandError;
use crate::host::{CommandHost, CommandSource};
use crate::reader::StringReader;

/// Everything an executable node receives when invoked.
pub struct CommandInvocation<'a> {
    pub args: &'a ParsedArguments,
    pub source: &'a CommandSource,
    pub host: &'a mut dyn CommandHost,
    pub output: &'a mut CommandOutput,
}

/// Callback attached to an executable node. Returns the command's result
/// value (for `modifyitem`, the number of items changed).
pub type CommandFn =
    Arc<dyn Fn(&mut CommandInvocation<'_>) -> Result<i32, CommandError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Literal(String),
    Argument { name: String, kind: ArgumentKind },
}

/// One node of the grammar: a literal word or a typed argument, with
/// children and an optional command.
#[derive(Clone)]
pub struct CommandNode {
    kind: NodeKind,
    children: Vec<CommandNode>,
    command: Option<CommandFn>,
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("executable", &self.command.is_some())
            .finish()
    }
}

impl CommandNode {
    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Literal(name.into()),
            children: Vec::new(),
            command: None,
        }
    }

    pub fn argument(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            kind: NodeKind::Argument {
                name: name.into(),
                kind,
            },
            children: Vec::new(),
            command: None,
        }
    }

    pub fn then(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn then_all(mut self, children: impl IntoIterator<Item = CommandNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn executes(mut self, command: CommandFn) -> Self {
        self.command = Some(command);
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn is_executable(&self) -> bool {
        self.command.is_some()
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// Child with the given literal or argument name.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| match &child.kind {
            NodeKind::Literal(literal) => literal == name,
            NodeKind::Argument { name: arg, .. } => arg == name,
        })
    }

    /// How this node appears in usage text (`damage`, `<amount>`).
    pub fn usage_token(&self) -> String {
        match &self.kind {
            NodeKind::Literal(literal) => literal.clone(),
            NodeKind::Argument { name, kind } => kind.placeholder(name),
        }
    }

    /// Every executable path below and including this node.
    pub fn usage_paths(&self) -> Vec<String> {
        let token = self.usage_token();
        let mut paths = Vec::new();
        if self.is_executable() {
            paths.push(token.clone());
        }
        for child in &self.children {
            paths.extend(
                child
                    .usage_paths()
                    .into_iter()
                    .map(|rest| format!("{token} {rest}")),
            );
        }
        paths
    }

    fn expected(&self) -> String {
        self.children
            .iter()
            .map(CommandNode::usage_token)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Consume this node's own token.
    fn consume(
        &self,
        reader: &mut StringReader<'_>,
        args: &mut ParsedArguments,
    ) -> Result<(), CommandError> {
        match &self.kind {
            NodeKind::Literal(literal) => {
                let start = reader.cursor();
                if reader.read_unquoted() == literal {
                    Ok(())
                } else {
                    Err(CommandError::parse(format!("Expected '{literal}'"), start))
                }
            }
            NodeKind::Argument { name, kind } => {
                let value = kind.parse(reader)?;
                if reader.peek().is_some_and(|c| c != ' ') {
                    return Err(reader.error(
                        "Expected whitespace to end one argument, but found trailing data",
                    ));
                }
                args.insert(name.clone(), value);
                Ok(())
            }
        }
    }
}

/// Try each candidate at the reader's position, literals first, returning
/// the first complete parse. On failure, the error that got furthest into
/// the input wins.
pub(crate) fn walk_children<'n>(
    candidates: &'n [CommandNode],
    reader: &StringReader<'_>,
    args: &ParsedArguments,
) -> Result<(ParsedArguments, &'n CommandFn), CommandError> {
    let ordered = candidates
        .iter()
        .filter(|node| node.is_literal())
        .chain(candidates.iter().filter(|node| !node.is_literal()));

    let mut furthest: Option<CommandError> = None;
    for node in ordered {
        let mut branch = reader.clone();
        let mut branch_args = args.clone();
        let attempt = node
            .consume(&mut branch, &mut branch_args)
            .and_then(|()| walk(node, &branch, branch_args));
        match attempt {
            Ok(found) => return Ok(found),
            Err(err) => {
                if furthest
                    .as_ref()
                    .map_or(true, |best| err.cursor() > best.cursor())
                {
                    furthest = Some(err);
                }
            }
        }
    }
    Err(furthest.unwrap_or_else(|| reader.error("Unknown command")))
}

/// Continue below `node`, whose own token has just been consumed.
fn walk<'n>(
    node: &'n CommandNode,
    reader: &StringReader<'_>,
    args: ParsedArguments,
) -> Result<(ParsedArguments, &'n CommandFn), CommandError> {
    if !reader.can_read() {
        return match &node.command {
            Some(command) => Ok((args, command)),
            None => Err(reader.error(format!(
                "Incomplete command, expected {}",
                node.expected()
            ))),
        };
    }

    let mut next = reader.clone();
    next.skip();
    if node.children.is_empty() {
        return Err(next.error("Incorrect argument for command"));
    }

    match walk_children(&node.children, &next, &args) {
        Err(err)
            if err.cursor() == Some(next.cursor())
                && node.children.iter().any(CommandNode::is_literal) =>
        {
            Err(next.error(format!("Unknown argument, expected {}", node.expected())))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(value: i32) -> CommandFn {
        Arc::new(move |_: &mut CommandInvocation<'_>| -> Result<i32, CommandError> {
            Ok(value)
        })
    }

    fn tree() -> Vec<CommandNode> {
        vec![CommandNode::literal("give")
            .then(
                CommandNode::literal("all")
                    .executes(noop(1))
                    .then(CommandNode::argument("count", ArgumentKind::Integer { min: 1, max: 64 }).executes(noop(2))),
            )
            .then(
                CommandNode::argument("slot", ArgumentKind::Integer { min: 0, max: 9 })
                    .then(CommandNode::literal("now").executes(noop(3))),
            )]
    }

    fn parse(input: &str) -> Result<(ParsedArguments, i32), CommandError> {
        let roots = tree();
        let (args, command) = walk_children(&roots, &StringReader::new(input), &ParsedArguments::default())?;
        let mut world = cmdplus_world::World::new();
        let mut output = CommandOutput::default();
        let source = CommandSource::console([0.0; 3]);
        let mut invocation = CommandInvocation {
            args: &args,
            source: &source,
            host: &mut world,
            output: &mut output,
        };
        let value = command(&mut invocation)?;
        Ok((args, value))
    }

    #[test]
    fn literals_are_tried_before_arguments() {
        assert_eq!(parse("give all").unwrap().1, 1);
        let (args, value) = parse("give all 5").unwrap();
        assert_eq!(value, 2);
        assert_eq!(args.integer("count"), Ok(5));
        let (args, value) = parse("give 4 now").unwrap();
        assert_eq!(value, 3);
        assert_eq!(args.integer("slot"), Ok(4));
    }

    #[test]
    fn furthest_error_wins() {
        // "all" matched, so the count error is reported, not the slot one
        let err = parse("give all 99").unwrap_err();
        assert_eq!(err.cursor(), Some(9));
        assert!(err.to_string().contains("more than 64"));

        let err = parse("give 4").unwrap_err();
        assert!(err.to_string().starts_with("Incomplete command, expected now"));

        let err = parse("give nope").unwrap_err();
        assert_eq!(err.cursor(), Some(5));

        let err = parse("give all 5 extra").unwrap_err();
        assert_eq!(err.to_string(), "Incorrect argument for command at position 11");
    }

    #[test]
    fn usage_lists_executable_paths() {
        let paths = tree()[0].usage_paths();
        assert_eq!(
            paths,
            vec!["give all", "give all <count>", "give <slot> now"]
        );
        assert!(tree()[0].child("all").is_some_and(CommandNode::is_executable));
        assert!(tree()[0].child("slot").is_some_and(|n| !n.is_executable()));
    }
}
