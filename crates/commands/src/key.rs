//! Typed handles on grammar arguments.
//!
//! A key ties an argument's name and parser to the Rust type it yields,
//! so actions read `ctx.get(&AMOUNT)?` instead of matching on raw values.

use crate::arguments::{ArgumentKind, ParsedArguments};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::grammar::CommandNode;

/// Anything that can contribute an argument node to the grammar.
pub trait GrammarKey: Sync {
    fn name(&self) -> &'static str;
    fn node(&self) -> CommandNode;
}

type Extract<T> = fn(&ParsedArguments, &str) -> Result<T, CommandError>;

pub struct ArgumentKey<T> {
    name: &'static str,
    kind: ArgumentKind,
    extract: Extract<T>,
}

impl<T> ArgumentKey<T> {
    pub const fn make(name: &'static str, kind: ArgumentKind, extract: Extract<T>) -> Self {
        Self {
            name,
            kind,
            extract,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    pub fn node(&self) -> CommandNode {
        CommandNode::argument(self.name, self.kind)
    }

    /// Pull this key's value straight from parsed arguments, bypassing any
    /// cache.
    pub fn extract(&self, args: &ParsedArguments) -> Result<T, CommandError> {
        (self.extract)(args, self.name)
    }
}

impl<T: Clone + 'static> ArgumentKey<T> {
    pub fn get(&self, ctx: &mut ExecuteContext<'_>) -> Result<T, CommandError> {
        ctx.get(self)
    }
}

impl<T> GrammarKey for ArgumentKey<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn node(&self) -> CommandNode {
        ArgumentKey::node(self)
    }
}

impl<T> std::fmt::Debug for ArgumentKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentKey")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgumentValue;

    static LEVEL: ArgumentKey<i32> = ArgumentKey::make(
        "level",
        ArgumentKind::Integer { min: 0, max: 10 },
        ParsedArguments::integer,
    );

    #[test]
    fn extracts_typed_values() {
        let mut args = ParsedArguments::default();
        assert_eq!(
            LEVEL.extract(&args),
            Err(CommandError::MissingArgument("level".into()))
        );
        args.insert("level", ArgumentValue::Integer(4));
        assert_eq!(LEVEL.extract(&args), Ok(4));

        args.insert("level", ArgumentValue::Text("four".into()));
        assert_eq!(LEVEL.extract(&args).unwrap_err().kind(), "unexpected");
    }

    #[test]
    fn node_carries_name_and_kind() {
        let node = GrammarKey::node(&LEVEL);
        assert_eq!(node.usage_token(), "<level>");
        assert_eq!(GrammarKey::name(&LEVEL), "level");
    }
}
