//! The action/mode matrix.
//!
//! Each action type is a static table of modes. A mode bundles its grammar
//! (a list of argument fragments), an optional validator run before any item
//! is touched, the per-item transform, and the success message builder.

use std::sync::Arc;

use cmdplus_core::ItemStack;

use crate::actions::usage::UsageList;
use crate::actions::{damage, enchantment, lore, tag, usage};
use crate::context::ExecuteContext;
use crate::engine;
use crate::error::CommandError;
use crate::finder::FinderKind;
use crate::grammar::{CommandFn, CommandInvocation, CommandNode};
use crate::key::GrammarKey;
use crate::selector::SelectorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Set,
    Remove,
    Clear,
    Restore,
    Merge,
}

impl Mode {
    pub fn literal(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Set => "set",
            Mode::Remove => "remove",
            Mode::Clear => "clear",
            Mode::Restore => "restore",
            Mode::Merge => "merge",
        }
    }
}

/// What a transform did to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was changed in place.
    Applied,
    /// The slot should be emptied.
    Removed,
    /// The item was left alone; the reason is reported to the operator.
    Skipped(String),
}

pub type Validator = fn(&mut ExecuteContext<'_>) -> Result<(), CommandError>;
pub type Transform = fn(&mut ExecuteContext<'_>, &mut ItemStack) -> Result<ItemOutcome, CommandError>;
pub type SuccessMessage = fn(&mut ExecuteContext<'_>, usize) -> Result<String, CommandError>;

/// One argument position in a mode's grammar.
pub struct Fragment {
    pub key: &'static dyn GrammarKey,
    pub optional: bool,
}

impl Fragment {
    pub const fn required(key: &'static dyn GrammarKey) -> Self {
        Self {
            key,
            optional: false,
        }
    }

    pub const fn optional(key: &'static dyn GrammarKey) -> Self {
        Self {
            key,
            optional: true,
        }
    }
}

pub struct ModeSpec {
    pub mode: Mode,
    /// Arguments after the mode literal. Optional fragments must trail.
    pub arguments: &'static [Fragment],
    pub validate: Option<Validator>,
    pub modify: Transform,
    pub success: SuccessMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Damage,
    Enchantment,
    Tag,
    Lore,
    Usage(UsageList),
}

pub struct ActionType {
    pub kind: ActionKind,
    pub name: &'static str,
    pub modes: &'static [ModeSpec],
}

/// Every action type, in grammar order.
pub static ACTION_TYPES: [&ActionType; 6] = [
    &damage::DAMAGE,
    &enchantment::ENCHANT,
    &tag::TAG,
    &lore::LORE,
    &usage::DESTROY,
    &usage::PLACE_ON,
];

pub fn action_type(name: &str) -> Option<&'static ActionType> {
    ACTION_TYPES.iter().copied().find(|action| action.name == name)
}

impl ActionType {
    /// Seed ambient state the modes rely on.
    pub fn prepare(&self, ctx: &mut ExecuteContext<'_>) {
        if let ActionKind::Usage(list) = self.kind {
            ctx.set_usage_list(list);
        }
    }

    pub fn mode(&self, mode: Mode) -> Option<&'static ModeSpec> {
        self.modes.iter().find(|spec| spec.mode == mode)
    }

    pub fn node(&'static self, selector: SelectorKind, finder: FinderKind) -> CommandNode {
        self.modes.iter().fold(CommandNode::literal(self.name), |node, spec| {
            node.then(spec.node(self, selector, finder))
        })
    }
}

impl ModeSpec {
    fn node(
        &'static self,
        action: &'static ActionType,
        selector: SelectorKind,
        finder: FinderKind,
    ) -> CommandNode {
        let command: CommandFn = Arc::new(move |invocation: &mut CommandInvocation<'_>| {
            engine::execute(invocation, selector, finder, action, self)
        });

        // Built inside out: a node is executable when everything after it
        // is optional.
        let mut tail: Option<CommandNode> = None;
        for (index, fragment) in self.arguments.iter().enumerate().rev() {
            let mut node = fragment.key.node();
            if self.arguments.get(index + 1).map_or(true, |next| next.optional) {
                node = node.executes(command.clone());
            }
            if let Some(child) = tail.take() {
                node = node.then(child);
            }
            tail = Some(node);
        }

        let mut literal = CommandNode::literal(self.mode.literal());
        if self.arguments.first().map_or(true, |first| first.optional) {
            literal = literal.executes(command);
        }
        match tail {
            Some(child) => literal.then(child),
            None => literal,
        }
    }
}

/// "1 item" / "3 items".
pub fn item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
