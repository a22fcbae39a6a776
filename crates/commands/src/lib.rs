//! The `modifyitem` operator command.
//!
//! A command picks containers (a block or a set of entities), picks slots
//! within each (one explicit slot, or every item matching a predicate), and
//! applies one mode of one action to every item found.

pub mod action;
pub mod actions;
pub mod arguments;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod finder;
pub mod grammar;
pub mod handle;
pub mod host;
pub mod key;
pub mod modifyitem;
pub mod predicate;
pub mod reader;
pub mod selector;
pub mod slots;
pub mod target;

pub use action::{ActionKind, ActionType, ItemOutcome, Mode, ModeSpec, ACTION_TYPES};
pub use arguments::{ArgumentKind, ArgumentValue, BlockCoordArg, BlockPosArg, ParsedArguments};
pub use context::ExecuteContext;
pub use dispatcher::{CommandDispatcher, CommandOutput};
pub use error::{CommandError, INTERNAL_ERROR};
pub use finder::FinderKind;
pub use grammar::{CommandFn, CommandInvocation, CommandNode};
pub use handle::ContainerHandle;
pub use host::{CommandHost, CommandSource};
pub use key::{ArgumentKey, GrammarKey};
pub use predicate::ItemPredicate;
pub use selector::{ContainerRef, SelectorKind};
pub use target::EntitySelector;
