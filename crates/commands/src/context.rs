//! Per-invocation state shared by the selector, finder and action.

use std::any::Any;
use std::collections::HashMap;

use crate::actions::usage::UsageList;
use crate::arguments::ParsedArguments;
use crate::dispatcher::CommandOutput;
use crate::error::CommandError;
use crate::finder::FinderKind;
use crate::host::CommandSource;
use crate::key::ArgumentKey;
use crate::selector::SelectorKind;

/// Prefix on every error line sent back to the operator.
pub const ERROR_PREFIX: &str = "Error: ";

/// State for one `modifyitem` invocation.
///
/// Argument values are memoized per key, so a value read during validation
/// is the same one every item sees.
pub struct ExecuteContext<'a> {
    selector: SelectorKind,
    finder: FinderKind,
    args: &'a ParsedArguments,
    source: &'a CommandSource,
    output: &'a mut CommandOutput,
    cache: HashMap<&'static str, Box<dyn Any>>,
    usage: Option<UsageList>,
}

impl<'a> ExecuteContext<'a> {
    pub fn new(
        selector: SelectorKind,
        finder: FinderKind,
        args: &'a ParsedArguments,
        source: &'a CommandSource,
        output: &'a mut CommandOutput,
    ) -> Self {
        Self {
            selector,
            finder,
            args,
            source,
            output,
            cache: HashMap::new(),
            usage: None,
        }
    }

    pub fn selector(&self) -> SelectorKind {
        self.selector
    }

    pub fn finder(&self) -> FinderKind {
        self.finder
    }

    pub fn source(&self) -> &CommandSource {
        self.source
    }

    pub fn arguments(&self) -> &ParsedArguments {
        self.args
    }

    /// Value of a required argument.
    pub fn get<T: Clone + 'static>(&mut self, key: &ArgumentKey<T>) -> Result<T, CommandError> {
        self.find(key)?
            .ok_or_else(|| CommandError::MissingArgument(key.name().to_string()))
    }

    /// Value of an optional argument, or `default` when it was not given.
    pub fn get_or<T: Clone + 'static>(
        &mut self,
        key: &ArgumentKey<T>,
        default: T,
    ) -> Result<T, CommandError> {
        Ok(self.find(key)?.unwrap_or(default))
    }

    /// `None` when the argument was not given; other failures propagate.
    pub fn find<T: Clone + 'static>(
        &mut self,
        key: &ArgumentKey<T>,
    ) -> Result<Option<T>, CommandError> {
        if let Some(cached) = self.cache.get(key.name()) {
            return cached
                .downcast_ref::<T>()
                .cloned()
                .map(Some)
                .ok_or_else(|| {
                    CommandError::unexpected(format!(
                        "cached value for '{}' has the wrong type",
                        key.name()
                    ))
                });
        }
        match key.extract(self.args) {
            Ok(value) => {
                self.cache.insert(key.name(), Box::new(value.clone()));
                Ok(Some(value))
            }
            Err(CommandError::MissingArgument(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Override the value seen for `key` during this invocation.
    pub fn set<T: Clone + 'static>(&mut self, key: &ArgumentKey<T>, value: T) {
        self.cache.insert(key.name(), Box::new(value));
    }

    pub fn set_usage_list(&mut self, list: UsageList) {
        self.usage = Some(list);
    }

    /// Which usage list the current action edits.
    pub fn usage_list(&self) -> Result<UsageList, CommandError> {
        self.usage
            .ok_or_else(|| CommandError::unexpected("usage list was never selected"))
    }

    pub fn send_feedback(&mut self, text: impl Into<String>) {
        self.output.lines.push(text.into());
    }

    pub fn send_error(&mut self, text: impl AsRef<str>) {
        self.output
            .lines
            .push(format!("{ERROR_PREFIX}{}", text.as_ref()));
    }
}
