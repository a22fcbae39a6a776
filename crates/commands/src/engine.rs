//! Batch application of one mode across every selected item.

use std::collections::BTreeMap;

use cmdplus_core::ItemStack;
use tracing::{debug, error, info};

use crate::action::{ActionType, ItemOutcome, ModeSpec};
use crate::context::ExecuteContext;
use crate::error::CommandError;
use crate::finder::FinderKind;
use crate::grammar::CommandInvocation;
use crate::host::CommandHost;
use crate::selector::{self, SelectorKind};

/// Reported when no item was changed.
pub const NO_ITEMS: &str = "No items were modified";

/// Run `mode` of `action` for one parsed invocation.
///
/// Returns the number of items changed. Containers already committed stay
/// committed if a later container fails.
pub fn execute(
    invocation: &mut CommandInvocation<'_>,
    selector: SelectorKind,
    finder: FinderKind,
    action: &'static ActionType,
    mode: &'static ModeSpec,
) -> Result<i32, CommandError> {
    let mut ctx = ExecuteContext::new(
        selector,
        finder,
        invocation.args,
        invocation.source,
        &mut *invocation.output,
    );
    let result = run(&mut ctx, &mut *invocation.host, action, mode);

    if let Err(CommandError::Unexpected(detail)) = &result {
        error!(
            source = %invocation.source.name,
            action = action.name,
            mode = mode.mode.literal(),
            %detail,
            "modifyitem failed unexpectedly"
        );
    }
    result.map(|count| i32::try_from(count).unwrap_or(i32::MAX))
}

fn run(
    ctx: &mut ExecuteContext<'_>,
    host: &mut dyn CommandHost,
    action: &'static ActionType,
    mode: &'static ModeSpec,
) -> Result<usize, CommandError> {
    action.prepare(ctx);
    if let Some(validate) = mode.validate {
        validate(ctx)?;
    }

    let selector = ctx.selector();
    let targets = selector.resolve(ctx, &*host)?;
    let succeeded = for_each_item(ctx, host, &targets, mode)?;

    info!(
        action = action.name,
        mode = mode.mode.literal(),
        containers = targets.len(),
        succeeded,
        "modifyitem finished"
    );
    if succeeded == 0 {
        ctx.send_error(NO_ITEMS);
    } else {
        let message = (mode.success)(ctx, succeeded)?;
        ctx.send_feedback(message);
    }
    Ok(succeeded)
}

/// Transform every found item, container by container.
///
/// Changes to a container are staged and written back once all of its
/// items have been visited. Skipped items, and results the slot refuses,
/// are reported and left untouched.
fn for_each_item(
    ctx: &mut ExecuteContext<'_>,
    host: &mut dyn CommandHost,
    targets: &[selector::ContainerRef],
    mode: &'static ModeSpec,
) -> Result<usize, CommandError> {
    let mut succeeded = 0;
    for &target in targets {
        let mut handle = selector::open(host, target)?;
        let found = ctx.finder().find(ctx, &handle)?;

        let mut staged: BTreeMap<u32, Option<ItemStack>> = BTreeMap::new();
        for (slot, item) in found {
            let Some(original) = item.filter(|stack| !stack.is_empty()) else {
                continue;
            };
            let mut copy = original.clone();
            let replacement = match (mode.modify)(ctx, &mut copy)? {
                ItemOutcome::Applied => Some(copy),
                ItemOutcome::Removed => None,
                ItemOutcome::Skipped(reason) => {
                    debug!(container = %handle.label(), slot, %reason, "item skipped");
                    ctx.send_error(reason);
                    continue;
                }
            };
            if !handle.accepts(slot, replacement.as_ref()) {
                let reason = format!(
                    "Slot {slot} of {} cannot hold the modified {}",
                    handle.label(),
                    original.display_name()
                );
                debug!(container = %handle.label(), slot, %reason, "item refused");
                ctx.send_error(reason);
                continue;
            }
            debug!(
                container = %handle.label(),
                slot,
                item = %original.display_name(),
                removed = replacement.is_none(),
                "item staged"
            );
            staged.insert(slot, replacement);
            succeeded += 1;
        }

        for (slot, item) in staged {
            if !handle.set(slot, item) {
                return Err(CommandError::unexpected(format!(
                    "{} rejected a write to slot {slot}",
                    handle.label()
                )));
            }
        }
    }
    Ok(succeeded)
}
