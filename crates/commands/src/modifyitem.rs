//! The `modifyitem` command tree.
//!
//! ```text
//! modifyitem block <pos>     slot <slot>            <action> <mode> [args]
//! modifyitem entity <targets> item <item> [<count>] <action> <mode> [args]
//! ```

use crate::action::ACTION_TYPES;
use crate::dispatcher::CommandDispatcher;
use crate::finder::FinderKind;
use crate::grammar::CommandNode;
use crate::selector::SelectorKind;

pub const COMMAND_NAME: &str = "modifyitem";

/// Full grammar for every selector, finder, action and mode combination.
pub fn build() -> CommandNode {
    SelectorKind::ALL
        .into_iter()
        .fold(CommandNode::literal(COMMAND_NAME), |root, selector| {
            let target = FinderKind::ALL
                .into_iter()
                .fold(selector.key().node(), |node, finder| {
                    node.then(finder.node(|| actions(selector, finder)))
                });
            root.then(CommandNode::literal(selector.literal()).then(target))
        })
}

fn actions(selector: SelectorKind, finder: FinderKind) -> Vec<CommandNode> {
    ACTION_TYPES
        .iter()
        .map(|action| action.node(selector, finder))
        .collect()
}

pub fn register(dispatcher: &mut CommandDispatcher) {
    dispatcher.register(build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_hangs_below_every_finder() {
        let root = build();
        for selector in SelectorKind::ALL {
            let target = &root.child(selector.literal()).unwrap().children()[0];
            for finder in FinderKind::ALL {
                let finder_arg = &target.child(finder.literal()).unwrap().children()[0];
                for action in ACTION_TYPES {
                    assert!(finder_arg.child(action.name).is_some(), "{}", action.name);
                }
            }
        }
    }

    #[test]
    fn usage_covers_optional_count() {
        let paths = build().usage_paths();
        assert!(paths.contains(
            &"modifyitem entity <targets> item <item> <count> damage add <amount>".to_string()
        ));
        assert!(paths.contains(
            &"modifyitem block <pos: x y z> slot <slot> enchantment remove <enchantment>"
                .to_string()
        ));
        assert!(paths.contains(&"modifyitem block <pos: x y z> slot <slot> lore clear".to_string()));
    }
}
