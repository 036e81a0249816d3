//! Bounded, filtered truncation of a history slice
//!
//! Used to port a recent slice of one agent's history across a handoff
//! without unbounded context growth. The scan walks newest to oldest,
//! keeps only eligible items, restores chronological order, then drops
//! any leading tool items: a tool call or result must never open a
//! carried-over slice, because its pair would sit on the far side of
//! the boundary and the receiving model would see an orphaned fragment.

use switchboard_core::{ConversationItem, TruncateOptions};

/// Select the most recent eligible items from `items`.
///
/// An item is eligible unless it is a system message while
/// `keep_system_messages` is false, or a tool call/result while
/// `keep_tool_items` is false. At most `keep_last_n` eligible items are
/// returned, in their original chronological order, with leading tool
/// items removed from the result.
///
/// An empty input yields an empty output; fewer eligible items than
/// `keep_last_n` yields all of them.
pub fn truncate(items: &[ConversationItem], opts: &TruncateOptions) -> Vec<ConversationItem> {
    let eligible = |item: &ConversationItem| {
        if !opts.keep_system_messages && item.is_system_message() {
            return false;
        }
        if !opts.keep_tool_items && item.is_tool_item() {
            return false;
        }
        true
    };

    let mut kept: Vec<ConversationItem> = Vec::new();
    for item in items.iter().rev() {
        if eligible(item) {
            kept.push(item.clone());
        }
        if kept.len() >= opts.keep_last_n {
            break;
        }
    }
    kept.reverse();

    // A call/result pair split across the boundary is an invalid
    // conversational fragment for a model context.
    let lead = kept.iter().take_while(|item| item.is_tool_item()).count();
    kept.drain(..lead);

    kept
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use switchboard_test_utils::generators::{arb_items, arb_truncate_options};

    proptest! {
        #[test]
        fn prop_never_starts_with_tool_item(
            items in arb_items(0..40),
            opts in arb_truncate_options(),
        ) {
            let kept = truncate(&items, &opts);
            if let Some(first) = kept.first() {
                prop_assert!(!first.is_tool_item());
            }
        }

        #[test]
        fn prop_output_bounded_by_keep_last_n(
            items in arb_items(0..40),
            opts in arb_truncate_options(),
        ) {
            let kept = truncate(&items, &opts);
            prop_assert!(kept.len() <= opts.keep_last_n);
        }

        #[test]
        fn prop_output_is_ordered_subsequence(
            items in arb_items(0..40),
            opts in arb_truncate_options(),
        ) {
            let kept = truncate(&items, &opts);
            let ids: Vec<_> = items.iter().map(|i| i.id()).collect();
            let mut cursor = 0;
            for item in &kept {
                let pos = ids[cursor..]
                    .iter()
                    .position(|id| *id == item.id())
                    .map(|p| cursor + p);
                prop_assert!(pos.is_some(), "kept item not found in order");
                cursor = pos.unwrap() + 1;
            }
        }
    }
}
