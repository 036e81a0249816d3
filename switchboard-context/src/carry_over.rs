//! History carry-over across a handoff
//!
//! When an agent becomes active, a bounded slice of the previous
//! agent's history is merged into its own buffer. The merge is
//! idempotent: items whose ids the receiving buffer already holds are
//! skipped, so running the carry-over twice never duplicates an item.

use crate::history::ChatHistory;
use crate::truncate::truncate;
use switchboard_core::{ConversationItem, TruncateOptions};

/// Truncate `source` and append the unseen remainder to `target`.
///
/// Returns the number of items actually appended.
pub fn carry_over(
    source: &[ConversationItem],
    target: &mut ChatHistory,
    opts: &TruncateOptions,
) -> usize {
    let slice = truncate(source, opts);
    target.extend_new(slice)
}
