//! Switchboard Context - History and Carry-Over
//!
//! Conversation history buffers scoped to one agent's lifetime,
//! bounded/filtered truncation for porting context across a handoff,
//! the idempotent carry-over merge, and the deterministic state-summary
//! format embedded in entry system messages.

pub mod carry_over;
pub mod history;
pub mod summary;
pub mod truncate;

pub use carry_over::carry_over;
pub use history::ChatHistory;
pub use summary::{parse_snapshot, render_snapshot};
pub use truncate::truncate;
