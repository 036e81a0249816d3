//! Switchboard Session - Turn-Taking Driver
//!
//! The session driver owns one conversation: the shared state, the
//! agent registry, the active agent, and the external backends. Each
//! turn runs to completion (nested tool dispatch, at most one handoff,
//! final narration) before the next input is accepted; the actor
//! wrapper gives each conversation its own task so embedders can run
//! many isolated conversations concurrently.

pub mod actor;
pub mod driver;

pub use actor::{spawn, SessionHandle};
pub use driver::{Session, SessionBuilder, TurnOutput};
