//! Handoff controller
//!
//! Transfers conversational control between agents. The controller
//! validates the target against the registry and records the outgoing
//! agent as `previous_agent`; actually swapping the active agent and
//! running its entry hook is the session driver's job, so the
//! controller performs no side effect beyond that single state update.

use chrono::Utc;
use switchboard_core::{AgentError, AgentName, Profile, SessionState, Timestamp};
use tracing::info;

use crate::registry::AgentRegistry;

/// Record of one accepted handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// Agent giving up control.
    pub from: AgentName,
    /// Agent taking control.
    pub to: AgentName,
    /// Transfer confirmation recorded as the initiating tool's result.
    pub message: String,
    /// When the transfer was accepted.
    pub at: Timestamp,
}

/// Transfer control to the named agent.
///
/// An unknown target is a configuration error and fails loudly; it is
/// never converted into a narrated reply. On success `previous_agent`
/// points at the outgoing agent so the entry hook can source its
/// carried-over history.
pub fn transfer_to<P: Profile>(
    target: &AgentName,
    registry: &AgentRegistry<P>,
    state: &mut SessionState<P>,
    current: &AgentName,
) -> Result<Handoff, AgentError> {
    registry.ensure(target)?;
    state.set_previous_agent(current.clone());

    info!(from = %current, to = %target, "agent handoff");

    Ok(Handoff {
        from: current.clone(),
        to: target.clone(),
        message: format!("Transferring to {target}."),
        at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentDef;
    use switchboard_test_utils::TestProfile;

    fn registry_with(names: &[&str]) -> AgentRegistry<TestProfile> {
        let mut registry = AgentRegistry::new();
        for name in names {
            registry
                .register(AgentDef::new(*name, "instructions"))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_transfer_records_previous_agent() {
        let registry = registry_with(&["initial", "billing"]);
        let mut state = SessionState::new(TestProfile::default());
        let current = AgentName::new("initial");

        let handoff =
            transfer_to(&AgentName::new("billing"), &registry, &mut state, &current).unwrap();

        assert_eq!(handoff.from, current);
        assert_eq!(handoff.to, AgentName::new("billing"));
        assert_eq!(handoff.message, "Transferring to billing.");
        assert_eq!(state.previous_agent(), Some(&current));
    }

    #[test]
    fn test_transfer_to_unknown_agent_fails_loudly() {
        let registry = registry_with(&["initial"]);
        let mut state = SessionState::new(TestProfile::default());
        let current = AgentName::new("initial");

        let err = transfer_to(&AgentName::new("mortgage"), &registry, &mut state, &current)
            .unwrap_err();

        assert!(matches!(err, AgentError::UnknownAgent { .. }));
        // The failed transfer must leave no trace.
        assert!(state.previous_agent().is_none());
    }
}
