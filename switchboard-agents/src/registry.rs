//! Agent registry
//!
//! One registry per conversation, populated eagerly at session start
//! with every persona and never mutated afterward. Each entry couples
//! the immutable agent definition with the agent's own append-only
//! history buffer, which lives for the whole session across all of the
//! agent's active periods.

use std::collections::HashMap;
use switchboard_context::ChatHistory;
use switchboard_core::{AgentError, AgentName, Profile};

use crate::agent::AgentDef;

/// An agent plus its session-lifetime history buffer.
#[derive(Debug)]
pub struct AgentRuntime<P: Profile> {
    def: AgentDef<P>,
    /// The agent's own conversation buffer. Items are never removed;
    /// truncation only affects what is copied to another agent.
    pub history: ChatHistory,
}

impl<P: Profile> AgentRuntime<P> {
    /// The agent's definition.
    pub fn def(&self) -> &AgentDef<P> {
        &self.def
    }
}

/// Registry mapping agent names to runtimes.
#[derive(Debug)]
pub struct AgentRegistry<P: Profile> {
    agents: HashMap<AgentName, AgentRuntime<P>>,
}

impl<P: Profile> Default for AgentRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Profile> AgentRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent. Names are unique; a second registration under
    /// the same name is a configuration error.
    pub fn register(&mut self, def: AgentDef<P>) -> Result<(), AgentError> {
        let name = def.name().clone();
        if self.agents.contains_key(&name) {
            return Err(AgentError::DuplicateAgent {
                name: name.to_string(),
            });
        }
        self.agents.insert(
            name,
            AgentRuntime {
                def,
                history: ChatHistory::new(),
            },
        );
        Ok(())
    }

    /// Look up an agent.
    pub fn get(&self, name: &AgentName) -> Result<&AgentRuntime<P>, AgentError> {
        self.agents.get(name).ok_or_else(|| AgentError::UnknownAgent {
            name: name.to_string(),
        })
    }

    /// Look up an agent mutably (for history appends).
    pub fn get_mut(&mut self, name: &AgentName) -> Result<&mut AgentRuntime<P>, AgentError> {
        self.agents
            .get_mut(name)
            .ok_or_else(|| AgentError::UnknownAgent {
                name: name.to_string(),
            })
    }

    /// Fail unless an agent with this name is registered.
    pub fn ensure(&self, name: &AgentName) -> Result<(), AgentError> {
        self.get(name).map(|_| ())
    }

    /// Registered agent names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &AgentName> {
        self.agents.keys()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_test_utils::TestProfile;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = AgentRegistry::new();
        registry
            .register(AgentDef::<TestProfile>::new("initial", "You greet."))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&AgentName::new("initial")).is_ok());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = AgentRegistry::new();
        registry
            .register(AgentDef::<TestProfile>::new("initial", "first"))
            .unwrap();
        let err = registry
            .register(AgentDef::<TestProfile>::new("initial", "second"))
            .unwrap_err();
        assert!(matches!(err, AgentError::DuplicateAgent { .. }));
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let registry = AgentRegistry::<TestProfile>::new();
        let err = registry.get(&AgentName::new("ghost")).unwrap_err();
        assert!(matches!(err, AgentError::UnknownAgent { .. }));
    }
}
