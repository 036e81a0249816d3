//! Shared session state
//!
//! One `SessionState` exists per conversation. It carries the typed
//! domain profile every agent reads and mutates through tool
//! operations, one extensible preference map for genuinely dynamic
//! keys, and the name of the agent that was active before the last
//! handoff (the sole source of carried-over history).

use crate::identity::AgentName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// STATE SNAPSHOT
// ============================================================================

/// Deterministic, key-ordered dump of every populated session field.
///
/// Snapshots feed the synthetic system message appended when an agent
/// becomes active, so each agent sees the accumulated state no matter
/// which agent collected it. Keys iterate in sorted order; values are
/// JSON scalars or small JSON structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot(BTreeMap<String, Value>);

impl StateSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Set a field from an optional value, recording `"unknown"` when
    /// the field has not been collected yet.
    pub fn set_or_unknown(&mut self, key: impl Into<String>, value: Option<impl Into<Value>>) {
        match value {
            Some(v) => self.set(key, v),
            None => self.set(key, "unknown"),
        }
    }

    /// Get a field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// PROFILE TRAIT
// ============================================================================

/// Domain-specific session record with named, typed fields.
///
/// Implementations are plain structs; the `Clone` bound is what lets a
/// tool operation run against a staged copy and commit atomically.
pub trait Profile: Clone + Send + Sync + 'static {
    /// Dump every populated field into a deterministic snapshot.
    fn snapshot(&self) -> StateSnapshot;
}

// ============================================================================
// SESSION STATE
// ============================================================================

/// Shared mutable record for one conversation.
///
/// Created once per conversation and destroyed at session end. All
/// mutation is serialized through the session driver's turn loop; the
/// driver clones the whole state to stage a tool operation and commits
/// the clone only when the operation succeeds.
#[derive(Debug, Clone)]
pub struct SessionState<P> {
    /// Typed domain fields collected from the user.
    pub profile: P,
    /// Extensible map for dynamic domain preferences (e.g. property
    /// search criteria). Keys iterate in sorted order so snapshots stay
    /// deterministic.
    pub preferences: BTreeMap<String, Value>,
    previous_agent: Option<AgentName>,
}

impl<P: Profile> SessionState<P> {
    /// Create session state around a domain profile.
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            preferences: BTreeMap::new(),
            previous_agent: None,
        }
    }

    /// The agent active immediately before the last handoff, if any.
    pub fn previous_agent(&self) -> Option<&AgentName> {
        self.previous_agent.as_ref()
    }

    /// Record the agent being deactivated by a handoff.
    ///
    /// Only the handoff controller calls this; the invariant that the
    /// previous agent was once active follows from the controller being
    /// handed the currently active name.
    pub fn set_previous_agent(&mut self, name: AgentName) {
        self.previous_agent = Some(name);
    }

    /// Snapshot of the profile plus any dynamic preferences, the
    /// latter under `preference.<key>` keys.
    pub fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = self.profile.snapshot();
        for (key, value) in &self.preferences {
            snapshot.set(format!("preference.{key}"), value.clone());
        }
        snapshot
    }
}

impl<P: Profile + Default> Default for SessionState<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Default)]
    struct TestProfile {
        name: Option<String>,
        rating: Option<i64>,
    }

    impl Profile for TestProfile {
        fn snapshot(&self) -> StateSnapshot {
            let mut snapshot = StateSnapshot::new();
            snapshot.set_or_unknown("name", self.name.clone());
            snapshot.set_or_unknown("rating", self.rating);
            snapshot
        }
    }

    #[test]
    fn test_snapshot_key_order_is_deterministic() {
        let mut snapshot = StateSnapshot::new();
        snapshot.set("zebra", 1);
        snapshot.set("alpha", 2);
        let keys: Vec<_> = snapshot.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_set_or_unknown() {
        let mut snapshot = StateSnapshot::new();
        snapshot.set_or_unknown("name", Some("Ada"));
        snapshot.set_or_unknown("email", None::<String>);
        assert_eq!(snapshot.get("name"), Some(&json!("Ada")));
        assert_eq!(snapshot.get("email"), Some(&json!("unknown")));
    }

    #[test]
    fn test_previous_agent_starts_unset() {
        let state = SessionState::new(TestProfile::default());
        assert!(state.previous_agent().is_none());
    }

    #[test]
    fn test_preferences_appear_in_snapshot() {
        let mut state = SessionState::new(TestProfile {
            name: Some("Ada".into()),
            rating: None,
        });
        state
            .preferences
            .insert("max_price".into(), json!(350000));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.get("name"), Some(&json!("Ada")));
        assert_eq!(snapshot.get("preference.max_price"), Some(&json!(350000)));
    }
}
