//! Switchboard Test Utils
//!
//! Shared test support: the scripted mock backends re-exported from
//! their home crates, a small domain profile for exercising the core
//! without a real persona, and proptest generators for core types.

// Re-export mock backends so test code needs one import.
pub use switchboard_llm::MockLanguageModel;
pub use switchboard_voice::{MockSpeechToText, MockTextToSpeech};

use switchboard_core::{Profile, StateSnapshot};

// ============================================================================
// TEST PROFILE
// ============================================================================

/// Minimal domain profile for driver and dispatch tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub order_number: Option<String>,
    pub rating: Option<i64>,
}

impl Profile for TestProfile {
    fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::new();
        snapshot.set_or_unknown("email", self.email.clone());
        snapshot.set_or_unknown("name", self.name.clone());
        snapshot.set_or_unknown("order_number", self.order_number.clone());
        snapshot.set_or_unknown("rating", self.rating);
        snapshot
    }
}

// ============================================================================
// PROPERTY TEST GENERATORS
// ============================================================================

/// Proptest strategies for core types.
pub mod generators {
    use proptest::collection::btree_map;
    use proptest::prelude::*;
    use serde_json::Value;
    use switchboard_core::{ConversationItem, ItemId, Role, StateSnapshot, TruncateOptions};
    use uuid::Uuid;

    /// Arbitrary item id.
    pub fn arb_item_id() -> impl Strategy<Value = ItemId> {
        any::<u128>().prop_map(|bits| ItemId::from_uuid(Uuid::from_u128(bits)))
    }

    /// Arbitrary message role.
    pub fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::System), Just(Role::User), Just(Role::Assistant)]
    }

    /// Arbitrary conversation item. Tool results reference a random
    /// call id; pairing is not guaranteed, which is exactly what the
    /// truncation boundary rules have to tolerate.
    pub fn arb_item() -> impl Strategy<Value = ConversationItem> {
        prop_oneof![
            (arb_item_id(), arb_role(), "[ -~]{0,40}").prop_map(|(id, role, content)| {
                ConversationItem::Message { id, role, content }
            }),
            (arb_item_id(), "[a-z_]{1,16}").prop_map(|(id, name)| ConversationItem::ToolCall {
                id,
                name,
                args: Value::Object(serde_json::Map::new()),
            }),
            (arb_item_id(), arb_item_id(), "[ -~]{0,20}").prop_map(|(id, call_id, text)| {
                ConversationItem::ToolResult {
                    id,
                    call_id,
                    value: Value::String(text),
                }
            }),
        ]
    }

    /// Arbitrary item sequence of the given length range.
    pub fn arb_items(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<ConversationItem>> {
        proptest::collection::vec(arb_item(), len)
    }

    /// Arbitrary truncation options.
    pub fn arb_truncate_options() -> impl Strategy<Value = TruncateOptions> {
        (1usize..12, any::<bool>(), any::<bool>()).prop_map(
            |(keep_last_n, keep_system_messages, keep_tool_items)| TruncateOptions {
                keep_last_n,
                keep_system_messages,
                keep_tool_items,
            },
        )
    }

    /// Arbitrary scalar JSON value (string, integer, finite float, or
    /// boolean).
    pub fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[ -~]{0,24}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            proptest::num::f64::NORMAL.prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    /// Arbitrary state snapshot with scalar fields.
    pub fn arb_snapshot() -> impl Strategy<Value = StateSnapshot> {
        btree_map("[a-z][a-z0-9_.]{0,15}", arb_scalar(), 0..12)
            .prop_map(|map| map.into_iter().collect())
    }
}
