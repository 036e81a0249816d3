//! State summary rendering and parsing
//!
//! The summary is the deterministic textual dump of session state that
//! gets embedded in the synthetic system message when an agent becomes
//! active. One field per line, keys in sorted order, both key and value
//! JSON-encoded so numeric and boolean fields round-trip exactly. This
//! is an internal debug representation, not a durable format.

use switchboard_core::{StateSnapshot, SummaryError};

/// Render a snapshot as sorted `"key": value` lines.
pub fn render_snapshot(snapshot: &StateSnapshot) -> String {
    let mut out = String::new();
    for (key, value) in snapshot.iter() {
        // Both sides are JSON, so a line is a one-entry JSON object
        // body. Serialization of strings and numbers cannot fail.
        let key_json = serde_json::to_string(key).expect("string keys always serialize");
        let value_json = serde_json::to_string(value).expect("JSON values always serialize");
        out.push_str(&key_json);
        out.push_str(": ");
        out.push_str(&value_json);
        out.push('\n');
    }
    out
}

/// Parse a rendered summary back into a snapshot.
///
/// Every line must be a single `"key": value` entry; blank lines are
/// skipped. Scalar fields recover their exact values.
pub fn parse_snapshot(text: &str) -> Result<StateSnapshot, SummaryError> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&format!("{{{line}}}")).map_err(|e| {
                SummaryError::MalformedLine {
                    line: index + 1,
                    reason: e.to_string(),
                }
            })?;
        let mut fields = object.into_iter();
        match (fields.next(), fields.next()) {
            (Some(entry), None) => entries.push(entry),
            _ => {
                return Err(SummaryError::MalformedLine {
                    line: index + 1,
                    reason: "expected exactly one field per line".to_string(),
                })
            }
        }
    }
    Ok(entries.into_iter().collect())
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use switchboard_test_utils::generators::arb_snapshot;

    proptest! {
        #[test]
        fn prop_render_parse_roundtrip(snapshot in arb_snapshot()) {
            let parsed = parse_snapshot(&render_snapshot(&snapshot)).unwrap();
            prop_assert_eq!(parsed, snapshot);
        }
    }
}
