//! Tool operation schema and outcome types
//!
//! A tool operation is a typed, schema-described callable exposed to
//! the language-model backend. The serialized `ToolSpec` is the only
//! wire-level contract this core publishes: the backend decides when to
//! invoke a tool from its name, description, and argument schema.

use crate::error::ToolError;
use crate::identity::AgentName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// PARAMETER SCHEMA
// ============================================================================

/// Type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// UTF-8 string.
    String,
    /// Integer number.
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean flag.
    Boolean,
    /// List of strings.
    StringList,
}

impl ParamType {
    /// Whether a JSON value matches this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::StringList => "string_list",
        };
        write!(f, "{s}")
    }
}

/// Inclusive numeric range constraint on a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConstraint {
    /// Minimum allowed value, if bounded below.
    pub minimum: Option<f64>,
    /// Maximum allowed value, if bounded above.
    pub maximum: Option<f64>,
}

impl RangeConstraint {
    /// A range bounded on both ends.
    pub fn between(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Whether a numeric value satisfies the constraint.
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.minimum {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.maximum {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// Schema for one tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Field name in the invocation's argument object.
    pub name: String,
    /// Human-readable description shown to the model backend.
    pub description: String,
    /// Expected value type.
    pub param_type: ParamType,
    /// Whether the argument must be present.
    pub required: bool,
    /// Default value applied when the argument is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Numeric range constraint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeConstraint>,
    /// Closed set of allowed string values, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
}

impl ParamSpec {
    /// A required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type,
            required: true,
            default: None,
            range: None,
            one_of: None,
        }
    }

    /// An optional parameter.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a numeric range constraint.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.range = Some(RangeConstraint::between(minimum, maximum));
        self
    }

    /// Restrict a string parameter to a closed set of values.
    pub fn with_one_of(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

// ============================================================================
// TOOL SPEC
// ============================================================================

/// Introspectable description of one tool operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique name within the owning agent's toolset.
    pub name: String,
    /// Human-readable description shown to the model backend.
    pub description: String,
    /// Ordered parameter schemas.
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Create a spec with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter schema.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Validate an argument object against this schema.
    ///
    /// Checks presence of required fields, value types, and range
    /// constraints. Unknown fields are tolerated; the backend is
    /// allowed to send more context than the schema names.
    pub fn validate_args(&self, args: &Value) -> Result<(), ToolError> {
        let object = match args {
            Value::Object(map) => map,
            Value::Null => {
                // Absent argument object is fine when nothing is required.
                if self.params.iter().any(|p| p.required) {
                    return Err(ToolError::InvalidArgs {
                        tool: self.name.clone(),
                        reason: "argument object is missing".to_string(),
                    });
                }
                return Ok(());
            }
            _ => {
                return Err(ToolError::InvalidArgs {
                    tool: self.name.clone(),
                    reason: format!("arguments must be an object, got {args}"),
                })
            }
        };

        for param in &self.params {
            let value = match object.get(&param.name) {
                Some(Value::Null) | None => {
                    if param.required && param.default.is_none() {
                        return Err(ToolError::InvalidArgs {
                            tool: self.name.clone(),
                            reason: format!("required argument `{}` is missing", param.name),
                        });
                    }
                    continue;
                }
                Some(value) => value,
            };

            if !param.param_type.matches(value) {
                return Err(ToolError::InvalidArgs {
                    tool: self.name.clone(),
                    reason: format!(
                        "argument `{}` expected {}, got {value}",
                        param.name, param.param_type
                    ),
                });
            }

            if let (Some(range), Some(number)) = (&param.range, value.as_f64()) {
                if !range.contains(number) {
                    return Err(ToolError::InvalidArgs {
                        tool: self.name.clone(),
                        reason: format!(
                            "argument `{}` value {number} outside allowed range",
                            param.name
                        ),
                    });
                }
            }

            if let (Some(allowed), Some(s)) = (&param.one_of, value.as_str()) {
                if !allowed.iter().any(|v| v == s) {
                    return Err(ToolError::InvalidArgs {
                        tool: self.name.clone(),
                        reason: format!(
                            "argument `{}` value `{s}` is not one of {allowed:?}",
                            param.name
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// INVOCATION AND OUTCOME
// ============================================================================

/// A tool invocation request produced by the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool to invoke.
    pub name: String,
    /// Argument object.
    pub args: Value,
}

impl ToolInvocation {
    /// Create an invocation.
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Result of a tool operation.
///
/// The two cases are an explicit tagged type: a plain result is
/// narrated to the user with no state transition, while a handoff
/// directive tells the session driver to swap the active agent before
/// producing the next reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolOutcome {
    /// Narrate the value; no transition.
    Narrated(Value),
    /// Transfer control to another agent.
    Handoff {
        /// Registry name of the target agent.
        target: AgentName,
        /// Transfer confirmation recorded as the tool's result.
        message: String,
    },
}

impl ToolOutcome {
    /// A narrated plain-text result.
    pub fn narrate(text: impl Into<String>) -> Self {
        ToolOutcome::Narrated(Value::String(text.into()))
    }

    /// A narrated structured result.
    pub fn structured(value: Value) -> Self {
        ToolOutcome::Narrated(value)
    }

    /// A handoff directive with the standard confirmation message.
    pub fn handoff(target: impl Into<AgentName>) -> Self {
        let target = target.into();
        let message = format!("Transferring to {target}.");
        ToolOutcome::Handoff { target, message }
    }

    /// Whether this outcome is a handoff directive.
    pub fn is_handoff(&self) -> bool {
        matches!(self, ToolOutcome::Handoff { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_range_contains_matches_bounds(
            a in -1.0e9f64..1.0e9,
            b in -1.0e9f64..1.0e9,
            x in -1.0e9f64..1.0e9,
        ) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let range = RangeConstraint::between(min, max);
            prop_assert_eq!(range.contains(x), x >= min && x <= max);
        }

        #[test]
        fn prop_in_range_integer_always_validates(rating in 1i64..=5) {
            let spec = ToolSpec::new("rate", "rate").with_param(
                ParamSpec::required("rating", ParamType::Integer, "rating")
                    .with_range(1.0, 5.0),
            );
            let args = serde_json::json!({ "rating": rating });
            prop_assert!(spec.validate_args(&args).is_ok());
        }
    }
}
