//! Session configuration

use crate::chat::TruncateOptions;
use crate::error::{ConfigError, SwitchboardResult};
use serde::{Deserialize, Serialize};

/// Configuration for one conversation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum tool-invocation round trips within a single turn. Once
    /// the cap is reached the driver stops dispatching tools and asks
    /// the model for a plain narration, guaranteeing the turn
    /// terminates.
    pub max_tool_steps: usize,
    /// Truncation applied to the history slice carried across a
    /// handoff. Tool items are kept by default so call/result pairs
    /// survive the boundary.
    pub carry_over: TruncateOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tool_steps: 5,
            carry_over: TruncateOptions::carry_over(),
        }
    }
}

impl SessionConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> SwitchboardResult<()> {
        if self.max_tool_steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tool_steps".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.carry_over.keep_last_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "carry_over.keep_last_n".to_string(),
                value: "0".to_string(),
                reason: "a handoff that carries nothing forward should disable carry-over \
                         at the call site instead"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Override the tool-step cap.
    pub fn with_max_tool_steps(mut self, max: usize) -> Self {
        self.max_tool_steps = max;
        self
    }

    /// Override the carry-over truncation options.
    pub fn with_carry_over(mut self, opts: TruncateOptions) -> Self {
        self.carry_over = opts;
        self
    }
}
