//! Configuration for the order resolver

use crate::algorithms::DEFAULT_STEP;
use crate::domain::errors::OrderingError;
use serde::{Deserialize, Serialize};

/// Resolver configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Spacing between consecutive priorities
    pub step: i32,
    /// Maximum items in one resolution
    pub max_items: usize,
    /// Maximum constraints in one resolution
    pub max_edges: usize,
    /// Leave registry entries alone when they already hold the computed value
    pub skip_unchanged: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_items: 10_000,
            max_edges: 100_000,
            skip_unchanged: true,
        }
    }
}

impl OrderingConfig {
    /// Reject settings that could produce invalid priorities.
    ///
    /// The largest priority handed out is `step * (max_items + 1)`, which
    /// must fit in an `i32`.
    pub fn validate(&self) -> Result<(), OrderingError> {
        if self.step <= 0 {
            return Err(OrderingError::InvalidConfig(format!(
                "step must be positive, got {}",
                self.step
            )));
        }

        let highest = i64::from(self.step) * (self.max_items as i64 + 1);
        if highest > i64::from(i32::MAX) {
            return Err(OrderingError::InvalidConfig(format!(
                "step {} with max_items {} overflows the priority range",
                self.step, self.max_items
            )));
        }

        Ok(())
    }
}
