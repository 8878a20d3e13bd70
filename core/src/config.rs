//! Planner tuning knobs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Amount a unit carries after one harvest.
pub const DEFAULT_LOAD_AMOUNT: u32 = 100;

/// Costs and limits used when expanding planning states.
///
/// # Examples
///
/// ```
/// use harvest_core::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_load_amount(50)
///     .with_max_expansions(10_000);
/// assert_eq!(config.load_amount, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Cargo carried by a unit after one harvest
    pub load_amount: u32,
    /// Cost of a harvest action
    pub harvest_cost: u32,
    /// Cost of a deposit action
    pub deposit_cost: u32,
    /// Stop the search after this many expansions
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    pub fn with_load_amount(mut self, amount: u32) -> Self {
        self.load_amount = amount;
        self
    }

    pub fn with_harvest_cost(mut self, cost: u32) -> Self {
        self.harvest_cost = cost;
        self
    }

    pub fn with_deposit_cost(mut self, cost: u32) -> Self {
        self.deposit_cost = cost;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Rejects settings the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.load_amount == 0 {
            return Err(Error::InvalidConfiguration {
                message: "load_amount must be positive".to_string(),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max_expansions must be positive when set".to_string(),
            });
        }
        Ok(())
    }

    /// Number of loads needed to move `amount` units of a resource.
    pub fn loads_for(&self, amount: u32) -> u32 {
        amount.div_ceil(self.load_amount.max(1))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            load_amount: DEFAULT_LOAD_AMOUNT,
            harvest_cost: 1,
            deposit_cost: 1,
            max_expansions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.load_amount, 100);
        assert_eq!(config.harvest_cost, 1);
        assert_eq!(config.deposit_cost, 1);
        assert!(config.max_expansions.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_load_rejected() {
        let config = PlannerConfig::default().with_load_amount(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_loads_round_up() {
        let config = PlannerConfig::default();
        assert_eq!(config.loads_for(0), 0);
        assert_eq!(config.loads_for(100), 1);
        assert_eq!(config.loads_for(150), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{"harvest_cost": 3}"#).unwrap();
        assert_eq!(config.harvest_cost, 3);
        assert_eq!(config.load_amount, DEFAULT_LOAD_AMOUNT);
    }
}
