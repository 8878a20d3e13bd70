//! Scenario files: a JSON snapshot of the world plus planning goals.
//!
//! ```json
//! {
//!   "width": 16, "height": 16,
//!   "bases": [{"x": 1, "y": 1}],
//!   "units": [{"id": 1, "position": {"x": 2, "y": 2}}],
//!   "resources": [
//!     {"id": 1, "kind": "gold", "position": {"x": 10, "y": 10}, "remaining": 500}
//!   ],
//!   "required_gold": 200,
//!   "planner": {"load_amount": 100}
//! }
//! ```

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::state::{Goal, PlanningState, ResourceNode, Unit};
use crate::types::{MapExtent, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub bases: Vec<Position>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub resources: Vec<ResourceNode>,
    #[serde(default)]
    pub required_gold: u32,
    #[serde(default)]
    pub required_wood: u32,
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read scenario {}", path.display()),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loaded scenario");
        Self::from_json(&text)
    }

    pub fn goal(&self) -> Goal {
        Goal::new(self.required_gold, self.required_wood)
    }

    /// Validates the snapshot and builds the initial planning state.
    pub fn into_state(self) -> Result<PlanningState> {
        let goal = self.goal();
        PlanningState::new(
            MapExtent::new(self.width, self.height),
            self.bases,
            self.units,
            self.resources,
            goal,
        )?
        .with_config(self.planner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResourceKind, UnitId};

    const SMALL: &str = r#"{
        "width": 8, "height": 8,
        "bases": [{"x": 1, "y": 1}],
        "units": [{"id": 7, "position": {"x": 2, "y": 2}}],
        "resources": [
            {"id": 1, "kind": "gold", "position": {"x": 6, "y": 6}, "remaining": 300},
            {"id": 2, "kind": "wood", "position": {"x": 0, "y": 6}, "remaining": 100}
        ],
        "required_gold": 200,
        "planner": {"harvest_cost": 2}
    }"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_json(SMALL).unwrap();
        assert_eq!(scenario.units[0].id, UnitId(7));
        assert!(scenario.units[0].cargo.is_none());
        assert_eq!(scenario.resources[1].kind, ResourceKind::Wood);
        assert_eq!(scenario.goal(), Goal::new(200, 0));
        assert_eq!(scenario.planner.harvest_cost, 2);
        assert_eq!(scenario.planner.load_amount, 100);
    }

    #[test]
    fn test_into_state() {
        let state = Scenario::from_json(SMALL).unwrap().into_state().unwrap();
        assert_eq!(state.units().len(), 1);
        assert_eq!(state.resources().len(), 2);
        assert_eq!(state.config().harvest_cost, 2);
        assert_eq!(state.goal().gold, 200);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Scenario::from_json("{"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_out_of_bounds_resource() {
        let mut scenario = Scenario::from_json(SMALL).unwrap();
        scenario.resources[0].position = Position::new(9, 9);
        assert!(matches!(
            scenario.into_state(),
            Err(Error::ResourceOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_carried_cargo_must_be_a_full_load() {
        let with_cargo = |amount: u32| {
            SMALL.replace(
                r#""position": {"x": 2, "y": 2}}"#,
                &format!(
                    r#""position": {{"x": 2, "y": 2}}, "cargo": {{"kind": "gold", "amount": {amount}}}}}"#
                ),
            )
        };

        let full = Scenario::from_json(&with_cargo(100)).unwrap().into_state().unwrap();
        assert!(full.units()[0].is_carrying());
        assert!(matches!(
            Scenario::from_json(&with_cargo(37)).unwrap().into_state(),
            Err(Error::PartialCargo { amount: 37, .. })
        ));
        assert!(matches!(
            Scenario::from_json(&with_cargo(0)).unwrap().into_state(),
            Err(Error::EmptyCargo { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Scenario::load("/nonexistent/scenario.json");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
