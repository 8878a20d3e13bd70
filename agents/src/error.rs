use harvest_core::ResourceKind;
use thiserror::Error;

/// Failures surfaced by the adversarial search entry points.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("ply budget must be at least 1, got {depth}")]
    InvalidDepth { depth: u8 },

    #[error("invalid search window: alpha {alpha} must be below beta {beta}")]
    InvalidWindow { alpha: f64, beta: f64 },
}

/// Failures surfaced by the planner entry points.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlanError {
    #[error("goal needs {required} {kind} but at most {available} can be obtained")]
    Unreachable {
        kind: ResourceKind,
        required: u32,
        available: u64,
    },

    #[error("no plan found after expanding {expanded} states")]
    NoPlan { expanded: usize },

    #[error("search stopped after {limit} expansions without reaching the goal")]
    BudgetExhausted { limit: usize },

    #[error("step {step}: '{action}' no longer applies to the live state")]
    Diverged { step: usize, action: String },

    #[error(transparent)]
    Core(#[from] harvest_core::Error),
}
