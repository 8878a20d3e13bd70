pub mod error;
pub mod heuristic;
pub mod minimax;
pub mod ordering;
pub mod planner;
pub mod planner_agent;
pub mod search;

use harvest_core::GameState;

/// Core trait for adversarial agents
pub trait Agent<S: GameState> {
    /// Get the best action for the maximizer in `state`, `None` if it has no moves
    fn best_action(&mut self, state: &S) -> Result<Option<S::Action>, SearchError>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use error::{PlanError, SearchError};
pub use heuristic::heuristic;
pub use minimax::AlphaBetaAgent;
pub use ordering::MoveOrdering;
pub use planner::{build_plan, plan, Plan};
pub use planner_agent::{PlanCursor, PlannerAgent};
pub use search::*;
