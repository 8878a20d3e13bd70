pub mod action;
pub mod action_gen;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod scenario;
pub mod simulation;
pub mod state;
pub mod types;

pub use action::Action;
pub use action_gen::{generate_actions, successors};
pub use config::{PlannerConfig, DEFAULT_LOAD_AMOUNT};
pub use error::{Error, Result};
pub use game::{GameNode, GameState};
pub use history::History;
pub use scenario::Scenario;
pub use simulation::{simulate, simulate_detailed, SimulationReport};
pub use state::{Cargo, Goal, PlanningState, ResourceNode, StateKey, Unit};
pub use types::*;
