//! Error types for the harvest core

use crate::types::{Position, ResourceId, UnitId};
use thiserror::Error;

/// Errors raised while building or replaying planning states.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("map extent {width}x{height} is empty")]
    EmptyMap { width: i32, height: i32 },

    #[error("scenario has no base")]
    NoBase,

    #[error("base at {position} is outside the map")]
    BaseOutOfBounds { position: Position },

    #[error("unit {unit} at {position} is outside the map")]
    UnitOutOfBounds { unit: UnitId, position: Position },

    #[error("resource node {node} at {position} is outside the map")]
    ResourceOutOfBounds { node: ResourceId, position: Position },

    #[error("duplicate unit id {unit}")]
    DuplicateUnit { unit: UnitId },

    #[error("duplicate resource id {node}")]
    DuplicateResource { node: ResourceId },

    #[error("unit {unit} carries an empty load")]
    EmptyCargo { unit: UnitId },

    #[error("unit {unit} carries {amount}, but a load is {load}")]
    PartialCargo { unit: UnitId, amount: u32, load: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("step {step}: preconditions of '{action}' do not hold")]
    PreconditionFailed { step: usize, action: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
