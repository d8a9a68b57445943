//! Recoverable simulation errors.
//!
//! Nothing in the simulation core is fatal: every variant here is reported
//! to the caller and leaves the world unchanged.

use thiserror::Error;

use crate::enums::ComponentKind;
use crate::types::GridCoord;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid coordinate ({}, {}) is outside the {size}x{size} hull grid", coord.x, coord.y)]
    OutOfBounds { coord: GridCoord, size: i32 },

    #[error("{0:?} needs a mounted direction")]
    MissingDirection(ComponentKind),

    #[error("rotate command in progress")]
    RotationInProgress,

    #[error("no world object with id {0}")]
    UnknownObject(u32),

    #[error("no player ship in the world")]
    NoPlayer,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
