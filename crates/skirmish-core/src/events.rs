//! Status events emitted by the simulation for the console and logs.

use serde::{Deserialize, Serialize};

/// Something the operator should be told about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatusEvent {
    /// The rotation controller passed its target and began braking.
    HalfRotationComplete { object_id: u32 },
    /// The rotation controller came to rest.
    RotateCommandComplete { object_id: u32 },
    /// A rotate command arrived while a turn was still running.
    RotateInProgress { object_id: u32 },
    /// The player gained a track.
    ContactGained { object_id: u32, track_id: u32 },
    /// The player's track aged out.
    ContactLost { object_id: u32, track_id: u32 },
    /// A queued command could not be applied.
    CommandRejected { reason: String },
}

impl StatusEvent {
    /// Console text for this event.
    pub fn message(&self) -> String {
        match self {
            StatusEvent::HalfRotationComplete { .. } => "HALF-ROTATION COMPLETE".to_string(),
            StatusEvent::RotateCommandComplete { .. } => "ROTATE COMMAND COMPLETE".to_string(),
            StatusEvent::RotateInProgress { .. } => {
                "<ERROR> - ROTATE COMMAND IN PROGRESS".to_string()
            }
            StatusEvent::ContactGained { track_id, .. } => format!("NEW CONTACT {track_id}"),
            StatusEvent::ContactLost { track_id, .. } => format!("CONTACT LOST {track_id}"),
            StatusEvent::CommandRejected { reason } => format!("<ERROR> - {reason}"),
        }
    }
}
