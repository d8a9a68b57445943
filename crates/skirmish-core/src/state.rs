//! World snapshot: the complete visible state published after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::StatusEvent;
use crate::types::{GridCoord, SimTime};

/// Complete world state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub time_scale: f64,
    pub objects: Vec<ObjectView>,
    /// The player's hull, if a player exists.
    pub hull: Option<HullView>,
    /// The player's tracks.
    pub tracks: Vec<TrackView>,
    pub events: Vec<StatusEvent>,
}

/// A world object in the player-relative frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub faction: Faction,
    pub kind: ObjectKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Radians, clockwise from +x.
    pub bearing: f64,
    pub rot_velocity: f64,
    pub rotation: RotationPhase,
    /// Missiles only.
    pub seeker: Option<SeekerState>,
}

/// The player's hull grid and derived properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HullView {
    pub grid_size: i32,
    pub block_size: f64,
    pub components: Vec<ComponentView>,
    pub engines: Vec<EngineView>,
    pub mass: f64,
    pub inertia: f64,
    pub centre_of_mass: DVec2,
    /// World-frame point the hull spins about (player position + rotated COM).
    pub centre_of_rotation: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentView {
    pub kind: ComponentKind,
    pub coord: GridCoord,
    /// Temperature scaled to [0, 1] against the configured maximum.
    pub temperature: f64,
    pub valid: bool,
    pub direction: Option<GridDirection>,
    /// Body-frame offset of the cell centre from the grid centre.
    pub offset: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineView {
    pub coord: GridCoord,
    pub direction: GridDirection,
    pub profile: f64,
    pub firing: bool,
    pub temperature: f64,
}

/// A player track on the strategic display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackView {
    pub object_id: u32,
    pub position: DVec2,
    pub velocity: DVec2,
    pub perceived_faction: Faction,
    pub is_current: bool,
    pub lifetime: u32,
    pub highlight: bool,
    pub colour: [u8; 3],
    /// Symbol alpha, fading with remaining lifetime.
    pub alpha: u8,
}
