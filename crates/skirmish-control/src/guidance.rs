//! Missile guidance: target selection over owned tracks and steering demand.
//!
//! Pure functions over plain data. The caller turns a steering delta into a
//! rotation command on the missile's own controller.

use std::cmp::Ordering;

use glam::DVec2;

use skirmish_core::components::Track;
use skirmish_core::enums::{Faction, SeekerState};
use skirmish_core::Bearing;

use crate::fusion::TrackFusion;

/// Input to guidance for a single missile.
pub struct GuidanceContext {
    pub position: DVec2,
    pub bearing: Bearing,
    /// Smallest bearing error worth turning for (radians).
    pub deadband: f64,
    /// Tracks perceived as this faction are never targeted.
    pub friendly: Option<Faction>,
}

/// Output from guidance.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceUpdate {
    pub target: Option<u32>,
    pub seeker: SeekerState,
    /// Signed bearing error to steer out, if outside the deadband.
    pub steer: Option<f64>,
}

/// Best target: current tracks before stale ones, then nearest first.
pub fn select_target<'a, I>(tracks: I, from: DVec2) -> Option<&'a Track>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks.into_iter().min_by(|a, b| rank(a, b, from))
}

fn rank(a: &Track, b: &Track, from: DVec2) -> Ordering {
    b.is_current
        .cmp(&a.is_current)
        .then_with(|| {
            let da = a.position.distance_squared(from);
            let db = b.position.distance_squared(from);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.object_id.cmp(&b.object_id))
}

/// Evaluate guidance for one missile.
pub fn evaluate(ctx: &GuidanceContext, fusion: &TrackFusion) -> GuidanceUpdate {
    let candidates = fusion
        .tracks()
        .filter(|t| Some(t.perceived_faction) != ctx.friendly);
    let Some(target) = select_target(candidates, ctx.position) else {
        return GuidanceUpdate {
            target: None,
            seeker: SeekerState::Searching,
            steer: None,
        };
    };

    let seeker = if target.is_current {
        SeekerState::Tracking
    } else {
        SeekerState::Coasting
    };
    let desired = Bearing::between(ctx.position, target.position);
    let delta = ctx.bearing.delta_to_bearing(desired);
    let steer = (delta.abs() > ctx.deadband).then_some(delta);

    GuidanceUpdate {
        target: Some(target.object_id),
        seeker,
        steer,
    }
}
