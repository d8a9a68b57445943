//! Track fusion: per-observer correlation of detections into persistent tracks.
//!
//! Each observer owns one [`TrackFusion`]. A track is refreshed exactly from
//! the detection that matches its object id; tracks that go unobserved are
//! carried along with the moving frame and age out.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::components::{Detection, Track};
use skirmish_core::config::TrackTuning;

/// Track ids that appeared or were pruned during one `process` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusionReport {
    pub gained: Vec<u32>,
    pub lost: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackFusion {
    tracks: BTreeMap<u32, Track>,
}

impl TrackFusion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn track(&self, object_id: u32) -> Option<&Track> {
        self.tracks.get(&object_id)
    }

    /// Correlate this tick's detections. `frame_offset` is the world shift
    /// applied by the integrator and moves tracks that were not refreshed.
    pub fn process(
        &mut self,
        detections: &[Detection],
        frame_offset: DVec2,
        tuning: &TrackTuning,
    ) -> FusionReport {
        let mut report = FusionReport::default();
        let mut refreshed = Vec::with_capacity(detections.len());

        for d in detections {
            let track = self.tracks.entry(d.object_id).or_insert_with(|| {
                report.gained.push(d.object_id);
                Track {
                    object_id: d.object_id,
                    position: d.position,
                    velocity: d.velocity,
                    perceived_faction: d.faction,
                    lifetime: 0,
                    animation_lifetime: 0,
                    highlight: false,
                    is_current: false,
                }
            });
            if !track.is_current {
                track.animation_lifetime = tuning.animation_lifetime;
                track.highlight = true;
            } else {
                decay_animation(track, tuning.highlight_period);
            }
            track.position = d.position;
            track.velocity = d.velocity;
            track.perceived_faction = d.faction;
            track.lifetime = tuning.max_lifetime;
            track.is_current = true;
            refreshed.push(d.object_id);
        }

        for track in self.tracks.values_mut() {
            if refreshed.contains(&track.object_id) {
                continue;
            }
            track.is_current = false;
            track.position += frame_offset;
            track.lifetime = track.lifetime.saturating_sub(1);
            decay_animation(track, tuning.highlight_period);
        }

        self.tracks.retain(|id, t| {
            if t.lifetime == 0 {
                report.lost.push(*id);
                false
            } else {
                true
            }
        });

        if !report.gained.is_empty() || !report.lost.is_empty() {
            log::trace!(
                "fusion: {} tracks, gained {:?}, lost {:?}",
                self.tracks.len(),
                report.gained,
                report.lost
            );
        }
        report
    }
}

fn decay_animation(track: &mut Track, period: u32) {
    if track.animation_lifetime == 0 {
        track.highlight = false;
        return;
    }
    track.animation_lifetime -= 1;
    if track.animation_lifetime == 0 {
        track.highlight = false;
    } else if period > 0 && track.animation_lifetime % period == 0 {
        track.highlight = !track.highlight;
    }
}

/// Symbol alpha for a track, fading from 255 toward 50 as it ages.
pub fn track_alpha(track: &Track, max_lifetime: u32) -> u8 {
    if max_lifetime == 0 {
        return 50;
    }
    let frac = (track.lifetime.min(max_lifetime) as f64) / max_lifetime as f64;
    (50.0 + 205.0 * frac).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::Faction;

    fn detection(id: u32, x: f64) -> Detection {
        Detection {
            object_id: id,
            position: DVec2::new(x, 0.0),
            velocity: DVec2::new(1.0, 2.0),
            faction: Faction::Red,
        }
    }

    #[test]
    fn test_alpha_fades_with_lifetime() {
        let mut t = Track {
            object_id: 1,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            perceived_faction: Faction::Red,
            lifetime: 100,
            animation_lifetime: 0,
            highlight: false,
            is_current: true,
        };
        assert_eq!(track_alpha(&t, 100), 255);
        t.lifetime = 0;
        assert_eq!(track_alpha(&t, 100), 50);
        t.lifetime = 50;
        assert_eq!(track_alpha(&t, 100), 153);
    }

    #[test]
    fn test_detection_copied_exactly() {
        let mut f = TrackFusion::new();
        let report = f.process(&[detection(4, 123.5)], DVec2::ZERO, &TrackTuning::default());
        assert_eq!(report.gained, vec![4]);
        let t = f.track(4).unwrap();
        assert_eq!(t.position, DVec2::new(123.5, 0.0));
        assert_eq!(t.velocity, DVec2::new(1.0, 2.0));
        assert_eq!(t.perceived_faction, Faction::Red);
        assert!(t.is_current);
        assert!(t.highlight, "new tracks flash");
    }

    #[test]
    fn test_highlight_toggles_then_settles() {
        let tuning = TrackTuning {
            max_lifetime: 1000,
            animation_lifetime: 10,
            highlight_period: 5,
        };
        let mut f = TrackFusion::new();
        f.process(&[detection(1, 0.0)], DVec2::ZERO, &tuning);
        let mut flags = Vec::new();
        for _ in 0..12 {
            f.process(&[detection(1, 0.0)], DVec2::ZERO, &tuning);
            flags.push(f.track(1).unwrap().highlight);
        }
        // 9..6 on, toggle at 5, 4..1 off, animation done at 0.
        assert!(flags[..4].iter().all(|h| *h));
        assert!(!flags[4]);
        assert!(flags[5..].iter().all(|h| !*h));
    }
}
