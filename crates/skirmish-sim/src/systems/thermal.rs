//! Thermal system: one generate/diffuse/radiate step per hull.

use hecs::World;

use skirmish_hull::{thermal, ShipConfiguration};

pub fn run(world: &mut World) {
    for (_entity, hull) in world.query_mut::<&mut ShipConfiguration>() {
        thermal::step(hull);
    }
}
