//! Sensor update: move every sensor with its owner after integration.

use hecs::World;

use skirmish_core::components::{Kinematics, SensorSuite};

pub fn run(world: &mut World) {
    for (_entity, (kin, suite)) in world.query_mut::<(&Kinematics, &mut SensorSuite)>() {
        for sensor in &mut suite.sensors {
            sensor.update(kin.position, kin.bearing);
        }
    }
}
