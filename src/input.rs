//! Flight input tracking.
//!
//! Maps held W/S/A/D keys to a persistent set of direction flags that the
//! motion integrator and trail emitter read each frame.

use bevy::prelude::*;

use crate::types::UpdateSet;

/// Resource holding the active movement directions.
///
/// Written only by [`track_flight_keys`]; everything else treats it as a
/// read-only snapshot of the current frame's input. Keys outside the W/S/A/D
/// alphabet never reach these flags.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlightInput {
    /// W held: accelerate toward -z.
    pub forward: bool,
    /// S held: accelerate toward +z.
    pub backward: bool,
    /// A held: accelerate toward -x.
    pub left: bool,
    /// D held: accelerate toward +x.
    pub right: bool,
}

impl FlightInput {
    /// Whether any movement key is held.
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Combined movement direction in the horizontal plane, un-normalized.
    ///
    /// Opposing keys cancel; returns `Vec3::ZERO` when idle.
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Plugin providing keyboard flight input tracking.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlightInput>()
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::Flight,
                    UpdateSet::Effects,
                    UpdateSet::Camera,
                )
                    .chain(),
            )
            .add_systems(Update, track_flight_keys.in_set(UpdateSet::Input));
    }
}

/// Snapshot the held state of the movement keys.
///
/// `ButtonInput` already gives press/release edge handling, so the flags are
/// simply the held state: set on key-down, cleared on key-up, idempotent
/// across repeats.
fn track_flight_keys(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<FlightInput>) {
    input.forward = keys.pressed(KeyCode::KeyW);
    input.backward = keys.pressed(KeyCode::KeyS);
    input.left = keys.pressed(KeyCode::KeyA);
    input.right = keys.pressed(KeyCode::KeyD);
}
