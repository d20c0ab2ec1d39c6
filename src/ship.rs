//! Spaceship motion integration.
//!
//! Converts the frame's [`FlightInput`] into acceleration, integrates
//! velocity with clamping and sign-aware decay, integrates position, and
//! derives a smooth attitude (yaw/pitch/roll) from the movement direction.
//!
//! All rates are per frame: the integrator intentionally uses fixed-step
//! semantics with no delta-time scaling, so ship feel is tied to the display
//! refresh rate exactly like the rest of the scene's angular increments.

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::input::FlightInput;
use crate::types::UpdateSet;

/// Velocity gained per frame while a movement key is held.
pub const ACCELERATION: f32 = 0.05;

/// Velocity shed per frame on an axis with no key held.
pub const DECELERATION: f32 = 0.02;

/// Per-axis velocity limit.
pub const MAX_VELOCITY: f32 = 0.8;

/// Vertical hover amplitude.
pub const HOVER_AMPLITUDE: f32 = 0.2;

/// Banking roll target while turning.
pub const ROLL_TARGET: f32 = 0.2;

/// Nose pitch target while moving forward/backward.
pub const PITCH_TARGET: f32 = 0.05;

/// Smoothing factor for roll/pitch while moving.
const ATTITUDE_LERP: f32 = 0.1;

/// Slower settle factor for roll/pitch once idle.
const ATTITUDE_SETTLE: f32 = 0.05;

/// Marker component for the player's spaceship root entity.
#[derive(Component, Default)]
pub struct Ship;

/// Ship velocity in world units per frame.
///
/// Only x and z are integrated into position; y is carried for completeness
/// but vertical position comes from the hover oscillation instead.
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct ShipVelocity(pub Vec3);

/// Explicit Euler attitude state.
///
/// Kept as individual angles (rather than reading them back out of the
/// quaternion) because the smoothing operates per angle. The transform
/// rotation is rebuilt from these every frame. Pitch and roll stay within
/// ±[`ROLL_TARGET`]; yaw lives in atan2's natural (−π, π] range.
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct ShipAttitude {
    /// Heading around +y, assigned directly from the movement direction.
    pub yaw: f32,
    /// Nose tilt around +x, smoothed.
    pub pitch: f32,
    /// Banking around +z, smoothed.
    pub roll: f32,
}

/// Plugin providing ship motion integration.
pub struct ShipPlugin;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, integrate_ship_motion.in_set(UpdateSet::Flight));
    }
}

/// Advance one axis of velocity for one frame.
///
/// `toward_negative` wins over `toward_positive` when both are held (the
/// forward/left key shadows its opposite). With neither held the velocity
/// decays toward zero and snaps to exactly zero once the remaining magnitude
/// drops below one frame's deceleration, so the ship comes to a true stop
/// rather than creeping asymptotically.
pub fn step_axis_velocity(v: f32, toward_negative: bool, toward_positive: bool) -> f32 {
    let v = if toward_negative {
        v - ACCELERATION
    } else if toward_positive {
        v + ACCELERATION
    } else if v.abs() < DECELERATION {
        0.0
    } else {
        v - v.signum() * DECELERATION
    };
    v.clamp(-MAX_VELOCITY, MAX_VELOCITY)
}

/// Smooth the attitude toward the targets implied by the held keys.
///
/// Yaw is only updated while there is a movement direction; an idle ship
/// keeps its last heading while pitch and roll settle back to level.
pub fn update_attitude(attitude: &mut ShipAttitude, input: &FlightInput) {
    let dir = input.direction();
    if dir != Vec3::ZERO {
        let dir = dir.normalize();
        attitude.yaw = dir.x.atan2(dir.z);

        let roll_target = if input.left {
            ROLL_TARGET
        } else if input.right {
            -ROLL_TARGET
        } else {
            0.0
        };
        attitude.roll = attitude.roll.lerp(roll_target, ATTITUDE_LERP);

        let pitch_target = if input.forward {
            -PITCH_TARGET
        } else if input.backward {
            PITCH_TARGET
        } else {
            0.0
        };
        attitude.pitch = attitude.pitch.lerp(pitch_target, ATTITUDE_LERP);
    } else {
        attitude.roll = attitude.roll.lerp(0.0, ATTITUDE_SETTLE);
        attitude.pitch = attitude.pitch.lerp(0.0, ATTITUDE_SETTLE);
    }
}

/// Integrate ship velocity, position, hover, and attitude for this frame.
fn integrate_ship_motion(
    input: Res<FlightInput>,
    time: Res<Time>,
    mut ships: Query<(&mut Transform, &mut ShipVelocity, &mut ShipAttitude), With<Ship>>,
) {
    let Ok((mut transform, mut velocity, mut attitude)) = ships.single_mut() else {
        return;
    };

    velocity.0.z = step_axis_velocity(velocity.0.z, input.forward, input.backward);
    velocity.0.x = step_axis_velocity(velocity.0.x, input.left, input.right);

    transform.translation.x += velocity.0.x;
    transform.translation.z += velocity.0.z;

    // Vertical position is not integrated; it rides a slow sine of wall time.
    transform.translation.y = time.elapsed_secs().sin() * HOVER_AMPLITUDE;

    update_attitude(&mut attitude, &input);
    transform.rotation =
        Quat::from_euler(EulerRot::YXZ, attitude.yaw, attitude.pitch, attitude.roll);
}
