//! Orbital kinematics driver.
//!
//! Orbiting is purely kinematic: every body carries fixed per-frame angular
//! increments, applied to its own spin and to the rotation-only pivot groups
//! above it. Nested orbits (planet around sun, sun system drifting past the
//! black hole) fall out of transform hierarchy composition; world positions
//! are read back from `GlobalTransform` and no angle is ever stored or
//! recomputed trigonometrically.

use bevy::prelude::*;

use crate::types::UpdateSet;

/// Planet self-rotation, radians per frame.
pub const PLANET_SPIN_RATE: f32 = 0.003;

/// Sun self-rotation, radians per frame.
pub const SUN_SPIN_RATE: f32 = 0.001;

/// Accretion disk spin about its tilted local z, radians per frame.
pub const DISK_SPIN_RATE: f32 = 0.002;

/// Rotation of the whole sun system group, radians per frame.
pub const SYSTEM_ORBIT_RATE: f32 = 0.0001;

/// Self-rotation about a local axis at a fixed per-frame rate.
#[derive(Component, Clone, Copy, Debug)]
pub struct Spin {
    /// Local rotation axis.
    pub axis: Dir3,
    /// Radians per frame.
    pub rate: f32,
}

impl Spin {
    /// Spin about the local y axis (the usual case for bodies).
    pub fn about_y(rate: f32) -> Self {
        Self { axis: Dir3::Y, rate }
    }
}

/// A rotation-only pivot node: no geometry of its own, rotates its children
/// around its origin each frame to realize an orbit.
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitGroup {
    /// Radians per frame around +y.
    pub rate: f32,
}

/// An orbiting body's identity and proximity-relevant geometry.
///
/// Lives on the planet's mesh entity; the entity's parent is its orbit pivot.
#[derive(Component, Clone, Debug)]
pub struct OrbitingBody {
    /// Display name.
    pub name: String,
    /// Info card text; `Some` marks the body as data-bearing.
    pub summary: Option<&'static str>,
    /// Render radius, used to derive the proximity threshold.
    pub radius: f32,
    /// Distance from the orbit pivot.
    pub distance: f32,
}

impl OrbitingBody {
    /// Whether flying close to this body should open the info overlay.
    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }
}

/// Plugin advancing all orbital motion.
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_spin, apply_orbits).in_set(UpdateSet::Flight),
        );
    }
}

/// Apply each body's self-rotation increment.
fn apply_spin(mut bodies: Query<(&mut Transform, &Spin)>) {
    for (mut transform, spin) in bodies.iter_mut() {
        transform.rotate_local_axis(spin.axis, spin.rate);
    }
}

/// Apply each pivot group's orbital increment.
fn apply_orbits(mut groups: Query<(&mut Transform, &OrbitGroup)>) {
    for (mut transform, group) in groups.iter_mut() {
        transform.rotate_y(group.rate);
    }
}
