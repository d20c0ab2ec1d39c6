//! Engine trail history buffer.
//!
//! A fixed-capacity shift register of recent engine positions: slot 0 is the
//! newest particle and every frame each slot's appearance propagates to the
//! next higher index with decay, so the trail fades, shrinks, and whitens
//! toward its tail. The buffer itself is plain data with no engine types in
//! its update path; a separate system draws the live slots with gizmos.

use bevy::color::{Hsla, Srgba};
use bevy::prelude::*;
use rand::Rng;

use crate::input::FlightInput;
use crate::ship::Ship;
use crate::types::UpdateSet;

/// Number of particle slots; the buffer never changes length.
pub const TRAIL_LENGTH: usize = 2000;

/// Per-frame size/opacity decay factor applied during the shift.
pub const TRAIL_DECAY: f32 = 0.98;

/// Red/green increment applied to every [`COLOR_DRIFT_STRIDE`]th slot,
/// drifting the tail toward white.
pub const COLOR_DRIFT: f32 = 0.002;

/// Stride between slots that take the color drift.
pub const COLOR_DRIFT_STRIDE: usize = 5;

/// Engine mount in ship-local coordinates (behind the fuselage, -x aft).
pub const ENGINE_OFFSET: Vec3 = Vec3::new(-4.5, 0.0, 0.0);

/// Resting particle color (soft blue, #88aaff).
pub const TRAIL_BASE_COLOR: Vec3 = Vec3::new(0.533, 0.667, 1.0);

/// Freshly emitted exhaust color before hue jitter (#88bbff).
pub const EXHAUST_COLOR: Vec3 = Vec3::new(0.533, 0.733, 1.0);

/// Hue jitter half-range for fresh particles, in degrees.
const HUE_JITTER_DEGREES: f32 = 36.0;

/// World-units-per-size-unit when drawing a particle as a gizmo cross.
const POINT_SCALE: f32 = 0.05;

/// One slot of the trail buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParticle {
    pub position: Vec3,
    /// Linear RGB, allowed to drift above 1.0 (rendering clamps).
    pub color: Vec3,
    pub size: f32,
    pub opacity: f32,
}

impl TrailParticle {
    fn dormant() -> Self {
        Self {
            position: Vec3::ZERO,
            color: TRAIL_BASE_COLOR,
            size: 0.0,
            opacity: 0.0,
        }
    }
}

/// Fixed-length shift register of engine trail particles, index 0 newest.
#[derive(Resource)]
pub struct EngineTrail {
    particles: Vec<TrailParticle>,
}

impl Default for EngineTrail {
    fn default() -> Self {
        Self {
            particles: vec![TrailParticle::dormant(); TRAIL_LENGTH],
        }
    }
}

impl EngineTrail {
    /// Read-only view of the slots, newest first.
    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    /// Propagate every slot one index toward the tail with decay.
    ///
    /// Walks indices descending so each slot reads its neighbor's
    /// previous-frame value before that neighbor is overwritten. Positions
    /// copy verbatim; size and opacity decay; every
    /// [`COLOR_DRIFT_STRIDE`]th slot pulls its red/green from the neighbor
    /// plus the drift while keeping its own blue, preserving the blue tint
    /// as the tail whitens.
    pub fn shift(&mut self) {
        for i in (1..self.particles.len()).rev() {
            let prev = self.particles[i - 1];
            let slot = &mut self.particles[i];
            slot.position = prev.position;
            slot.size = prev.size * TRAIL_DECAY;
            slot.opacity = prev.opacity * TRAIL_DECAY;
            if i % COLOR_DRIFT_STRIDE == 0 {
                slot.color.x = prev.color.x + COLOR_DRIFT;
                slot.color.y = prev.color.y + COLOR_DRIFT;
            }
        }
    }

    /// Write a fresh, fully opaque particle into slot 0.
    pub fn emit(&mut self, position: Vec3, size: f32, color: Vec3) {
        self.particles[0] = TrailParticle {
            position,
            color,
            size,
            opacity: 1.0,
        };
    }

    /// Extinguish slot 0 for an idle frame.
    ///
    /// Size and opacity go to zero; position and color are left untouched (a
    /// zero-size, zero-opacity particle is invisible regardless of where its
    /// stale position points).
    pub fn extinguish(&mut self) {
        self.particles[0].size = 0.0;
        self.particles[0].opacity = 0.0;
    }
}

/// Plugin driving the engine trail.
pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineTrail>().add_systems(
            Update,
            (update_engine_trail, draw_engine_trail)
                .chain()
                .in_set(UpdateSet::Effects),
        );
    }
}

/// Jitter the exhaust hue for a sparkle of color variation.
fn jittered_exhaust_color(rng: &mut impl Rng) -> Vec3 {
    let base = Srgba::new(EXHAUST_COLOR.x, EXHAUST_COLOR.y, EXHAUST_COLOR.z, 1.0);
    let mut hsla = Hsla::from(base);
    let jitter = rng.gen_range(-HUE_JITTER_DEGREES..HUE_JITTER_DEGREES);
    hsla.hue = (hsla.hue + jitter).rem_euclid(360.0);
    let srgba = Srgba::from(hsla);
    Vec3::new(srgba.red, srgba.green, srgba.blue)
}

/// Shift the buffer and write slot 0 from this frame's ship state.
///
/// Public so headless tests can schedule it without the gizmo draw system.
pub fn update_engine_trail(
    input: Res<FlightInput>,
    mut trail: ResMut<EngineTrail>,
    ships: Query<&GlobalTransform, With<Ship>>,
) {
    let Ok(ship) = ships.single() else {
        return;
    };

    trail.shift();

    if input.any() {
        let engine = ship.transform_point(ENGINE_OFFSET);
        let mut rng = rand::thread_rng();
        let size = rng.gen_range(2.0..5.0);
        let color = jittered_exhaust_color(&mut rng);
        trail.emit(engine, size, color);
    } else {
        trail.extinguish();
    }
}

/// Draw every live slot as a small cross of gizmo lines.
fn draw_engine_trail(trail: Res<EngineTrail>, mut gizmos: Gizmos) {
    for particle in trail.particles() {
        if particle.size <= 0.0 || particle.opacity <= 0.0 {
            continue;
        }

        let color = Color::srgba(
            particle.color.x,
            particle.color.y,
            particle.color.z,
            particle.opacity,
        );
        let half = particle.size * POINT_SCALE;
        let p = particle.position;
        gizmos.line(p - Vec3::new(half, 0.0, 0.0), p + Vec3::new(half, 0.0, 0.0), color);
        gizmos.line(p - Vec3::new(0.0, half, 0.0), p + Vec3::new(0.0, half, 0.0), color);
    }
}
