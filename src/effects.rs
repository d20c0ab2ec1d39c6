//! Time-driven glow pulsing for data-planet atmospheres and the sun glow.

use bevy::color::Alpha;
use bevy::prelude::*;

use crate::types::UpdateSet;

/// Resting atmosphere opacity.
const ATMOSPHERE_BASE_ALPHA: f32 = 0.2;

/// Atmosphere opacity swing.
const ATMOSPHERE_PULSE: f32 = 0.1;

/// Sun glow scale swing.
const SUN_GLOW_PULSE: f32 = 0.05;

/// Sun glow pulse rate relative to wall seconds.
const SUN_GLOW_RATE: f32 = 0.5;

/// Marker for a data planet's atmosphere shell.
#[derive(Component)]
pub struct PulsingAtmosphere;

/// Marker for the sun's glow shell.
#[derive(Component)]
pub struct SunGlow;

/// Plugin animating the glow shells.
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (pulse_atmospheres, pulse_sun_glow).in_set(UpdateSet::Effects),
        );
    }
}

/// Breathe the atmosphere opacity around its resting value.
fn pulse_atmospheres(
    time: Res<Time>,
    atmospheres: Query<&MeshMaterial3d<StandardMaterial>, With<PulsingAtmosphere>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let alpha = ATMOSPHERE_BASE_ALPHA + time.elapsed_secs().sin() * ATMOSPHERE_PULSE;
    for handle in &atmospheres {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = material.base_color.with_alpha(alpha);
        }
    }
}

/// Swell and shrink the sun glow shell.
fn pulse_sun_glow(time: Res<Time>, mut glows: Query<&mut Transform, With<SunGlow>>) {
    let scale = 1.0 + (time.elapsed_secs() * SUN_GLOW_RATE).sin() * SUN_GLOW_PULSE;
    for mut transform in glows.iter_mut() {
        transform.scale = Vec3::splat(scale);
    }
}
