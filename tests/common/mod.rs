//! Common test utilities for headless integration tests.
//!
//! Builds an app with the simulation plugins but no renderer or UI: the
//! update pipeline, transform propagation, and input resources are real,
//! everything GPU-facing is absent.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::transform::TransformPlugin;

use starfarer::camera::CameraPlugin;
use starfarer::input::InputPlugin;
use starfarer::orbits::{OrbitGroup, OrbitingBody};
use starfarer::proximity::ProximityPlugin;
use starfarer::ship::{Ship, ShipAttitude, ShipPlugin, ShipVelocity};
use starfarer::trail::{EngineTrail, update_engine_trail};
use starfarer::types::UpdateSet;

/// Build a headless app running the full simulation pipeline.
///
/// The gizmo-drawing half of the trail plugin needs render resources, so the
/// trail update system is scheduled directly instead.
pub fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin));

    // Input device resources normally provided by the window backend.
    app.init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<AccumulatedMouseMotion>()
        .init_resource::<AccumulatedMouseScroll>();

    app.add_plugins((
        InputPlugin,
        ShipPlugin,
        starfarer::orbits::OrbitalPlugin,
        ProximityPlugin,
        CameraPlugin,
    ));

    app.init_resource::<EngineTrail>()
        .add_systems(Update, update_engine_trail.in_set(UpdateSet::Effects));

    app
}

/// Spawn a bare kinematic ship (no visual children) at a position.
pub fn spawn_test_ship(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Ship,
            ShipVelocity::default(),
            ShipAttitude::default(),
            Transform::from_translation(position),
        ))
        .id()
}

/// Spawn a sun-system pivot at `position` rotating at `rate` per frame.
pub fn spawn_test_system(app: &mut App, position: Vec3, rate: f32) -> Entity {
    app.world_mut()
        .spawn((Transform::from_translation(position), OrbitGroup { rate }))
        .id()
}

/// Spawn a planet under `system`: an orbit pivot child holding the body at
/// `distance` along its local +x. Returns the body entity.
pub fn spawn_test_planet(
    app: &mut App,
    system: Entity,
    name: &str,
    distance: f32,
    orbital_offset: f32,
    orbital_speed: f32,
    radius: f32,
    summary: Option<&'static str>,
) -> Entity {
    let world = app.world_mut();
    let orbit = world
        .spawn((
            Transform::from_rotation(Quat::from_rotation_y(orbital_offset)),
            OrbitGroup {
                rate: orbital_speed,
            },
            ChildOf(system),
        ))
        .id();

    world
        .spawn((
            Transform::from_xyz(distance, 0.0, 0.0),
            OrbitingBody {
                name: name.to_string(),
                summary,
                radius,
                distance,
            },
            ChildOf(orbit),
        ))
        .id()
}

/// Hold a key down until released.
pub fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

/// Release a held key.
pub fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Read the ship's velocity.
pub fn ship_velocity(app: &mut App, ship: Entity) -> Vec3 {
    app.world_mut().get::<ShipVelocity>(ship).unwrap().0
}

/// Read the ship's translation.
pub fn ship_position(app: &mut App, ship: Entity) -> Vec3 {
    app.world_mut().get::<Transform>(ship).unwrap().translation
}
