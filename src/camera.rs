//! Camera rig: free-flight controls and proximity-driven transitions.
//!
//! The camera has a single owner with an explicit mode: `Free` (scroll dolly
//! and middle-mouse orbit around the ship) or `Transitioning` (a bounded
//! linear interpolation toward a framing point). Starting a new transition
//! replaces any in-flight one, so two interpolations can never fight over the
//! camera.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

use crate::ship::Ship;
use crate::types::UpdateSet;

/// Ticks a transition takes to complete; progress advances by
/// `1 / TRANSITION_TICKS` (0.02) per tick, and the integer counter makes the
/// endpoint exact instead of float-accumulation-dependent.
pub const TRANSITION_TICKS: u32 = 50;

/// Framing offset above and behind a focused body, world units.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(0.0, 20.0, 40.0);

/// Framing offset above and behind the ship for the return view.
pub const SHIP_VIEW_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 20.0);

/// Initial camera position.
const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 5.0, 20.0);

/// Scroll wheel dolly speed, world units per scroll line.
const DOLLY_SPEED: f32 = 2.0;

/// Middle-drag orbit speed, radians per pixel.
const ORBIT_SPEED: f32 = 0.005;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// What a transition aims the camera at each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookTarget {
    /// A fixed world-space point (the focused body's position).
    Point(Vec3),
    /// The live ship position, re-resolved every tick so the view tracks a
    /// moving ship.
    Ship,
}

/// An in-flight camera interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub start: Vec3,
    pub end: Vec3,
    /// Ticks elapsed, in `0..=TRANSITION_TICKS`.
    pub ticks: u32,
    pub look: LookTarget,
}

impl Transition {
    /// Interpolation parameter in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.ticks as f32 / TRANSITION_TICKS as f32).min(1.0)
    }

    /// Whether the endpoint has been reached.
    pub fn finished(&self) -> bool {
        self.ticks >= TRANSITION_TICKS
    }

    /// Advance one tick and return the interpolated camera position.
    pub fn step(&mut self) -> Vec3 {
        self.ticks += 1;
        self.start.lerp(self.end, self.progress())
    }
}

/// Current owner-of-the-camera state.
#[derive(Resource, Default, Debug)]
pub enum CameraMode {
    /// User-controlled; dolly and orbit systems are active.
    #[default]
    Free,
    /// An interpolation is running; it has exclusive control.
    Transitioning(Transition),
}

/// Request to begin a camera transition. A request always replaces any
/// transition already in flight.
#[derive(Message, Debug, Clone, Copy)]
pub enum CameraTransitionRequest {
    /// Frame a body: fly to `center + FOCUS_OFFSET`, looking at `center`.
    FocusBody { center: Vec3 },
    /// Fly back above and behind the ship, tracking it while moving.
    ReturnToShip,
}

/// Plugin owning the main camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraMode>()
            .add_message::<CameraTransitionRequest>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    start_camera_transitions,
                    advance_camera_transition,
                    (camera_dolly, camera_orbit),
                )
                    .chain()
                    .in_set(UpdateSet::Camera),
            );
    }
}

/// Spawn the main perspective camera.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 5000.0,
            ..default()
        }),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Turn transition requests into an active transition, replacing any
/// in-flight one.
fn start_camera_transitions(
    mut requests: MessageReader<CameraTransitionRequest>,
    mut mode: ResMut<CameraMode>,
    cameras: Query<&Transform, With<MainCamera>>,
    ships: Query<&Transform, (With<Ship>, Without<MainCamera>)>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };

    for request in requests.read() {
        let transition = match *request {
            CameraTransitionRequest::FocusBody { center } => Transition {
                start: camera.translation,
                end: center + FOCUS_OFFSET,
                ticks: 0,
                look: LookTarget::Point(center),
            },
            CameraTransitionRequest::ReturnToShip => {
                let Ok(ship) = ships.single() else {
                    continue;
                };
                Transition {
                    start: camera.translation,
                    end: ship.translation + SHIP_VIEW_OFFSET,
                    ticks: 0,
                    look: LookTarget::Ship,
                }
            }
        };
        *mode = CameraMode::Transitioning(transition);
    }
}

/// Advance the active transition by one tick.
fn advance_camera_transition(
    mut mode: ResMut<CameraMode>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
    ships: Query<&Transform, (With<Ship>, Without<MainCamera>)>,
) {
    let CameraMode::Transitioning(ref mut transition) = *mode else {
        return;
    };
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    camera.translation = transition.step();

    let target = match transition.look {
        LookTarget::Point(point) => Some(point),
        LookTarget::Ship => ships.single().map(|ship| ship.translation).ok(),
    };
    if let Some(target) = target {
        camera.look_at(target, Vec3::Y);
    }

    if transition.finished() {
        *mode = CameraMode::Free;
    }
}

/// Scroll-wheel dolly along the view axis while in free mode.
fn camera_dolly(
    mode: Res<CameraMode>,
    scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    if !matches!(*mode, CameraMode::Free) || scroll.delta.y == 0.0 {
        return;
    }
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    let forward = camera.forward();
    camera.translation += forward * scroll.delta.y * DOLLY_SPEED;
}

/// Middle-mouse orbit around the ship while in free mode.
fn camera_orbit(
    mode: Res<CameraMode>,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<Ship>)>,
    ships: Query<&Transform, (With<Ship>, Without<MainCamera>)>,
) {
    if !matches!(*mode, CameraMode::Free) || !buttons.pressed(MouseButton::Middle) {
        return;
    }
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };
    let Ok(ship) = ships.single() else {
        return;
    };

    let yaw = Quat::from_rotation_y(-motion.delta.x * ORBIT_SPEED);
    let offset = camera.translation - ship.translation;
    camera.translation = ship.translation + yaw * offset;
    camera.look_at(ship.translation, Vec3::Y);
}
