//! Headless integration tests for orbital motion, proximity triggering, and
//! camera transitions.

mod common;

use approx::assert_abs_diff_eq;
use bevy::prelude::*;

use starfarer::camera::{
    CameraMode, CameraTransitionRequest, FOCUS_OFFSET, MainCamera, SHIP_VIEW_OFFSET,
    TRANSITION_TICKS,
};
use starfarer::orbits::{SYSTEM_ORBIT_RATE, Spin};
use starfarer::proximity::OverlayState;

use common::{spawn_test_planet, spawn_test_ship, spawn_test_system, test_app};

const SYSTEM_POSITION: Vec3 = Vec3::new(0.0, 0.0, -600.0);

fn body_world_position(app: &mut App, body: Entity) -> Vec3 {
    app.world_mut()
        .get::<GlobalTransform>(body)
        .unwrap()
        .translation()
}

fn camera_translation(app: &mut App) -> Vec3 {
    let mut cameras = app
        .world_mut()
        .query_filtered::<&Transform, With<MainCamera>>();
    cameras.single(app.world()).unwrap().translation
}

fn active_transition_end(app: &App) -> Option<Vec3> {
    match app.world().resource::<CameraMode>() {
        CameraMode::Transitioning(transition) => Some(transition.end),
        CameraMode::Free => None,
    }
}

#[test]
fn test_orbit_hierarchy_composes_world_positions() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    let body = spawn_test_planet(
        &mut app,
        system,
        "Planet 3",
        200.0,
        0.3,
        0.0003,
        13.0,
        None,
    );

    let frames = 25;
    for _ in 0..frames {
        app.update();
    }

    // Spin-then-orbit-then-system rotations compose through the hierarchy.
    let system_angle = frames as f32 * SYSTEM_ORBIT_RATE;
    let orbit_angle = 0.3 + frames as f32 * 0.0003;
    let expected = SYSTEM_POSITION
        + Quat::from_rotation_y(system_angle)
            * (Quat::from_rotation_y(orbit_angle) * Vec3::new(200.0, 0.0, 0.0));

    let actual = body_world_position(&mut app, body);
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-2);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-2);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-2);
}

#[test]
fn test_spin_system_advances_rotation() {
    let mut app = test_app();
    let spinner = app
        .world_mut()
        .spawn((Transform::IDENTITY, Spin::about_y(0.003)))
        .id();

    for _ in 0..10 {
        app.update();
    }

    let rotation = app.world().get::<Transform>(spinner).unwrap().rotation;
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    assert_abs_diff_eq!(yaw, 0.03, epsilon = 1e-4);
}

#[test]
fn test_proximity_shows_overlay_and_starts_transition() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    let body = spawn_test_planet(
        &mut app,
        system,
        "Work Experience",
        200.0,
        0.0,
        0.0003,
        15.0,
        Some("summary"),
    );
    // Planet world position is ~(200, 0, -600); park the ship 20 units away,
    // well inside the 45-unit threshold.
    spawn_test_ship(&mut app, Vec3::new(180.0, 0.0, -600.0));

    app.update();

    let overlay = app.world().resource::<OverlayState>();
    assert_eq!(overlay.shown, Some(body));
    assert_eq!(overlay.in_range, Some(body));

    let end = active_transition_end(&app).expect("a focus transition must be running");
    let body_pos = body_world_position(&mut app, body);
    assert!((end - (body_pos + FOCUS_OFFSET)).length() < 1.0);
}

#[test]
fn test_out_of_range_ship_triggers_nothing() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    spawn_test_planet(
        &mut app,
        system,
        "Work Experience",
        200.0,
        0.0,
        0.0003,
        15.0,
        Some("summary"),
    );
    // Just outside the 45-unit threshold.
    spawn_test_ship(&mut app, Vec3::new(250.0, 0.0, -600.0));

    for _ in 0..5 {
        app.update();
    }

    let overlay = app.world().resource::<OverlayState>();
    assert_eq!(overlay.shown, None);
    assert!(matches!(
        app.world().resource::<CameraMode>(),
        CameraMode::Free
    ));
}

#[test]
fn test_decorative_bodies_never_open_the_overlay() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    spawn_test_planet(&mut app, system, "Planet 1", 200.0, 0.0, 0.0003, 15.0, None);
    spawn_test_ship(&mut app, Vec3::new(200.0, 0.0, -600.0));

    for _ in 0..5 {
        app.update();
    }

    let overlay = app.world().resource::<OverlayState>();
    assert_eq!(overlay.shown, None);
    assert_eq!(overlay.in_range, None);
}

#[test]
fn test_lingering_in_range_does_not_retrigger() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    let body = spawn_test_planet(
        &mut app,
        system,
        "Skills",
        200.0,
        0.0,
        0.0003,
        15.0,
        Some("summary"),
    );
    spawn_test_ship(&mut app, Vec3::new(180.0, 0.0, -600.0));

    // Let the focus transition run to completion.
    for _ in 0..(TRANSITION_TICKS as usize + 5) {
        app.update();
    }
    assert!(matches!(
        app.world().resource::<CameraMode>(),
        CameraMode::Free
    ));

    // Staying parked next to the planet must not restart the flight, and the
    // card stays up.
    for _ in 0..30 {
        app.update();
        assert!(matches!(
            app.world().resource::<CameraMode>(),
            CameraMode::Free
        ));
    }
    assert_eq!(app.world().resource::<OverlayState>().shown, Some(body));
}

#[test]
fn test_leaving_range_hides_overlay() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    let body = spawn_test_planet(
        &mut app,
        system,
        "Education",
        200.0,
        0.0,
        0.0003,
        15.0,
        Some("summary"),
    );
    let ship = spawn_test_ship(&mut app, Vec3::new(180.0, 0.0, -600.0));

    app.update();
    assert_eq!(app.world().resource::<OverlayState>().shown, Some(body));

    // Teleport far away; the stale world transform clears after one frame.
    app.world_mut()
        .get_mut::<Transform>(ship)
        .unwrap()
        .translation = Vec3::new(1000.0, 0.0, 0.0);
    app.update();
    app.update();

    let overlay = app.world().resource::<OverlayState>();
    assert_eq!(overlay.shown, None);
    assert_eq!(overlay.in_range, None);
}

#[test]
fn test_dismissed_card_stays_down_until_reentry() {
    let mut app = test_app();
    let system = spawn_test_system(&mut app, SYSTEM_POSITION, SYSTEM_ORBIT_RATE);
    let body = spawn_test_planet(
        &mut app,
        system,
        "Skills",
        200.0,
        0.0,
        0.0003,
        15.0,
        Some("summary"),
    );
    let ship = spawn_test_ship(&mut app, Vec3::new(180.0, 0.0, -600.0));

    app.update();
    assert_eq!(app.world().resource::<OverlayState>().shown, Some(body));

    // Dismiss the card (what the UI button does) while still parked in range.
    app.world_mut().resource_mut::<OverlayState>().shown = None;
    for _ in 0..20 {
        app.update();
        assert_eq!(app.world().resource::<OverlayState>().shown, None);
    }

    // Fly out of range, then back in: re-entry re-opens the card.
    app.world_mut()
        .get_mut::<Transform>(ship)
        .unwrap()
        .translation = Vec3::new(1000.0, 0.0, 0.0);
    app.update();
    app.update();
    assert_eq!(app.world().resource::<OverlayState>().in_range, None);

    app.world_mut()
        .get_mut::<Transform>(ship)
        .unwrap()
        .translation = Vec3::new(180.0, 0.0, -600.0);
    app.update();
    app.update();
    assert_eq!(app.world().resource::<OverlayState>().shown, Some(body));
}

#[test]
fn test_camera_transition_completes_in_exact_tick_count() {
    let mut app = test_app();
    spawn_test_ship(&mut app, Vec3::ZERO);

    let center = Vec3::new(100.0, 0.0, -560.0);
    app.world_mut()
        .resource_mut::<Messages<CameraTransitionRequest>>()
        .write(CameraTransitionRequest::FocusBody { center });

    app.update();
    match app.world().resource::<CameraMode>() {
        CameraMode::Transitioning(transition) => {
            assert_eq!(transition.ticks, 1);
            assert_eq!(transition.end, center + FOCUS_OFFSET);
        }
        CameraMode::Free => panic!("transition must start on the request frame"),
    }

    for _ in 0..(TRANSITION_TICKS - 1) {
        app.update();
    }

    assert!(matches!(
        app.world().resource::<CameraMode>(),
        CameraMode::Free
    ));
    let final_position = camera_translation(&mut app);
    assert!((final_position - (center + FOCUS_OFFSET)).length() < 1e-3);
}

#[test]
fn test_new_request_replaces_inflight_transition() {
    let mut app = test_app();
    spawn_test_ship(&mut app, Vec3::new(40.0, 0.0, -80.0));

    let first = Vec3::new(100.0, 0.0, -560.0);
    app.world_mut()
        .resource_mut::<Messages<CameraTransitionRequest>>()
        .write(CameraTransitionRequest::FocusBody { center: first });
    for _ in 0..10 {
        app.update();
    }

    app.world_mut()
        .resource_mut::<Messages<CameraTransitionRequest>>()
        .write(CameraTransitionRequest::ReturnToShip);
    app.update();

    match app.world().resource::<CameraMode>() {
        CameraMode::Transitioning(transition) => {
            // Fresh transition aimed above and behind the ship, not the body.
            assert_eq!(transition.ticks, 1);
            let expected = Vec3::new(40.0, 0.0, -80.0) + SHIP_VIEW_OFFSET;
            assert!((transition.end - expected).length() < 1.0);
        }
        CameraMode::Free => panic!("replacement transition must be running"),
    }
}
