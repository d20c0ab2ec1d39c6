//! Proximity detection and info overlay state.
//!
//! Each frame the ship's distance to every data-bearing body is checked
//! against a threshold derived from the body's size. Crossing into range
//! opens the info card and requests one camera transition toward the body;
//! crossing out of range closes the card. The latch is edge-triggered on the
//! in-range body, so lingering next to a planet neither re-opens a dismissed
//! card nor restarts the camera flight.

use bevy::prelude::*;

use crate::camera::CameraTransitionRequest;
use crate::orbits::OrbitingBody;
use crate::ship::Ship;
use crate::types::UpdateSet;

/// Proximity threshold as a multiple of the body's render radius.
pub const PROXIMITY_FACTOR: f32 = 3.0;

/// Overlay latch state.
#[derive(Resource, Default, Debug)]
pub struct OverlayState {
    /// Data body the ship is currently within range of. This is the
    /// edge-trigger latch; it changes only when the in-range body changes.
    pub in_range: Option<Entity>,
    /// Body whose info card is displayed. Cleared by leaving range or by
    /// dismissing the card.
    pub shown: Option<Entity>,
}

/// Plugin providing proximity checks and overlay state.
pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .add_systems(Update, check_body_proximity.in_set(UpdateSet::Effects));
    }
}

/// Whether a ship at `ship_pos` is close enough to a body to open its card.
pub fn within_threshold(ship_pos: Vec3, body_pos: Vec3, body_radius: f32) -> bool {
    ship_pos.distance(body_pos) < body_radius * PROXIMITY_FACTOR
}

/// Detect proximity edges and drive the overlay latch.
fn check_body_proximity(
    ships: Query<&GlobalTransform, With<Ship>>,
    bodies: Query<(Entity, &GlobalTransform, &OrbitingBody)>,
    mut overlay: ResMut<OverlayState>,
    mut transitions: MessageWriter<CameraTransitionRequest>,
) {
    let Ok(ship) = ships.single() else {
        return;
    };
    let ship_pos = ship.translation();

    // World positions resolve through the transform hierarchy; the first
    // data body within its threshold wins the frame. Thresholds are small
    // relative to the orbital spacing, so at most one body can match.
    let mut in_range = None;
    for (entity, transform, body) in bodies.iter() {
        if !body.has_data() {
            continue;
        }
        let body_pos = transform.translation();
        if within_threshold(ship_pos, body_pos, body.radius) {
            in_range = Some((entity, body_pos, body.name.clone()));
            break;
        }
    }

    match in_range {
        Some((entity, body_pos, name)) => {
            if overlay.in_range != Some(entity) {
                overlay.in_range = Some(entity);
                overlay.shown = Some(entity);
                transitions.write(CameraTransitionRequest::FocusBody { center: body_pos });
                info!("Approaching {name}");
            }
        }
        None => {
            if overlay.in_range.is_some() {
                overlay.in_range = None;
                overlay.shown = None;
            }
        }
    }
}
