//! Floating info card for the body the ship is visiting.
//!
//! Shown while the overlay latch has a body; the card's button dismisses it
//! and flies the camera back to the ship.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::camera::CameraTransitionRequest;
use crate::orbits::OrbitingBody;
use crate::proximity::OverlayState;

use super::icons;

/// Render the info card for the currently shown body.
pub fn info_card_system(
    mut contexts: EguiContexts,
    mut overlay: ResMut<OverlayState>,
    bodies: Query<&OrbitingBody>,
    mut transitions: MessageWriter<CameraTransitionRequest>,
) {
    let Some(entity) = overlay.shown else {
        return;
    };
    let Ok(body) = bodies.get(entity) else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let card_frame = egui::Frame::window(&ctx.style())
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 30, 204));

    egui::Window::new("info_card")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
        .default_width(280.0)
        .frame(card_frame)
        .show(ctx, |ui| {
            ui.heading(format!("{} {}", icons::PLANET, body.name));
            ui.add_space(4.0);

            if let Some(summary) = body.summary {
                ui.label(summary);
            }

            ui.add_space(8.0);
            if ui
                .button(format!("{} Return to Ship", icons::SHIP))
                .clicked()
            {
                overlay.shown = None;
                transitions.write(CameraTransitionRequest::ReturnToShip);
                info!("Info card dismissed, returning to ship view");
            }
        });
}
