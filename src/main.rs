//! Starfarer - Interactive Spaceship Scene
//!
//! A desktop application: fly a spaceship through a star field past an
//! orbiting planetary system, with info cards on the bodies worth visiting.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use starfarer::camera::CameraPlugin;
use starfarer::effects::EffectsPlugin;
use starfarer::input::InputPlugin;
use starfarer::orbits::OrbitalPlugin;
use starfarer::proximity::ProximityPlugin;
use starfarer::scene::ScenePlugin;
use starfarer::ship::ShipPlugin;
use starfarer::trail::TrailPlugin;
use starfarer::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        // Simulation plugins
        .add_plugins((
            InputPlugin,
            ShipPlugin,
            OrbitalPlugin,
            TrailPlugin,
            ProximityPlugin,
            CameraPlugin,
        ))
        // Scene and presentation plugins
        .add_plugins((ScenePlugin, EffectsPlugin, UiPlugin))
        .run();
}
