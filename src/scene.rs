//! Static scene construction.
//!
//! Startup systems build everything the per-frame core mutates: the sun
//! system with its planet catalog, the black hole and accretion disk, the
//! composite spaceship, the starfield, and lighting. The planet catalog is
//! validated before anything is spawned; an invalid catalog is a programming
//! error and fails fast.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::effects::{PulsingAtmosphere, SunGlow};
use crate::orbits::{
    DISK_SPIN_RATE, OrbitGroup, OrbitingBody, PLANET_SPIN_RATE, SUN_SPIN_RATE, SYSTEM_ORBIT_RATE,
    Spin,
};
use crate::ship::{Ship, ShipAttitude, ShipVelocity};

/// Sun system pivot position; every planet orbit hangs off this point.
pub const SUN_SYSTEM_POSITION: Vec3 = Vec3::new(0.0, 0.0, -600.0);

/// Black hole position, far behind the sun system.
pub const BLACK_HOLE_POSITION: Vec3 = Vec3::new(0.0, 0.0, -1500.0);

/// Sun render radius.
pub const SUN_RADIUS: f32 = 50.0;

/// Sun glow shell radius.
const SUN_GLOW_RADIUS: f32 = 60.0;

/// Black hole render radius.
pub const BLACK_HOLE_RADIUS: f32 = 100.0;

/// Accretion disk annulus, inner and outer radii.
const DISK_INNER_RADIUS: f32 = 110.0;
const DISK_OUTER_RADIUS: f32 = 200.0;

/// Accretion disk tilt out of the orbital plane.
const DISK_TILT: f32 = PI / 3.0;

/// Atmosphere glow shell scale relative to the planet radius.
const ATMOSPHERE_SCALE: f32 = 1.15;

/// Number of background stars.
const STAR_COUNT: usize = 800;

/// Half-extent of the starfield cube.
const STARFIELD_EXTENT: f32 = 2000.0;

/// Ring annulus for a ringed planet.
#[derive(Clone, Copy, Debug)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

/// One entry of the static planet catalog.
#[derive(Clone, Debug)]
pub struct PlanetSpec {
    pub name: &'static str,
    /// Distance from the sun system pivot.
    pub distance: f32,
    /// Orbit rotation, radians per frame.
    pub orbital_speed: f32,
    /// Initial orbit phase.
    pub orbital_offset: f32,
    /// Render radius.
    pub size: f32,
    pub color: Color,
    /// Info card text; data-bearing iff present.
    pub summary: Option<&'static str>,
    pub rings: Option<RingSpec>,
}

/// Catalog validation failure. Always a programming error in the static
/// table, never a runtime condition.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("duplicate planet name `{0}`")]
    DuplicateName(&'static str),
    #[error("planet `{name}`: {field} must be positive")]
    NonPositive {
        name: &'static str,
        field: &'static str,
    },
    #[error("planet `{name}`: ring annulus must clear the planet and widen outward")]
    BadRing { name: &'static str },
}

/// The planet catalog: three data-bearing inner planets and four decorative
/// outer ones, two of them ringed.
pub fn planet_catalog() -> Result<Vec<PlanetSpec>, CatalogError> {
    let catalog = vec![
        PlanetSpec {
            name: "Work Experience",
            distance: 200.0,
            orbital_speed: 0.0003,
            orbital_offset: 0.0,
            size: 15.0,
            color: Color::srgb(0.80, 0.62, 0.42),
            summary: Some(
                "Mission history: postings, projects, and the systems kept flying.",
            ),
            rings: None,
        },
        PlanetSpec {
            name: "Skills",
            distance: 350.0,
            orbital_speed: 0.0004,
            orbital_offset: FRAC_PI_2,
            size: 18.0,
            color: Color::srgb(0.40, 0.60, 0.85),
            summary: Some(
                "Instrument ratings: languages, engines, and simulation tooling.",
            ),
            rings: None,
        },
        PlanetSpec {
            name: "Education",
            distance: 500.0,
            orbital_speed: 0.0002,
            orbital_offset: PI,
            size: 16.0,
            color: Color::srgb(0.50, 0.75, 0.50),
            summary: Some("Academies attended, and the theory behind the practice."),
            rings: None,
        },
        PlanetSpec {
            name: "Planet 1",
            distance: 650.0,
            orbital_speed: 0.00015,
            orbital_offset: PI * 1.5,
            size: 12.0,
            color: Color::srgb(0.60, 0.60, 0.60),
            summary: None,
            rings: None,
        },
        PlanetSpec {
            name: "Planet 2",
            distance: 800.0,
            orbital_speed: 0.00025,
            orbital_offset: PI / 4.0,
            size: 14.0,
            color: Color::srgb(0.90, 0.85, 0.60),
            summary: None,
            rings: Some(RingSpec {
                inner_radius: 16.0,
                outer_radius: 28.0,
            }),
        },
        PlanetSpec {
            name: "Planet 3",
            distance: 950.0,
            orbital_speed: 0.0003,
            orbital_offset: PI / 3.0,
            size: 13.0,
            color: Color::srgb(0.80, 0.40, 0.20),
            summary: None,
            rings: None,
        },
        PlanetSpec {
            name: "Planet 4",
            distance: 1100.0,
            orbital_speed: 0.00018,
            orbital_offset: PI * 0.8,
            size: 17.0,
            color: Color::srgb(0.60, 0.80, 0.90),
            summary: None,
            rings: Some(RingSpec {
                inner_radius: 19.0,
                outer_radius: 32.0,
            }),
        },
    ];
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Check the catalog's structural invariants.
fn validate_catalog(catalog: &[PlanetSpec]) -> Result<(), CatalogError> {
    let mut seen = Vec::with_capacity(catalog.len());
    for spec in catalog {
        if seen.contains(&spec.name) {
            return Err(CatalogError::DuplicateName(spec.name));
        }
        seen.push(spec.name);

        if spec.distance <= 0.0 {
            return Err(CatalogError::NonPositive {
                name: spec.name,
                field: "distance",
            });
        }
        if spec.size <= 0.0 {
            return Err(CatalogError::NonPositive {
                name: spec.name,
                field: "size",
            });
        }
        if let Some(rings) = &spec.rings {
            if rings.inner_radius <= spec.size || rings.outer_radius <= rings.inner_radius {
                return Err(CatalogError::BadRing { name: spec.name });
            }
        }
    }
    Ok(())
}

/// Plugin spawning the static scene at startup.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                spawn_solar_system,
                spawn_black_hole,
                spawn_spaceship,
                spawn_starfield,
                spawn_lighting,
            ),
        );
    }
}

/// Translucent additive-looking shell material for glows and atmospheres.
fn glow_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    }
}

/// Spawn the sun system pivot with the sun, its glow, and the full planet
/// catalog as orbit-group children.
fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let catalog =
        planet_catalog().unwrap_or_else(|err| panic!("invalid planet catalog: {err}"));

    let sun_color = Color::srgb(1.0, 0.78, 0.30);
    let sun_material = materials.add(StandardMaterial {
        base_color: sun_color,
        emissive: sun_color.to_linear() * 4.0,
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Transform::from_translation(SUN_SYSTEM_POSITION),
            Visibility::default(),
            OrbitGroup {
                rate: SYSTEM_ORBIT_RATE,
            },
        ))
        .with_children(|system| {
            system.spawn((
                Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
                MeshMaterial3d(sun_material),
                Transform::default(),
                Spin::about_y(SUN_SPIN_RATE),
            ));
            system.spawn((
                Mesh3d(meshes.add(Sphere::new(SUN_GLOW_RADIUS))),
                MeshMaterial3d(
                    materials.add(glow_material(Color::srgba(1.0, 0.87, 0.53, 0.4))),
                ),
                Transform::default(),
                SunGlow,
            ));

            for spec in &catalog {
                spawn_planet(system, &mut meshes, &mut materials, spec);
            }
        });

    info!("Spawned sun system with {} planets", catalog.len());
}

/// Spawn one planet under its own orbit pivot: the body itself, plus an
/// atmosphere shell for data planets and a flat ring annulus where specified.
fn spawn_planet(
    system: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &PlanetSpec,
) {
    system
        .spawn((
            Transform::from_rotation(Quat::from_rotation_y(spec.orbital_offset)),
            Visibility::default(),
            OrbitGroup {
                rate: spec.orbital_speed,
            },
        ))
        .with_children(|orbit| {
            orbit.spawn((
                Mesh3d(meshes.add(Sphere::new(spec.size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: spec.color,
                    perceptual_roughness: 0.7,
                    metallic: 0.2,
                    ..default()
                })),
                Transform::from_xyz(spec.distance, 0.0, 0.0),
                Spin::about_y(PLANET_SPIN_RATE),
                OrbitingBody {
                    name: spec.name.to_string(),
                    summary: spec.summary,
                    radius: spec.size,
                    distance: spec.distance,
                },
            ));

            if spec.summary.is_some() {
                orbit.spawn((
                    Mesh3d(meshes.add(Sphere::new(spec.size * ATMOSPHERE_SCALE))),
                    MeshMaterial3d(
                        materials.add(glow_material(Color::srgba(0.533, 0.667, 1.0, 0.3))),
                    ),
                    Transform::from_xyz(spec.distance, 0.0, 0.0),
                    PulsingAtmosphere,
                ));
            }

            if let Some(rings) = &spec.rings {
                orbit.spawn((
                    Mesh3d(meshes.add(Annulus::new(rings.inner_radius, rings.outer_radius))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::srgba(0.85, 0.80, 0.65, 0.8),
                        alpha_mode: AlphaMode::Blend,
                        double_sided: true,
                        cull_mode: None,
                        perceptual_roughness: 0.8,
                        ..default()
                    })),
                    Transform::from_xyz(spec.distance, 0.0, 0.0)
                        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                ));
            }
        });
}

/// Spawn the black hole and its tilted, spinning accretion disk.
fn spawn_black_hole(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(BLACK_HOLE_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.0, 0.0, 0.0, 0.8),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(BLACK_HOLE_POSITION),
    ));

    let disk_color = Color::srgb(1.0, 0.33, 0.0);
    commands.spawn((
        Mesh3d(meshes.add(Annulus::new(DISK_INNER_RADIUS, DISK_OUTER_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: disk_color,
            emissive: disk_color.to_linear() * 2.0,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(BLACK_HOLE_POSITION)
            .with_rotation(Quat::from_rotation_x(DISK_TILT)),
        Spin {
            axis: Dir3::Z,
            rate: DISK_SPIN_RATE,
        },
    ));
}

/// Spawn the composite spaceship. The root entity carries the kinematic
/// components; the visual parts hang off it as children. Forward is +x
/// (cockpit at the nose, engine pods aft).
fn spawn_spaceship(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hull = materials.add(StandardMaterial {
        base_color: Color::srgb(0.87, 0.87, 0.87),
        metallic: 0.9,
        perceptual_roughness: 0.1,
        ..default()
    });
    let canopy = materials.add(StandardMaterial {
        base_color: Color::srgba(0.77, 0.88, 1.0, 0.8),
        alpha_mode: AlphaMode::Blend,
        metallic: 0.2,
        perceptual_roughness: 0.05,
        ..default()
    });
    let pod = materials.add(StandardMaterial {
        base_color: Color::srgb(0.13, 0.13, 0.13),
        metallic: 1.0,
        perceptual_roughness: 0.1,
        ..default()
    });
    let accent_color = Color::srgb(1.0, 0.33, 0.0);
    let accent = materials.add(StandardMaterial {
        base_color: accent_color,
        emissive: accent_color.to_linear() * 0.5,
        metallic: 0.8,
        perceptual_roughness: 0.1,
        ..default()
    });
    let exhaust_glow = materials.add(glow_material(Color::srgba(0.40, 0.67, 1.0, 0.9)));

    let wing = meshes.add(Cuboid::new(5.0, 0.15, 1.2));
    let stripe = meshes.add(Cuboid::new(1.0, 0.05, 1.2));
    let engine = meshes.add(Cylinder::new(0.4, 1.5));
    let glow_disc = meshes.add(Circle::new(0.4));

    commands
        .spawn((
            Ship,
            ShipVelocity::default(),
            ShipAttitude::default(),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|ship| {
            // Fuselage, lying along +x.
            ship.spawn((
                Mesh3d(meshes.add(Cylinder::new(1.65, 6.0))),
                MeshMaterial3d(hull.clone()),
                Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
            // Canopy at the nose.
            ship.spawn((
                Mesh3d(meshes.add(Sphere::new(1.2))),
                MeshMaterial3d(canopy),
                Transform::from_xyz(2.5, 0.3, 0.0),
            ));
            // Ventral accent spine.
            ship.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.5, 0.5, 3.0))),
                MeshMaterial3d(accent.clone()),
                Transform::from_xyz(0.0, -0.8, 0.0),
            ));

            // Four wings with engine pods, exhaust discs, and accent stripes.
            for (y, z) in [(1.3, 2.0), (-1.3, 2.0), (1.3, -2.0), (-1.3, -2.0)] {
                let bank = PI * 0.08 * y.signum();
                ship.spawn((
                    Mesh3d(wing.clone()),
                    MeshMaterial3d(hull.clone()),
                    Transform::from_xyz(-1.0, y, z).with_rotation(Quat::from_rotation_z(bank)),
                ));
                ship.spawn((
                    Mesh3d(stripe.clone()),
                    MeshMaterial3d(accent.clone()),
                    Transform::from_xyz(-2.0, y, z).with_rotation(Quat::from_rotation_z(bank)),
                ));
                ship.spawn((
                    Mesh3d(engine.clone()),
                    MeshMaterial3d(pod.clone()),
                    Transform::from_xyz(-3.0, y, z).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                ));
                ship.spawn((
                    Mesh3d(glow_disc.clone()),
                    MeshMaterial3d(exhaust_glow.clone()),
                    Transform::from_xyz(-3.8, y, z).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
                ));
            }
        });

    info!("Spawned spaceship");
}

/// Spawn the background starfield: randomly placed emissive spheres with a
/// mostly-white palette and occasional warm or cool tints.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_mesh = meshes.add(Sphere::new(1.5));

    let palette = [
        Color::srgb(1.0, 1.0, 1.0),
        Color::srgb(0.9, 0.6, 0.6),
        Color::srgb(0.6, 0.6, 0.9),
        Color::srgb(0.9, 0.9, 0.6),
    ];
    let star_materials: Vec<_> = palette
        .iter()
        .map(|color| {
            materials.add(StandardMaterial {
                base_color: *color,
                emissive: color.to_linear() * 0.5,
                unlit: true,
                ..default()
            })
        })
        .collect();

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let position = Vec3::new(
            rng.gen_range(-STARFIELD_EXTENT..STARFIELD_EXTENT),
            rng.gen_range(-STARFIELD_EXTENT..STARFIELD_EXTENT),
            rng.gen_range(-STARFIELD_EXTENT..STARFIELD_EXTENT),
        );
        let scale = rng.gen_range(0.5..1.5);
        // Roughly 70% plain white, the rest tinted.
        let tint = match rng.gen_range(0..10) {
            9 => 1,
            8 => 2,
            7 => 3,
            _ => 0,
        };

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_materials[tint].clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Spawn scene lighting: ambient fill, a key directional light, a warm fill
/// from below, and a point light for specular highlights on the planets.
fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 1.0, 0.8),
            illuminance: 3000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, -10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 500_000.0,
            range: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 30.0, 0.0),
    ));
}
