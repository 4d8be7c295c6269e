// Renders the orbital-elements visualizer: static reference guides, the
// orbit curve and line of apsides (both carried through the plane
// transform), the satellite, and the central body at the origin. Geometry
// is recomputed from the elements every frame; there is no cached state.

use crate::Screen;
use crate::geometry::orbit::{
    self, DISPLAY_TILT_DEG, OrbitalElements, REFERENCE_EXTENT, REFERENCE_RING_RADII,
};
use bevy::prelude::*;

const WORLD_SCALE: f32 = 0.01;

const ORBIT_COLOR: Color = Color::srgb(0.024, 0.714, 0.831);
const GUIDE_COLOR: Color = Color::srgba(0.278, 0.333, 0.412, 0.5);
const APSIDES_COLOR: Color = Color::srgb(0.392, 0.455, 0.545);
const BODY_COLOR: Color = Color::srgb(0.961, 0.620, 0.043);
const SATELLITE_COLOR: Color = Color::srgb(0.945, 0.961, 0.976);

#[derive(Component)]
struct OrbitalScene;

#[derive(Component)]
struct SatelliteMarker;

pub struct OrbitalScenePlugin;

impl Plugin for OrbitalScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_orbital_scene)
            .add_systems(
                Update,
                draw_orbit.run_if(in_state(Screen::OrbitalVisualizer)),
            )
            .add_systems(OnEnter(Screen::OrbitalVisualizer), show_scene)
            .add_systems(OnExit(Screen::OrbitalVisualizer), hide_scene);
    }
}

/// Presentation-only perspective tilt; everything on this screen is drawn
/// through it.
fn display_tilt() -> Quat {
    Quat::from_rotation_x(DISPLAY_TILT_DEG.to_radians())
}

fn setup_orbital_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body_mesh = meshes.add(Sphere::new(10.0 * WORLD_SCALE));
    let body_material = materials.add(BODY_COLOR);
    let halo_mesh = meshes.add(Sphere::new(15.0 * WORLD_SCALE));
    let halo_material = materials.add(StandardMaterial {
        base_color: BODY_COLOR.with_alpha(0.3),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let satellite_mesh = meshes.add(Sphere::new(5.0 * WORLD_SCALE));
    let satellite_material = materials.add(SATELLITE_COLOR);

    commands
        .spawn((
            OrbitalScene,
            Name::new("Orbital Visualizer"),
            Transform::default(),
            // The Bohr screen is the default; the state transition flips
            // this on entry.
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(body_mesh),
                MeshMaterial3d(body_material),
                Transform::default(),
            ));
            parent.spawn((
                Mesh3d(halo_mesh),
                MeshMaterial3d(halo_material),
                Transform::from_translation(-Vec3::Z * 0.01),
            ));
            parent.spawn((
                SatelliteMarker,
                Mesh3d(satellite_mesh),
                MeshMaterial3d(satellite_material),
                Transform::default(),
            ));
        });
}

fn draw_orbit(
    elements: Res<OrbitalElements>,
    mut gizmos: Gizmos,
    mut satellite_query: Query<&mut Transform, With<SatelliteMarker>>,
) {
    let tilt = display_tilt();
    let geometry = orbit::compute_orbit(&elements);

    // Static reference plane: guide rings and a dashed crosshair.
    for radius in REFERENCE_RING_RADII {
        gizmos.circle(
            Isometry3d::new(Vec3::ZERO, tilt),
            radius * WORLD_SCALE,
            GUIDE_COLOR,
        );
    }
    let extent = REFERENCE_EXTENT * WORLD_SCALE;
    draw_dashed(
        &mut gizmos,
        tilt * Vec3::new(-extent, 0.0, 0.0),
        tilt * Vec3::new(extent, 0.0, 0.0),
        0.04,
        GUIDE_COLOR,
    );
    draw_dashed(
        &mut gizmos,
        tilt * Vec3::new(0.0, -extent, 0.0),
        tilt * Vec3::new(0.0, extent, 0.0),
        0.04,
        GUIDE_COLOR,
    );

    // Line of apsides, oriented with the orbit.
    let (apoapsis_end, periapsis_end) = geometry.apsides;
    draw_dashed(
        &mut gizmos,
        tilt * geometry.to_oriented(apoapsis_end) * WORLD_SCALE,
        tilt * geometry.to_oriented(periapsis_end) * WORLD_SCALE,
        0.02,
        APSIDES_COLOR,
    );

    // Orbit path.
    let path: Vec<Vec3> = geometry
        .path
        .iter()
        .map(|&point| tilt * geometry.to_oriented(point) * WORLD_SCALE)
        .collect();
    gizmos.linestrip(path, ORBIT_COLOR);

    // Satellite.
    if let Ok(mut transform) = satellite_query.single_mut() {
        transform.translation = tilt * geometry.to_oriented(geometry.satellite) * WORLD_SCALE;
    }
}

fn draw_dashed(gizmos: &mut Gizmos, from: Vec3, to: Vec3, dash: f32, color: Color) {
    let length = from.distance(to);
    if length < f32::EPSILON {
        return;
    }
    let direction = (to - from) / length;
    let mut travelled = 0.0;
    while travelled < length {
        let end = (travelled + dash).min(length);
        gizmos.line(
            from + direction * travelled,
            from + direction * end,
            color,
        );
        travelled += dash * 2.0;
    }
}

fn show_scene(mut roots: Query<&mut Visibility, With<OrbitalScene>>) {
    for mut visibility in &mut roots {
        *visibility = Visibility::Visible;
    }
}

fn hide_scene(mut roots: Query<&mut Visibility, With<OrbitalScene>>) {
    for mut visibility in &mut roots {
        *visibility = Visibility::Hidden;
    }
}
