// Renders the current element's Bohr diagram: nucleus with halo, shell
// rings, and one marker per electron, with a spawn-in scale animation
// staggered per shell and per electron.

use crate::Screen;
use crate::geometry::shell_layout::{self, NUCLEUS_RADIUS, ShellLayout};
use crate::resources::CurrentElement;
use bevy::prelude::*;

/// Layout units are SVG-canvas pixels; world units are meters-ish for the
/// camera. One px = 0.01 world units keeps a 400-unit canvas 4 units wide.
const WORLD_SCALE: f32 = 0.01;

const NUCLEUS_COLOR: Color = Color::srgb(0.961, 0.620, 0.043);
const ELECTRON_COLOR: Color = Color::srgb(0.945, 0.961, 0.976);
const RING_COLOR: Color = Color::srgb(0.278, 0.333, 0.412);

/// Root of the spawned diagram; everything under it is despawned wholesale
/// when a new element arrives.
#[derive(Component)]
struct BohrScene;

/// Scale-in animation with a per-marker start delay.
#[derive(Component)]
struct ScaleIn {
    delay: f32,
    duration: f32,
    elapsed: f32,
}

/// The layout backing the currently spawned diagram (rings are redrawn from
/// it every frame).
#[derive(Resource, Default)]
struct CurrentLayout(Option<ShellLayout>);

pub struct BohrScenePlugin;

impl Plugin for BohrScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLayout>()
            .add_systems(Update, (rebuild_diagram, animate_scale_in))
            .add_systems(
                Update,
                draw_shell_rings.run_if(in_state(Screen::BohrDiagram)),
            )
            .add_systems(OnEnter(Screen::BohrDiagram), show_scene)
            .add_systems(OnExit(Screen::BohrDiagram), hide_scene);
    }
}

/// Canvas coordinates are y-down with the nucleus at the canvas center;
/// world coordinates are y-up and centered on the origin.
fn canvas_to_world(point: Vec2, center: Vec2) -> Vec3 {
    Vec3::new(point.x - center.x, center.y - point.y, 0.0) * WORLD_SCALE
}

fn rebuild_diagram(
    mut commands: Commands,
    current: Res<CurrentElement>,
    mut current_layout: ResMut<CurrentLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    screen: Res<State<Screen>>,
    existing: Query<Entity, With<BohrScene>>,
) {
    if !current.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    current_layout.0 = None;

    let Some(data) = &current.0 else {
        return;
    };
    let layout = match shell_layout::layout(&data.electrons_per_shell) {
        Ok(layout) => layout,
        Err(err) => {
            error!("Cannot lay out diagram for {}: {err}", data.name);
            return;
        }
    };

    info!(
        "Spawning Bohr diagram for {} ({} shells, {} electrons)",
        data.name,
        layout.shells.len(),
        layout.electrons.len()
    );

    let visibility = if *screen.get() == Screen::BohrDiagram {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    let center = layout.nucleus_position;

    let nucleus_mesh = meshes.add(Sphere::new(NUCLEUS_RADIUS * WORLD_SCALE));
    let nucleus_material = materials.add(NUCLEUS_COLOR);
    let halo_mesh = meshes.add(Sphere::new((NUCLEUS_RADIUS + 5.0) * WORLD_SCALE));
    let halo_material = materials.add(StandardMaterial {
        base_color: NUCLEUS_COLOR.with_alpha(0.3),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let electron_mesh = meshes.add(Sphere::new(
        shell_layout::ELECTRON_RADIUS * WORLD_SCALE,
    ));
    let electron_material = materials.add(ELECTRON_COLOR);

    commands
        .spawn((
            BohrScene,
            Name::new(data.name.clone()),
            Transform::default(),
            visibility,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(nucleus_mesh),
                MeshMaterial3d(nucleus_material),
                Transform::from_translation(canvas_to_world(center, center))
                    .with_scale(Vec3::ZERO),
                ScaleIn {
                    delay: 0.1,
                    duration: 0.5,
                    elapsed: 0.0,
                },
            ));
            parent.spawn((
                Mesh3d(halo_mesh),
                MeshMaterial3d(halo_material),
                // Slightly behind the nucleus so the solid sphere wins the
                // depth test head-on.
                Transform::from_translation(
                    canvas_to_world(center, center) - Vec3::Z * 0.01,
                )
                .with_scale(Vec3::ZERO),
                ScaleIn {
                    delay: 0.1,
                    duration: 0.5,
                    elapsed: 0.0,
                },
            ));

            let mut index_in_shell = 0usize;
            let mut last_shell = usize::MAX;
            for electron in &layout.electrons {
                if electron.shell_index != last_shell {
                    last_shell = electron.shell_index;
                    index_in_shell = 0;
                }
                // Staggered start delays: 200ms base, 150ms per
                // shell, 50ms per electron.
                let delay =
                    0.2 + electron.shell_index as f32 * 0.15 + index_in_shell as f32 * 0.05;
                index_in_shell += 1;

                parent.spawn((
                    Mesh3d(electron_mesh.clone()),
                    MeshMaterial3d(electron_material.clone()),
                    Transform::from_translation(canvas_to_world(electron.position, center))
                        .with_scale(Vec3::ZERO),
                    ScaleIn {
                        delay,
                        duration: 0.5,
                        elapsed: 0.0,
                    },
                ));
            }
        });

    current_layout.0 = Some(layout);
}

/// Ease-out with a small overshoot for the springy scale-in.
fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

fn animate_scale_in(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut ScaleIn)>,
) {
    for (entity, mut transform, mut anim) in &mut query {
        anim.elapsed += time.delta_secs();
        if anim.elapsed < anim.delay {
            continue;
        }
        let t = ((anim.elapsed - anim.delay) / anim.duration).min(1.0);
        transform.scale = Vec3::splat(ease_out_back(t).max(0.0));
        if t >= 1.0 {
            transform.scale = Vec3::ONE;
            commands.entity(entity).remove::<ScaleIn>();
        }
    }
}

fn draw_shell_rings(current_layout: Res<CurrentLayout>, mut gizmos: Gizmos) {
    let Some(layout) = &current_layout.0 else {
        return;
    };
    for ring in &layout.shells {
        gizmos.circle(
            Isometry3d::from_translation(Vec3::ZERO),
            ring.radius * WORLD_SCALE,
            RING_COLOR,
        );
    }
}

fn show_scene(mut roots: Query<&mut Visibility, With<BohrScene>>) {
    for mut visibility in &mut roots {
        *visibility = Visibility::Visible;
    }
}

fn hide_scene(mut roots: Query<&mut Visibility, With<BohrScene>>) {
    for mut visibility in &mut roots {
        *visibility = Visibility::Hidden;
    }
}
