use crate::CliArgs;
use crate::generation::GenerateElementEvent;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_scene, trigger_initial_generation).chain(),
        );
    }
}

fn setup_scene(mut commands: Commands) {
    info!("Setting up scene: Camera, Light");
    commands.spawn((
        PanOrbitCamera::default(),
        Transform::from_xyz(0.0, 0.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4.0, 8.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn trigger_initial_generation(
    args: Res<CliArgs>,
    mut generate_writer: EventWriter<GenerateElementEvent>,
) {
    if args.no_autogenerate {
        info!("Starting idle (--no-autogenerate).");
        return;
    }
    info!("Sending initial generation request for '{}'", args.element);
    generate_writer.write(GenerateElementEvent(args.element.clone()));
}
