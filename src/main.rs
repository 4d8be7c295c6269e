mod animation;
mod bohr;
mod config;
mod generation;
mod geometry;
mod orbital;
mod resources;
mod setup;
mod ui;
use animation::AnimationPlugin;
use bevy::audio::AudioPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bohr::BohrScenePlugin;
use clap::Parser;
use generation::GenerationPlugin;
use geometry::orbit::OrbitalElements;
use orbital::OrbitalScenePlugin;
use resources::*;
use setup::SetupPlugin;
use ui::UIPlugin;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    BohrDiagram,
    OrbitalVisualizer,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum StartScreen {
    Bohr,
    Orbital,
}

#[derive(Resource, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Element to generate on startup (name, symbol, or atomic number).
    #[arg(short, long, default_value = "Carbon")]
    pub element: String,

    /// Screen to show on startup (Tab switches at runtime).
    #[arg(long, value_enum, default_value_t = StartScreen::Bohr)]
    screen: StartScreen,

    /// True-anomaly animation rate in degrees per second.
    #[arg(long, default_value_t = 30.0)]
    anomaly_rate: f32,

    /// Start idle instead of generating the initial element.
    #[arg(long, default_value_t = false)]
    pub no_autogenerate: bool,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentElement>()
            .init_resource::<GenerationState>()
            .init_resource::<FocusedParameter>()
            .init_resource::<OrbitalElements>();
    }
}

fn main() {
    let args = CliArgs::parse();
    info!("CLI arguments parsed. Initial element: {}", args.element);

    let mut app = App::new();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Bohr Diagram Generator".into(),
            canvas: Some("#bevy".to_string()),
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    });

    #[cfg(target_arch = "wasm32")]
    let default_plugins = default_plugins.build().disable::<AudioPlugin>();

    let initial_screen = match args.screen {
        StartScreen::Bohr => Screen::BohrDiagram,
        StartScreen::Orbital => Screen::OrbitalVisualizer,
    };

    app.add_plugins(default_plugins)
        .insert_state(initial_screen)
        .insert_resource(ElementQuery(args.element.clone()))
        .insert_resource(AnomalyAnimation {
            running: false,
            degrees_per_second: args.anomaly_rate,
        })
        .insert_resource(args)
        .add_plugins((
            PanOrbitCameraPlugin,
            EguiPlugin::default(),
            CorePlugin,
            SetupPlugin,
            GenerationPlugin,
            BohrScenePlugin,
            OrbitalScenePlugin,
            AnimationPlugin,
            UIPlugin,
        ))
        .run();
}
