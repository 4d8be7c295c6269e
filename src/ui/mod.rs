mod control_panel;
mod description_panel;
mod generator_panel;

use crate::Screen;
use bevy::prelude::*;

use control_panel::ControlPanelPlugin;
use description_panel::DescriptionPanelPlugin;
use generator_panel::GeneratorPanelPlugin;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GeneratorPanelPlugin,
            ControlPanelPlugin,
            DescriptionPanelPlugin,
        ))
        .add_systems(Update, switch_screen);
    }
}

// Tab flips between the two screens; the scenes handle their own
// visibility on the state transition.
fn switch_screen(
    keys: Res<ButtonInput<KeyCode>>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let target = match screen.get() {
            Screen::BohrDiagram => Screen::OrbitalVisualizer,
            Screen::OrbitalVisualizer => Screen::BohrDiagram,
        };
        info!("Switching screen to {:?}", target);
        next_screen.set(target);
    }
}
