use crate::Screen;
use crate::config::ORBITAL_ELEMENT_DEFINITIONS;
use crate::resources::FocusedParameter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);

pub struct DescriptionPanelPlugin;

impl Plugin for DescriptionPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            description_panel_egui_system.run_if(in_state(Screen::OrbitalVisualizer)),
        );
    }
}

fn description_panel_egui_system(mut contexts: EguiContexts, focused: Res<FocusedParameter>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Window::new("About this parameter")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
        .show(ctx, |ui| {
            ui.set_width(260.0);

            let definition = focused
                .0
                .and_then(|key| ORBITAL_ELEMENT_DEFINITIONS.iter().find(|d| d.key == key));
            match definition {
                Some(def) => {
                    ui.colored_label(ACCENT, format!("{} ({})", def.label, def.symbol));
                    ui.label(def.long_description);
                }
                None => {
                    ui.label("Hover over or focus on a parameter to learn more about it.");
                }
            }
        });
}
