use crate::Screen;
use crate::config::{ORBITAL_ELEMENT_DEFINITIONS, OrbitalElementKey};
use crate::geometry::orbit::OrbitalElements;
use crate::resources::{AnomalyAnimation, FocusedParameter};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);

pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            control_panel_egui_system.run_if(in_state(Screen::OrbitalVisualizer)),
        );
    }
}

fn control_panel_egui_system(
    mut contexts: EguiContexts,
    mut elements: ResMut<OrbitalElements>,
    mut animation: ResMut<AnomalyAnimation>,
    mut focused: ResMut<FocusedParameter>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut hovered_key = None;

    egui::Window::new("Orbital Parameters")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .show(ctx, |ui| {
            ui.set_width(260.0);

            for def in &ORBITAL_ELEMENT_DEFINITIONS {
                // The animation driver owns nu while it runs.
                let enabled = !(def.key == OrbitalElementKey::TrueAnomaly && animation.running);

                ui.horizontal(|ui| {
                    ui.label(format!("{} ({})", def.label, def.symbol));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(
                            ACCENT,
                            format!(
                                "{:.prec$}{}",
                                elements.value(def.key),
                                def.unit,
                                prec = def.decimals
                            ),
                        );
                    });
                });

                let mut value = elements.value(def.key);
                let response = ui.add_enabled(
                    enabled,
                    egui::Slider::new(&mut value, def.min..=def.max)
                        .step_by(def.step)
                        .show_value(false),
                )
                .on_hover_text(def.description);
                if response.changed() {
                    elements.set_value(def.key, value);
                }
                if response.hovered() || response.dragged() {
                    hovered_key = Some(def.key);
                }
                ui.add_space(4.0);
            }

            ui.separator();
            ui.checkbox(&mut animation.running, "Animate True Anomaly");
        });

    focused.0 = hovered_key;
}
