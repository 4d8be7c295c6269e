use crate::Screen;
use crate::generation::GenerateElementEvent;
use crate::resources::{CurrentElement, ElementQuery, GenerationState};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use egui_plot::{Bar, BarChart, Plot};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

pub struct GeneratorPanelPlugin;

impl Plugin for GeneratorPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            generator_panel_egui_system.run_if(in_state(Screen::BohrDiagram)),
        );
    }
}

fn generator_panel_egui_system(
    mut contexts: EguiContexts,
    mut query: ResMut<ElementQuery>,
    state: Res<GenerationState>,
    current: Res<CurrentElement>,
    mut generate_writer: EventWriter<GenerateElementEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Window::new("Generate Bohr Diagram")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            ui.set_width(280.0);

            let mut submitted = false;
            ui.horizontal(|ui| {
                let edit = ui.add_enabled(
                    !state.in_flight,
                    egui::TextEdit::singleline(&mut query.0)
                        .hint_text("Enter element (e.g., Carbon, C, 6)")
                        .desired_width(190.0),
                );
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                // Disabled while a request is outstanding: the in-flight
                // guard lives in the control, not the client.
                if ui
                    .add_enabled(!state.in_flight, egui::Button::new("Generate"))
                    .clicked()
                {
                    submitted = true;
                }
            });
            if submitted && !state.in_flight {
                generate_writer.write(GenerateElementEvent(query.0.clone()));
            }

            if state.in_flight {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating...");
                });
                return;
            }

            if let Some(message) = &state.error {
                ui.colored_label(ERROR_COLOR, message);
                return;
            }

            let Some(data) = &current.0 else {
                ui.label("Enter an element and click 'Generate' to see its Bohr diagram.");
                return;
            };

            ui.add_space(5.0);
            ui.heading(format!("{} ({})", data.name, data.symbol));
            ui.label(format!("Atomic number: {}", data.atomic_number));
            ui.monospace(format!(
                "Electron Configuration: {}",
                data.configuration_string()
            ));

            ui.add_space(5.0);
            let bars: Vec<Bar> = data
                .electrons_per_shell
                .iter()
                .enumerate()
                .map(|(shell, &count)| Bar::new((shell + 1) as f64, count as f64).fill(ACCENT))
                .collect();
            let chart = BarChart::new("Electrons per shell", bars)
                .width(0.7)
                .color(ACCENT);
            Plot::new("shell_occupancy_plot")
                .height(120.0)
                .show_x(false)
                .show_y(true)
                .y_axis_label("Electrons")
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(chart);
                });
        });
}
