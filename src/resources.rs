use crate::config::OrbitalElementKey;
use bevy::prelude::*;

/// Validated shell data for one element, as returned by the generation API.
/// Replaced wholesale on every successful request; never partially mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementShellData {
    pub name: String,
    pub symbol: String,
    pub atomic_number: i64,
    /// Index 0 is the innermost shell.
    pub electrons_per_shell: Vec<i64>,
}

impl ElementShellData {
    /// "2, 8, 4" style caption line.
    pub fn configuration_string(&self) -> String {
        self.electrons_per_shell
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The most recently generated element, if any.
#[derive(Resource, Default)]
pub struct CurrentElement(pub Option<ElementShellData>);

/// The free-text element query bound to the input field.
#[derive(Resource, Default)]
pub struct ElementQuery(pub String);

/// Generation request bookkeeping. `in_flight` gates the Generate control so
/// at most one request is ever outstanding; `error` is the user-facing
/// message for the last failed attempt.
#[derive(Resource, Default)]
pub struct GenerationState {
    pub in_flight: bool,
    pub error: Option<String>,
}

/// Which slider (if any) is hovered or focused; drives the description box.
#[derive(Resource, Default)]
pub struct FocusedParameter(pub Option<OrbitalElementKey>);

/// True-anomaly animation driver state. A plain boolean flag: clearing it
/// stops future increments, there is no other cancellation.
#[derive(Resource)]
pub struct AnomalyAnimation {
    pub running: bool,
    pub degrees_per_second: f32,
}

impl Default for AnomalyAnimation {
    fn default() -> Self {
        Self {
            running: false,
            degrees_per_second: 30.0,
        }
    }
}
