use bevy::prelude::*;
use thiserror::Error;

/// Radius of the nucleus disc.
pub const NUCLEUS_RADIUS: f32 = 25.0;
/// Distance from the center to the start of the first shell.
pub const SHELL_BASE_RADIUS: f32 = NUCLEUS_RADIUS + 20.0;
/// Gap between successive shells.
pub const SHELL_SPACING: f32 = 35.0;
/// Radius of a single electron marker.
pub const ELECTRON_RADIUS: f32 = 5.0;
/// Outer padding beyond the outermost electron.
pub const CANVAS_PADDING: f32 = 20.0;
/// Smallest canvas we ever produce, even for a single-shell atom.
pub const MIN_CANVAS_SIZE: f32 = 400.0;
/// Per-shell angular phase (radians). Keeps electrons in adjacent shells
/// from lining up radially. Presentation constant, not a physical one.
pub const SHELL_PHASE_OFFSET: f32 = 0.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("negative electron count {count} at shell {shell_index}")]
    NegativeCount { shell_index: usize, count: i64 },
}

/// One concentric shell ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellRing {
    pub radius: f32,
}

/// One electron marker, in absolute canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronPoint {
    pub shell_index: usize,
    pub position: Vec2,
}

/// Complete layout for one Bohr diagram, in a square canvas of side
/// `canvas_size` with the nucleus at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellLayout {
    pub canvas_size: f32,
    pub nucleus_position: Vec2,
    pub shells: Vec<ShellRing>,
    pub electrons: Vec<ElectronPoint>,
}

/// Computes nucleus, ring, and electron positions for an ordered sequence of
/// per-shell electron counts (index 0 = innermost shell).
///
/// Pure function. The only error path is a negative count; a shell with zero
/// electrons keeps its ring but contributes no points.
pub fn layout(electrons_per_shell: &[i64]) -> Result<ShellLayout, LayoutError> {
    for (shell_index, &count) in electrons_per_shell.iter().enumerate() {
        if count < 0 {
            return Err(LayoutError::NegativeCount { shell_index, count });
        }
    }

    let num_shells = electrons_per_shell.len();
    let outermost_radius = SHELL_BASE_RADIUS + num_shells as f32 * SHELL_SPACING;
    let required_radius = outermost_radius + ELECTRON_RADIUS;
    let canvas_size = MIN_CANVAS_SIZE.max(required_radius * 2.0 + CANVAS_PADDING);
    let center = Vec2::splat(canvas_size / 2.0);

    let shells: Vec<ShellRing> = (0..num_shells)
        .map(|k| ShellRing {
            radius: SHELL_BASE_RADIUS + (k + 1) as f32 * SHELL_SPACING,
        })
        .collect();

    let mut electrons = Vec::new();
    for (shell_index, &count) in electrons_per_shell.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let radius = shells[shell_index].radius;
        for i in 0..count {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU
                + shell_index as f32 * SHELL_PHASE_OFFSET;
            electrons.push(ElectronPoint {
                shell_index,
                position: center + radius * Vec2::new(angle.cos(), angle.sin()),
            });
        }
    }

    Ok(ShellLayout {
        canvas_size,
        nucleus_position: center,
        shells,
        electrons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-3;

    #[test]
    fn shell_count_matches_input() {
        let counts = [2i64, 8, 18, 32, 18, 8];
        let result = layout(&counts).unwrap();
        assert_eq!(result.shells.len(), counts.len());
        for (k, &count) in counts.iter().enumerate() {
            let on_shell = result
                .electrons
                .iter()
                .filter(|e| e.shell_index == k)
                .count();
            assert_eq!(on_shell as i64, count, "shell {k}");
        }
    }

    #[test]
    fn carbon_like_config() {
        // [2, 8, 4]: nucleus at canvas center, radii increase by the fixed
        // spacing, every electron sits on its shell's circle.
        let result = layout(&[2, 8, 4]).unwrap();
        let center = Vec2::splat(result.canvas_size / 2.0);
        assert!(result.nucleus_position.distance(center) < TOL);

        assert_eq!(result.shells.len(), 3);
        for pair in result.shells.windows(2) {
            assert!((pair[1].radius - pair[0].radius - SHELL_SPACING).abs() < TOL);
        }
        for electron in &result.electrons {
            let expected = result.shells[electron.shell_index].radius;
            assert!(
                (electron.position.distance(center) - expected).abs() < TOL,
                "electron off its ring: {:?}",
                electron
            );
        }
    }

    #[test]
    fn empty_input_gives_minimum_canvas_and_no_rings() {
        let result = layout(&[]).unwrap();
        assert!(result.canvas_size >= MIN_CANVAS_SIZE);
        assert!(result.shells.is_empty());
        assert!(result.electrons.is_empty());
    }

    #[test]
    fn two_shells_three_electrons_none_at_nucleus() {
        let result = layout(&[2, 1]).unwrap();
        assert_eq!(result.shells.len(), 2);
        assert_eq!(result.electrons.len(), 3);
        for electron in &result.electrons {
            assert!(electron.position.distance(result.nucleus_position) > NUCLEUS_RADIUS);
        }
    }

    #[test]
    fn zero_electron_shell_keeps_ring() {
        let result = layout(&[2, 0, 1]).unwrap();
        assert_eq!(result.shells.len(), 3);
        assert_eq!(result.electrons.len(), 3);
        assert!(result.electrons.iter().all(|e| e.shell_index != 1));
    }

    #[test]
    fn canvas_grows_past_minimum_for_many_shells() {
        let counts = vec![1i64; 8];
        let result = layout(&counts).unwrap();
        let required = SHELL_BASE_RADIUS + 8.0 * SHELL_SPACING + ELECTRON_RADIUS;
        assert!((result.canvas_size - (required * 2.0 + CANVAS_PADDING)).abs() < TOL);
        assert!(result.canvas_size > MIN_CANVAS_SIZE);
    }

    #[test]
    fn negative_count_rejected() {
        let err = layout(&[2, -1]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::NegativeCount {
                shell_index: 1,
                count: -1
            }
        );
    }

    #[test]
    fn idempotent() {
        let counts = [2i64, 8, 8, 2];
        assert_eq!(layout(&counts).unwrap(), layout(&counts).unwrap());
    }
}
