use crate::Screen;
use crate::geometry::orbit::OrbitalElements;
use crate::resources::AnomalyAnimation;
use bevy::prelude::*;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            advance_true_anomaly.run_if(in_state(Screen::OrbitalVisualizer)),
        );
    }
}

/// One frame's worth of anomaly, wrapped into [0, 360).
fn advanced(anomaly: f32, degrees_per_second: f32, dt: f32) -> f32 {
    (anomaly + degrees_per_second * dt).rem_euclid(360.0)
}

/// Fire-and-forget increments of the true anomaly, modulo 360. The boolean
/// flag is the only control: clearing it stops future increments.
fn advance_true_anomaly(
    time: Res<Time>,
    animation: Res<AnomalyAnimation>,
    mut elements: ResMut<OrbitalElements>,
) {
    if !animation.running {
        return;
    }
    elements.true_anomaly = advanced(
        elements.true_anomaly,
        animation.degrees_per_second,
        time.delta_secs(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-3;

    #[test]
    fn wraps_modulo_360() {
        assert!((advanced(355.0, 30.0, 1.0) - 25.0).abs() < TOL);
        // Landing exactly on 360 wraps to 0.
        assert!(advanced(0.0, 30.0, 12.0).abs() < TOL);
        // Large steps still land inside the range.
        let value = advanced(359.9, 3600.0, 1.25);
        assert!((0.0..360.0).contains(&value));
    }

    #[test]
    fn zero_rate_is_a_fixed_point() {
        assert!((advanced(123.4, 0.0, 1.0) - 123.4).abs() < TOL);
    }

    #[test]
    fn paused_driver_leaves_the_anomaly_alone() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<OrbitalElements>()
            .insert_resource(AnomalyAnimation {
                running: false,
                degrees_per_second: 30.0,
            })
            .add_systems(Update, advance_true_anomaly);
        app.world_mut().resource_mut::<OrbitalElements>().true_anomaly = 123.0;
        app.update();
        app.update();
        assert_eq!(
            app.world().resource::<OrbitalElements>().true_anomaly,
            123.0
        );
    }
}
