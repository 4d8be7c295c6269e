use bevy::prelude::*;

/// Angular sampling resolution of the orbit path: 1 degree steps, with the
/// closing point repeated (361 samples total).
pub const PATH_SAMPLES: usize = 361;
/// Fixed perspective tilt applied by the renderer only. Presentation
/// constant, not part of the orbital model.
pub const DISPLAY_TILT_DEG: f32 = 10.0;
/// Radii of the static reference-plane guide circles.
pub const REFERENCE_RING_RADII: [f32; 3] = [50.0, 120.0, 200.0];
/// Half-extent of the reference crosshair (and of the render space).
pub const REFERENCE_EXTENT: f32 = 250.0;

/// The six classical orbital elements. Angles are in degrees; eccentricity
/// must stay below 1 for a closed orbit; callers clamp to the slider
/// bound of 0.99.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f32,
    pub eccentricity: f32,
    pub inclination: f32,
    pub ascending_node: f32,
    pub arg_of_periapsis: f32,
    pub true_anomaly: f32,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            semi_major_axis: 100.0,
            eccentricity: 0.5,
            inclination: 30.0,
            ascending_node: 45.0,
            arg_of_periapsis: 0.0,
            true_anomaly: 0.0,
        }
    }
}

impl OrbitalElements {
    /// Semi-minor axis `b = a * sqrt(1 - e^2)`.
    pub fn semi_minor_axis(&self) -> f32 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Distance from the ellipse center to either focus, `c = a * e`.
    pub fn focus_distance(&self) -> f32 {
        self.semi_major_axis * self.eccentricity
    }
}

/// Geometry derived from one set of orbital elements. `path` and `satellite`
/// live in the orbital plane; `plane_transform` carries them into the
/// reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGeometry {
    /// Closed orbit curve, first point repeated at the end.
    pub path: Vec<Vec2>,
    /// Instantaneous satellite position at the true anomaly.
    pub satellite: Vec2,
    /// Endpoints of the line of apsides (periapsis side last).
    pub apsides: (Vec2, Vec2),
    /// The composed argument-of-periapsis -> inclination -> ascending-node
    /// rotation.
    pub plane_transform: Quat,
}

/// Polar conic-section equation about the focus:
/// `r(theta) = a (1 - e^2) / (1 + e cos theta)`.
pub fn radius_at(semi_major_axis: f32, eccentricity: f32, theta: f32) -> f32 {
    semi_major_axis * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * theta.cos())
}

/// Computes the orbit curve, the satellite point, and the plane orientation
/// for one set of elements.
///
/// Every in-plane point is shifted by `-c` along the major axis so the
/// central body sits at the coordinate origin. The satellite is evaluated
/// from the same polar equation as the path, so it lies exactly on the
/// underlying curve regardless of sampling resolution.
pub fn compute_orbit(elements: &OrbitalElements) -> OrbitGeometry {
    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let c = elements.focus_distance();

    let path: Vec<Vec2> = (0..PATH_SAMPLES)
        .map(|deg| {
            let theta = (deg as f32).to_radians();
            let r = radius_at(a, e, theta);
            Vec2::new(r * theta.cos() - c, r * theta.sin())
        })
        .collect();

    let nu = elements.true_anomaly.to_radians();
    let r_satellite = radius_at(a, e, nu);
    let satellite = Vec2::new(r_satellite * nu.cos() - c, r_satellite * nu.sin());

    // Endpoints of the major axis, evaluated from the same polar equation
    // as the path so the segment ends exactly on the curve.
    let apsides = (
        Vec2::new(-radius_at(a, e, std::f32::consts::PI) - c, 0.0),
        Vec2::new(radius_at(a, e, 0.0) - c, 0.0),
    );

    // Applied right-to-left: periapsis orientation within the plane first,
    // then the plane tilt, then the swivel of the tilted plane. Reversing
    // this order is physically wrong.
    let plane_transform = Quat::from_rotation_z(elements.ascending_node.to_radians())
        * Quat::from_rotation_x(elements.inclination.to_radians())
        * Quat::from_rotation_z(elements.arg_of_periapsis.to_radians());

    OrbitGeometry {
        path,
        satellite,
        apsides,
        plane_transform,
    }
}

impl OrbitGeometry {
    /// Lifts an in-plane point into the oriented 3D frame.
    pub fn to_oriented(&self, point: Vec2) -> Vec3 {
        self.plane_transform * point.extend(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-2;

    fn elements(a: f32, e: f32, nu: f32) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: 0.0,
            ascending_node: 0.0,
            arg_of_periapsis: 0.0,
            true_anomaly: nu,
        }
    }

    #[test]
    fn path_is_closed() {
        for &(a, e) in &[(50.0, 0.0), (100.0, 0.5), (200.0, 0.99)] {
            let geometry = compute_orbit(&elements(a, e, 0.0));
            assert_eq!(geometry.path.len(), PATH_SAMPLES);
            let first = geometry.path[0];
            let last = *geometry.path.last().unwrap();
            assert!(first.distance(last) < TOL, "open curve for a={a}, e={e}");
        }
    }

    #[test]
    fn satellite_sits_on_curve_at_focus_distance() {
        // The focus lands at (-c, 0) after the shift; the satellite's
        // distance from it must equal r(nu) from the polar formula.
        for &(a, e, nu) in &[(50.0, 0.0, 90.0), (100.0, 0.5, 45.0), (200.0, 0.99, 180.0)] {
            let el = elements(a, e, nu);
            let geometry = compute_orbit(&el);
            let from_focus = geometry.satellite + Vec2::new(el.focus_distance(), 0.0);
            let expected = radius_at(a, e, nu.to_radians());
            assert!(
                (from_focus.length() - expected).abs() < TOL * expected.max(1.0),
                "a={a} e={e} nu={nu}: {} vs {}",
                from_focus.length(),
                expected
            );
        }
    }

    #[test]
    fn periapsis_of_reference_orbit_is_origin() {
        // a=100, e=0.5, nu=0: r(0) = 100 * 0.75 / 1.5 = 50, shifted by
        // -c = -50, so the satellite lands exactly at the origin.
        let geometry = compute_orbit(&elements(100.0, 0.5, 0.0));
        assert!(geometry.satellite.length() < TOL);
    }

    #[test]
    fn semi_minor_axis_and_focus_distance() {
        let el = elements(100.0, 0.6, 0.0);
        assert!((el.semi_minor_axis() - 80.0).abs() < TOL);
        assert!((el.focus_distance() - 60.0).abs() < TOL);
    }

    #[test]
    fn circular_orbit_is_centered() {
        // e = 0: every path point is at distance a from the origin.
        let geometry = compute_orbit(&elements(120.0, 0.0, 0.0));
        for point in &geometry.path {
            assert!((point.length() - 120.0).abs() < TOL);
        }
    }

    #[test]
    fn apsides_span_the_major_axis() {
        let el = elements(100.0, 0.5, 0.0);
        let geometry = compute_orbit(&el);
        // r(pi) = a(1+e) = 150 shifted by -c, r(0) = a(1-e) = 50 shifted
        // by -c.
        assert!(geometry.apsides.0.distance(Vec2::new(-200.0, 0.0)) < TOL);
        assert!(geometry.apsides.1.distance(Vec2::new(0.0, 0.0)) < TOL);
        // Both endpoints coincide with their path samples.
        assert!(geometry.apsides.1.distance(geometry.path[0]) < TOL);
        assert!(geometry.apsides.0.distance(geometry.path[180]) < TOL);
        assert!((geometry.apsides.0.distance(geometry.apsides.1)
            - 2.0 * el.semi_major_axis)
            .abs()
            < TOL);
    }

    #[test]
    fn rotation_order_is_omega_then_i_then_node() {
        let el = OrbitalElements {
            inclination: 90.0,
            ascending_node: 0.0,
            arg_of_periapsis: 90.0,
            ..elements(100.0, 0.0, 0.0)
        };
        let geometry = compute_orbit(&el);
        // X axis: omega sends it to Y, inclination sends Y to Z, the node
        // rotation (zero here) leaves Z alone.
        assert!(geometry.to_oriented(Vec2::X).distance(Vec3::Z) < TOL);
        // The reversed composition (node first, omega last) would leave the
        // point in the reference plane at Y instead.
        let reversed = Quat::from_rotation_z(90f32.to_radians())
            * Quat::from_rotation_x(90f32.to_radians());
        assert!((reversed * Vec3::X).distance(Vec3::Y) < TOL);
    }

    #[test]
    fn inclination_tilts_out_of_plane() {
        let el = OrbitalElements {
            inclination: 90.0,
            ..elements(100.0, 0.0, 0.0)
        };
        let geometry = compute_orbit(&el);
        let oriented = geometry.to_oriented(Vec2::Y);
        assert!(oriented.distance(Vec3::Z) < TOL);
        // In-plane x stays in the reference plane (the node line).
        assert!(geometry.to_oriented(Vec2::X).distance(Vec3::X) < TOL);
    }

    #[test]
    fn idempotent() {
        let el = OrbitalElements::default();
        assert_eq!(compute_orbit(&el), compute_orbit(&el));
    }
}
