use crate::geometry::orbit::OrbitalElements;

/// Identifies one of the six orbital elements in UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitalElementKey {
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    AscendingNode,
    ArgOfPeriapsis,
    TrueAnomaly,
}

/// Slider metadata for one orbital element: bounds, formatting, and the
/// explanatory text shown in the description box.
pub struct OrbitalElementDefinition {
    pub key: OrbitalElementKey,
    pub label: &'static str,
    pub symbol: &'static str,
    pub unit: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f64,
    pub decimals: usize,
    pub description: &'static str,
    pub long_description: &'static str,
}

pub const ORBITAL_ELEMENT_DEFINITIONS: [OrbitalElementDefinition; 6] = [
    OrbitalElementDefinition {
        key: OrbitalElementKey::SemiMajorAxis,
        label: "Semi-Major Axis",
        symbol: "a",
        unit: "km",
        min: 50.0,
        max: 200.0,
        step: 1.0,
        decimals: 0,
        description: "Controls the orbit's size.",
        long_description: "The semi-major axis defines the size of the orbit. It is half of \
            the longest diameter of the elliptical orbit, running from the center, through \
            a focus, and to the perimeter.",
    },
    OrbitalElementDefinition {
        key: OrbitalElementKey::Eccentricity,
        label: "Eccentricity",
        symbol: "e",
        unit: "",
        min: 0.0,
        max: 0.99,
        step: 0.01,
        decimals: 2,
        description: "Defines the orbit's shape.",
        long_description: "Eccentricity determines how much the orbit deviates from a \
            perfect circle. A value of 0 is a circular orbit, while values between 0 and 1 \
            create an increasingly elongated ellipse.",
    },
    OrbitalElementDefinition {
        key: OrbitalElementKey::Inclination,
        label: "Inclination",
        symbol: "i",
        unit: "\u{b0}",
        min: 0.0,
        max: 180.0,
        step: 1.0,
        decimals: 0,
        description: "Tilts the orbital plane.",
        long_description: "Inclination is the angle between the orbital plane and a \
            reference plane (e.g., the equatorial plane). It defines the tilt of the orbit. \
            An inclination of 0\u{b0} is an equatorial orbit, and 90\u{b0} is a polar orbit.",
    },
    OrbitalElementDefinition {
        key: OrbitalElementKey::AscendingNode,
        label: "Long. of Ascending Node",
        symbol: "\u{3a9}",
        unit: "\u{b0}",
        min: 0.0,
        max: 360.0,
        step: 1.0,
        decimals: 0,
        description: "Swivels the orbital plane.",
        long_description: "The Longitude of the Ascending Node horizontally orients the \
            ascending node of the orbit, which is the point where the satellite crosses the \
            reference plane from south to north. It effectively swivels the orbital plane.",
    },
    OrbitalElementDefinition {
        key: OrbitalElementKey::ArgOfPeriapsis,
        label: "Argument of Periapsis",
        symbol: "\u{3c9}",
        unit: "\u{b0}",
        min: 0.0,
        max: 360.0,
        step: 1.0,
        decimals: 0,
        description: "Rotates the orbit within its plane.",
        long_description: "The Argument of Periapsis defines the orientation of the ellipse \
            in the orbital plane. It is the angle from the ascending node to the periapsis \
            (the point of closest approach to the central body).",
    },
    OrbitalElementDefinition {
        key: OrbitalElementKey::TrueAnomaly,
        label: "True Anomaly",
        symbol: "\u{3bd}",
        unit: "\u{b0}",
        min: 0.0,
        max: 360.0,
        step: 1.0,
        decimals: 0,
        description: "Positions the satellite on the orbit.",
        long_description: "The True Anomaly is the angle between the direction of periapsis \
            and the current position of the orbiting body, as seen from the main focus of \
            the ellipse. It defines the satellite's position along its orbit at a specific \
            time.",
    },
];

impl OrbitalElements {
    pub fn value(&self, key: OrbitalElementKey) -> f32 {
        match key {
            OrbitalElementKey::SemiMajorAxis => self.semi_major_axis,
            OrbitalElementKey::Eccentricity => self.eccentricity,
            OrbitalElementKey::Inclination => self.inclination,
            OrbitalElementKey::AscendingNode => self.ascending_node,
            OrbitalElementKey::ArgOfPeriapsis => self.arg_of_periapsis,
            OrbitalElementKey::TrueAnomaly => self.true_anomaly,
        }
    }

    pub fn set_value(&mut self, key: OrbitalElementKey, value: f32) {
        let field = match key {
            OrbitalElementKey::SemiMajorAxis => &mut self.semi_major_axis,
            OrbitalElementKey::Eccentricity => &mut self.eccentricity,
            OrbitalElementKey::Inclination => &mut self.inclination,
            OrbitalElementKey::AscendingNode => &mut self.ascending_node,
            OrbitalElementKey::ArgOfPeriapsis => &mut self.arg_of_periapsis,
            OrbitalElementKey::TrueAnomaly => &mut self.true_anomaly,
        };
        *field = value;
    }
}
