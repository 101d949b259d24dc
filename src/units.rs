//! Distance units.
//!
//! Scorecard data (hole yardages, stored feature radii) is in yards while every
//! geometric computation is in meters. The two never mix implicitly: each has
//! its own newtype and conversion goes through [`YARDS_TO_METERS`].

use std::fmt;

/// Exact length of one international yard in meters.
pub const YARDS_TO_METERS: f64 = 0.9144;

/// A distance in yards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct Yards(pub f64);

/// A distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct Meters(pub f64);

impl Yards {
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * YARDS_TO_METERS)
    }

    /// Whole yards, as printed on a scorecard.
    pub fn rounded(self) -> u32 {
        if self.0.is_finite() && self.0 > 0.0 {
            self.0.round() as u32
        } else {
            0
        }
    }
}

impl Meters {
    pub fn to_yards(self) -> Yards {
        Yards(self.0 / YARDS_TO_METERS)
    }
}

impl From<Yards> for Meters {
    fn from(y: Yards) -> Self {
        y.to_meters()
    }
}

impl From<Meters> for Yards {
    fn from(m: Meters) -> Self {
        m.to_yards()
    }
}

impl fmt::Display for Yards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} yd", self.0)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yards_to_meters() {
        assert!((Yards(100.0).to_meters().0 - 91.44).abs() < 1e-9);
        assert!((Meters(91.44).to_yards().0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounded_clamps_invalid() {
        assert_eq!(Yards(152.6).rounded(), 153);
        assert_eq!(Yards(-3.0).rounded(), 0);
        assert_eq!(Yards(f64::NAN).rounded(), 0);
    }

    #[test]
    fn test_from_conversions() {
        let m: Meters = Yards(10.0).into();
        let y: Yards = m.into();
        assert!((y.0 - 10.0).abs() < 1e-9);
    }
}
