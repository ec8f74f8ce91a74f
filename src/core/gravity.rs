use std::fmt;
use std::str::FromStr;

use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const EARTH_GRAVITY_MPS2: f32 = 9.81;
pub const MOON_GRAVITY_MPS2: f32 = 1.62;
pub const MARS_GRAVITY_MPS2: f32 = 3.71;
pub const JUPITER_GRAVITY_MPS2: f32 = 24.79;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityPreset {
    #[default]
    Earth,
    Moon,
    Mars,
    Jupiter,
    Zero,
}

impl GravityPreset {
    pub const ALL: [Self; 5] = [
        Self::Earth,
        Self::Moon,
        Self::Mars,
        Self::Jupiter,
        Self::Zero,
    ];

    pub fn acceleration(self) -> f32 {
        match self {
            Self::Earth => EARTH_GRAVITY_MPS2,
            Self::Moon => MOON_GRAVITY_MPS2,
            Self::Mars => MARS_GRAVITY_MPS2,
            Self::Jupiter => JUPITER_GRAVITY_MPS2,
            Self::Zero => 0.0,
        }
    }

    /// Gravity as a world-space acceleration, pointing down the y axis.
    pub fn vector(self) -> Vec3 {
        Vec3::new(0.0, -self.acceleration(), 0.0)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Zero => "Zero",
        }
    }

    pub fn label(self) -> String {
        format!("{} ({:.2})", self.name(), self.acceleration())
    }

    /// Selector index as shown in a preset list. Out-of-range indices are
    /// ignored by callers rather than treated as errors.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for GravityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for GravityPreset {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimError::UnknownGravity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::GravityPreset;

    #[test]
    fn labels_match_selector_text() {
        let labels: Vec<String> = GravityPreset::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            [
                "Earth (9.81)",
                "Moon (1.62)",
                "Mars (3.71)",
                "Jupiter (24.79)",
                "Zero (0.00)"
            ]
        );
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        assert_eq!(GravityPreset::from_index(1), Some(GravityPreset::Moon));
        assert_eq!(GravityPreset::from_index(5), None);
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(GravityPreset::Zero.next(), GravityPreset::Earth);
        assert_eq!(GravityPreset::Earth.next(), GravityPreset::Moon);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("MARS".parse::<GravityPreset>().ok(), Some(GravityPreset::Mars));
        assert_eq!(" zero ".parse::<GravityPreset>().ok(), Some(GravityPreset::Zero));
        assert!("pluto".parse::<GravityPreset>().is_err());
    }

    #[test]
    fn vector_points_down() {
        let g = GravityPreset::Jupiter.vector();
        assert_eq!(g.x, 0.0);
        assert_eq!(g.z, 0.0);
        assert!((g.y + 24.79).abs() < 1e-6);
    }
}
