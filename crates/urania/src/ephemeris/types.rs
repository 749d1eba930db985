use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The bodies tracked by every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
    ];

    /// Stable lowercase identifier, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
        }
    }

    pub fn name_ru(self) -> &'static str {
        match self {
            Body::Sun => "Солнце",
            Body::Moon => "Луна",
            Body::Mercury => "Меркурий",
            Body::Venus => "Венера",
            Body::Mars => "Марс",
            Body::Jupiter => "Юпитер",
            Body::Saturn => "Сатурн",
            Body::Uranus => "Уран",
            Body::Neptune => "Нептун",
            Body::Pluto => "Плутон",
            Body::NorthNode => "Северный узел",
        }
    }

    /// Swiss Ephemeris planet number (SE_TRUE_NODE for the node).
    pub fn swiss_id(self) -> i32 {
        match self {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::NorthNode => 11,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.key() == lower || b.name().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Ecliptic longitude together with its daily motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticMotion {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl EclipticMotion {
    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// House cusps and the two angles, all ecliptic longitudes in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    /// cusps[0] is the cusp of house 1
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    /// System the cusps were computed with, which may differ from the one requested
    pub system: HouseSystem,
}

/// House division systems the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Porphyry,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("equal", HouseSystem::Equal),
    ("whole_sign", HouseSystem::WholeSign),
    ("porphyry", HouseSystem::Porphyry),
    ("regiomontanus", HouseSystem::Regiomontanus),
    ("campanus", HouseSystem::Campanus),
    ("alcabitius", HouseSystem::Alcabitius),
    ("morinus", HouseSystem::Morinus),
];

impl HouseSystem {
    pub fn key(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system)| *system == self)
            .map(|(name, _)| *name)
            .unwrap_or("placidus")
    }

    /// Single-letter code used by the Swiss Ephemeris `houses` routine.
    pub fn swiss_code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Porphyry => b'O',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'B',
            HouseSystem::Morinus => b'M',
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HouseSystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, system)| *system)
            .ok_or_else(|| ConfigError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_system_parses_case_insensitively() {
        assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("whole-sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert!(matches!(
            "topocentric".parse::<HouseSystem>(),
            Err(ConfigError::InvalidHouseSystem { .. })
        ));
    }

    #[test]
    fn body_round_trips_through_key() {
        for body in Body::ALL {
            assert_eq!(body.key().parse::<Body>().unwrap(), body);
        }
        assert_eq!("North Node".parse::<Body>().unwrap(), Body::NorthNode);
    }
}
