use serde::{Deserialize, Serialize};
use std::fmt;

/// The five major (Ptolemaic) aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Maximum orb in degrees.
    pub fn max_orb(self) -> f64 {
        match self {
            AspectKind::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        }
    }

    pub fn name_ru(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Соединение",
            AspectKind::Sextile => "Секстиль",
            AspectKind::Square => "Квадрат",
            AspectKind::Trine => "Тригон",
            AspectKind::Opposition => "Оппозиция",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between two labelled points.
///
/// For a single set the pair is unordered and `first` comes earlier in the
/// input; for two sets `first` is from the first set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect<L> {
    pub first: L,
    pub second: L,
    pub kind: AspectKind,
    /// Absolute deviation from the exact angle, 0 <= orb <= kind.max_orb()
    pub orb: f64,
    /// Shortest arc between the two longitudes, in [0, 180]
    pub separation: f64,
}
