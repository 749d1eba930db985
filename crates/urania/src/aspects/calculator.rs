use crate::aspects::types::{Aspect, AspectKind};
use crate::zodiac::normalize_degrees;

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator
///
/// Orbs are fixed per aspect kind (see [`AspectKind::max_orb`]); every kind is
/// tested independently, so a pair may in principle match more than one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// All aspect kinds matched by an angular separation, with their orbs.
    pub fn match_separation(&self, separation: f64) -> impl Iterator<Item = (AspectKind, f64)> {
        AspectKind::ALL.into_iter().filter_map(move |kind| {
            let orb = (separation - kind.angle()).abs();
            (orb <= kind.max_orb()).then_some((kind, orb))
        })
    }

    /// Aspects between two longitudes.
    pub fn calculate_aspects<L: Copy>(
        &self,
        first: (L, f64),
        second: (L, f64),
    ) -> impl Iterator<Item = Aspect<L>> {
        let separation = angular_separation(first.1, second.1);
        self.match_separation(separation)
            .map(move |(kind, orb)| Aspect {
                first: first.0,
                second: second.0,
                kind,
                orb,
                separation,
            })
    }

    /// Aspects within a single set: every unordered pair once.
    pub fn find_aspects<L: Copy>(&self, positions: &[(L, f64)]) -> Vec<Aspect<L>> {
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                aspects.extend(self.calculate_aspects(positions[i], positions[j]));
            }
        }
        sort_by_orb(&mut aspects);
        aspects
    }

    /// Aspects between two sets: the full cross product, nothing within a set.
    pub fn find_cross_aspects<L: Copy>(
        &self,
        set_a: &[(L, f64)],
        set_b: &[(L, f64)],
    ) -> Vec<Aspect<L>> {
        let mut aspects = Vec::new();
        for a in set_a {
            for b in set_b {
                aspects.extend(self.calculate_aspects(*a, *b));
            }
        }
        sort_by_orb(&mut aspects);
        aspects
    }
}

/// Tightest first; stable so equal orbs keep input order.
fn sort_by_orb<L>(aspects: &mut [Aspect<L>]) {
    aspects.sort_by(|a, b| a.orb.total_cmp(&b.orb));
}
