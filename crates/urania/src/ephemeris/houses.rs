//! House division from sidereal time, obliquity and geographic latitude.
//!
//! Ascendant and MC follow the standard spherical astronomy formulas
//! (Meeus, *Astronomical Algorithms*, ch. 13). Placidus cusps are found by
//! iterative semi-arc trisection; Regiomontanus and Campanus use the
//! pole-height form shared by the Ascendant.

use crate::ephemeris::types::{HouseFrame, HouseSystem};
use crate::time::JulianDay;
use crate::zodiac::{normalize_degrees, SIGN_SPAN};

const MAX_ITERATIONS: usize = 50;
const CONVERGENCE_DEG: f64 = 1e-9;

/// Mean obliquity of the ecliptic in degrees (Meeus 22.2).
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

/// Greenwich mean sidereal time in degrees (Meeus 12.4).
pub fn greenwich_sidereal_time(jd_ut: JulianDay) -> f64 {
    let d = jd_ut.0 - crate::time::J2000;
    let t = jd_ut.centuries_since_j2000();
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Right ascension of the MC (local sidereal time) in degrees.
pub fn ramc(jd_ut: JulianDay, longitude_east: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd_ut) + longitude_east)
}

/// Ecliptic longitude where the great circle through the equator point `ra`
/// with pole height `pole` meets the ecliptic.
fn pole_circle_longitude(ra: f64, pole: f64, eps: f64) -> f64 {
    let (ra, pole, eps) = (ra.to_radians(), pole.to_radians(), eps.to_radians());
    let lon = f64::atan2(ra.sin(), ra.cos() * eps.cos() - pole.tan() * eps.sin());
    normalize_degrees(lon.to_degrees())
}

pub fn midheaven(ramc: f64, eps: f64) -> f64 {
    pole_circle_longitude(ramc, 0.0, eps)
}

pub fn ascendant(ramc: f64, latitude: f64, eps: f64) -> f64 {
    pole_circle_longitude(ramc + 90.0, latitude, eps)
}

/// Whether Placidus cusps exist at this latitude for obliquity `eps`.
pub fn placidus_defined(latitude: f64, eps: f64) -> bool {
    latitude.abs() < 90.0 - eps
}

/// Forward arc from a to b in degrees, [0, 360).
fn arc_forward(a: f64, b: f64) -> f64 {
    normalize_degrees(b - a)
}

/// Fill cusps 4-9 as the opposites of cusps 10-3.
fn fill_opposites(cusps: &mut [f64; 12]) {
    for i in 3..9 {
        cusps[i] = normalize_degrees(cusps[(i + 6) % 12] + 180.0);
    }
}

/// Diurnal semi-arc in degrees of an ecliptic point with right ascension `ra`.
fn diurnal_semi_arc(ra: f64, latitude: f64, eps: f64) -> Option<f64> {
    let dec = (eps.to_radians().tan() * ra.to_radians().sin()).atan();
    let cos_h = -latitude.to_radians().tan() * dec.tan();
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

/// Iterate `ra = ramc + offset(dsa(ra))` to a fixed point.
fn placidus_cusp(
    ramc: f64,
    latitude: f64,
    eps: f64,
    offset: impl Fn(f64) -> f64,
) -> Option<f64> {
    let mut ra = ramc + offset(90.0);
    for _ in 0..MAX_ITERATIONS {
        let dsa = diurnal_semi_arc(ra, latitude, eps)?;
        let next = ramc + offset(dsa);
        let done = (next - ra).abs() < CONVERGENCE_DEG;
        ra = next;
        if done {
            break;
        }
    }
    Some(pole_circle_longitude(ra, 0.0, eps))
}

fn placidus(ramc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> Option<[f64; 12]> {
    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[9] = mc;
    cusps[10] = placidus_cusp(ramc, latitude, eps, |dsa| dsa / 3.0)?;
    cusps[11] = placidus_cusp(ramc, latitude, eps, |dsa| 2.0 * dsa / 3.0)?;
    // below the horizon the nocturnal semi-arc is 180 - dsa
    cusps[1] = placidus_cusp(ramc, latitude, eps, |dsa| 180.0 - 2.0 * (180.0 - dsa) / 3.0)?;
    cusps[2] = placidus_cusp(ramc, latitude, eps, |dsa| 180.0 - (180.0 - dsa) / 3.0)?;
    fill_opposites(&mut cusps);
    Some(cusps)
}

fn porphyry(asc: f64, mc: f64) -> [f64; 12] {
    let ic = normalize_degrees(mc + 180.0);
    let upper = arc_forward(mc, asc);
    let lower = arc_forward(asc, ic);
    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[1] = normalize_degrees(asc + lower / 3.0);
    cusps[2] = normalize_degrees(asc + 2.0 * lower / 3.0);
    cusps[9] = mc;
    cusps[10] = normalize_degrees(mc + upper / 3.0);
    cusps[11] = normalize_degrees(mc + 2.0 * upper / 3.0);
    fill_opposites(&mut cusps);
    cusps
}

fn equal_from(start: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(start + SIGN_SPAN * i as f64);
    }
    cusps
}

/// Cusps from equator offsets (houses 10, 11, 12, 1, 2, 3) and their pole heights.
fn pole_system(ramc: f64, eps: f64, offsets_and_poles: [(f64, f64); 6]) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    // indices of houses 10, 11, 12, 1, 2, 3
    for (slot, (offset, pole)) in [9usize, 10, 11, 0, 1, 2].into_iter().zip(offsets_and_poles) {
        cusps[slot] = pole_circle_longitude(ramc + offset, pole, eps);
    }
    fill_opposites(&mut cusps);
    cusps
}

fn regiomontanus(ramc: f64, latitude: f64, eps: f64) -> [f64; 12] {
    let tan_lat = latitude.to_radians().tan();
    let pole = |h: f64| (tan_lat * h.to_radians().sin()).atan().to_degrees();
    pole_system(
        ramc,
        eps,
        [0.0, 30.0, 60.0, 90.0, 120.0, 150.0].map(|h| (h, pole(h))),
    )
}

fn campanus(ramc: f64, latitude: f64, eps: f64) -> [f64; 12] {
    let lat = latitude.to_radians();
    let entry = |a: f64| {
        let a = a.to_radians();
        let offset = f64::atan2(a.sin() * lat.cos(), a.cos()).to_degrees();
        let pole = (lat.sin() * a.sin()).asin().to_degrees();
        (offset, pole)
    };
    pole_system(ramc, eps, [0.0, 30.0, 60.0, 90.0, 120.0, 150.0].map(entry))
}

/// House cusps and angles for a UT moment and place.
///
/// `HouseFrame::system` records the system actually used: Placidus falls back
/// to Porphyry where its semi-arcs do not exist.
pub fn house_frame(
    jd_ut: JulianDay,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
) -> Option<HouseFrame> {
    let eps = mean_obliquity(jd_ut.centuries_since_j2000());
    let ramc = ramc(jd_ut, longitude);
    let mc = midheaven(ramc, eps);
    let mut asc = ascendant(ramc, latitude, eps);
    // inside the polar circles the rising point can land west of the MC
    if arc_forward(mc, asc) > 180.0 {
        asc = normalize_degrees(asc + 180.0);
    }

    let (cusps, used) = match system {
        HouseSystem::Placidus => match placidus_defined(latitude, eps)
            .then(|| placidus(ramc, latitude, eps, asc, mc))
            .flatten()
        {
            Some(cusps) => (cusps, HouseSystem::Placidus),
            None => (porphyry(asc, mc), HouseSystem::Porphyry),
        },
        HouseSystem::Porphyry => (porphyry(asc, mc), HouseSystem::Porphyry),
        HouseSystem::Equal => (equal_from(asc), HouseSystem::Equal),
        HouseSystem::WholeSign => {
            let start = (asc / SIGN_SPAN).floor() * SIGN_SPAN;
            (equal_from(start), HouseSystem::WholeSign)
        }
        HouseSystem::Regiomontanus => (regiomontanus(ramc, latitude, eps), system),
        HouseSystem::Campanus => (campanus(ramc, latitude, eps), system),
        HouseSystem::Koch | HouseSystem::Alcabitius | HouseSystem::Morinus => return None,
    };

    Some(HouseFrame {
        cusps,
        ascendant: asc,
        midheaven: mc,
        system: used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.4393;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        let d = (a - b).abs();
        d.min(360.0 - d) < tol
    }

    #[test]
    fn angles_at_equator_and_equinox() {
        assert!(close(midheaven(0.0, EPS), 0.0, 1e-9));
        assert!(close(ascendant(0.0, 0.0, EPS), 90.0, 1e-9));
    }

    #[test]
    fn london_ramc_zero_matches_table_of_houses() {
        // Tables of houses for London, RAMC 0h: Asc 26°36' Cancer, 11th ~9° Taurus
        let asc = ascendant(0.0, 51.5, EPS);
        assert!(close(asc, 116.6, 0.2), "asc {}", asc);
        let cusps = placidus(0.0, 51.5, EPS, asc, 0.0).unwrap();
        assert!(close(cusps[10], 38.6, 0.5), "11th {}", cusps[10]);
    }

    #[test]
    fn sidereal_time_at_j2000() {
        // GMST at 2000-01-01 12:00 UT is 18h41m50.5s = 280.46°
        let gmst = greenwich_sidereal_time(JulianDay(crate::time::J2000));
        assert!(close(gmst, 280.4606, 1e-4));
    }

    #[test]
    fn placidus_undefined_inside_polar_circle() {
        assert!(placidus_defined(55.75, EPS));
        assert!(!placidus_defined(69.0, EPS));
        let frame =
            house_frame(JulianDay(2_451_545.0), 69.0, 33.0, HouseSystem::Placidus).unwrap();
        assert_eq!(frame.system, HouseSystem::Porphyry);
        assert_eq!(frame.cusps[0], frame.ascendant);
    }

    #[test]
    fn unsupported_systems_return_none() {
        assert!(house_frame(JulianDay(2_451_545.0), 50.0, 10.0, HouseSystem::Koch).is_none());
    }
}
