mod common;

use chrono::{NaiveDate, NaiveTime};
use common::{failing, two_epoch, WRAP_CUSPS};
use urania::chart::compute_natal_summary;
use urania::{
    compute_full_natal_chart, BirthTime, Body, ChartError, ChartPoint, ConfigError, Ephemeris,
    HouseSystem, NatalCalculator, ZodiacSign,
};

const MOSCOW: (f64, f64) = (55.75, 37.62);

fn may_15_1990() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 15).unwrap()
}

fn afternoon() -> BirthTime {
    BirthTime::Known(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
}

#[test]
fn test_unknown_time_moscow_scenario() {
    let eph = Ephemeris::analytic();
    let chart = NatalCalculator::new(&eph)
        .compute_full_natal_chart(may_15_1990(), BirthTime::Unknown, MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();

    assert!(!chart.time_known);
    assert!(chart.houses.is_none());
    assert_eq!(chart.house_of(100.0), None);
    assert_eq!(chart.point(ChartPoint::Ascendant), None);
    assert_eq!(chart.bodies.len(), 11);
    assert_eq!(chart.body(Body::Sun).unwrap().placement.sign, ZodiacSign::Taurus);
}

#[test]
fn test_known_time_has_angles_and_twelve_houses() {
    let eph = Ephemeris::analytic();
    let chart = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();

    assert!(chart.time_known);
    let houses = chart.houses.unwrap();
    assert_eq!(houses.system, HouseSystem::Placidus);
    for (i, cusp) in houses.cusps.iter().enumerate() {
        assert_eq!(cusp.number as usize, i + 1);
    }
    let angles = houses.angles;
    assert_eq!(houses.cusps[0].placement.longitude, angles.ascendant.longitude);
    assert_eq!(chart.house_of(angles.ascendant.longitude), Some(1));
    assert_eq!(chart.house_of(angles.midheaven.longitude), Some(10));
}

#[test]
fn test_polar_chart_reports_the_fallback_house_system() {
    // Tromso at midwinter: Placidus is undefined above the Arctic Circle
    let eph = Ephemeris::analytic();
    let date = NaiveDate::from_ymd_opt(2020, 12, 21).unwrap();
    let noon = BirthTime::Known(NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    let chart = compute_full_natal_chart(&eph, date, noon, 69.65, 18.96, "Europe/Oslo").unwrap();

    assert_eq!(eph.house_system(), HouseSystem::Placidus);
    let houses = chart.houses.unwrap();
    assert_eq!(houses.system, HouseSystem::Porphyry);
    assert_eq!(houses.cusps[0].placement.longitude, houses.angles.ascendant.longitude);
    assert_eq!(houses.cusps[9].placement.longitude, houses.angles.midheaven.longitude);

    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!(value["houses"]["system"], "porphyry");
}

#[test]
fn test_positions_and_aspects_are_well_formed() {
    let eph = Ephemeris::analytic();
    let chart = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();

    for (position, body) in chart.bodies.iter().zip(Body::ALL) {
        assert_eq!(position.body, body);
        let p = position.placement;
        assert!((0.0..360.0).contains(&p.longitude));
        assert!((0.0..30.0).contains(&p.degree_in_sign));
        assert_eq!(p.sign, ZodiacSign::from_longitude(p.longitude));
    }
    assert!(chart.aspects.windows(2).all(|w| w[0].orb <= w[1].orb));
    for aspect in &chart.aspects {
        assert!(aspect.orb >= 0.0 && aspect.orb <= aspect.kind.max_orb());
        assert_ne!(aspect.first, aspect.second);
    }
}

#[test]
fn test_natal_chart_is_idempotent() {
    let eph = Ephemeris::analytic();
    let calc = NatalCalculator::new(&eph);
    let first = calc
        .compute_full_natal_chart(may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();
    let second = calc
        .compute_full_natal_chart(may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_retrograde_follows_speed() {
    let eph = two_epoch(common::spread, common::spread, WRAP_CUSPS);
    let chart = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), 0.0, 0.0, "UTC").unwrap();
    assert!(chart.body(Body::Mercury).unwrap().retrograde);
    assert!(!chart.body(Body::Sun).unwrap().retrograde);
}

#[test]
fn test_invalid_timezone_fails_fast() {
    let eph = Ephemeris::analytic();
    for time in [afternoon(), BirthTime::Unknown] {
        let err = compute_full_natal_chart(&eph, may_15_1990(), time, MOSCOW.0, MOSCOW.1, "Moscow/Kremlin")
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Config(ConfigError::InvalidTimezone { .. })
        ));
    }
}

#[test]
fn test_invalid_coordinates_fail_fast() {
    let eph = Ephemeris::analytic();
    let err = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), 95.0, 0.0, "UTC").unwrap_err();
    assert!(matches!(
        err,
        ChartError::Config(ConfigError::InvalidCoordinates { .. })
    ));
}

#[test]
fn test_calculation_error_is_propagated() {
    let eph = failing();
    let err = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap_err();
    assert!(matches!(err, ChartError::Calculation(_)));
    assert!(!err.is_config());
}

#[test]
fn test_summary_matches_full_chart() {
    let eph = Ephemeris::analytic();
    let summary =
        compute_natal_summary(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow").unwrap();
    let chart = compute_full_natal_chart(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();

    assert!(!summary.approximate);
    assert!(summary.time_known);
    assert_eq!(summary.sun, chart.body(Body::Sun).unwrap().placement);
    assert_eq!(summary.moon, chart.point(ChartPoint::Body(Body::Moon)));
    assert_eq!(summary.ascendant, chart.point(ChartPoint::Ascendant));
}

#[test]
fn test_summary_without_time_has_no_ascendant() {
    let eph = Ephemeris::analytic();
    let summary =
        compute_natal_summary(&eph, may_15_1990(), BirthTime::Unknown, MOSCOW.0, MOSCOW.1, "Europe/Moscow")
            .unwrap();
    assert!(summary.ascendant.is_none());
    assert!(summary.moon.is_some());
    assert!(!summary.time_known);
}

#[test]
fn test_summary_degrades_to_approximate_sun() {
    let eph = failing();
    let summary =
        compute_natal_summary(&eph, may_15_1990(), afternoon(), MOSCOW.0, MOSCOW.1, "Europe/Moscow").unwrap();
    assert!(summary.approximate);
    assert!(!summary.time_known);
    assert_eq!(summary.sun.sign, ZodiacSign::Taurus);
    assert!(summary.moon.is_none());
    assert!(summary.ascendant.is_none());
}

#[test]
fn test_summary_still_rejects_bad_timezone() {
    let eph = failing();
    let err = compute_natal_summary(&eph, may_15_1990(), BirthTime::Unknown, 0.0, 0.0, "Not/AZone").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_chart_serialises_with_snake_case_keys() {
    let eph = Ephemeris::analytic();
    let chart = compute_full_natal_chart(&eph, may_15_1990(), BirthTime::Unknown, MOSCOW.0, MOSCOW.1, "Europe/Moscow")
        .unwrap();
    let value = serde_json::to_value(&chart).unwrap();

    assert_eq!(value["bodies"][10]["body"], "north_node");
    assert_eq!(value["bodies"][0]["placement"]["sign"], "taurus");
    assert!(value["houses"].is_null());
    assert!(value.get("angles").is_none());
    assert_eq!(value["birth_time"], "unknown");

    let back: urania::NatalChart = serde_json::from_value(value).unwrap();
    assert_eq!(back.bodies.len(), chart.bodies.len());
    assert_eq!(back.birth_date, chart.birth_date);
}
