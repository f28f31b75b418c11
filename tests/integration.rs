use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use qtty::Seconds;
use solunar::math::pmod;
use solunar::{almanac, moon, nutation, solar, solstice};
use solunar::{GeoLocation, JulianDay, RiseSetResult, J2000};

/// Signed difference folded into `(−π, π]`.
fn wrapped(a: f64, b: f64) -> f64 {
    pmod(a - b + PI, TAU) - PI
}

#[test]
fn sun_at_j2000() {
    let jd = JulianDay::new(J2000, None);
    let sun = solar::apparent_equatorial(&jd);
    assert_abs_diff_eq!(sun.ra.to_degrees(), 281.28, epsilon = 0.05);
    assert_abs_diff_eq!(sun.dec.to_degrees(), -23.03, epsilon = 0.05);

    let via_ecliptic = solar::apparent_equatorial_via_ecliptic(&jd);
    assert!(wrapped(sun.ra, via_ecliptic.ra).abs() < 1e-3);
    assert!((sun.dec - via_ecliptic.dec).abs() < 1e-3);
}

#[test]
fn moon_distance_stays_within_orbit_limits() {
    for day in 0..30 {
        let jd = JulianDay::new(J2000 + day as f64, None);
        let moon = moon::apparent_equatorial(&jd).unwrap();
        let km = moon.delta.value();
        assert!((356_000.0..407_000.0).contains(&km), "day {day}: {km}");
    }
}

#[test]
fn simple_and_full_lunar_models_agree() {
    let date = Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap();
    let simple = almanac::moon_coordinates(date);
    let full = moon::apparent_equatorial(&JulianDay::from_utc(date)).unwrap();
    assert!(wrapped(simple.eq.ra, full.eq.ra).abs().to_degrees() < 2.5);
    assert!((simple.eq.dec - full.eq.dec).abs().to_degrees() < 2.5);
    assert!((simple.dist.value() - full.delta.value()).abs() < 10_000.0);
}

#[test]
fn sun_longitude_at_the_seasons() {
    let expected = [
        (solstice::march(2024), 0.0_f64),
        (solstice::june(2024), 90.0),
        (solstice::september(2024), 180.0),
        (solstice::december(2024), 270.0),
    ];
    for (jde, lon) in expected {
        let sun = solar::apparent_ecliptic(&JulianDay::from_jde(jde));
        let diff = wrapped(sun.lon, lon.to_radians()).to_degrees();
        assert!(diff.abs() < 0.02, "λ☉ = {lon}: off by {diff}°");
    }
}

#[test]
fn true_obliquity_near_j2000() {
    let jd = JulianDay::new(J2000, Some(Seconds::new(0.0)));
    let mean = nutation::mean_obliquity(&jd).to_degrees();
    assert_abs_diff_eq!(mean, 23.439_291, epsilon = 1e-6);
    assert_abs_diff_eq!(
        nutation::mean_obliquity_laskar(&jd).to_degrees(),
        mean,
        epsilon = 1e-6
    );
    let eps = nutation::true_obliquity(&jd).to_degrees();
    // Δε is under 10″
    assert!((eps - mean).abs() < 10.0 / 3600.0);
}

#[test]
fn circumpolar_sun_in_the_arctic() {
    let svalbard = GeoLocation::from_wgs84(80.0, 15.0, 0.0).unwrap();

    let june = JulianDay::from_gregorian(2024, 6, 21.0);
    assert_eq!(
        solar::times(&june, &svalbard).unwrap(),
        RiseSetResult::NeverSets
    );

    let december = JulianDay::from_gregorian(2024, 12, 21.0);
    assert_eq!(
        solar::times(&december, &svalbard).unwrap(),
        RiseSetResult::NeverRises
    );
}

#[test]
fn sunrise_precedes_sunset_at_mid_latitudes() {
    let location = GeoLocation::from_wgs84(40.4168, -3.7038, 650.0).unwrap();
    for month in 1..=12 {
        let jd = JulianDay::from_gregorian(2024, month, 15.0);
        let events = solar::times(&jd, &location)
            .unwrap()
            .events()
            .copied()
            .unwrap();
        let rise = events.rise.seconds.value();
        let transit = events.transit.seconds.value();
        let set = events.set.seconds.value();
        assert!(rise < transit && transit < set, "month {month}");
        // Madrid transit is near 12:15 UTC all year round
        assert!((transit - 44_100.0).abs() < 1_200.0, "month {month}");
    }
}

#[test]
fn almanac_seasons_match_jde() {
    let utc = almanac::summer_solstice(1962).unwrap();
    let jd = JulianDay::from_utc(utc);
    let expected = JulianDay::from_jde(2_437_837.392_45);
    assert!((jd.jd() - expected.jd()).abs() * 86_400.0 < 2.0);
}

fn arbitrary_utc() -> impl Strategy<Value = DateTime<Utc>> {
    // 1900-01-01 .. 2100-01-01
    (-2_208_988_800i64..4_102_444_800i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

proptest! {
    #[test]
    fn utc_julian_day_round_trip(date in arbitrary_utc()) {
        let back = JulianDay::from_utc(date).to_utc().unwrap();
        prop_assert_eq!(back, date);
    }

    #[test]
    fn gregorian_calendar_round_trip(y in 1600i32..2400, m in 1u32..=12, d in 1.0f64..29.0) {
        let cal = JulianDay::from_gregorian(y, m, d).to_calendar();
        prop_assert_eq!(cal.year, y);
        prop_assert_eq!(cal.month, m);
        prop_assert!((cal.day - d).abs() < 1e-6);
    }

    #[test]
    fn sun_position_is_in_range(
        date in arbitrary_utc(),
        lat in -89.0f64..89.0,
        lon in -180.0f64..180.0,
    ) {
        let p = almanac::sun_position(date, lat, lon, 0.0).unwrap();
        prop_assert!((0.0..360.0).contains(&p.azimuth_deg));
        prop_assert!(p.altitude_deg.abs() <= 90.0);
        prop_assert!(p.ra.is_finite() && p.dec.abs() <= PI / 2.0);
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips() {
    let jd = JulianDay::new(2_460_000.25, Some(Seconds::new(69.2)));
    let json = serde_json::to_string(&jd).unwrap();
    assert!(json.contains("\"jd\""));
    assert!(json.contains("\"delta_t\""));
    let back: JulianDay = serde_json::from_str(&json).unwrap();
    assert_eq!(back, jd);

    let date = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
    let events = almanac::sun_times(date, 40.0, -3.7, 0.0).unwrap();
    let json = serde_json::to_string(&events).unwrap();
    let back: almanac::DayEvents = serde_json::from_str(&json).unwrap();
    assert_eq!(back, events);
}
