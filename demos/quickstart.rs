use chrono::{Datelike, Utc};
use solunar::format::{number_with_commas, seconds_to_hms_str};
use solunar::{almanac, suncalc::SunEventConfig, JulianDay};

fn main() -> Result<(), solunar::AstroError> {
    let now = Utc::now();
    let (lat, lon, height) = (40.4168, -3.7038, 650.0);

    let jd = JulianDay::from_utc(now);
    println!("{jd}");
    println!("JDE: {}", jd.jde());

    let sun = almanac::sun_position(now, lat, lon, height)?;
    println!(
        "Sun:  az {:.2}°  alt {:.2}°",
        sun.azimuth_deg, sun.altitude_deg
    );

    let moon = almanac::moon_position(now, lat, lon, height)?;
    println!(
        "Moon: az {:.2}°  alt {:.2}°",
        moon.azimuth_deg, moon.altitude_deg
    );

    let distance = almanac::lunar_distance(now);
    println!(
        "Moon distance: {} km ({} mi)",
        number_with_commas(distance.kilometers.value(), 0),
        number_with_commas(distance.miles.value(), 0)
    );
    let illumination = almanac::moon_illumination(now);
    println!("Moon illuminated: {:.1}%", illumination.illumination);

    let times = almanac::sun_times(now, lat, lon, height)?;
    println!("Sunrise: {:?}", times.rise);
    println!("Transit: {:?}", times.transit);
    println!("Sunset:  {:?}", times.set);

    let events = almanac::sun_events(now, lat, lon, height, &SunEventConfig::default())?;
    println!(
        "Day length: {}",
        seconds_to_hms_str(events.day_length.value(), false)
    );
    for event in &events.events.events {
        println!("  {:<20} {:?}", event.name, event.time);
    }

    let moon_times = almanac::moon_times(now, lat, lon, height)?;
    println!("Moonrise: {:?}", moon_times.rise);
    println!("Moonset:  {:?}", moon_times.set);

    let year = now.year();
    println!("March equinox:     {:?}", almanac::vernal_equinox(year));
    println!("June solstice:     {:?}", almanac::summer_solstice(year));
    println!("September equinox: {:?}", almanac::fall_equinox(year));
    println!("December solstice: {:?}", almanac::winter_solstice(year));

    Ok(())
}
