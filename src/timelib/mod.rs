//! Astronomical time scales and angle conversions
//!
//! Julian dates, mean obliquity, and Greenwich sidereal time — the pure
//! building blocks everything else in this crate is derived from. All
//! functions are total over finite inputs and hold no state.

use chrono::{DateTime, Utc};

use crate::constants::{
    ASEC2RAD, DAYS_PER_CENTURY, DAY_MS, DEG2RAD, HOUR2RAD, J2000, SOLAR_TO_SIDEREAL, UNIX_EPOCH_JD,
};

/// Convert a UTC instant to a Julian date.
///
/// Standard Unix-epoch conversion: `millis / 86_400_000 + 2_440_587.5`.
pub fn julian_date(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / DAY_MS + UNIX_EPOCH_JD
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_century(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Mean obliquity of the ecliptic, in radians.
///
/// IAU-1980-class polynomial in arcseconds, evaluated at `t` Julian
/// centuries since J2000.0.
pub fn mean_obliquity(t: f64) -> f64 {
    let eps_arcsec = 84_381.406
        + t * (-46.836_769
            + t * (-0.000_183_1 + t * (0.002_003_40 + t * (-0.000_000_576 + t * -0.000_000_043_4))));
    eps_arcsec * ASEC2RAD
}

/// Greenwich Mean Sidereal Time for a Julian date, in hours [0, 24).
///
/// Evaluates the GMST polynomial at the preceding UT midnight, then adds
/// the fractional-day rotation at the sidereal rate.
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    // Julian dates tick over at noon; the preceding UT midnight ends in .5
    let jd_midnight = (jd - 0.5).floor() + 0.5;
    let d0 = jd_midnight - J2000;
    let t = d0 / DAYS_PER_CENTURY;

    let gmst_midnight_hours = 6.697_374_558 + 0.065_709_824_419_08 * d0 + 0.000_026 * t * t;
    let ut_hours = (jd - jd_midnight) * 24.0;

    (gmst_midnight_hours + SOLAR_TO_SIDEREAL * ut_hours).rem_euclid(24.0)
}

/// Equation of the equinoxes, in hours.
///
/// Zero while the nutation model is stubbed out (see `framelib::nutation`);
/// GAST therefore equals GMST for now.
pub fn equation_of_equinoxes(_t: f64) -> f64 {
    0.0
}

/// Greenwich Apparent Sidereal Time, in radians [0, 2π).
pub fn greenwich_apparent_sidereal_time(jd: f64) -> f64 {
    let gmst = greenwich_mean_sidereal_time(jd);
    let gast_hours = (gmst + equation_of_equinoxes(julian_century(jd))).rem_euclid(24.0);
    gast_hours * HOUR2RAD
}

/// Degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Arcseconds to radians.
pub fn arcsec_to_radians(arcsec: f64) -> f64 {
    arcsec * ASEC2RAD
}

/// Right-ascension hours to radians.
pub fn hours_to_radians(hours: f64) -> f64 {
    hours * HOUR2RAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn test_julian_date_at_unix_epoch() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_relative_eq!(julian_date(&epoch), UNIX_EPOCH_JD, epsilon = 1e-9);
    }

    #[test]
    fn test_julian_date_at_j2000() {
        // J2000.0 = 2000-01-01T12:00:00 (TT offset ignored; UTC model)
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(julian_date(&j2000), J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_julian_century_at_j2000() {
        assert_relative_eq!(julian_century(J2000), 0.0, epsilon = 1e-15);
        assert_relative_eq!(julian_century(J2000 + 36_525.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_mean_obliquity_at_j2000() {
        // eps0 = 84381.406 arcsec ≈ 23.4392794 degrees
        let eps = mean_obliquity(0.0);
        assert_relative_eq!(eps / ASEC2RAD, 84_381.406, epsilon = 1e-6);
        assert_relative_eq!(eps.to_degrees(), 23.439_279_4, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_obliquity_decreases() {
        // Obliquity shrinks by ~47 arcsec per century in the current era
        assert!(mean_obliquity(1.0) < mean_obliquity(0.0));
        let delta_arcsec = (mean_obliquity(0.0) - mean_obliquity(1.0)) / ASEC2RAD;
        assert!((delta_arcsec - 46.8).abs() < 0.2, "delta = {delta_arcsec}\"");
    }

    #[test]
    fn test_gmst_at_j2000() {
        // Classic check value: GMST at 2000-01-01T12:00 UT ≈ 18.697 hours
        let gmst = greenwich_mean_sidereal_time(J2000);
        assert_relative_eq!(gmst, 18.697, epsilon = 0.01);
    }

    #[test]
    fn test_gmst_range() {
        for offset in [-40_000.0, -365.25, 0.0, 123.456, 40_000.0] {
            let gmst = greenwich_mean_sidereal_time(J2000 + offset);
            assert!((0.0..24.0).contains(&gmst), "GMST out of range: {gmst}");
        }
    }

    #[test]
    fn test_gast_monotonic_over_a_day() {
        // Strictly increasing modulo the 24h wrap, sampled every 10 minutes
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut prev = greenwich_apparent_sidereal_time(julian_date(&start));
        for minutes in (10..=1440).step_by(10) {
            let t = start + chrono::Duration::minutes(minutes);
            let gast = greenwich_apparent_sidereal_time(julian_date(&t));
            let advance = (gast - prev).rem_euclid(crate::constants::TAU);
            assert!(
                advance > 0.0 && advance < 0.1,
                "GAST must advance smoothly, got {advance} rad at +{minutes}min"
            );
            prev = gast;
        }
    }

    #[test]
    fn test_sidereal_day_shorter_than_solar_day() {
        // After exactly 24h of UT the sidereal time has gained ~3m56s
        let jd = J2000 + 100.25;
        let a = greenwich_mean_sidereal_time(jd);
        let b = greenwich_mean_sidereal_time(jd + 1.0);
        let gain_hours = (b - a).rem_euclid(24.0);
        assert!(
            (gain_hours - 0.0657).abs() < 0.001,
            "sidereal gain per day = {gain_hours}h"
        );
    }

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(degrees_to_radians(180.0), std::f64::consts::PI);
        assert_relative_eq!(hours_to_radians(12.0), std::f64::consts::PI);
        assert_relative_eq!(
            arcsec_to_radians(3600.0 * 180.0),
            std::f64::consts::PI,
            epsilon = 1e-9
        );
    }
}
