//! Sun renderer
//!
//! Places the Sun at a fixed scene distance from a low-order solar
//! longitude series (mean longitude + mean anomaly + equation of center),
//! rotated through the mean obliquity into the equatorial frame. At the
//! reference instant the tabulated RA/Dec wins. The Sun is always in the
//! frame — day/night is the sky dome's problem, not a culling rule here.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use super::SunBody;
use crate::catalogs::ReferenceEphemeris;
use crate::constants::{DEG2RAD, SUN_SCENE_DISTANCE, SUN_VISUAL_RADIUS};
use crate::keplerlib::ra_dec_to_cartesian;
use crate::timelib::{julian_century, julian_date, mean_obliquity};

/// Apparent solar ecliptic longitude in radians.
///
/// Mean longitude and mean anomaly as quadratics in Julian centuries,
/// corrected by the three-term equation of center.
pub fn solar_ecliptic_longitude(t: f64) -> f64 {
    let mean_longitude =
        (280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t).rem_euclid(360.0);
    let mean_anomaly =
        (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).rem_euclid(360.0) * DEG2RAD;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    (mean_longitude + center) * DEG2RAD
}

/// The Sun's sky-frame position at the fixed scene distance.
pub fn sun_sky_position(date: &DateTime<Utc>, reference: &ReferenceEphemeris) -> Vector3<f64> {
    if reference.matches(date) {
        if let Some(sun) = reference.body("sun") {
            return ra_dec_to_cartesian(sun.ra_hours, sun.dec_degrees, SUN_SCENE_DISTANCE);
        }
    }

    let t = julian_century(julian_date(date));
    let lambda = solar_ecliptic_longitude(t);
    let (sin_eps, cos_eps) = mean_obliquity(t).sin_cos();

    // Solar ecliptic latitude is zero in this model, so the obliquity
    // rotation reduces to splitting the ecliptic y across equatorial y/z
    let x_ecl = SUN_SCENE_DISTANCE * lambda.cos();
    let y_ecl = SUN_SCENE_DISTANCE * lambda.sin();
    Vector3::new(x_ecl, y_ecl * cos_eps, y_ecl * sin_eps)
}

/// Render the Sun in the world frame.
pub fn render_sun(date: &DateTime<Utc>, reference: &ReferenceEphemeris) -> SunBody {
    let position = crate::framelib::world_from_sky() * sun_sky_position(date, reference);
    SunBody {
        position,
        visual_radius: SUN_VISUAL_RADIUS,
    }
}
