//! Moon renderer
//!
//! Propagates the Moon's orbital elements with the orbit rescaled to a
//! scene-sized semi-major axis — a presentation choice, not a physical
//! one, that keeps the Moon visible at camera distance and nearest in the
//! scene's depth order. Geocentric ecliptic coordinates are rotated
//! through the mean obliquity into the equatorial frame; the reference
//! snapshot overrides the analytic model at its instant. The mesh itself
//! only appears once the surface texture has resolved.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use super::MoonBody;
use crate::catalogs::SkyCatalogs;
use crate::constants::{MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS, MOON_VISUAL_RADIUS};
use crate::keplerlib::{propagate_elliptic, ra_dec_to_cartesian, solve_kepler};
use crate::timelib::{julian_century, julian_date, mean_obliquity};

/// The Moon's sky-frame position on its rescaled orbit.
///
/// `None` when the elements table has no Moon entry.
fn moon_sky_position(date: &DateTime<Utc>, catalogs: &SkyCatalogs) -> Option<Vector3<f64>> {
    let elements = catalogs.elements.body("moon")?;
    let jd = julian_date(date);
    let epoch_jd = catalogs.elements.epoch_jd;

    // Scene-scaled orbital radius; also the shell the tabulated RA/Dec
    // is placed on, so the override preserves depth ordering
    let e = elements.orbital_eccentricity;
    let e_anom = solve_kepler(elements.mean_anomaly_at(epoch_jd, jd), e);
    let scene_radius = MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS * (1.0 - e * e_anom.cos());

    if catalogs.reference.matches(date) {
        if let Some(tabulated) = catalogs.reference.body("moon") {
            return Some(ra_dec_to_cartesian(
                tabulated.ra_hours,
                tabulated.dec_degrees,
                scene_radius,
            ));
        }
    }

    let ecliptic = propagate_elliptic(elements, epoch_jd, jd, MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS);

    let t = julian_century(jd);
    let (sin_eps, cos_eps) = mean_obliquity(t).sin_cos();
    Some(Vector3::new(
        ecliptic.x,
        ecliptic.y * cos_eps - ecliptic.z * sin_eps,
        ecliptic.y * sin_eps + ecliptic.z * cos_eps,
    ))
}

/// World-frame Moon position, independent of the texture asset.
///
/// The camera uses this even when the mesh is absent.
pub fn moon_world_position(date: &DateTime<Utc>, catalogs: &SkyCatalogs) -> Option<Vector3<f64>> {
    Some(crate::framelib::world_from_sky() * moon_sky_position(date, catalogs)?)
}

/// Render the Moon mesh, or `None` while the texture is unavailable.
pub fn render_moon(date: &DateTime<Utc>, catalogs: &SkyCatalogs) -> Option<MoonBody> {
    catalogs.moon_texture.as_ref()?;
    Some(MoonBody {
        position: moon_world_position(date, catalogs)?,
        visual_radius: MOON_VISUAL_RADIUS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::synthetic::reference_instant;
    use crate::keplerlib::cartesian_to_ra_dec;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn catalogs() -> SkyCatalogs {
        SkyCatalogs::synthetic()
    }

    fn some_night() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 3, 22, 30, 0).unwrap()
    }

    #[test]
    fn test_moon_radius_stays_on_scene_orbit() {
        // r = a(1 - e cos E): bounded by a(1±e) around the scene axis
        let catalogs = catalogs();
        let e = catalogs.elements.body("moon").unwrap().orbital_eccentricity;
        for day in 0..30 {
            let date = some_night() + chrono::Duration::days(day);
            let pos = moon_world_position(&date, &catalogs).unwrap();
            let r = pos.norm();
            assert!(
                r >= MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS * (1.0 - e) - 1e-9
                    && r <= MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS * (1.0 + e) + 1e-9,
                "day {day}: radius {r} off the scene orbit"
            );
        }
    }

    #[test]
    fn test_moon_moves_night_to_night() {
        // ~13 degrees per day along its orbit
        let catalogs = catalogs();
        let a = moon_world_position(&some_night(), &catalogs).unwrap();
        let b =
            moon_world_position(&(some_night() + chrono::Duration::days(1)), &catalogs).unwrap();
        let angle = a.normalize().dot(&b.normalize()).clamp(-1.0, 1.0).acos();
        assert!(
            (5.0..25.0).contains(&angle.to_degrees()),
            "nightly motion = {} deg",
            angle.to_degrees()
        );
    }

    #[test]
    fn test_reference_override_exact() {
        let catalogs = catalogs();
        let tabulated = catalogs.reference.body("moon").unwrap().clone();

        let sky = moon_sky_position(&reference_instant(), &catalogs).unwrap();
        let (ra, dec) = cartesian_to_ra_dec(&sky).unwrap();
        assert_relative_eq!(ra, tabulated.ra_hours, epsilon = 1e-9);
        assert_relative_eq!(dec, tabulated.dec_degrees, epsilon = 1e-9);
    }

    #[test]
    fn test_override_keeps_scene_depth() {
        // Tabulated coordinates land on the same rescaled orbit shell
        let catalogs = catalogs();
        let pos = moon_world_position(&reference_instant(), &catalogs).unwrap();
        let e = catalogs.elements.body("moon").unwrap().orbital_eccentricity;
        assert!(pos.norm() <= MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS * (1.0 + e) + 1e-9);
        assert!(pos.norm() >= MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS * (1.0 - e) - 1e-9);
    }

    #[test]
    fn test_no_texture_no_mesh() {
        let mut catalogs = catalogs();
        catalogs.moon_texture = None;
        assert!(render_moon(&some_night(), &catalogs).is_none());
        // Position still resolves for the camera
        assert!(moon_world_position(&some_night(), &catalogs).is_some());
    }

    #[test]
    fn test_no_elements_no_moon() {
        let mut catalogs = catalogs();
        catalogs.elements.planets.retain(|p| p.name != "Moon");
        assert!(render_moon(&some_night(), &catalogs).is_none());
        assert!(moon_world_position(&some_night(), &catalogs).is_none());
    }

    #[test]
    fn test_mesh_carries_visual_radius() {
        let body = render_moon(&some_night(), &catalogs()).unwrap();
        assert_relative_eq!(body.visual_radius, MOON_VISUAL_RADIUS);
    }
}
