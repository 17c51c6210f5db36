//! Earth orientation: precession, nutation, and spin
//!
//! Composes the rotation that carries the rotating Earth-fixed frame into
//! the sky-fixed (GCRS-like) frame, and the fixed axis swap that carries
//! sky-fixed coordinates into the renderer's world frame.
//!
//! Precession uses the IAU 1976 three-angle formulation (zeta, z, theta as
//! polynomials in Julian centuries). Nutation is structurally present but
//! its angles are pinned to zero, so its contribution is the identity and
//! the equation of the equinoxes in `timelib` is zero to match.

use nalgebra::{Rotation3, UnitQuaternion, Vector3};
use once_cell::sync::Lazy;

use crate::constants::ASEC2RAD;
use crate::timelib::{greenwich_apparent_sidereal_time, julian_century, mean_obliquity};

/// Fixed axis swap from the sky-fixed frame into the render world frame.
///
/// A -90 degree rotation about X: the celestial pole (sky +Z) becomes the
/// world up axis (+Y). Every position that crosses from astronomical math
/// into the render frame goes through this one rotation, which also yields
/// the negated-z right-ascension sweep the line geometry depends on.
static WORLD_FROM_SKY: Lazy<UnitQuaternion<f64>> = Lazy::new(|| {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -std::f64::consts::FRAC_PI_2)
});

/// Sky-fixed to render-world rotation.
pub fn world_from_sky() -> UnitQuaternion<f64> {
    *WORLD_FROM_SKY
}

/// Precession rotation from mean-of-date to J2000, IAU 1976 angles.
///
/// zeta, z and theta are polynomials in arcseconds up to T^3; the matrix is
/// composed as R3(-z) R2(theta) R3(-zeta) in the classical frame-rotation
/// notation.
pub fn precession(t: f64) -> Rotation3<f64> {
    let zeta = (2306.2181 + (0.30188 + 0.017998 * t) * t) * t * ASEC2RAD;
    let z = (2306.2181 + (1.09468 + 0.018203 * t) * t) * t * ASEC2RAD;
    let theta = (2004.3109 + (-0.42665 - 0.041833 * t) * t) * t * ASEC2RAD;

    Rotation3::from_axis_angle(&Vector3::z_axis(), z)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), -theta)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), zeta)
}

/// Nutation angles (delta-psi, delta-epsilon) in radians.
///
/// Pinned to zero: the structure is kept so a real series can slot in, but
/// the current model carries no periodic wobble.
pub fn nutation_angles(_t: f64) -> (f64, f64) {
    (0.0, 0.0)
}

/// Nutation rotation: R1(-eps - deps) R3(-dpsi) R1(eps).
///
/// With both angles at zero this is exactly the identity.
pub fn nutation(t: f64) -> Rotation3<f64> {
    let (dpsi, deps) = nutation_angles(t);
    let eps = mean_obliquity(t);

    Rotation3::from_axis_angle(&Vector3::x_axis(), eps + deps)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), dpsi)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), -eps)
}

/// Spin rotation about the polar axis by the apparent sidereal angle.
pub fn spin(gast_rad: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), gast_rad)
}

/// Rotation carrying Earth-fixed coordinates into the sky-fixed frame.
///
/// Composed as `(N * P) * spin`: an Earth-fixed point at longitude L lands
/// at right ascension GAST + L, then picks up the precession/nutation
/// correction.
pub fn sky_from_fixed(jd: f64) -> UnitQuaternion<f64> {
    let t = julian_century(jd);
    let gast = greenwich_apparent_sidereal_time(jd);

    let pn = nutation(t) * precession(t);
    UnitQuaternion::from_rotation_matrix(&(pn * spin(gast)))
}

/// Inverse of [`sky_from_fixed`].
pub fn fixed_from_sky(jd: f64) -> UnitQuaternion<f64> {
    sky_from_fixed(jd).inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{J2000, TAU};
    use approx::assert_relative_eq;

    fn assert_orthonormal(m: &Rotation3<f64>) {
        let product = m.matrix().transpose() * m.matrix();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-14);
            }
        }
        assert_relative_eq!(m.matrix().determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_precession_identity_at_j2000() {
        let p = precession(0.0);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(p.matrix()[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_precession_orthonormal() {
        assert_orthonormal(&precession(0.1)); // ~10 years past J2000
        assert_orthonormal(&precession(-1.0));
    }

    #[test]
    fn test_precession_advances_ra() {
        // The J2000 equinox direction gains positive RA and Dec in
        // coordinates of a later date.
        let p = precession(1.0);
        let equinox = p * Vector3::x();
        assert!(equinox.y > 0.0, "RA should increase, y = {}", equinox.y);
        assert!(equinox.z > 0.0, "Dec should increase, z = {}", equinox.z);

        // General precession in RA is ~4612 arcsec/century
        let ra = equinox.y.atan2(equinox.x);
        assert_relative_eq!(ra / ASEC2RAD, 4612.0, epsilon = 100.0);
    }

    #[test]
    fn test_nutation_is_identity_while_stubbed() {
        for t in [-1.0, 0.0, 0.5, 2.0] {
            let n = nutation(t);
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(n.matrix()[(i, j)], expected, epsilon = 1e-14);
                }
            }
        }
    }

    #[test]
    fn test_spin_moves_prime_meridian_to_gast() {
        let gast = 1.234;
        let rotated = spin(gast) * Vector3::x();
        assert_relative_eq!(rotated.y.atan2(rotated.x), gast, epsilon = 1e-14);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_sky_from_fixed_prime_meridian() {
        // A point on the equator at longitude 0 must land at RA = GAST
        // (precession at J2000 is negligible).
        let q = sky_from_fixed(J2000);
        let sky = q * Vector3::x();
        let ra = sky.y.atan2(sky.x).rem_euclid(TAU);
        let gast = greenwich_apparent_sidereal_time(J2000);
        assert_relative_eq!(ra, gast, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_from_sky_roundtrip() {
        let jd = J2000 + 9131.25;
        let q = sky_from_fixed(jd);
        let inv = fixed_from_sky(jd);
        let v = Vector3::new(0.3, -0.8, 0.52);
        let back = inv * (q * v);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn test_world_from_sky_maps_pole_to_up() {
        let pole = world_from_sky() * Vector3::z();
        assert_relative_eq!(pole.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(pole.y, 1.0, epsilon = 1e-15);
        assert_relative_eq!(pole.z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_world_from_sky_negates_z_sweep() {
        // A direction at RA 90, Dec 0 (sky +Y) must land at world -Z so
        // increasing RA sweeps in the expected screen direction.
        let v = world_from_sky() * Vector3::y();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-15);
    }
}
