//! Two-body Keplerian propagation from classical orbital elements
//!
//! Drives the Moon and planet positions: a fixed-iteration Kepler solver,
//! heliocentric/geocentric ecliptic propagation through the P,Q basis, and
//! the spherical conversions the renderers share.
//!
//! The solver runs exactly five fixed-point steps with no convergence
//! check. The eccentricities in scope (Moon and major planets, e < 0.21)
//! converge comfortably within five steps; near-parabolic orbits are out
//! of scope and are rejected at element validation instead.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{AU_KM, DEG2RAD, HOUR2RAD, RAD2DEG, TAU};

/// Fixed iteration count for the Kepler fixed-point recurrence
const KEPLER_ITERATIONS: usize = 5;

/// Error type for orbital element validation
#[derive(Debug, Error)]
pub enum ElementsError {
    #[error("{name}: eccentricity {value} outside [0, 1); only elliptical orbits are supported")]
    Eccentricity { name: String, value: f64 },

    #[error("{name}: orbital period must be positive, got {value}")]
    Period { name: String, value: f64 },

    #[error("{name}: no semi-major axis given (neither AU nor km)")]
    MissingSemiMajorAxis { name: String },
}

/// Classical orbital elements for one body, plus its display attributes.
///
/// Field names follow the on-disk planetary-bodies JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Body name ("Moon", "Mars", ...)
    pub name: String,
    /// Semi-major axis in astronomical units
    #[serde(default)]
    pub semimajor_axis_au: Option<f64>,
    /// Semi-major axis in kilometers (used when the AU value is absent)
    #[serde(default)]
    pub semimajor_axis_km: Option<f64>,
    /// Eccentricity, [0, 1)
    pub orbital_eccentricity: f64,
    /// Inclination to the ecliptic, degrees
    pub orbital_inclination_degrees: f64,
    /// Longitude of the ascending node, degrees
    pub longitude_of_ascending_node_deg: f64,
    /// Argument of periapsis, degrees
    pub argument_of_perihelion_deg: f64,
    /// Mean anomaly at the table epoch, degrees
    pub mean_anomaly_at_epoch_deg: f64,
    /// Orbital period in days
    pub orbital_period_days: f64,
    /// Display color, "#rrggbb"
    #[serde(default)]
    pub color: Option<String>,
    /// Fixed apparent magnitude for point sizing, if known
    #[serde(default)]
    pub magnitude: Option<f64>,
}

impl OrbitalElements {
    /// Semi-major axis in AU, converting from kilometers when needed.
    pub fn semimajor_axis_au(&self) -> Option<f64> {
        self.semimajor_axis_au
            .or(self.semimajor_axis_km.map(|km| km / AU_KM))
    }

    /// Check the elliptical-orbit invariants.
    pub fn validate(&self) -> Result<(), ElementsError> {
        if !(0.0..1.0).contains(&self.orbital_eccentricity) {
            return Err(ElementsError::Eccentricity {
                name: self.name.clone(),
                value: self.orbital_eccentricity,
            });
        }
        if self.orbital_period_days <= 0.0 {
            return Err(ElementsError::Period {
                name: self.name.clone(),
                value: self.orbital_period_days,
            });
        }
        if self.semimajor_axis_au().is_none() {
            return Err(ElementsError::MissingSemiMajorAxis {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Mean anomaly at `jd`, advanced from the epoch at the mean motion.
    pub fn mean_anomaly_at(&self, epoch_jd: f64, jd: f64) -> f64 {
        let mean_motion = TAU / self.orbital_period_days;
        (self.mean_anomaly_at_epoch_deg * DEG2RAD + mean_motion * (jd - epoch_jd)).rem_euclid(TAU)
    }
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Five fixed-point iterations of `E <- M + e sin E`, seeded with `E = M`.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e_anom = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        e_anom = mean_anomaly + eccentricity * e_anom.sin();
    }
    e_anom
}

/// Position in the ecliptic frame at `jd`, with the semi-major axis
/// overridden by `semimajor_axis`.
///
/// The override is what lets the Moon reuse this path with its orbit
/// rescaled to a scene-sized radius; planets pass their physical axis.
pub fn propagate_elliptic(
    elements: &OrbitalElements,
    epoch_jd: f64,
    jd: f64,
    semimajor_axis: f64,
) -> Vector3<f64> {
    let e = elements.orbital_eccentricity;
    let mean_anomaly = elements.mean_anomaly_at(epoch_jd, jd);
    let e_anom = solve_kepler(mean_anomaly, e);

    // True anomaly via the half-angle identity, radius from the ellipse
    let true_anomaly = 2.0 * f64::atan2(
        (1.0 + e).sqrt() * (e_anom / 2.0).sin(),
        (1.0 - e).sqrt() * (e_anom / 2.0).cos(),
    );
    let r = semimajor_axis * (1.0 - e * e_anom.cos());

    let x_orb = r * true_anomaly.cos();
    let y_orb = r * true_anomaly.sin();

    // Orbital plane -> ecliptic through the P,Q basis
    let (sin_i, cos_i) = (elements.orbital_inclination_degrees * DEG2RAD).sin_cos();
    let (sin_node, cos_node) = (elements.longitude_of_ascending_node_deg * DEG2RAD).sin_cos();
    let (sin_peri, cos_peri) = (elements.argument_of_perihelion_deg * DEG2RAD).sin_cos();

    let p = Vector3::new(
        cos_peri * cos_node - sin_peri * sin_node * cos_i,
        cos_peri * sin_node + sin_peri * cos_node * cos_i,
        sin_peri * sin_i,
    );
    let q = Vector3::new(
        -sin_peri * cos_node - cos_peri * sin_node * cos_i,
        -sin_peri * sin_node + cos_peri * cos_node * cos_i,
        cos_peri * sin_i,
    );

    p * x_orb + q * y_orb
}

/// Heliocentric ecliptic position in AU at `jd`.
pub fn heliocentric_ecliptic_position(
    elements: &OrbitalElements,
    epoch_jd: f64,
    jd: f64,
) -> Option<Vector3<f64>> {
    let a = elements.semimajor_axis_au()?;
    Some(propagate_elliptic(elements, epoch_jd, jd, a))
}

/// Approximate equatorial coordinates of an ecliptic position.
///
/// Reads ecliptic longitude directly as right ascension and ecliptic
/// latitude as declination, skipping the obliquity rotation. Good enough
/// for a visual sky map, and kept because correcting it would move every
/// rendered planet; the Sun and Moon paths apply the real rotation.
pub fn ecliptic_to_approx_ra_dec(position: &Vector3<f64>) -> Option<(f64, f64)> {
    let dist = position.norm();
    if dist == 0.0 {
        return None;
    }
    let lon = position.y.atan2(position.x).rem_euclid(TAU);
    let lat = (position.z / dist).asin();

    Some((lon / HOUR2RAD, lat * RAD2DEG))
}

/// Sky-frame Cartesian position of an RA/Dec direction at `radius`.
///
/// Standard convention: x toward the vernal equinox, z toward the
/// celestial pole. The render frame's axis swap is applied elsewhere,
/// once (`framelib::world_from_sky`).
pub fn ra_dec_to_cartesian(ra_hours: f64, dec_degrees: f64, radius: f64) -> Vector3<f64> {
    let ra = ra_hours * HOUR2RAD;
    let dec = dec_degrees * DEG2RAD;
    let cos_dec = dec.cos();
    Vector3::new(
        radius * cos_dec * ra.cos(),
        radius * cos_dec * ra.sin(),
        radius * dec.sin(),
    )
}

/// Inverse of [`ra_dec_to_cartesian`]: (ra_hours, dec_degrees).
///
/// RA is normalized to [0, 24); at the poles it collapses to 0.
pub fn cartesian_to_ra_dec(position: &Vector3<f64>) -> Option<(f64, f64)> {
    let dist = position.norm();
    if dist == 0.0 {
        return None;
    }
    let ra = position.y.atan2(position.x).rem_euclid(TAU);
    let dec = (position.z / dist).asin();
    Some((ra / HOUR2RAD, dec * RAD2DEG))
}
