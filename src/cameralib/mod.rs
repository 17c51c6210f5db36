//! Observer state and camera placement
//!
//! Converts an observer's latitude/longitude and instant into a camera
//! pose in the render world frame: eye just above the Earth surface, up
//! along the local zenith, looking at the zenith or biased toward the Sun
//! or Moon. The pose is declarative data — applying it to a live camera
//! object is the render surface's job.

use chrono::{DateTime, Utc};
use nalgebra::{UnitQuaternion, Vector3};

use crate::constants::{
    CAMERA_DEGENERACY_LIMIT, CELESTIAL_SPHERE_RADIUS, DEG2RAD, EARTH_VISUAL_RADIUS,
    HORIZON_TOLERANCE, OBSERVER_EYE_ELEVATION,
};
use crate::framelib::{sky_from_fixed, world_from_sky};
use crate::timelib::julian_date;

/// The observer: where and when. Plain data, supplied by the host shell;
/// every change triggers a full frame recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverState {
    /// Latitude in degrees, -90..90
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive
    pub longitude_deg: f64,
    /// The UTC instant to render
    pub time: DateTime<Utc>,
}

impl ObserverState {
    /// Observer at a location and instant.
    pub fn new(latitude_deg: f64, longitude_deg: f64, time: DateTime<Utc>) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            time,
        }
    }

    /// The (0, 0) fallback location used when geolocation fails.
    pub fn at_default_location(time: DateTime<Utc>) -> Self {
        Self::new(0.0, 0.0, time)
    }

    /// Unit vector to the observer in the rotating Earth-fixed frame.
    pub fn fixed_direction(&self) -> Vector3<f64> {
        let lat = self.latitude_deg * DEG2RAD;
        let lon = self.longitude_deg * DEG2RAD;
        Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }
}

/// How the camera picks its look target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookMode {
    /// Straight up at the local zenith
    #[default]
    Zenith,
    /// Toward the Sun by day or the Moon by night when one is above the
    /// horizon, else the zenith
    PreferBodies,
}

/// Declarative camera pose in the render world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    /// Eye position
    pub position: Vector3<f64>,
    /// Up vector (unit)
    pub up: Vector3<f64>,
    /// Point the camera looks at
    pub look_at: Vector3<f64>,
}

impl CameraPose {
    /// True when every component of the pose is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.up.iter().all(|v| v.is_finite())
            && self.look_at.iter().all(|v| v.is_finite())
    }
}

/// World-frame zenith direction for the observer.
pub fn observer_zenith(observer: &ObserverState, q_sky_from_fixed: &UnitQuaternion<f64>) -> Vector3<f64> {
    let sky = q_sky_from_fixed * observer.fixed_direction();
    world_from_sky() * sky.normalize()
}

/// Whether a body direction clears the observer's horizon.
///
/// The tolerance is slightly negative so bodies sitting right on the
/// horizon still count as visible.
pub fn above_horizon(body_world: &Vector3<f64>, zenith_world: &Vector3<f64>) -> bool {
    let norms = body_world.norm() * zenith_world.norm();
    if norms == 0.0 {
        return false;
    }
    body_world.dot(zenith_world) / norms > HORIZON_TOLERANCE
}

/// Pick an up vector that is not parallel to the look direction.
///
/// Prefers the zenith; when the look direction lies along it, falls back
/// to world X, then Y, then Z. Some fallback always succeeds, so the
/// camera basis stays finite.
fn resolve_up(look_dir: &Vector3<f64>, preferred_up: &Vector3<f64>) -> Vector3<f64> {
    if look_dir.dot(preferred_up).abs() <= CAMERA_DEGENERACY_LIMIT {
        return *preferred_up;
    }
    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        if look_dir.dot(&axis).abs() <= CAMERA_DEGENERACY_LIMIT {
            return axis;
        }
    }
    // Unreachable for a unit look direction, but never propagate NaN
    *preferred_up
}

/// Compute the camera pose for an observer.
///
/// `sun_world` and `moon_world` are the already-placed world positions of
/// the two bodies, used only by [`LookMode::PreferBodies`].
pub fn compute_camera_pose(
    observer: &ObserverState,
    mode: LookMode,
    sun_world: Option<&Vector3<f64>>,
    moon_world: Option<&Vector3<f64>>,
) -> CameraPose {
    let jd = julian_date(&observer.time);
    let q = sky_from_fixed(jd);
    let zenith = observer_zenith(observer, &q);

    let position = zenith * (EARTH_VISUAL_RADIUS + OBSERVER_EYE_ELEVATION);

    let look_at = match mode {
        LookMode::Zenith => zenith * CELESTIAL_SPHERE_RADIUS,
        LookMode::PreferBodies => {
            let sun_up = sun_world.filter(|sun| above_horizon(sun, &zenith));
            let moon_up = moon_world.filter(|moon| above_horizon(moon, &zenith));
            match (sun_up, moon_up) {
                (Some(sun), _) => sun.normalize() * CELESTIAL_SPHERE_RADIUS,
                (None, Some(moon)) => moon.normalize() * CELESTIAL_SPHERE_RADIUS,
                (None, None) => zenith * CELESTIAL_SPHERE_RADIUS,
            }
        }
    };

    let look_dir = (look_at - position)
        .try_normalize(0.0)
        .unwrap_or(zenith);
    let up = resolve_up(&look_dir, &zenith);

    CameraPose {
        position,
        up,
        look_at,
    }
}
