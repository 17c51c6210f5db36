//! Scene assembly: body renderers and the per-frame computation
//!
//! Each renderer is a pure function from (instant, catalogs) to scene
//! primitives in the render world frame; [`compute_frame`] runs them all
//! and attaches the camera pose. The host calls it again on every time or
//! location change — the whole frame is a handful of trigonometric calls
//! per body, so it is recomputed wholesale, never patched.

pub mod constellations;
pub mod moon;
pub mod planets;
pub mod stars;
pub mod sun;

use chrono::{DateTime, Utc};
use nalgebra::{UnitQuaternion, Vector3};

use crate::cameralib::{compute_camera_pose, CameraPose, LookMode, ObserverState};
use crate::catalogs::SkyCatalogs;
use crate::constants::{MAG_SIZE_BASE, MAG_SIZE_SCALAR};
use crate::framelib::{sky_from_fixed, world_from_sky};
use crate::timelib::julian_date;

/// A point primitive: one star or planet dot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePoint {
    pub id: String,
    /// World-frame position
    pub position: Vector3<f64>,
    /// Linear RGB in [0, 1]
    pub color: [f32; 3],
    /// Point size in scene units
    pub size: f64,
}

/// A text billboard anchored in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLabel {
    pub text: String,
    pub position: Vector3<f64>,
    pub font_size: f64,
    pub color: [f32; 3],
}

/// Connected line segments plus a label anchor for one constellation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationFigure {
    pub name: String,
    pub segments: Vec<[Vector3<f64>; 2]>,
    /// Centroid of the resolved points, pushed outward for legibility
    pub label_position: Vector3<f64>,
}

/// The Sun: an emissive ball plus light source at a fixed distance.
#[derive(Debug, Clone, PartialEq)]
pub struct SunBody {
    pub position: Vector3<f64>,
    pub visual_radius: f64,
}

/// The Moon: a textured mesh on its rescaled visual orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonBody {
    pub position: Vector3<f64>,
    pub visual_radius: f64,
}

/// One computed frame: everything the render surface needs.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Julian date the frame was computed for
    pub jd: f64,
    /// Earth-fixed to sky-fixed rotation for this instant
    pub sky_from_fixed: UnitQuaternion<f64>,
    /// The fixed sky-to-world axis swap, for collaborators that place
    /// their own sky-frame content
    pub world_from_sky: UnitQuaternion<f64>,
    pub stars: Vec<ScenePoint>,
    pub star_labels: Vec<SceneLabel>,
    pub planets: Vec<ScenePoint>,
    pub planet_labels: Vec<SceneLabel>,
    pub constellations: Vec<ConstellationFigure>,
    pub sun: SunBody,
    /// Absent until the Moon texture asset resolves
    pub moon: Option<MoonBody>,
    pub camera: CameraPose,
}

/// Parse a "#rrggbb" color; anything unparseable renders white.
pub fn parse_hex_color(color: Option<&str>) -> [f32; 3] {
    fn channels(hex: &str) -> Option<[f32; 3]> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
    }
    color.and_then(channels).unwrap_or([1.0, 1.0, 1.0])
}

/// Magnitude-to-point-size power law.
///
/// Brighter (lower) magnitudes render larger; unknown magnitudes get the
/// floor size.
pub fn magnitude_point_size(magnitude: Option<f64>, min_size: f64) -> f64 {
    match magnitude {
        Some(mag) => (MAG_SIZE_BASE.powf(-mag) * MAG_SIZE_SCALAR).max(min_size),
        None => min_size,
    }
}

/// Compute a full frame for an observer.
///
/// Pure: same inputs, same frame. The only state is the catalog bundle,
/// which is read-only.
pub fn compute_frame(
    observer: &ObserverState,
    catalogs: &SkyCatalogs,
    mode: LookMode,
) -> RenderFrame {
    let jd = julian_date(&observer.time);
    let twinkle_seconds = observer.time.timestamp_millis() as f64 / 1000.0;

    let star_field = stars::render_stars(&catalogs.stars, twinkle_seconds);
    let constellation_figures =
        constellations::render_constellations(&catalogs.stars, &catalogs.constellations);
    let planet_field = planets::render_planets(&observer.time, catalogs);
    let sun = sun::render_sun(&observer.time, &catalogs.reference);

    // The Moon's position exists for the camera even when the missing
    // texture keeps the mesh out of the frame.
    let moon_position = moon::moon_world_position(&observer.time, catalogs);
    let moon = moon::render_moon(&observer.time, catalogs);

    let camera = compute_camera_pose(observer, mode, Some(&sun.position), moon_position.as_ref());

    RenderFrame {
        jd,
        sky_from_fixed: sky_from_fixed(jd),
        world_from_sky: world_from_sky(),
        stars: star_field.points,
        star_labels: star_field.labels,
        planets: planet_field.points,
        planet_labels: planet_field.labels,
        constellations: constellation_figures,
        sun,
        moon,
        camera,
    }
}

/// Convenience wrapper: split date + optional location, defaulting the
/// location to (0, 0) when the host has none.
pub fn compute_frame_at(
    date: DateTime<Utc>,
    location: Option<(f64, f64)>,
    catalogs: &SkyCatalogs,
    mode: LookMode,
) -> RenderFrame {
    let observer = match location {
        Some((lat, lon)) => ObserverState::new(lat, lon, date),
        None => ObserverState::at_default_location(date),
    };
    compute_frame(&observer, catalogs, mode)
}
