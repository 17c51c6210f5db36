//! Constants for astronomical calculations and scene layout

use std::f64::consts::PI;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Milliseconds in a day
pub const DAY_MS: f64 = 86_400_000.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Unix epoch (1970-01-01T00:00:00Z) as Julian date
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Ratio of the sidereal rotation rate to the solar rate
pub const SOLAR_TO_SIDEREAL: f64 = 1.002_737_909_35;

// Angles
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Right-ascension hours to radians conversion factor
pub const HOUR2RAD: f64 = TAU / 24.0;

// Distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Scene layout (render-frame units, not physical).
// Depth order must hold: Moon orbit < Sun distance < star sphere.
/// Radius of the celestial sphere that carries the star field
pub const CELESTIAL_SPHERE_RADIUS: f64 = 100.0;
/// Fixed scene distance at which the Sun is placed
pub const SUN_SCENE_DISTANCE: f64 = 80.0;
/// Visual radius of the Sun ball
pub const SUN_VISUAL_RADIUS: f64 = 4.0;
/// Visual semi-major axis the Moon's orbit is rescaled to
pub const MOON_ORBIT_SCENE_SEMI_MAJOR_AXIS: f64 = 40.0;
/// Visual radius of the Moon mesh
pub const MOON_VISUAL_RADIUS: f64 = 1.5;
/// Visual radius of the Earth sphere at the scene origin
pub const EARTH_VISUAL_RADIUS: f64 = 10.0;
/// How far the camera eye sits above the Earth surface, along the zenith
pub const OBSERVER_EYE_ELEVATION: f64 = 0.25;

// Visual magnitude laws
/// Faintest stars rendered as points
pub const MIN_VISUAL_MAGNITUDE: f64 = 6.5;
/// Stars brighter than this get a text label
pub const BRIGHT_STAR_LABEL_MAGNITUDE: f64 = 2.0;
/// Minimum star point size
pub const MIN_STAR_POINT_SIZE: f64 = 0.5;
/// Minimum planet point size
pub const MIN_PLANET_POINT_SIZE: f64 = 0.3;
/// Base of the magnitude-to-size power law
pub const MAG_SIZE_BASE: f64 = 2.0;
/// Scalar of the magnitude-to-size power law
pub const MAG_SIZE_SCALAR: f64 = 2.5;

// Camera behavior
/// Bodies whose zenith dot product exceeds this count as above the horizon
pub const HORIZON_TOLERANCE: f64 = -0.05;
/// |look . up| beyond which the camera basis is treated as degenerate
pub const CAMERA_DEGENERACY_LIMIT: f64 = 0.999;

// Reference ephemeris
/// Tolerance, in milliseconds, for matching the reference instant
pub const REFERENCE_MATCH_TOLERANCE_MS: i64 = 1_000;
