//! Sky catalogs: stars, constellation figures, orbital elements, and the
//! reference ephemeris snapshot
//!
//! Catalogs are loaded once per session into immutable structures and
//! injected into the renderers by reference — nothing here is ambient
//! global state, which keeps the renderers pure and testable in
//! isolation.

pub mod synthetic;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::REFERENCE_MATCH_TOLERANCE_MS;
use crate::keplerlib::{ra_dec_to_cartesian, OrbitalElements};

/// One star, as stored in the bright-star JSON.
///
/// Position comes from the RA/Dec pair when present, else from the raw
/// x/y/z direction; an entry with neither (or a zero direction) is
/// unusable and skipped by the renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarEntry {
    /// Proper name ("Sirius", "Vega"); the Sun appears as "Sol"
    pub id: String,
    /// Apparent visual magnitude, lower is brighter
    pub mag: f64,
    /// Raw direction fallback, x component
    #[serde(default)]
    pub x: f64,
    /// Raw direction fallback, y component
    #[serde(default)]
    pub y: f64,
    /// Raw direction fallback, z component
    #[serde(default)]
    pub z: f64,
    /// Intrinsic color, "#rrggbb"
    #[serde(default)]
    pub color: Option<String>,
    /// Color as seen through the atmosphere, "#rrggbb"
    #[serde(default)]
    pub atmospheric_color: Option<String>,
    /// Effective temperature in Kelvin (display only)
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Spectral class (display only)
    #[serde(default)]
    pub spect: Option<String>,
    /// Hipparcos catalog id, cross-referenced by constellation lines
    #[serde(default)]
    pub hip: Option<u32>,
    /// Constellation abbreviation
    #[serde(default)]
    pub con: Option<String>,
    /// Right ascension in hours [0, 24)
    #[serde(default)]
    pub ra: Option<f64>,
    /// Declination in degrees [-90, 90]
    #[serde(default)]
    pub dec: Option<f64>,
}

impl StarEntry {
    /// Position on a sphere of `radius`, in the sky-fixed frame.
    ///
    /// RA/Dec when available, otherwise the normalized raw direction.
    /// `None` when the entry has neither — the caller skips it.
    pub fn position(&self, radius: f64) -> Option<Vector3<f64>> {
        if let (Some(ra), Some(dec)) = (self.ra, self.dec) {
            return Some(ra_dec_to_cartesian(ra, dec, radius));
        }
        let raw = Vector3::new(self.x, self.y, self.z);
        let norm = raw.norm();
        if norm == 0.0 {
            return None;
        }
        Some(raw * (radius / norm))
    }
}

/// The loaded star catalog with a Hipparcos-id index.
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<StarEntry>,
    hip_index: HashMap<u32, usize>,
}

impl StarCatalog {
    /// Build a catalog, indexing entries by Hipparcos id.
    pub fn from_entries(stars: Vec<StarEntry>) -> Self {
        let mut hip_index = HashMap::new();
        for (i, star) in stars.iter().enumerate() {
            if let Some(hip) = star.hip {
                hip_index.entry(hip).or_insert(i);
            }
        }
        Self { stars, hip_index }
    }

    /// Look up a star by Hipparcos id.
    pub fn by_hip(&self, hip: u32) -> Option<&StarEntry> {
        self.hip_index.get(&hip).map(|&i| &self.stars[i])
    }

    /// Iterate over all entries.
    pub fn stars(&self) -> impl Iterator<Item = &StarEntry> {
        self.stars.iter()
    }

    /// All stars brighter than (magnitude below) the limit.
    pub fn brighter_than(&self, magnitude: f64) -> Vec<&StarEntry> {
        self.stars.iter().filter(|s| s.mag < magnitude).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Localized display names for a constellation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonName {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

/// A constellation figure: polylines of Hipparcos ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstellationEntry {
    /// Stable identifier, e.g. "CON orion"
    pub id: String,
    /// Each inner list is a connected polyline of Hipparcos ids
    pub lines: Vec<Vec<u32>>,
    #[serde(default)]
    pub common_name: Option<CommonName>,
}

impl ConstellationEntry {
    /// Display name: native, then english, then the raw id.
    pub fn display_name(&self) -> &str {
        if let Some(name) = &self.common_name {
            if let Some(native) = &name.native {
                return native;
            }
            if let Some(english) = &name.english {
                return english;
            }
        }
        &self.id
    }
}

/// On-disk constellation file: a sky-culture wrapper around the figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstellationFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub constellations: Vec<ConstellationEntry>,
}

/// Orbital elements table: one epoch, many bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementsTable {
    /// Epoch the mean anomalies are referenced to, as a Julian date
    pub epoch_jd: f64,
    pub planets: Vec<OrbitalElements>,
}

impl ElementsTable {
    /// Validate every body's elements.
    pub fn validate(&self) -> Result<(), crate::keplerlib::ElementsError> {
        for body in &self.planets {
            body.validate()?;
        }
        Ok(())
    }

    /// Look up a body by name, case-insensitively.
    pub fn body(&self, name: &str) -> Option<&OrbitalElements> {
        self.planets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Tabulated position of one body at the reference instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceBody {
    /// Lowercase body id ("sun", "moon", "mars", ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// Right ascension in hours
    pub ra_hours: f64,
    /// Declination in degrees
    pub dec_degrees: f64,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub phase_fraction: Option<f64>,
}

/// Ground-truth ephemeris snapshot for one fixed UTC instant.
///
/// When a render request lands within a second of the snapshot instant,
/// the renderers substitute these tabulated values for the analytic
/// model — a calibration escape hatch at the one verifiable checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEphemeris {
    /// The snapshot instant
    pub timestamp: DateTime<Utc>,
    pub bodies: Vec<ReferenceBody>,
}

impl ReferenceEphemeris {
    /// Whether `date` falls within the match tolerance of the snapshot.
    pub fn matches(&self, date: &DateTime<Utc>) -> bool {
        (date.timestamp_millis() - self.timestamp.timestamp_millis()).abs()
            < REFERENCE_MATCH_TOLERANCE_MS
    }

    /// Look up a body by id, case-insensitively.
    pub fn body(&self, id: &str) -> Option<&ReferenceBody> {
        self.bodies.iter().find(|b| b.id.eq_ignore_ascii_case(id))
    }
}

/// The full catalog bundle a frame computation consumes.
#[derive(Debug, Clone)]
pub struct SkyCatalogs {
    pub stars: StarCatalog,
    pub constellations: Vec<ConstellationEntry>,
    pub elements: ElementsTable,
    pub reference: ReferenceEphemeris,
    /// Raw Moon surface texture; absence simply omits the Moon mesh
    pub moon_texture: Option<Vec<u8>>,
}

impl SkyCatalogs {
    /// Built-in catalogs: real bright stars plus deterministic filler,
    /// one constellation, the planetary elements table, and the
    /// reference snapshot. Works with no files on disk.
    pub fn synthetic() -> Self {
        Self {
            stars: synthetic::create_synthetic_star_catalog(),
            constellations: synthetic::synthetic_constellations(),
            elements: synthetic::default_elements_table(),
            reference: synthetic::default_reference_ephemeris(),
            moon_texture: Some(synthetic::placeholder_moon_texture()),
        }
    }
}
