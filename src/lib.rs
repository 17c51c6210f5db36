//! Nightsky: celestial sky scene computation for 3D rendering
//!
//! This crate computes the apparent positions of stars, the Sun, the Moon
//! and planets for an observer at a given time and place, and assembles a
//! renderable scene — positioned, colored, sized primitives plus a camera
//! pose. The host rendering surface draws it; this crate only does the
//! math.
//!
//! ```no_run
//! use chrono::Utc;
//! use nightsky::{compute_frame, LookMode, ObserverState, SkyCatalogs};
//!
//! let catalogs = SkyCatalogs::synthetic();
//! let observer = ObserverState::new(48.85, 2.35, Utc::now());
//! let frame = compute_frame(&observer, &catalogs, LookMode::Zenith);
//! println!("{} stars, camera at {:?}", frame.stars.len(), frame.camera.position);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod cameralib;
pub mod catalogs;
pub mod constants;
pub mod framelib;
pub mod geolib;
pub mod keplerlib;
pub mod scenelib;
pub mod timelib;

// Re-export the types a host shell touches every frame
pub use cameralib::{CameraPose, LookMode, ObserverState};
pub use catalogs::SkyCatalogs;
pub use geolib::{fetch_observer_location, GeoLocation};
pub use scenelib::{compute_frame, compute_frame_at, RenderFrame};

/// Main error type for the nightsky library
#[derive(Debug, Error)]
pub enum NightskyError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Orbital elements error: {0}")]
    ElementsError(#[from] keplerlib::ElementsError),
}

/// Result type for nightsky operations
pub type Result<T> = std::result::Result<T, NightskyError>;

/// Entry point for loading catalog data from disk.
///
/// Each `load_*` method reads one catalog file (plain or gzipped JSON)
/// and reports errors to the caller; [`Loader::load_catalogs`] instead
/// absorbs every failure per asset, falling back to the built-in
/// synthetic data so one bad file never blanks the scene.
pub struct Loader {
    data_dir: Option<PathBuf>,
}

impl Loader {
    /// Create a new loader with no data directory configured.
    pub fn new() -> Self {
        Self { data_dir: None }
    }

    /// Set the directory `load_catalogs` reads the standard files from.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the star catalog from a JSON array of entries.
    pub fn load_star_catalog<P: AsRef<Path>>(&self, path: P) -> Result<catalogs::StarCatalog> {
        let text = read_maybe_gzip(path.as_ref())?;
        let entries: Vec<catalogs::StarEntry> = serde_json::from_str(&text)?;
        if entries.is_empty() {
            return Err(NightskyError::DataError(format!(
                "star catalog {} contains no entries",
                path.as_ref().display()
            )));
        }
        Ok(catalogs::StarCatalog::from_entries(entries))
    }

    /// Load constellation figures from a sky-culture JSON file.
    pub fn load_constellations<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<catalogs::ConstellationEntry>> {
        let text = read_maybe_gzip(path.as_ref())?;
        let file: catalogs::ConstellationFile = serde_json::from_str(&text)?;
        Ok(file.constellations)
    }

    /// Load and validate the orbital elements table.
    pub fn load_orbital_elements<P: AsRef<Path>>(&self, path: P) -> Result<catalogs::ElementsTable> {
        let text = read_maybe_gzip(path.as_ref())?;
        let table: catalogs::ElementsTable = serde_json::from_str(&text)?;
        table.validate()?;
        Ok(table)
    }

    /// Load the reference ephemeris snapshot.
    pub fn load_reference_ephemeris<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<catalogs::ReferenceEphemeris> {
        let text = read_maybe_gzip(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the raw Moon texture bytes.
    pub fn load_moon_texture<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Load the full catalog bundle from the data directory, absorbing
    /// per-asset failures.
    ///
    /// Standard file names: `bright_stars.json`, `constellations.json`,
    /// `planetary_bodies.json`, `reference_ephemeris.json`,
    /// `moon_texture.bin` (each optionally `.gz`, except the texture).
    /// Any missing or malformed asset logs a warning and falls back to
    /// its synthetic counterpart — or, for the texture, to absence.
    pub fn load_catalogs(&self) -> SkyCatalogs {
        let Some(dir) = &self.data_dir else {
            log::debug!("no data directory configured; using synthetic catalogs");
            return SkyCatalogs::synthetic();
        };

        let stars = self
            .first_ok(dir, &["bright_stars.json", "bright_stars.json.gz"], |p| {
                self.load_star_catalog(p)
            })
            .unwrap_or_else(|| {
                log::warn!("star catalog unavailable; using synthetic stars");
                catalogs::synthetic::create_synthetic_star_catalog()
            });

        let constellations = self
            .first_ok(dir, &["constellations.json", "constellations.json.gz"], |p| {
                self.load_constellations(p)
            })
            .unwrap_or_else(|| {
                log::warn!("constellation catalog unavailable; using synthetic figures");
                catalogs::synthetic::synthetic_constellations()
            });

        let elements = self
            .first_ok(dir, &["planetary_bodies.json", "planetary_bodies.json.gz"], |p| {
                self.load_orbital_elements(p)
            })
            .unwrap_or_else(|| {
                log::warn!("orbital elements unavailable; using built-in table");
                catalogs::synthetic::default_elements_table()
            });

        let reference = self
            .first_ok(
                dir,
                &["reference_ephemeris.json", "reference_ephemeris.json.gz"],
                |p| self.load_reference_ephemeris(p),
            )
            .unwrap_or_else(|| {
                log::warn!("reference ephemeris unavailable; using built-in snapshot");
                catalogs::synthetic::default_reference_ephemeris()
            });

        let moon_texture = match self.load_moon_texture(dir.join("moon_texture.bin")) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::warn!("moon texture unavailable ({err}); the Moon mesh will be omitted");
                None
            }
        };

        SkyCatalogs {
            stars,
            constellations,
            elements,
            reference,
            moon_texture,
        }
    }

    fn first_ok<T>(
        &self,
        dir: &Path,
        names: &[&str],
        load: impl Fn(&Path) -> Result<T>,
    ) -> Option<T> {
        for name in names {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match load(&path) {
                Ok(value) => return Some(value),
                Err(err) => log::warn!("failed to load {}: {err}", path.display()),
            }
        }
        None
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file to a string, transparently inflating `.gz` paths.
fn read_maybe_gzip(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        flate2::read::GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text)?;
    }
    Ok(text)
}
