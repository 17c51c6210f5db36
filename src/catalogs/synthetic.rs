//! Built-in synthetic catalogs
//!
//! A deterministic stand-in for the on-disk catalog files: a core of real
//! bright stars (correct positions, magnitudes, Hipparcos ids), seeded
//! pseudo-random filler down to the rendering cutoff, one constellation
//! figure, the planetary orbital-elements table, and the reference
//! ephemeris snapshot. Lets the crate run and be tested with no data
//! files at all.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    CommonName, ConstellationEntry, ElementsTable, ReferenceBody, ReferenceEphemeris, StarCatalog,
    StarEntry,
};
use crate::constants::J2000;
use crate::keplerlib::OrbitalElements;

/// Number of seeded filler stars appended behind the named core
const FILLER_STAR_COUNT: usize = 400;

fn named_star(
    id: &str,
    hip: u32,
    ra_hours: f64,
    dec_degrees: f64,
    mag: f64,
    color: &str,
) -> StarEntry {
    StarEntry {
        id: id.to_string(),
        mag,
        x: 0.0,
        y: 0.0,
        z: 0.0,
        color: Some(color.to_string()),
        atmospheric_color: Some(color.to_string()),
        temperature: None,
        spect: None,
        hip: Some(hip),
        con: None,
        ra: Some(ra_hours),
        dec: Some(dec_degrees),
    }
}

/// Real bright stars plus deterministic filler.
pub fn create_synthetic_star_catalog() -> StarCatalog {
    let mut stars = vec![
        // The Sun's own catalog entry; excluded from the star field by id
        StarEntry {
            id: "Sol".to_string(),
            mag: -26.7,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: Some("#fff4ea".to_string()),
            atmospheric_color: Some("#fff4ea".to_string()),
            temperature: Some(5778.0),
            spect: Some("G2V".to_string()),
            hip: None,
            con: None,
            ra: None,
            dec: None,
        },
        named_star("Sirius", 32349, 6.752_48, -16.716_1, -1.46, "#cad8ff"),
        named_star("Canopus", 30438, 6.399_20, -52.695_7, -0.74, "#fdfdff"),
        named_star("Arcturus", 69673, 14.261_03, 19.182_4, -0.05, "#ffd2a1"),
        named_star("Vega", 91262, 18.615_64, 38.783_7, 0.03, "#c6d8ff"),
        named_star("Capella", 24608, 5.278_15, 45.998_0, 0.08, "#fff4ea"),
        named_star("Rigel", 24436, 5.242_30, -8.201_6, 0.13, "#b6ccff"),
        named_star("Procyon", 37279, 7.655_03, 5.225_0, 0.34, "#fff1df"),
        named_star("Betelgeuse", 27989, 5.919_53, 7.407_1, 0.50, "#ffb56c"),
        named_star("Altair", 97649, 19.846_39, 8.868_3, 0.77, "#e3e8ff"),
        named_star("Aldebaran", 21421, 4.598_68, 16.509_3, 0.85, "#ffc17e"),
        named_star("Spica", 65474, 13.419_88, -11.161_3, 0.97, "#b4c7ff"),
        named_star("Antares", 80763, 16.490_13, -26.432_0, 1.09, "#ff9b6b"),
        named_star("Pollux", 37826, 7.755_26, 28.026_2, 1.14, "#ffe4c4"),
        named_star("Deneb", 102098, 20.690_53, 45.280_3, 1.25, "#cfd9ff"),
        named_star("Regulus", 49669, 10.139_53, 11.967_2, 1.35, "#c9d9ff"),
        named_star("Bellatrix", 25336, 5.418_85, 6.349_7, 1.64, "#bfd1ff"),
        // Orion's belt, west to east
        named_star("Mintaka", 25930, 5.533_44, -0.299_1, 2.23, "#bdd0ff"),
        named_star("Alnilam", 26311, 5.603_56, -1.201_9, 1.69, "#bcd0ff"),
        named_star("Alnitak", 26727, 5.679_31, -1.942_6, 1.77, "#bdd0ff"),
        named_star("Saiph", 27366, 5.795_94, -9.669_6, 2.09, "#bfd2ff"),
        named_star("Polaris", 11767, 2.530_30, 89.264_1, 1.98, "#fff5e4"),
    ];

    // Seeded filler spread over the sphere, faint side of the named core
    let mut rng = StdRng::seed_from_u64(0x5747_4c54);
    for i in 0..FILLER_STAR_COUNT {
        let ra = rng.gen_range(0.0..24.0);
        // Uniform over the sphere, not over declination
        let dec = rng.gen_range(-1.0_f64..1.0).asin().to_degrees();
        let mag = rng.gen_range(2.5..7.0);
        stars.push(StarEntry {
            id: format!("SYN {i}"),
            mag,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: Some("#ffffff".to_string()),
            atmospheric_color: Some("#f4f0e8".to_string()),
            temperature: None,
            spect: None,
            hip: None,
            con: None,
            ra: Some(ra),
            dec: Some(dec),
        });
    }

    StarCatalog::from_entries(stars)
}

/// One figure: Orion, drawn over the named core stars.
pub fn synthetic_constellations() -> Vec<ConstellationEntry> {
    vec![ConstellationEntry {
        id: "CON orion".to_string(),
        // Shoulders and feet through the belt
        lines: vec![
            vec![27989, 26727, 26311, 25930, 24436],
            vec![25336, 25930],
            vec![26727, 27366],
        ],
        common_name: Some(CommonName {
            english: Some("Orion".to_string()),
            native: None,
        }),
    }]
}

fn planet(
    name: &str,
    a_au: f64,
    e: f64,
    incl: f64,
    node: f64,
    peri: f64,
    mean_anomaly: f64,
    period_days: f64,
    color: &str,
    magnitude: Option<f64>,
) -> OrbitalElements {
    OrbitalElements {
        name: name.to_string(),
        semimajor_axis_au: Some(a_au),
        semimajor_axis_km: None,
        orbital_eccentricity: e,
        orbital_inclination_degrees: incl,
        longitude_of_ascending_node_deg: node,
        argument_of_perihelion_deg: peri,
        mean_anomaly_at_epoch_deg: mean_anomaly,
        orbital_period_days: period_days,
        color: Some(color.to_string()),
        magnitude,
    }
}

/// Keplerian elements for the Moon and the major planets at J2000.
pub fn default_elements_table() -> ElementsTable {
    let moon = OrbitalElements {
        name: "Moon".to_string(),
        semimajor_axis_au: None,
        semimajor_axis_km: Some(384_400.0),
        orbital_eccentricity: 0.0549,
        orbital_inclination_degrees: 5.145,
        longitude_of_ascending_node_deg: 125.08,
        argument_of_perihelion_deg: 318.15,
        mean_anomaly_at_epoch_deg: 135.27,
        orbital_period_days: 27.321_661,
        color: Some("#c8c8d0".to_string()),
        magnitude: Some(-12.6),
    };

    ElementsTable {
        epoch_jd: J2000,
        planets: vec![
            moon,
            planet("Mercury", 0.387_098, 0.205_63, 7.005, 48.331, 29.124, 174.796, 87.969, "#b8b0a8", Some(-0.2)),
            planet("Venus", 0.723_332, 0.006_77, 3.395, 76.680, 54.884, 50.115, 224.701, "#f2e3bd", Some(-4.1)),
            planet("Earth", 1.000_000, 0.016_71, 0.000, -11.260_64, 114.207_83, 358.617, 365.256, "#6b93d6", None),
            planet("Mars", 1.523_679, 0.093_39, 1.850, 49.558, 286.502, 19.373, 686.980, "#e27b58", Some(0.7)),
            planet("Jupiter", 5.204_4, 0.048_9, 1.303, 100.464, 273.867, 20.020, 4_332.59, "#d8ca9d", Some(-2.2)),
            planet("Saturn", 9.582_6, 0.056_5, 2.485, 113.665, 339.392, 317.020, 10_759.22, "#ead6b8", Some(0.5)),
            planet("Uranus", 19.218_4, 0.045_7, 0.773, 74.006, 96.999, 142.239, 30_688.5, "#c1e3e3", Some(5.7)),
            planet("Neptune", 30.110, 0.011_3, 1.770, 131.784, 276.336, 256.228, 60_182.0, "#91afba", Some(7.8)),
        ],
    }
}

/// Fixed instant of the built-in reference snapshot.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn ref_body(
    id: &str,
    name: &str,
    ra_hours: f64,
    dec_degrees: f64,
    magnitude: Option<f64>,
    phase_fraction: Option<f64>,
) -> ReferenceBody {
    ReferenceBody {
        id: id.to_string(),
        name: name.to_string(),
        ra_hours,
        dec_degrees,
        magnitude,
        phase_fraction,
    }
}

/// Tabulated ground truth for [`reference_instant`].
pub fn default_reference_ephemeris() -> ReferenceEphemeris {
    ReferenceEphemeris {
        timestamp: reference_instant(),
        bodies: vec![
            ref_body("sun", "Sun", 4.633, 22.054, Some(-26.7), None),
            ref_body("moon", "Moon", 23.258, -8.903, Some(-11.2), Some(0.31)),
            ref_body("mercury", "Mercury", 3.427, 17.941, Some(-1.1), Some(0.88)),
            ref_body("venus", "Venus", 4.518, 21.982, Some(-3.9), Some(0.99)),
            ref_body("mars", "Mars", 0.798, 3.312, Some(1.1), Some(0.92)),
            ref_body("jupiter", "Jupiter", 3.686, 19.305, Some(-2.0), None),
            ref_body("saturn", "Saturn", 23.262, -7.581, Some(1.1), None),
            ref_body("uranus", "Uranus", 3.409, 18.557, Some(5.9), None),
            ref_body("neptune", "Neptune", 23.946, -1.977, Some(7.9), None),
        ],
    }
}

/// A tiny stand-in texture so the Moon mesh renders without an asset file.
///
/// 4x4 gray pixels, packed RGB.
pub fn placeholder_moon_texture() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 * 4 * 3);
    for i in 0..16u8 {
        let shade = 150 + (i % 4) * 8;
        bytes.extend_from_slice(&[shade, shade, shade + 4]);
    }
    bytes
}
