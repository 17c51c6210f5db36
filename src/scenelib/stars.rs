//! Star field renderer
//!
//! Turns the star catalog into sized, colored points on the celestial
//! sphere, with labels for the brightest few. The twinkle jitter is a
//! deterministic hash of position and time, so frames stay reproducible.

use nalgebra::Vector3;

use super::{magnitude_point_size, parse_hex_color, SceneLabel, ScenePoint};
use crate::catalogs::StarCatalog;
use crate::constants::{
    BRIGHT_STAR_LABEL_MAGNITUDE, CELESTIAL_SPHERE_RADIUS, MIN_STAR_POINT_SIZE,
    MIN_VISUAL_MAGNITUDE,
};

/// Label color for bright stars (warm off-white)
const STAR_LABEL_COLOR: [f32; 3] = [1.0, 1.0, 0.8];
/// Labels sit slightly outside the star point
const LABEL_OFFSET: f64 = 1.02;

/// The rendered star layer.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    pub points: Vec<ScenePoint>,
    pub labels: Vec<SceneLabel>,
}

/// Hash-based pseudo-random in [0, 1), matching the fragment-shader
/// one-liner the jitter was tuned against.
fn hash_random(x: f64, y: f64) -> f64 {
    ((x * 12.9898 + y * 78.233).sin() * 43_758.5453).fract().abs()
}

/// Twinkle factor in [0.6, 1.0), seeded by position and time.
///
/// Cosmetic size modulation only — never moves a star.
pub fn twinkle_factor(position: &Vector3<f64>, time_seconds: f64) -> f64 {
    0.6 + 0.4 * hash_random(position.x + time_seconds * 0.05, position.y)
}

/// Render the visible star field at `time_seconds` (for twinkle seeding).
///
/// Filters out the Sun's own catalog entry and everything fainter than
/// the visual cutoff; entries with no resolvable position are skipped.
pub fn render_stars(catalog: &StarCatalog, time_seconds: f64) -> StarField {
    let world = crate::framelib::world_from_sky();

    let mut field = StarField::default();
    let mut bright: Vec<(&str, f64, Vector3<f64>)> = Vec::new();

    for star in catalog.stars() {
        if star.id == "Sol" || star.mag >= MIN_VISUAL_MAGNITUDE {
            continue;
        }
        let Some(sky_position) = star.position(CELESTIAL_SPHERE_RADIUS) else {
            continue;
        };
        let position = world * sky_position;

        let size = magnitude_point_size(Some(star.mag), MIN_STAR_POINT_SIZE)
            * twinkle_factor(&position, time_seconds);

        field.points.push(ScenePoint {
            id: star.id.clone(),
            position,
            color: parse_hex_color(star.atmospheric_color.as_deref()),
            size,
        });

        if star.mag < BRIGHT_STAR_LABEL_MAGNITUDE && !star.id.is_empty() {
            bright.push((&star.id, star.mag, position));
        }
    }

    // Brightest first; one label per name
    bright.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut labeled = std::collections::HashSet::new();
    for (id, _, position) in bright {
        if !labeled.insert(id.to_string()) {
            continue;
        }
        field.labels.push(SceneLabel {
            text: id.to_string(),
            position: position * LABEL_OFFSET,
            font_size: CELESTIAL_SPHERE_RADIUS / 150.0,
            color: STAR_LABEL_COLOR,
        });
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::{StarCatalog, StarEntry};
    use approx::assert_relative_eq;

    fn entry(id: &str, mag: f64, ra: Option<f64>, dec: Option<f64>) -> StarEntry {
        StarEntry {
            id: id.to_string(),
            mag,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: None,
            atmospheric_color: Some("#e0e8ff".to_string()),
            temperature: None,
            spect: None,
            hip: None,
            con: None,
            ra,
            dec,
        }
    }

    #[test]
    fn test_sol_and_faint_stars_excluded() {
        let catalog = StarCatalog::from_entries(vec![
            entry("Sol", -26.7, Some(0.0), Some(0.0)),
            entry("Visible", 3.0, Some(1.0), Some(10.0)),
            entry("TooFaint", 6.9, Some(2.0), Some(20.0)),
        ]);
        let field = render_stars(&catalog, 0.0);
        assert_eq!(field.points.len(), 1);
        assert_eq!(field.points[0].id, "Visible");
    }

    #[test]
    fn test_unresolvable_star_skipped_silently() {
        let catalog = StarCatalog::from_entries(vec![
            entry("NoPosition", 1.0, None, None),
            entry("Fine", 1.0, Some(3.0), Some(-5.0)),
        ]);
        let field = render_stars(&catalog, 0.0);
        assert_eq!(field.points.len(), 1);
        assert_eq!(field.points[0].id, "Fine");
    }

    #[test]
    fn test_points_lie_on_celestial_sphere() {
        let catalog = StarCatalog::from_entries(vec![entry("a", 2.0, Some(14.0), Some(40.0))]);
        let field = render_stars(&catalog, 0.0);
        assert_relative_eq!(
            field.points[0].position.norm(),
            CELESTIAL_SPHERE_RADIUS,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_brighter_stars_render_larger() {
        let catalog = StarCatalog::from_entries(vec![
            entry("bright", -1.0, Some(0.0), Some(0.0)),
            entry("faint", 5.0, Some(0.0), Some(0.0)),
        ]);
        let field = render_stars(&catalog, 0.0);
        let bright = field.points.iter().find(|p| p.id == "bright").unwrap();
        let faint = field.points.iter().find(|p| p.id == "faint").unwrap();
        assert!(bright.size > faint.size);
    }

    #[test]
    fn test_labels_only_for_bright_stars() {
        let catalog = StarCatalog::from_entries(vec![
            entry("Sirius", -1.46, Some(6.75), Some(-16.7)),
            entry("Dim", 4.5, Some(1.0), Some(1.0)),
        ]);
        let field = render_stars(&catalog, 0.0);
        assert_eq!(field.labels.len(), 1);
        assert_eq!(field.labels[0].text, "Sirius");
        // Label floats just off the sphere
        assert!(field.labels[0].position.norm() > CELESTIAL_SPHERE_RADIUS);
    }

    #[test]
    fn test_duplicate_names_labeled_once() {
        let catalog = StarCatalog::from_entries(vec![
            entry("Twin", 0.5, Some(1.0), Some(1.0)),
            entry("Twin", 0.7, Some(2.0), Some(2.0)),
        ]);
        let field = render_stars(&catalog, 0.0);
        assert_eq!(field.labels.len(), 1);
    }

    #[test]
    fn test_twinkle_bounded_and_time_varying() {
        let pos = Vector3::new(30.0, 40.0, 10.0);
        let mut saw_change = false;
        let base = twinkle_factor(&pos, 0.0);
        for step in 1..50 {
            let f = twinkle_factor(&pos, step as f64);
            assert!((0.6..1.0).contains(&f), "twinkle out of range: {f}");
            if (f - base).abs() > 1e-6 {
                saw_change = true;
            }
        }
        assert!(saw_change, "twinkle should vary with time");
    }

    #[test]
    fn test_twinkle_never_moves_stars() {
        let catalog = StarCatalog::from_entries(vec![entry("a", 2.0, Some(14.0), Some(40.0))]);
        let early = render_stars(&catalog, 0.0);
        let late = render_stars(&catalog, 1000.0);
        assert_eq!(early.points[0].position, late.points[0].position);
    }
}
