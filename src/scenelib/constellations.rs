//! Constellation figure renderer
//!
//! Resolves each figure's Hipparcos polylines through the star catalog
//! into connected world-frame line segments. Unresolvable ids drop only
//! their own segments — one missing star never erases a figure, and a
//! figure that resolves nothing is omitted rather than reported.

use nalgebra::Vector3;

use super::ConstellationFigure;
use crate::catalogs::{ConstellationEntry, StarCatalog};
use crate::constants::CELESTIAL_SPHERE_RADIUS;

/// Label anchors sit slightly outside the figure centroid
const LABEL_OFFSET: f64 = 1.05;

fn star_position(catalog: &StarCatalog, hip: u32) -> Option<Vector3<f64>> {
    let sky = catalog.by_hip(hip)?.position(CELESTIAL_SPHERE_RADIUS)?;
    Some(crate::framelib::world_from_sky() * sky)
}

/// Render every constellation figure that resolves at least one segment.
pub fn render_constellations(
    catalog: &StarCatalog,
    definitions: &[ConstellationEntry],
) -> Vec<ConstellationFigure> {
    definitions
        .iter()
        .filter_map(|definition| render_figure(catalog, definition))
        .collect()
}

fn render_figure(
    catalog: &StarCatalog,
    definition: &ConstellationEntry,
) -> Option<ConstellationFigure> {
    let mut segments = Vec::new();
    let mut figure_points: Vec<Vector3<f64>> = Vec::new();

    for polyline in &definition.lines {
        for pair in polyline.windows(2) {
            let (Some(a), Some(b)) = (star_position(catalog, pair[0]), star_position(catalog, pair[1]))
            else {
                continue;
            };
            figure_points.push(a);
            figure_points.push(b);
            segments.push([a, b]);
        }
    }

    if segments.is_empty() {
        return None;
    }

    let centroid = figure_points.iter().sum::<Vector3<f64>>() / figure_points.len() as f64;

    Some(ConstellationFigure {
        name: definition.display_name().to_string(),
        segments,
        label_position: centroid * LABEL_OFFSET,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::{CommonName, StarEntry};
    use approx::assert_relative_eq;

    fn star(hip: u32, ra: f64, dec: f64) -> StarEntry {
        StarEntry {
            id: format!("HIP {hip}"),
            mag: 2.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: None,
            atmospheric_color: None,
            temperature: None,
            spect: None,
            hip: Some(hip),
            con: None,
            ra: Some(ra),
            dec: Some(dec),
        }
    }

    fn definition(lines: Vec<Vec<u32>>) -> ConstellationEntry {
        ConstellationEntry {
            id: "CON test".to_string(),
            lines,
            common_name: Some(CommonName {
                english: Some("Test".to_string()),
                native: None,
            }),
        }
    }

    #[test]
    fn test_two_star_polyline_yields_one_segment() {
        let catalog = StarCatalog::from_entries(vec![star(1, 0.0, 0.0), star(2, 6.0, 0.0)]);
        let figures = render_constellations(&catalog, &[definition(vec![vec![1, 2]])]);
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].segments.len(), 1);

        let expected_a = star_position(&catalog, 1).unwrap();
        let expected_b = star_position(&catalog, 2).unwrap();
        assert_relative_eq!(figures[0].segments[0][0], expected_a, epsilon = 1e-12);
        assert_relative_eq!(figures[0].segments[0][1], expected_b, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_hip_drops_segment_without_error() {
        let catalog = StarCatalog::from_entries(vec![star(1, 0.0, 0.0), star(2, 6.0, 0.0)]);
        // [1, 99] resolves nothing; the whole figure disappears quietly
        let figures = render_constellations(&catalog, &[definition(vec![vec![1, 99]])]);
        assert!(figures.is_empty());
    }

    #[test]
    fn test_missing_star_breaks_only_its_segments() {
        let catalog =
            StarCatalog::from_entries(vec![star(1, 0.0, 0.0), star(2, 6.0, 0.0), star(3, 12.0, 10.0)]);
        // Middle id unknown: 1-99 and 99-2 drop, 2-3 survives
        let figures = render_constellations(&catalog, &[definition(vec![vec![1, 99, 2, 3]])]);
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].segments.len(), 1);
    }

    #[test]
    fn test_polyline_chain_segment_count() {
        let catalog = StarCatalog::from_entries(vec![
            star(1, 0.0, 0.0),
            star(2, 2.0, 5.0),
            star(3, 4.0, 10.0),
            star(4, 6.0, 15.0),
        ]);
        let figures = render_constellations(&catalog, &[definition(vec![vec![1, 2, 3, 4]])]);
        assert_eq!(figures[0].segments.len(), 3);
    }

    #[test]
    fn test_label_anchor_outside_centroid() {
        let catalog = StarCatalog::from_entries(vec![star(1, 0.0, 30.0), star(2, 1.0, 40.0)]);
        let figures = render_constellations(&catalog, &[definition(vec![vec![1, 2]])]);
        let figure = &figures[0];

        let centroid = (figure.segments[0][0] + figure.segments[0][1]) / 2.0;
        assert_relative_eq!(
            figure.label_position.norm(),
            centroid.norm() * LABEL_OFFSET,
            epsilon = 1e-9
        );
        assert_eq!(figure.name, "Test");
    }

    #[test]
    fn test_empty_definition_list() {
        let catalog = StarCatalog::from_entries(vec![star(1, 0.0, 0.0)]);
        assert!(render_constellations(&catalog, &[]).is_empty());
    }
}
