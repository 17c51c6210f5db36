//! Planet renderer
//!
//! One point per non-Earth body in the elements table, positioned by the
//! reference snapshot when the instant matches it, otherwise by Keplerian
//! propagation followed by the documented approximate RA/Dec shortcut.

use chrono::{DateTime, Utc};

use super::{magnitude_point_size, parse_hex_color, SceneLabel, ScenePoint};
use crate::catalogs::SkyCatalogs;
use crate::constants::{CELESTIAL_SPHERE_RADIUS, MIN_PLANET_POINT_SIZE};
use crate::keplerlib::{
    ecliptic_to_approx_ra_dec, heliocentric_ecliptic_position, ra_dec_to_cartesian,
};
use crate::timelib::julian_date;

/// Labels sit slightly outside the planet point
const LABEL_OFFSET: f64 = 1.02;

/// The rendered planet layer.
#[derive(Debug, Clone, Default)]
pub struct PlanetField {
    pub points: Vec<ScenePoint>,
    pub labels: Vec<SceneLabel>,
}

/// Render all planets for `date`.
///
/// Earth, the Sun and the Moon are excluded (the latter two have their
/// own renderers); bodies whose position cannot be resolved are omitted.
pub fn render_planets(date: &DateTime<Utc>, catalogs: &SkyCatalogs) -> PlanetField {
    let world = crate::framelib::world_from_sky();
    let jd = julian_date(date);
    let at_reference = catalogs.reference.matches(date);

    let mut field = PlanetField::default();

    for elements in &catalogs.elements.planets {
        let lower = elements.name.to_ascii_lowercase();
        if matches!(lower.as_str(), "earth" | "sun" | "moon") {
            continue;
        }

        let mut name = elements.name.clone();
        let mut magnitude = elements.magnitude;

        let ra_dec = if at_reference {
            catalogs.reference.body(&lower).map(|reference| {
                name = reference.name.clone();
                if reference.magnitude.is_some() {
                    magnitude = reference.magnitude;
                }
                (reference.ra_hours, reference.dec_degrees)
            })
        } else {
            None
        };

        // Analytic path when no tabulated value applies
        let ra_dec = ra_dec.or_else(|| {
            let helio = heliocentric_ecliptic_position(elements, catalogs.elements.epoch_jd, jd)?;
            ecliptic_to_approx_ra_dec(&helio)
        });

        let Some((ra_hours, dec_degrees)) = ra_dec else {
            continue;
        };

        let position = world * ra_dec_to_cartesian(ra_hours, dec_degrees, CELESTIAL_SPHERE_RADIUS);
        let color = parse_hex_color(elements.color.as_deref());

        field.points.push(ScenePoint {
            id: lower,
            position,
            color,
            size: magnitude_point_size(magnitude, MIN_PLANET_POINT_SIZE),
        });
        field.labels.push(SceneLabel {
            text: name,
            position: position * LABEL_OFFSET,
            font_size: CELESTIAL_SPHERE_RADIUS / 70.0,
            color,
        });
    }

    field
}
