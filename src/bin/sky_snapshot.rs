//! Tool to compute and print one sky frame
//!
//! Loads the catalog bundle (falling back to the built-in synthetic data),
//! computes a frame for the given instant and observer, and prints a
//! summary of what the renderer would be handed.

use chrono::{DateTime, Utc};
use clap::Parser;

use nightsky::keplerlib::cartesian_to_ra_dec;
use nightsky::{compute_frame, Loader, LookMode, ObserverState};

#[derive(Parser)]
#[command(name = "sky_snapshot", about = "Compute one night-sky frame and print a summary")]
struct Args {
    /// UTC instant to render, RFC 3339 (default: now)
    #[arg(long)]
    date: Option<DateTime<Utc>>,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 0.0)]
    lat: f64,

    /// Observer longitude in degrees
    #[arg(long, default_value_t = 0.0)]
    lon: f64,

    /// Directory holding the catalog JSON files
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Bias the camera toward the Sun or Moon instead of the zenith
    #[arg(long)]
    prefer_bodies: bool,
}

fn format_radec(position: &nalgebra::Vector3<f64>, world_from_sky: &nalgebra::UnitQuaternion<f64>) -> String {
    let sky = world_from_sky.inverse() * position;
    match cartesian_to_ra_dec(&sky) {
        Some((ra, dec)) => format!("RA {ra:6.3}h Dec {dec:+7.3}°"),
        None => "unresolved".to_string(),
    }
}

fn main() {
    let args = Args::parse();
    let date = args.date.unwrap_or_else(Utc::now);

    let mut loader = Loader::new();
    if let Some(dir) = &args.data_dir {
        loader = loader.with_data_dir(dir);
    }
    let catalogs = loader.load_catalogs();

    let observer = ObserverState::new(args.lat, args.lon, date);
    let mode = if args.prefer_bodies {
        LookMode::PreferBodies
    } else {
        LookMode::Zenith
    };
    let frame = compute_frame(&observer, &catalogs, mode);

    println!("Sky frame for {date} at ({:.4}°, {:.4}°)", args.lat, args.lon);
    println!("  Julian date: {:.6}", frame.jd);
    println!("  Stars: {} points, {} labels", frame.stars.len(), frame.star_labels.len());
    println!(
        "  Constellations: {} figures, {} segments",
        frame.constellations.len(),
        frame.constellations.iter().map(|c| c.segments.len()).sum::<usize>()
    );

    println!("  Sun:  {}", format_radec(&frame.sun.position, &frame.world_from_sky));
    match &frame.moon {
        Some(moon) => println!("  Moon: {}", format_radec(&moon.position, &frame.world_from_sky)),
        None => println!("  Moon: omitted (no texture)"),
    }
    for (point, label) in frame.planets.iter().zip(&frame.planet_labels) {
        println!(
            "  {:8} {}  size {:.2}",
            label.text,
            format_radec(&point.position, &frame.world_from_sky),
            point.size
        );
    }

    let camera = &frame.camera;
    println!(
        "  Camera: pos ({:.2}, {:.2}, {:.2})  up ({:.3}, {:.3}, {:.3})  look ({:.2}, {:.2}, {:.2})",
        camera.position.x, camera.position.y, camera.position.z,
        camera.up.x, camera.up.y, camera.up.z,
        camera.look_at.x, camera.look_at.y, camera.look_at.z,
    );
}
