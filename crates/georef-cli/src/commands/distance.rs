//! Distance command - great-circle distance between two points.

use colored::Colorize;
use georef::{great_circle_distance_km, great_circle_distance_meters, range_valid};

pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<(), Box<dyn std::error::Error>> {
    for (lat, lon) in [(lat1, lon1), (lat2, lon2)] {
        if !range_valid(lat, lon) {
            return Err(format!("Coordinate out of range: {}, {}", lat, lon).into());
        }
    }

    println!(
        "{} km ({} m)",
        great_circle_distance_km(lat1, lon1, lat2, lon2).to_string().white().bold(),
        great_circle_distance_meters(lat1, lon1, lat2, lon2)
    );
    Ok(())
}
