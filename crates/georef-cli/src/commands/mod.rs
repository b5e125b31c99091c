//! CLI command implementations.

pub mod check;
pub mod distance;
pub mod record;

use colored::Colorize;
use georef::{
    AmendmentState, CachedGeocoder, GeoLocateClient, GeorefQc, PolygonRegionOracle, QcConfig,
    RecordReport, StaticGeocoder, ValidationState,
};

use tracing::info;

use crate::cli::DataOptions;

/// Build a QC runner from boundary files, config and flags.
pub fn build_qc(options: &DataOptions) -> Result<GeorefQc, Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => QcConfig::load(path)?,
        None => QcConfig::default(),
    };
    if let Some(threshold) = options.threshold_km {
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(format!("--threshold-km must be positive, got {}", threshold).into());
        }
        config.engine.threshold_km = threshold;
    }

    let mut regions = PolygonRegionOracle::new();
    if let Some(path) = &options.regions {
        regions = regions.load_countries_geojson(path)?;
    }
    if let Some(path) = &options.subregions {
        regions = regions.load_subregions_geojson(path)?;
    }
    if let Some(path) = &options.land {
        regions = regions.load_land_geojson(path)?;
    }

    info!(
        countries = regions.country_count(),
        subregions = regions.subregion_count(),
        land = regions.has_land_data(),
        "loaded boundary data"
    );

    let qc = if options.offline {
        GeorefQc::new(regions, StaticGeocoder::default())
    } else {
        let client = GeoLocateClient::with_config(config.geolocate.clone())?;
        GeorefQc::new(regions, CachedGeocoder::with_config(client, config.cache.clone()))
    };
    Ok(qc.with_config(config))
}

/// Print one record's failing validations, flagged issues and amendment
/// proposals.
///
/// With `all`, every outcome is printed.
pub fn print_record(report: &RecordReport, all: bool) {
    println!("{}", report.label.white().bold());

    for (rule, outcome) in &report.validations {
        let state = match outcome.state() {
            ValidationState::RunHasResult(_) if outcome.is_compliant() => {
                if !all {
                    continue;
                }
                outcome.state().label().green()
            }
            ValidationState::RunHasResult(_) => outcome.state().label().red(),
            _ if !all => continue,
            other => other.label().yellow(),
        };
        println!("  {:30} {}", rule, state);
        for comment in outcome.comments() {
            println!("  {:30}   {}", "", comment.dimmed());
        }
    }

    for (name, outcome) in &report.issues {
        if !all && !outcome.is_potential_problem() {
            continue;
        }
        let label = if outcome.is_potential_problem() {
            outcome.issue().label().yellow()
        } else {
            outcome.issue().label().green()
        };
        println!("  {:30} {}", name, label);
        for comment in outcome.comments() {
            println!("  {:30}   {}", "", comment.dimmed());
        }
    }

    for (name, outcome) in &report.amendments {
        let state = outcome.state();
        let label = match state {
            AmendmentState::FilledIn | AmendmentState::Transposed | AmendmentState::Amended => {
                state.label().cyan()
            }
            AmendmentState::NotAmended => state.label().red(),
            _ if !all => continue,
            _ => state.label().yellow(),
        };
        println!("  {:30} {}", name, label);
        for (field, value) in outcome.changes() {
            println!("  {:30}   {} {} {}", "", field, "->".cyan(), value.white().bold());
        }
        for comment in outcome.comments() {
            println!("  {:30}   {}", "", comment.dimmed());
        }
    }
}
