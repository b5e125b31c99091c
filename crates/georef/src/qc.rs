//! `GeorefQc`: runs every validation and amendment over records and files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::amendment::{country_code_standardized, AmendmentEngine, AmendmentOutcome, AmendmentState, EngineConfig};
use crate::error::{GeorefError, Result};
use crate::geocode::{GeoLocateConfig, GeocodeCacheConfig, GeocodeOracle};
use crate::input::{OccurrenceReader, ReaderConfig, SourceMetadata};
use crate::record::OccurrenceRecord;
use crate::region::RegionOracle;
use crate::validation::{
    coordinate_in_range, coordinates_not_zero, country_code_standard, country_countrycode_consistent,
    country_found, country_is_consistent, data_generalizations_not_empty, geodetic_datum_known,
    max_depth_in_range, state_province_found, state_province_is_consistent,
    water_body_is_consistent, IssueOutcome, ValidationOutcome, DEFAULT_MAX_DEPTH_METERS,
    DEFAULT_MIN_DEPTH_METERS,
};

/// Configuration for a QC run, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcConfig {
    /// Amendment engine tunables.
    pub engine: EngineConfig,
    /// Remote geocoder settings.
    pub geolocate: GeoLocateConfig,
    /// Geocoder cache sizing.
    pub cache: GeocodeCacheConfig,
    /// Shallowest accepted maximum depth (None = unbounded).
    pub min_depth_meters: Option<f64>,
    /// Deepest accepted maximum depth (None = unbounded).
    pub max_depth_meters: Option<f64>,
    /// Maximum records to read from a file (None = all).
    pub max_rows: Option<usize>,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            geolocate: GeoLocateConfig::default(),
            cache: GeocodeCacheConfig::default(),
            min_depth_meters: Some(DEFAULT_MIN_DEPTH_METERS),
            max_depth_meters: Some(DEFAULT_MAX_DEPTH_METERS),
            max_rows: None,
        }
    }
}

impl QcConfig {
    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GeorefError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| GeorefError::Config(format!("invalid config {}: {}", path.display(), e)))
    }
}

/// Every outcome for one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    /// Occurrence ID or row label.
    pub label: String,
    /// Validation outcomes keyed by rule name, in run order.
    pub validations: IndexMap<String, ValidationOutcome>,
    /// Issue check outcomes keyed by check name, in run order.
    pub issues: IndexMap<String, IssueOutcome>,
    /// Amendment outcomes keyed by amendment name, in run order.
    pub amendments: IndexMap<String, AmendmentOutcome>,
}

impl RecordReport {
    /// Whether any validation failed, any issue check flagged a potential
    /// problem, or any amendment proposed or could not make a correction.
    pub fn has_issues(&self) -> bool {
        self.validations.values().any(ValidationOutcome::is_not_compliant)
            || self.issues.values().any(IssueOutcome::is_potential_problem)
            || self.amendments.values().any(|a| {
                a.state().proposes_changes() || a.state() == AmendmentState::NotAmended
            })
    }

    /// Amendment outcomes that propose changes.
    pub fn proposals(&self) -> impl Iterator<Item = (&String, &AmendmentOutcome)> {
        self.amendments
            .iter()
            .filter(|(_, outcome)| outcome.state().proposes_changes())
    }
}

/// Counts of outcome states per rule or amendment.
pub type StateCounts = IndexMap<String, IndexMap<String, usize>>;

/// Summary over a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub records_with_issues: usize,
    pub proposed_changes: usize,
    pub validation_states: StateCounts,
    pub issue_states: StateCounts,
    pub amendment_states: StateCounts,
}

impl BatchSummary {
    fn from_reports(reports: &[RecordReport]) -> Self {
        let mut summary = BatchSummary {
            total_records: reports.len(),
            ..Default::default()
        };

        for report in reports {
            if report.has_issues() {
                summary.records_with_issues += 1;
            }
            summary.proposed_changes += report.proposals().count();
            for (rule, outcome) in &report.validations {
                *summary
                    .validation_states
                    .entry(rule.clone())
                    .or_default()
                    .entry(outcome.state().label().to_string())
                    .or_default() += 1;
            }
            for (name, outcome) in &report.issues {
                *summary
                    .issue_states
                    .entry(name.clone())
                    .or_default()
                    .entry(outcome.issue().label().to_string())
                    .or_default() += 1;
            }
            for (name, outcome) in &report.amendments {
                *summary
                    .amendment_states
                    .entry(name.clone())
                    .or_default()
                    .entry(outcome.state().label().to_string())
                    .or_default() += 1;
            }
        }

        summary
    }
}

/// The result of checking a batch of records.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Source file, if the batch came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub assessed_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub records: Vec<RecordReport>,
}

/// Georeference quality control over occurrence records.
///
/// Holds the region oracle, the geocoder (through the amendment engine) and
/// the run configuration. `GeorefQc` is `Send + Sync`; share it across
/// threads to check records in parallel.
pub struct GeorefQc {
    config: QcConfig,
    regions: Arc<dyn RegionOracle>,
    engine: AmendmentEngine,
}

impl GeorefQc {
    /// Create a QC runner with the default configuration.
    pub fn new(regions: impl RegionOracle + 'static, geocoder: impl GeocodeOracle + 'static) -> Self {
        let regions: Arc<dyn RegionOracle> = Arc::new(regions);
        let engine = AmendmentEngine::from_shared(regions.clone(), Arc::new(geocoder));
        Self {
            config: QcConfig::default(),
            regions,
            engine,
        }
    }

    pub fn with_config(mut self, config: QcConfig) -> Self {
        self.engine = self.engine.with_config(config.engine.clone());
        self.config = config;
        self
    }

    pub fn config(&self) -> &QcConfig {
        &self.config
    }

    pub fn engine(&self) -> &AmendmentEngine {
        &self.engine
    }

    /// Run every validation and amendment on a record.
    pub fn assess(&self, record: &OccurrenceRecord, row: usize) -> RecordReport {
        let regions = self.regions.as_ref();

        let mut validations = IndexMap::new();
        validations.insert("coordinate_in_range".to_string(), coordinate_in_range(record));
        validations.insert("coordinates_not_zero".to_string(), coordinates_not_zero(record));
        validations.insert("country_found".to_string(), country_found(record, regions));
        validations.insert("state_province_found".to_string(), state_province_found(record, regions));
        validations.insert("country_is_consistent".to_string(), country_is_consistent(record, regions));
        validations.insert(
            "state_province_is_consistent".to_string(),
            state_province_is_consistent(record, regions),
        );
        validations.insert("water_body_is_consistent".to_string(), water_body_is_consistent(record, regions));
        validations.insert("country_code_standard".to_string(), country_code_standard(record));
        validations.insert(
            "country_countrycode_consistent".to_string(),
            country_countrycode_consistent(record),
        );
        validations.insert("geodetic_datum_known".to_string(), geodetic_datum_known(record));
        validations.insert(
            "max_depth_in_range".to_string(),
            max_depth_in_range(record, self.config.min_depth_meters, self.config.max_depth_meters),
        );

        let mut issues = IndexMap::new();
        issues.insert(
            "data_generalizations_not_empty".to_string(),
            data_generalizations_not_empty(record),
        );

        let mut amendments = IndexMap::new();
        amendments.insert("fill_missing".to_string(), self.engine.fill_missing(record));
        // Transposition only applies once both coordinates are present.
        if record.latitude_text().is_some() && record.longitude_text().is_some() {
            amendments.insert(
                "coordinate_transposition".to_string(),
                self.engine.coordinate_transposition(record),
            );
        }
        amendments.insert("country_code_standardized".to_string(), country_code_standardized(record));
        amendments.insert(
            "country_code_from_coordinates".to_string(),
            self.engine.country_code_from_coordinates(record),
        );

        let report = RecordReport {
            label: record.label(row),
            validations,
            issues,
            amendments,
        };
        debug!(record = %report.label, issues = report.has_issues(), "assessed record");
        report
    }

    /// Check a batch of records.
    pub fn assess_all(&self, records: &[OccurrenceRecord]) -> BatchReport {
        let reports: Vec<RecordReport> = records
            .iter()
            .enumerate()
            .map(|(row, record)| self.assess(record, row))
            .collect();
        let summary = BatchSummary::from_reports(&reports);

        BatchReport {
            source: None,
            assessed_at: Utc::now(),
            summary,
            records: reports,
        }
    }

    /// Read a CSV/TSV occurrence file and check every record.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<BatchReport> {
        let reader = OccurrenceReader::with_config(ReaderConfig {
            delimiter: None,
            max_rows: self.config.max_rows,
        });
        let (records, source) = reader.read_file(path)?;

        let mut report = self.assess_all(&records);
        info!(
            file = %source.file,
            records = report.summary.total_records,
            with_issues = report.summary.records_with_issues,
            "checked occurrence file"
        );
        report.source = Some(source);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{GeocodeCandidate, StaticGeocoder};
    use crate::region::{Polygon, PolygonRegionOracle};
    use std::io::Write;

    fn qc() -> GeorefQc {
        let regions = PolygonRegionOracle::new()
            .with_country("Uganda", vec![Polygon::rectangle(-1.5, 29.5, 4.2, 35.0)])
            .with_subregion("Uganda", "Central", vec![Polygon::rectangle(-1.0, 31.0, 1.5, 33.0)])
            .with_land(vec![Polygon::rectangle(-35.0, -20.0, 37.0, 52.0)]);
        let geocoder = StaticGeocoder::new(vec![GeocodeCandidate::new(1.37, 32.40, 90.0, "KAMPALA")]);
        GeorefQc::new(regions, geocoder)
    }

    #[test]
    fn test_assess_consistent_record() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_country_code("UG")
            .with_state_province("Central")
            .with_coordinates("1.37", "32.29");
        let report = qc().assess(&record, 0);

        assert_eq!(report.label, "row 1");
        assert!(report.validations["coordinate_in_range"].is_compliant());
        assert!(report.validations["country_is_consistent"].is_compliant());
        assert!(report.validations["state_province_is_consistent"].is_compliant());
        assert_eq!(report.amendments["fill_missing"].state(), AmendmentState::NoChange);
        assert_eq!(
            report.amendments["coordinate_transposition"].state(),
            AmendmentState::NoChange
        );
        assert!(!report.has_issues());
    }

    #[test]
    fn test_assess_skips_transposition_without_coordinates() {
        let record = OccurrenceRecord::new().with_country("Uganda").with_longitude("32.29");
        let report = qc().assess(&record, 3);
        assert!(!report.amendments.contains_key("coordinate_transposition"));
        assert_eq!(report.amendments["fill_missing"].state(), AmendmentState::FilledIn);
        assert!(report.has_issues());
        assert_eq!(report.proposals().count(), 1);
    }

    #[test]
    fn test_assess_fills_country_code() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_state_province("Central")
            .with_coordinates("1.37", "32.29");
        let report = qc().assess(&record, 0);

        let outcome = &report.amendments["country_code_from_coordinates"];
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        assert_eq!(outcome.change(crate::amendment::COUNTRY_CODE), Some("UG"));
        assert!(report.validations["state_province_found"].is_compliant());
        assert_eq!(
            report.validations["country_countrycode_consistent"].state(),
            crate::validation::ValidationState::InternalPrerequisitesNotMet
        );
        assert_eq!(report.proposals().count(), 1);
    }

    #[test]
    fn test_assess_flags_generalized_record() {
        let record = OccurrenceRecord::new()
            .with_country("Uganda")
            .with_country_code("UG")
            .with_state_province("Central")
            .with_coordinates("1.4", "32.3")
            .with_data_generalizations("Coordinates rounded to 0.1 degree");
        let report = qc().assess(&record, 0);

        assert!(report.issues["data_generalizations_not_empty"].is_potential_problem());
        assert!(report.validations["country_countrycode_consistent"].is_compliant());
        assert!(report.has_issues());
        assert_eq!(report.proposals().count(), 0);
    }

    #[test]
    fn test_batch_summary() {
        let records = vec![
            OccurrenceRecord::new().with_country("Uganda").with_coordinates("1.37", "32.29"),
            OccurrenceRecord::new().with_coordinates("91", "0"),
        ];
        let report = qc().assess_all(&records);
        assert_eq!(report.summary.total_records, 2);
        assert_eq!(
            report.summary.validation_states["coordinate_in_range"]["COMPLIANT"],
            1
        );
        assert_eq!(
            report.summary.validation_states["coordinate_in_range"]["NOT_COMPLIANT"],
            1
        );
        assert_eq!(
            report.summary.issue_states["data_generalizations_not_empty"]["NOT_PROBLEM"],
            2
        );
        assert_eq!(
            report.summary.amendment_states["country_code_from_coordinates"]["FILLED_IN"],
            1
        );
    }

    #[test]
    fn test_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"engine": {{"threshold_km": 5.0}}, "max_depth_meters": null}}"#).unwrap();

        let config = QcConfig::load(file.path()).unwrap();
        assert_eq!(config.engine.threshold_km, 5.0);
        assert_eq!(config.engine.min_confidence, 80.0);
        assert_eq!(config.max_depth_meters, None);
        assert_eq!(config.min_depth_meters, Some(0.0));
    }

    #[test]
    fn test_config_load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(QcConfig::load(file.path()), Err(GeorefError::Config(_))));
    }

    #[test]
    fn test_qc_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeorefQc>();
    }
}
