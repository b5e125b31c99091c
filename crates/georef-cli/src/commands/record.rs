//! Record command - check a single record given as flags.

use georef::OccurrenceRecord;

use crate::cli::{DataOptions, RecordArgs};

pub fn run(args: RecordArgs, data: &DataOptions) -> Result<(), Box<dyn std::error::Error>> {
    let qc = super::build_qc(data)?;
    let json = args.json;
    let record = to_record(args);

    let report = qc.assess(&record, 0);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        super::print_record(&report, true);
    }

    Ok(())
}

fn to_record(args: RecordArgs) -> OccurrenceRecord {
    let mut record = OccurrenceRecord::new();
    if let Some(v) = args.country {
        record = record.with_country(v);
    }
    if let Some(v) = args.country_code {
        record = record.with_country_code(v);
    }
    if let Some(v) = args.state_province {
        record = record.with_state_province(v);
    }
    if let Some(v) = args.county {
        record = record.with_county(v);
    }
    if let Some(v) = args.water_body {
        record = record.with_water_body(v);
    }
    if let Some(v) = args.locality {
        record = record.with_locality(v);
    }
    if let Some(v) = args.lat {
        record = record.with_latitude(v);
    }
    if let Some(v) = args.lon {
        record = record.with_longitude(v);
    }
    if let Some(v) = args.geodetic_datum {
        record = record.with_geodetic_datum(v);
    }
    if let Some(v) = args.data_generalizations {
        record = record.with_data_generalizations(v);
    }
    record
}
