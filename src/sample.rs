//! Reference input files for `--example`.
//!
//! Writes the same wells as CSV and as JSON using the camelCase field
//! names. The rows cover the awkward cases: an apostrophe, an embedded
//! comma, an embedded double quote, a lower-case meridian, missing
//! optional fields and negative longitudes. Both files import to the same
//! INSERT statements.

use crate::error::ImportError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the CSV example
pub const EXAMPLE_CSV: &str = "example-wells.csv";
/// File name of the JSON example
pub const EXAMPLE_JSON: &str = "example-wells.json";

/// One example row, serialized identically to CSV and JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleWell {
    pub api_number: &'static str,
    pub well_name: Option<&'static str>,
    pub well_number: Option<&'static str>,
    pub county: Option<&'static str>,
    pub operator: Option<&'static str>,
    pub well_type: Option<&'static str>,
    pub well_status: Option<&'static str>,
    pub section: u8,
    pub township: &'static str,
    pub range: &'static str,
    pub meridian: Option<&'static str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub spud_date: Option<&'static str>,
    pub completion_date: Option<&'static str>,
}

/// The example wells
pub fn example_wells() -> Vec<SampleWell> {
    vec![
        SampleWell {
            api_number: "35-051-24153",
            well_name: Some("Smith 1-12H"),
            well_number: Some("1-12H"),
            county: Some("Grady"),
            operator: Some("Red Fork Energy"),
            well_type: Some("Oil"),
            well_status: Some("Producing"),
            section: 12,
            township: "9N",
            range: "5W",
            meridian: Some("IM"),
            latitude: Some(35.2514),
            longitude: Some(-97.7362),
            spud_date: Some("2019-05-14"),
            completion_date: Some("2019-08-02"),
        },
        SampleWell {
            api_number: "35-017-25011",
            well_name: Some("O'Brien Unit 3"),
            well_number: Some("3"),
            county: Some("Canadian"),
            operator: Some("Prairie Rock Operating, LLC"),
            well_type: Some("Gas"),
            well_status: Some("Shut-In"),
            section: 36,
            township: "12N",
            range: "8W",
            meridian: Some("IM"),
            latitude: Some(35.4821),
            longitude: Some(-98.0317),
            spud_date: Some("2017-11-30"),
            completion_date: None,
        },
        SampleWell {
            api_number: "35-007-20417",
            well_name: Some("Beaver \"Twin\" 22-1"),
            well_number: None,
            county: Some("Beaver"),
            operator: Some("High Plains Petroleum"),
            well_type: Some("Oil"),
            well_status: Some("Plugged"),
            section: 22,
            township: "3N",
            range: "24ECM",
            meridian: Some("cm"),
            latitude: Some(36.7402),
            longitude: Some(-100.5125),
            spud_date: Some("1984-03-09"),
            completion_date: Some("1984-06-21"),
        },
        SampleWell {
            api_number: "35-109-22876",
            well_name: Some("Deer Creek 1"),
            well_number: Some("1"),
            county: Some("Oklahoma"),
            operator: None,
            well_type: None,
            well_status: Some("Permitted"),
            section: 1,
            township: "14N",
            range: "4W",
            meridian: None,
            latitude: None,
            longitude: None,
            spud_date: None,
            completion_date: None,
        },
    ]
}

/// Render the example wells as CSV text.
pub fn example_csv() -> Result<String, ImportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for well in example_wells() {
        wtr.serialize(well).map_err(ImportError::ExampleCsv)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ImportError::ExampleCsv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render the example wells as a pretty-printed JSON array.
pub fn example_json() -> Result<String, ImportError> {
    let mut text = serde_json::to_string_pretty(&example_wells())?;
    text.push('\n');
    Ok(text)
}

/// Write both example files into `dir`, creating it if needed.
pub fn write_examples(dir: &Path) -> Result<(PathBuf, PathBuf), ImportError> {
    fs::create_dir_all(dir).map_err(|e| ImportError::OutputDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let csv_path = dir.join(EXAMPLE_CSV);
    let json_path = dir.join(EXAMPLE_JSON);

    for (path, contents) in [(&csv_path, example_csv()?), (&json_path, example_json()?)] {
        fs::write(path, contents).map_err(|e| ImportError::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(file = %path.display(), "Wrote example file");
    }

    Ok((csv_path, json_path))
}
