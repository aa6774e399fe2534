// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Polars dataframe view of the location table.
//!
//! Exposes the grouped records as a `DataFrame` so the table can be
//! inspected interactively or exported to Arrow IPC for downstream
//! analysis.

use crate::{Error, instance::InstanceTable};
use polars::prelude::*;

/// Build the location dataframe from a grouped instance table.
///
/// # Schema
///
/// - `filename`: Image filename (String)
/// - `lat`: Decimal-degree latitude (Float64)
/// - `lon`: Decimal-degree longitude (Float64)
/// - `label`: Species label derived from the filename (String)
/// - `instance`: Dense plant instance id (UInt32)
pub fn locations_dataframe(table: &InstanceTable) -> Result<DataFrame, Error> {
    let records = table.records();

    let filenames: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    let instances: Vec<u32> = table.ids().to_vec();

    let df = DataFrame::new(vec![
        Series::new("filename".into(), filenames).into(),
        Series::new("lat".into(), latitudes).into(),
        Series::new("lon".into(), longitudes).into(),
        Series::new("label".into(), labels).into(),
        Series::new("instance".into(), instances).into(),
    ])?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::LocatedRecord;

    fn record(filename: &str, latitude: f64, longitude: f64, label: &str) -> LocatedRecord {
        LocatedRecord {
            filename: filename.to_string(),
            latitude,
            longitude,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_dataframe_schema_and_ids() {
        let table = InstanceTable::from_records(vec![
            record("redclover1.jpg", 39.74, -105.24, "redclover"),
            record("redclover2.jpg", 39.74, -105.24, "redclover"),
            record("thistle1.jpg", 39.80, -105.30, "thistle"),
        ]);

        let df = locations_dataframe(&table).unwrap();
        assert_eq!(df.shape(), (3, 5));
        assert_eq!(
            df.get_column_names_str(),
            ["filename", "lat", "lon", "label", "instance"]
        );

        let instances = df.column("instance").unwrap().u32().unwrap();
        assert_eq!(instances.get(0), instances.get(1));
        assert_ne!(instances.get(0), instances.get(2));
    }

    #[test]
    fn test_empty_table() {
        let df = locations_dataframe(&InstanceTable::default()).unwrap();
        assert_eq!(df.shape(), (0, 5));
    }
}
