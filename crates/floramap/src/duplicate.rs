// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Duplicate coordinate detection.
//!
//! Enumerates every unordered pair of records and reports the pairs whose
//! compared coordinate value is exactly equal. The quadratic scan is
//! deliberate: survey directories hold hundreds of images, not millions,
//! and the exact-equality comparison matches the instance grouping rule.
//!
//! The compared column is selectable. The survey tooling this replaces
//! compared latitudes under a name that suggested longitudes; rather than
//! guess the intent, both comparisons are supported and latitude remains
//! the default.

use crate::{Error, scan::LocatedRecord};
use itertools::Itertools;
use std::{fmt, str::FromStr};

/// Which coordinate column duplicate detection compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateColumn {
    /// Compare latitudes (the default).
    #[default]
    Latitude,
    /// Compare longitudes.
    Longitude,
}

impl CoordinateColumn {
    fn value(&self, record: &LocatedRecord) -> f64 {
        match self {
            CoordinateColumn::Latitude => record.latitude,
            CoordinateColumn::Longitude => record.longitude,
        }
    }
}

impl fmt::Display for CoordinateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateColumn::Latitude => write!(f, "latitude"),
            CoordinateColumn::Longitude => write!(f, "longitude"),
        }
    }
}

impl FromStr for CoordinateColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latitude" | "lat" => Ok(CoordinateColumn::Latitude),
            "longitude" | "lon" => Ok(CoordinateColumn::Longitude),
            other => Err(Error::InvalidParameters(format!(
                "unknown coordinate column: {}",
                other
            ))),
        }
    }
}

/// Two records sharing an identical coordinate value.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicatePair {
    /// Filename of the first record of the pair.
    pub first: String,
    /// Filename of the second record of the pair.
    pub second: String,
    /// The shared coordinate value.
    pub value: f64,
}

impl fmt::Display for DuplicatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {} share {}", self.first, self.second, self.value)
    }
}

/// Find all unordered record pairs with an exactly equal coordinate value.
///
/// Each matching pair appears once. Exact float comparison is intentional:
/// a duplicate is a repeated GPS fix, not a nearby one.
pub fn find_duplicate_pairs(
    records: &[LocatedRecord],
    column: CoordinateColumn,
) -> Vec<DuplicatePair> {
    records
        .iter()
        .tuple_combinations::<(_, _)>()
        .filter(|(a, b)| column.value(a) == column.value(b))
        .map(|(a, b)| DuplicatePair {
            first: a.filename.clone(),
            second: b.filename.clone(),
            value: column.value(a),
        })
        .collect()
}
