// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # FloraMap Library
//!
//! FloraMap prepares plant survey photo datasets for analysis. It extracts
//! GPS coordinates from EXIF metadata, groups images taken at the same
//! coordinates into plant instances, verifies that every instance carries
//! a single species label, finds duplicate coordinate values, and renders
//! the survey onto an interactive map.
//!
//! ## Features
//!
//! - **Metadata Scanning**: Walk a survey directory and decode the EXIF
//!   GPS tags of every image into signed decimal degrees
//! - **Instance Grouping**: Assign a dense integer id to every distinct
//!   coordinate pair, grouping repeat shots of the same plant
//! - **Species Verification**: Report plant instances whose images carry
//!   conflicting species labels
//! - **Duplicate Detection**: Pairwise search for records sharing an
//!   identical coordinate value
//! - **Map Rendering**: Write a self-contained Leaflet HTML map of the
//!   survey
//! - **Polars Integration**: Optional integration with Polars DataFrames
//!   for data analysis
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use floramap::{
//!     InstanceTable, check_species_consistency, located_records, scan_directory,
//! };
//!
//! fn main() -> Result<(), floramap::Error> {
//!     let records = scan_directory("photos")?;
//!     let table = InstanceTable::from_records(located_records(&records));
//!
//!     let report = check_species_consistency(&table);
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `polars`: Enables the location table as a Polars DataFrame for
//!   enhanced data manipulation

mod duplicate;
mod error;
pub mod gps;
mod instance;
mod map;
mod scan;
mod verify;

#[cfg(feature = "polars")]
mod table;

pub use crate::{
    duplicate::{CoordinateColumn, DuplicatePair, find_duplicate_pairs},
    error::Error,
    instance::{InstanceTable, encode_instances},
    map::{
        DEFAULT_CENTER, DEFAULT_OUTPUT, DEFAULT_TILES, DEFAULT_ZOOM, MapOptions, render_map,
    },
    scan::{
        ImageRecord, LocatedRecord, derive_label, list_image_files, located_records, read_record,
        scan_directory,
    },
    verify::{SpeciesCheckResult, SpeciesViolation, check_species_consistency},
};

#[cfg(feature = "polars")]
pub use crate::table::locations_dataframe;
