// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Directory scanning and image record construction.
//!
//! The scanner lists the image files directly inside a survey directory,
//! reads each file's EXIF metadata, and produces one [`ImageRecord`] per
//! file. The species label is derived from the filename: survey images are
//! named after their species with a trailing shot number, for example
//! `redclover12.jpg` or `wild_rose_03.jpg`.
//!
//! Filenames are processed in sorted order so the record set is
//! deterministic regardless of the platform's directory listing order.

use crate::{Error, gps};
use exif::Reader;
use log::warn;
use serde::Serialize;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A single scanned image with its optional GPS location.
///
/// The latitude and longitude are either both present or both absent: an
/// image without the full set of EXIF GPS tags has no usable location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    /// Image filename (no directory component).
    pub filename: String,
    /// Decimal-degree latitude, negative in the southern hemisphere.
    pub latitude: Option<f64>,
    /// Decimal-degree longitude, negative in the western hemisphere.
    pub longitude: Option<f64>,
    /// Species label derived from the filename.
    pub label: String,
}

impl ImageRecord {
    /// Build a record for a file whose metadata could not be read.
    pub fn without_coordinates(filename: &str) -> Self {
        ImageRecord {
            filename: filename.to_string(),
            latitude: None,
            longitude: None,
            label: derive_label(filename),
        }
    }

    /// Returns true if the record carries a GPS location.
    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// An [`ImageRecord`] whose GPS location is known.
///
/// Only located records participate in instance grouping, species
/// verification, duplicate detection, and map rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedRecord {
    /// Image filename (no directory component).
    pub filename: String,
    /// Decimal-degree latitude.
    pub latitude: f64,
    /// Decimal-degree longitude.
    pub longitude: f64,
    /// Species label derived from the filename.
    pub label: String,
}

/// Derive the species label from an image filename.
///
/// Removes all ASCII digits, strips a trailing `.jpg` suffix and trailing
/// underscores, then replaces the remaining underscores with spaces:
/// `redclover12.jpg` becomes `redclover`, `wild_rose_03.jpg` becomes
/// `wild rose`.
pub fn derive_label(filename: &str) -> String {
    let without_digits: String = filename.chars().filter(|c| !c.is_ascii_digit()).collect();
    let trimmed = without_digits
        .strip_suffix(".jpg")
        .unwrap_or(&without_digits);
    trimmed.trim_end_matches('_').replace('_', " ")
}

/// List the image files directly inside `dir`, sorted by filename.
///
/// Hidden files (leading `.`) and files named with the `None` placeholder
/// prefix are skipped, as are subdirectories.
pub fn list_image_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') || name.starts_with("None") {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Read a single image file into an [`ImageRecord`].
///
/// A file that parses as an EXIF container but lacks GPS tags yields a
/// record without coordinates. A file that cannot be parsed at all is an
/// error; [`scan_directory`] downgrades that case to a warning.
pub fn read_record(path: &Path) -> Result<ImageRecord, Error> {
    let filename = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => {
            return Err(Error::InvalidParameters(format!(
                "invalid filename: {}",
                path.display()
            )));
        }
    };

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader)?;
    let location = gps::location(&exif);

    Ok(ImageRecord {
        label: derive_label(&filename),
        filename,
        latitude: location.map(|l| l.0),
        longitude: location.map(|l| l.1),
    })
}

/// Scan a survey directory into a list of image records.
///
/// Files that are not valid EXIF containers are kept as records without
/// coordinates rather than aborting the scan; a warning names each one.
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<ImageRecord>, Error> {
    let files = list_image_files(dir)?;
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        match read_record(&path) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!("{}: no usable EXIF metadata ({})", path.display(), err);
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    records.push(ImageRecord::without_coordinates(name));
                }
            }
        }
    }
    Ok(records)
}

/// Keep only the records that carry a GPS location.
///
/// Records without coordinates cannot participate in coordinate grouping
/// or mapping; the number dropped is logged.
pub fn located_records(records: &[ImageRecord]) -> Vec<LocatedRecord> {
    let located: Vec<LocatedRecord> = records
        .iter()
        .filter_map(|r| match (r.latitude, r.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocatedRecord {
                filename: r.filename.clone(),
                latitude,
                longitude,
                label: r.label.clone(),
            }),
            _ => None,
        })
        .collect();

    let dropped = records.len() - located.len();
    if dropped > 0 {
        warn!("{} of {} records have no GPS location", dropped, records.len());
    }
    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_derive_label() {
        assert_eq!(derive_label("redclover12.jpg"), "redclover");
        assert_eq!(derive_label("wild_rose_03.jpg"), "wild rose");
        assert_eq!(derive_label("blue_flax1.jpg"), "blue flax");
        assert_eq!(derive_label("thistle.jpg"), "thistle");
    }

    #[test]
    fn test_list_skips_hidden_and_placeholder_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.jpg"), b"not an image").unwrap();
        fs::write(dir.path().join("a.jpg"), b"not an image").unwrap();
        fs::write(dir.path().join(".hidden.jpg"), b"skip").unwrap();
        fs::write(dir.path().join("None3.jpg"), b"skip").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_image_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_scan_survives_files_without_metadata() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("redclover12.jpg"), b"not an image").unwrap();

        let records = scan_directory(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "redclover12.jpg");
        assert_eq!(records[0].label, "redclover");
        assert!(!records[0].has_location());
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = TempDir::new().unwrap();
        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            fs::write(dir.path().join(name), b"not an image").unwrap();
        }

        let first = scan_directory(dir.path()).unwrap();
        let second = scan_directory(dir.path()).unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = first.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_located_records_drops_missing_coordinates() {
        let records = vec![
            ImageRecord {
                filename: "a.jpg".to_string(),
                latitude: Some(39.74),
                longitude: Some(-105.24),
                label: "a".to_string(),
            },
            ImageRecord::without_coordinates("b.jpg"),
        ];
        let located = located_records(&records);
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].filename, "a.jpg");
    }
}
