// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use clap::{Parser, Subcommand};
use floramap::{
    CoordinateColumn, Error, ImageRecord, InstanceTable, MapOptions, check_species_consistency,
    find_duplicate_pairs, located_records, render_map,
};
use serde::Serialize;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FloraMap Command
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Scan a survey directory and print one line per image with its GPS
    /// location and derived species label.
    Scan {
        /// Survey directory containing the images
        dir: PathBuf,
    },
    /// Group images into plant instances by exact coordinate match and
    /// print the location table.  The table can optionally be exported to
    /// a format matching the output file extension.  Currently we support
    /// `.json` and `.arrow` formats.
    Instances {
        /// Survey directory containing the images
        dir: PathBuf,

        /// Optional output file path for the location table
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Verify that every plant instance contains a single species label.
    /// Exits with a non-zero status when mixed instances are found.
    Verify {
        /// Survey directory containing the images
        dir: PathBuf,
    },
    /// Report pairs of images that share an identical coordinate value.
    Duplicates {
        /// Survey directory containing the images
        dir: PathBuf,

        /// Coordinate column to compare (latitude or longitude)
        #[clap(long, default_value = "latitude")]
        column: CoordinateColumn,
    },
    /// Render the survey to a Leaflet HTML map with one marker per image.
    Map {
        /// Survey directory containing the images
        dir: PathBuf,

        /// Output HTML path
        #[clap(long, env = "FLORAMAP_MAP_OUTPUT", default_value = floramap::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Map center as "lat,lon", defaults to the survey area
        #[clap(long)]
        center: Option<String>,

        /// Initial zoom level
        #[clap(long, default_value_t = floramap::DEFAULT_ZOOM)]
        zoom: u8,

        /// Tile layer URL pattern
        #[clap(long, env = "FLORAMAP_TILES", default_value = floramap::DEFAULT_TILES)]
        tiles: String,
    },
}

/// Scan the directory with a progress bar, downgrading unreadable files
/// to records without coordinates the same way the library scanner does.
fn scan_with_progress(dir: &Path) -> Result<Vec<ImageRecord>, Error> {
    use indicatif::{ProgressBar, ProgressStyle};

    let files = floramap::list_image_files(dir)?;
    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {msg}: {wide_bar:.yellow} {human_pos}/{human_len}",
        )
        .unwrap()
        .progress_chars("█▇▆▅▄▃▂▁  "),
    );
    bar.set_message("Scanning");

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        match floramap::read_record(path) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("{}: no usable EXIF metadata ({})", path.display(), err);
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    records.push(ImageRecord::without_coordinates(name));
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(records)
}

// Command handler functions

fn handle_scan(dir: &Path) -> Result<(), Error> {
    let records = scan_with_progress(dir)?;
    for record in &records {
        match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) => println!(
                "{}: {:.6}, {:.6} [{}]",
                record.filename, lat, lon, record.label
            ),
            _ => println!("{}: no GPS location [{}]", record.filename, record.label),
        }
    }
    let with_location = records.iter().filter(|r| r.has_location()).count();
    println!(
        "{} images scanned, {} with GPS locations",
        records.len(),
        with_location
    );
    Ok(())
}

#[derive(Serialize)]
struct InstanceRow<'a> {
    filename: &'a str,
    lat: f64,
    lon: f64,
    label: &'a str,
    instance: u32,
}

fn export_table(table: &InstanceTable, output: &Path) -> Result<(), Error> {
    let format = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match format.as_deref() {
        Some("arrow") => {
            #[cfg(feature = "polars")]
            {
                use polars::{io::SerWriter as _, prelude::IpcWriter};

                let mut df = floramap::locations_dataframe(table)?;
                IpcWriter::new(File::create(output)?).finish(&mut df)?;
            }
            #[cfg(not(feature = "polars"))]
            {
                return Err(Error::FeatureNotEnabled("polars".to_owned()));
            }
        }
        Some("json") => {
            let rows: Vec<InstanceRow> = table
                .records()
                .iter()
                .zip(table.ids().iter().copied())
                .map(|(record, instance)| InstanceRow {
                    filename: &record.filename,
                    lat: record.latitude,
                    lon: record.longitude,
                    label: &record.label,
                    instance,
                })
                .collect();
            let mut file = File::create(output)?;
            file.write_all(serde_json::to_string_pretty(&rows)?.as_bytes())?;
        }
        _ => {
            return Err(Error::InvalidParameters(format!(
                "Unsupported output format: {:?}",
                format
            )));
        }
    }
    Ok(())
}

fn handle_instances(dir: &Path, output: Option<PathBuf>) -> Result<(), Error> {
    let records = scan_with_progress(dir)?;
    let table = InstanceTable::from_records(located_records(&records));

    let df = floramap::locations_dataframe(&table)?;
    println!("{}", df);
    println!(
        "{} images in {} plant instances",
        table.len(),
        table.instance_count()
    );

    if let Some(output) = output {
        export_table(&table, &output)?;
        println!("Exported location table to {}", output.display());
    }
    Ok(())
}

fn handle_verify(dir: &Path) -> Result<(), Error> {
    let records = scan_with_progress(dir)?;
    let table = InstanceTable::from_records(located_records(&records));

    let report = check_species_consistency(&table);
    print!("{}", report);

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_duplicates(dir: &Path, column: CoordinateColumn) -> Result<(), Error> {
    let records = scan_with_progress(dir)?;
    let located = located_records(&records);

    let pairs = find_duplicate_pairs(&located, column);
    if pairs.is_empty() {
        println!(
            "No duplicate {} values found across {} records",
            column,
            located.len()
        );
    } else {
        println!("{} duplicate {} pairs:", pairs.len(), column);
        for pair in &pairs {
            println!("    {}", pair);
        }
    }
    Ok(())
}

fn parse_center(input: &str) -> Result<(f64, f64), Error> {
    if let Some((lat, lon)) = input.split_once(',')
        && let Ok(lat) = lat.trim().parse::<f64>()
        && let Ok(lon) = lon.trim().parse::<f64>()
    {
        return Ok((lat, lon));
    }
    Err(Error::InvalidParameters(format!(
        "center must be \"lat,lon\": {}",
        input
    )))
}

fn handle_map(
    dir: &Path,
    output: PathBuf,
    center: Option<String>,
    zoom: u8,
    tiles: String,
) -> Result<(), Error> {
    let records = scan_with_progress(dir)?;
    let located = located_records(&records);

    let center = match center {
        Some(input) => parse_center(&input)?,
        None => floramap::DEFAULT_CENTER,
    };

    let options = MapOptions {
        center,
        zoom,
        output,
        tiles,
    };
    render_map(&located, &options)?;
    println!(
        "Rendered {} markers to {}",
        located.len(),
        options.output.display()
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.cmd {
        Command::Scan { dir } => handle_scan(&dir),
        Command::Instances { dir, output } => handle_instances(&dir, output),
        Command::Verify { dir } => handle_verify(&dir),
        Command::Duplicates { dir, column } => handle_duplicates(&dir, column),
        Command::Map {
            dir,
            output,
            center,
            zoom,
            tiles,
        } => handle_map(&dir, output, center, zoom, tiles),
    }
}
