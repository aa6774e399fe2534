// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Leaflet map rendering.
//!
//! Writes a self-contained HTML document with one circle marker per
//! located record. The document loads Leaflet and its tile layer from
//! public CDNs; everything else, including the marker data, is inlined so
//! the file can be opened directly from disk.

use crate::{Error, scan::LocatedRecord};
use log::debug;
use serde::Serialize;
use std::{fs, path::PathBuf};

/// Default map center, the middle of the survey area.
pub const DEFAULT_CENTER: (f64, f64) = (39.74675277777778, -105.2436);

/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 10;

/// Default output path for the rendered map.
pub const DEFAULT_OUTPUT: &str = "../maps/flower_map.html";

/// Default tile layer URL pattern.
pub const DEFAULT_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Options controlling map rendering.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Map center as `(latitude, longitude)`.
    pub center: (f64, f64),
    /// Initial zoom level.
    pub zoom: u8,
    /// Output HTML path. Overwritten if it exists.
    pub output: PathBuf,
    /// Tile layer URL pattern.
    pub tiles: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            output: PathBuf::from(DEFAULT_OUTPUT),
            tiles: DEFAULT_TILES.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    label: &'a str,
    filename: &'a str,
}

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FloraMap</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; }
        #map { height: 100vh; width: 100vw; }
    </style>
</head>
<body>
    <div id="map"></div>
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const markers = __MARKERS__;

        const map = L.map('map').setView([__CENTER_LAT__, __CENTER_LON__], __ZOOM__);
        L.tileLayer('__TILES__', {
            maxZoom: 19,
            attribution: '&copy; <a href="http://www.openstreetmap.org/copyright">OpenStreetMap</a>'
        }).addTo(map);

        markers.forEach(function (m) {
            const marker = L.circleMarker([m.lat, m.lon], {
                radius: 5,
                color: '#ff5050',
                fillColor: '#ff5050',
                fillOpacity: 0.8
            }).addTo(map);

            const popup = document.createElement('div');
            popup.textContent = m.label;
            popup.title = m.filename;
            marker.bindPopup(popup);
        });
    </script>
</body>
</html>
"#;

/// Render the located records to a Leaflet HTML map.
///
/// Places a circle marker per record with the species label as its popup.
/// Parent directories of the output path are created as needed and an
/// existing file at that path is overwritten.
pub fn render_map(records: &[LocatedRecord], options: &MapOptions) -> Result<(), Error> {
    let markers: Vec<Marker> = records
        .iter()
        .map(|r| Marker {
            lat: r.latitude,
            lon: r.longitude,
            label: &r.label,
            filename: &r.filename,
        })
        .collect();

    // Keep "</script>" sequences inert inside the inline JSON.
    let markers = serde_json::to_string(&markers)?.replace('<', "\\u003c");

    let html = MAP_TEMPLATE
        .replace("__MARKERS__", &markers)
        .replace("__CENTER_LAT__", &options.center.0.to_string())
        .replace("__CENTER_LON__", &options.center.1.to_string())
        .replace("__ZOOM__", &options.zoom.to_string())
        .replace("__TILES__", &options.tiles);

    if let Some(parent) = options.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&options.output, html)?;
    debug!("rendered {} markers to {}", records.len(), options.output.display());
    Ok(())
}
