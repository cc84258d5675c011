use anyhow::{Context, Result};
use hgtiso::{HgtResolution, HgtTile};
use serde::Serialize;
use std::path::PathBuf;

/// Tile report, printable as text or JSON.
#[derive(Serialize)]
struct TileReport {
    file: String,
    resolution: String,
    samples: usize,
    origin_lat: i32,
    origin_lon: i32,
    min_elevation: Option<i16>,
    max_elevation: Option<i16>,
    void_samples: usize,
    void_percent: f64,
    file_size: u64,
}

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let tile = HgtTile::from_file(&file).context("Failed to load tile")?;
    let file_size = std::fs::metadata(&file)?.len();

    let resolution_str = match tile.resolution() {
        HgtResolution::Srtm1 => "SRTM1 (~30m)",
        HgtResolution::Srtm3 => "SRTM3 (~90m)",
    };

    let range = tile.elevation_range();
    let void_samples = tile.void_count();
    let total_samples = tile.size() * tile.size();
    let void_percent = (void_samples as f64 / total_samples as f64) * 100.0;

    let report = TileReport {
        file: file.display().to_string(),
        resolution: resolution_str.to_string(),
        samples: tile.size(),
        origin_lat: tile.origin_lat(),
        origin_lon: tile.origin_lon(),
        min_elevation: range.map(|(lo, _)| lo),
        max_elevation: range.map(|(_, hi)| hi),
        void_samples,
        void_percent,
        file_size,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Tile: {}", report.file);
    println!();
    println!(
        "Resolution: {} ({}x{} samples)",
        report.resolution, report.samples, report.samples
    );
    println!(
        "Coverage: {}{} to {}{}, {}{} to {}{}",
        if report.origin_lat >= 0 { "N" } else { "S" },
        report.origin_lat.abs(),
        if report.origin_lat + 1 >= 0 { "N" } else { "S" },
        (report.origin_lat + 1).abs(),
        if report.origin_lon >= 0 { "E" } else { "W" },
        report.origin_lon.abs(),
        if report.origin_lon + 1 >= 0 { "E" } else { "W" },
        (report.origin_lon + 1).abs()
    );
    println!("File size: {}", format_size(report.file_size));
    println!();

    match (report.min_elevation, report.max_elevation) {
        (Some(lo), Some(hi)) => {
            println!("Min elevation: {}m", lo);
            println!("Max elevation: {}m", hi);
        }
        _ => println!("All samples are void"),
    }

    if report.void_samples > 0 {
        println!(
            "Void samples: {} ({:.1}%)",
            report.void_samples, report.void_percent
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
