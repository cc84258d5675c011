//! HGT tile decoding.
//!
//! This module provides [`HgtTile`], the in-memory form of an SRTM `.hgt`
//! raster: the tile's origin (decoded from the file name), its resolution
//! (detected from the file size) and the full grid of elevation samples.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{HgtError, Result};
use crate::filename::parse_tile_name;

/// File size for SRTM1 (1 arc-second, ~30m resolution): 3601 × 3601 × 2 bytes
const SRTM1_SIZE: usize = 3601 * 3601 * 2; // 25,934,402 bytes

/// File size for SRTM3 (3 arc-second, ~90m resolution): 1201 × 1201 × 2 bytes
const SRTM3_SIZE: usize = 1201 * 1201 * 2; // 2,884,802 bytes

/// Number of samples per row/column for SRTM1
const SRTM1_SAMPLES: usize = 3601;

/// Number of samples per row/column for SRTM3
const SRTM3_SAMPLES: usize = 1201;

/// Value indicating no data (void) in SRTM files
pub const VOID_VALUE: i16 = -32768;

/// Resolution type of an SRTM tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HgtResolution {
    /// SRTM1: 1 arc-second (~30m) resolution
    Srtm1,
    /// SRTM3: 3 arc-second (~90m) resolution
    Srtm3,
}

impl HgtResolution {
    /// Returns the number of samples per row/column for this resolution.
    pub fn samples(&self) -> usize {
        match self {
            HgtResolution::Srtm1 => SRTM1_SAMPLES,
            HgtResolution::Srtm3 => SRTM3_SAMPLES,
        }
    }

    /// Returns the sample spacing in arc seconds.
    pub fn arc_seconds(&self) -> u32 {
        match self {
            HgtResolution::Srtm1 => 1,
            HgtResolution::Srtm3 => 3,
        }
    }

    /// Returns the sample spacing in degrees.
    pub fn degrees(&self) -> f64 {
        f64::from(self.arc_seconds()) / 3600.0
    }
}

/// A fully decoded SRTM tile.
///
/// Samples are stored row-major with row 0 at the north edge, exactly as
/// laid out on disk. The tile is read-only after construction.
pub struct HgtTile {
    /// Decoded elevation samples, row-major, north row first.
    samples: Vec<i16>,
    /// Number of samples per row/column (1201 or 3601)
    size: usize,
    /// Resolution type
    resolution: HgtResolution,
    /// Southwest corner latitude (integer)
    origin_lat: i32,
    /// Southwest corner longitude (integer)
    origin_lon: i32,
}

impl HgtTile {
    /// Load an SRTM tile from a `.hgt` file.
    ///
    /// The tile origin is decoded from the file name and the resolution
    /// (SRTM1 vs SRTM3) from the file size.
    ///
    /// # Errors
    ///
    /// - [`HgtError::FileNotFound`] if the path is not an existing file
    /// - [`HgtError::InvalidFileName`] if the name doesn't follow the
    ///   `N28E086.hgt` pattern
    /// - [`HgtError::InvalidFileSize`] if the size matches neither SRTM
    ///   format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(HgtError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HgtError::InvalidFileName {
                name: path.display().to_string(),
            })?;
        let (origin_lat, origin_lon) = parse_tile_name(name)?;

        let file = File::open(path)?;

        // SAFETY: the file is opened read-only and the mapping never
        // outlives this function; samples are copied out below.
        let mmap = unsafe { Mmap::map(&file)? };

        let (size, resolution) = match mmap.len() {
            SRTM1_SIZE => (SRTM1_SAMPLES, HgtResolution::Srtm1),
            SRTM3_SIZE => (SRTM3_SAMPLES, HgtResolution::Srtm3),
            size => {
                return Err(HgtError::InvalidFileSize { size: size as u64 });
            }
        };

        // Big-endian 16-bit signed samples, row-major, north row first.
        let samples: Vec<i16> = mmap
            .chunks_exact(2)
            .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            samples,
            size,
            resolution,
            origin_lat,
            origin_lon,
        })
    }

    /// The elevation sample at a grid position.
    ///
    /// Row 0 is the north edge, column 0 the west edge.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid.
    pub fn sample(&self, row: usize, col: usize) -> i16 {
        assert!(row < self.size && col < self.size);
        self.samples[row * self.size + col]
    }

    /// The raw sample grid, row-major, north row first.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Grid side length (number of samples per row/column).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the resolution of this tile.
    pub fn resolution(&self) -> HgtResolution {
        self.resolution
    }

    /// Returns the origin latitude (southwest corner).
    pub fn origin_lat(&self) -> i32 {
        self.origin_lat
    }

    /// Returns the origin longitude (southwest corner).
    pub fn origin_lon(&self) -> i32 {
        self.origin_lon
    }

    /// Minimum and maximum elevation over the tile, ignoring void samples.
    ///
    /// Returns `None` when every sample is void.
    pub fn elevation_range(&self) -> Option<(i16, i16)> {
        let mut range: Option<(i16, i16)> = None;
        for &v in &self.samples {
            if v == VOID_VALUE {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }

    /// Number of void (no-data) samples in the tile.
    pub fn void_count(&self) -> usize {
        self.samples.iter().filter(|&&v| v == VOID_VALUE).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Write a synthetic SRTM3 tile with a few known elevation values.
    fn create_test_srtm3_file(dir: &Path, name: &str) -> std::path::PathBuf {
        let mut data = vec![0u8; SRTM3_SIZE];

        // Row 0, Col 0 (northwest corner) = 1000m
        data[0..2].copy_from_slice(&1000i16.to_be_bytes());

        // Row 600, Col 600 (center) = 500m
        let center = (600 * SRTM3_SAMPLES + 600) * 2;
        data[center..center + 2].copy_from_slice(&500i16.to_be_bytes());

        // Row 1200, Col 1200 (southeast corner) = void
        let se = (1200 * SRTM3_SAMPLES + 1200) * 2;
        data[se..se + 2].copy_from_slice(&VOID_VALUE.to_be_bytes());

        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&data).unwrap();
        path
    }

    #[test]
    fn test_load_srtm3_file() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_srtm3_file(tmp.path(), "N35E138.hgt");
        let tile = HgtTile::from_file(&path).unwrap();

        assert_eq!(tile.resolution(), HgtResolution::Srtm3);
        assert_eq!(tile.size(), SRTM3_SAMPLES);
        assert_eq!(tile.origin_lat(), 35);
        assert_eq!(tile.origin_lon(), 138);
        assert_eq!(tile.sample(0, 0), 1000);
        assert_eq!(tile.sample(600, 600), 500);
        assert_eq!(tile.sample(1200, 1200), VOID_VALUE);
    }

    #[test]
    fn test_origin_signs() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_srtm3_file(tmp.path(), "S33W070.hgt");
        let tile = HgtTile::from_file(&path).unwrap();

        assert_eq!(tile.origin_lat(), -33);
        assert_eq!(tile.origin_lon(), -70);
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = HgtTile::from_file(tmp.path().join("N35E138.hgt"));
        assert!(matches!(result, Err(HgtError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_file_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("elevation.hgt");
        std::fs::write(&path, vec![0u8; 100]).unwrap();

        let result = HgtTile::from_file(&path);
        assert!(matches!(result, Err(HgtError::InvalidFileName { .. })));
    }

    #[test]
    fn test_invalid_file_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("N35E138.hgt");
        std::fs::write(&path, vec![0u8; 1000]).unwrap();

        let result = HgtTile::from_file(&path);
        if let Err(HgtError::InvalidFileSize { size }) = result {
            assert_eq!(size, 1000);
        } else {
            panic!("Expected InvalidFileSize error");
        }
    }

    #[test]
    fn test_big_endian_decoding() {
        let tmp = TempDir::new().unwrap();
        let mut data = vec![0u8; SRTM3_SIZE];
        // 0x03E8 = 1000 in big-endian at sample (0, 1)
        data[2] = 0x03;
        data[3] = 0xE8;
        let path = tmp.path().join("N00E000.hgt");
        std::fs::write(&path, &data).unwrap();

        let tile = HgtTile::from_file(&path).unwrap();
        assert_eq!(tile.sample(0, 1), 1000);
    }

    #[test]
    fn test_elevation_range_ignores_void() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_srtm3_file(tmp.path(), "N35E138.hgt");
        let tile = HgtTile::from_file(&path).unwrap();

        let (lo, hi) = tile.elevation_range().unwrap();
        assert_eq!(lo, 0);
        assert_eq!(hi, 1000);
        assert_eq!(tile.void_count(), 1);
    }

    #[test]
    fn test_resolution_info() {
        assert_eq!(HgtResolution::Srtm1.samples(), 3601);
        assert_eq!(HgtResolution::Srtm3.samples(), 1201);
        assert_eq!(HgtResolution::Srtm1.arc_seconds(), 1);
        assert_eq!(HgtResolution::Srtm3.arc_seconds(), 3);
        assert!((HgtResolution::Srtm3.degrees() - 3.0 / 3600.0).abs() < 1e-12);
    }
}
