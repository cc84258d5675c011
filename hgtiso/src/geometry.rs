//! Grid-to-geographic coordinate mapping.

use crate::contour::{ContourLine, Point};
use crate::tile::HgtTile;

/// Affine map from grid-cell `(col, row)` space to geographic
/// `(lon, lat)` space.
///
/// Row 0 sits on the tile's north edge, so latitude decreases as the row
/// index grows: `lon = origin_lon + col * resolution`,
/// `lat = (origin_lat + 1) - row * resolution`.
#[derive(Debug, Clone, Copy)]
pub struct GridToGeo {
    origin_lon: f64,
    north_lat: f64,
    resolution: f64,
}

impl GridToGeo {
    /// Build the transform for a tile origin and cell resolution in
    /// degrees.
    pub fn new(origin_lat: i32, origin_lon: i32, resolution: f64) -> Self {
        Self {
            origin_lon: f64::from(origin_lon),
            north_lat: f64::from(origin_lat) + 1.0,
            resolution,
        }
    }

    /// The transform matching a decoded tile.
    pub fn for_tile(tile: &HgtTile) -> Self {
        Self::new(
            tile.origin_lat(),
            tile.origin_lon(),
            tile.resolution().degrees(),
        )
    }

    /// Map a grid vertex to `(lon, lat)`.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_lon + col * self.resolution,
            self.north_lat - row * self.resolution,
        )
    }

    /// Project a grid-space contour line into a new geographic-space line.
    ///
    /// Pure: the input is consumed and a fresh line is returned, keeping
    /// the pipeline stages independently testable.
    pub fn project(&self, line: ContourLine) -> ContourLine {
        let points = line
            .points
            .into_iter()
            .map(|p| {
                let (lon, lat) = self.apply(p.x, p.y);
                Point::new(lon, lat)
            })
            .collect();
        ContourLine {
            level: line.level,
            points,
            closed: line.closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRTM3_RES: f64 = 3.0 / 3600.0;

    #[test]
    fn test_origin_maps_to_north_west_corner() {
        let transform = GridToGeo::new(35, 138, SRTM3_RES);
        let (lon, lat) = transform.apply(0.0, 0.0);
        assert!((lon - 138.0).abs() < 1e-12);
        assert!((lat - 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_far_corner() {
        let n = 1201.0;
        let transform = GridToGeo::new(35, 138, SRTM3_RES);
        let (lon, lat) = transform.apply(n - 1.0, n - 1.0);
        assert!((lon - (138.0 + (n - 1.0) * SRTM3_RES)).abs() < 1e-12);
        assert!((lat - (36.0 - (n - 1.0) * SRTM3_RES)).abs() < 1e-12);
    }

    #[test]
    fn test_southern_western_hemisphere() {
        let transform = GridToGeo::new(-33, -70, SRTM3_RES);
        let (lon, lat) = transform.apply(0.0, 0.0);
        assert!((lon + 70.0).abs() < 1e-12);
        assert!((lat + 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_project_preserves_level_and_closure() {
        let transform = GridToGeo::new(0, 0, 1.0);
        let line = ContourLine {
            level: 100,
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            closed: false,
        };
        let projected = transform.project(line);
        assert_eq!(projected.level, 100);
        assert!(!projected.closed);
        // (col=1, row=1) -> lon 1, lat 0 with a 1-degree cell.
        assert_eq!(projected.points[1], Point::new(1.0, 0.0));
    }
}
