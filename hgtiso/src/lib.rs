//! # hgtiso - SRTM contour line generator
//!
//! Converts SRTM (Shuttle Radar Topography Mission) `.hgt` elevation tiles
//! into vector contour lines, emitted as a stream of OSM map entities
//! (nodes and tagged ways) towards a pluggable output sink.
//!
//! ## Pipeline
//!
//! ```ignore
//! use hgtiso::{CollectingSink, ContourPipeline};
//!
//! let pipeline = ContourPipeline::builder()
//!     .interval(25)
//!     .build()?;
//!
//! let mut sink = CollectingSink::default();
//! let summary = pipeline.run("/data/N28E086.hgt", &mut sink)?;
//! println!("{} ways from {} lines", summary.ways_emitted, summary.lines_traced);
//! ```
//!
//! The stages run strictly in sequence: the raster is decoded, contour
//! lines are traced with marching squares at every interval multiple
//! inside the tile's value range, lines are projected from grid space to
//! longitude/latitude, and entities with collision-free ids are written to
//! the sink. Any failure aborts the whole run.
//!
//! ## SRTM Data Format
//!
//! `.hgt` files contain raw elevation data, named after the southwest
//! corner of the 1° × 1° tile they cover (e.g. `N28E086.hgt`):
//!
//! - **SRTM1**: 3601×3601 samples, 1 arc-second (~30m) resolution
//! - **SRTM3**: 1201×1201 samples, 3 arc-second (~90m) resolution
//!
//! Each sample is a 16-bit big-endian signed integer elevation in meters,
//! row-major from the north edge. The special value -32768 indicates void
//! (no data).
//!
//! ## Data Sources
//!
//! Download SRTM data from:
//! - <https://dwtkns.com/srtm30m/>
//! - <https://earthexplorer.usgs.gov/>

pub mod contour;
pub mod error;
pub mod filename;
pub mod geometry;
pub mod osm;
pub mod pipeline;
pub mod sink;
pub mod tile;

// Re-export main types at crate root for convenience
pub use contour::{ContourLine, Point};
pub use error::{HgtError, Result};
pub use geometry::GridToGeo;
pub use osm::{BoundingBox, OsmNode, OsmWay, Tag, TagScheme};
pub use pipeline::{ContourPipeline, ContourPipelineBuilder, RunSummary};
pub use sink::{CollectingSink, Record, Sink};
pub use tile::{HgtResolution, HgtTile, VOID_VALUE};
