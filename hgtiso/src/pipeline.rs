//! The decode → trace → project → synthesize pipeline.
//!
//! A [`ContourPipeline`] owns the run configuration and drives the whole
//! conversion of one tile into one entity stream. The run is fully
//! sequential and all-or-nothing: the first error aborts it, and whatever
//! was already handed to the sink is the sink's responsibility to discard.

use std::path::Path;
use std::time::SystemTime;

use tracing::info;

use crate::contour;
use crate::error::{HgtError, Result};
use crate::geometry::GridToGeo;
use crate::osm::{plausible_elevation, BoundingBox, EntitySynthesizer, IdAllocator, TagScheme};
use crate::sink::{Record, Sink};
use crate::tile::{HgtTile, VOID_VALUE};

/// Default contour interval in meters.
pub const DEFAULT_INTERVAL: u32 = 25;

/// Default attribution string carried by the bounding-box record.
pub const DEFAULT_ATTRIBUTION: &str = "contours derived from SRTM elevation data";

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Contour lines traced, before the plausibility filter.
    pub lines_traced: usize,
    /// Node entities handed to the sink.
    pub nodes_emitted: u64,
    /// Way entities handed to the sink.
    pub ways_emitted: u64,
}

/// Builder for [`ContourPipeline`].
///
/// Every option is independently defaultable; the defaults match the
/// conventional contour tagging scheme and a 25m interval.
#[derive(Debug, Clone)]
pub struct ContourPipelineBuilder {
    interval: u32,
    tags: TagScheme,
    void_values: Vec<i16>,
    attribution: String,
}

impl Default for ContourPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourPipelineBuilder {
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            tags: TagScheme::default(),
            void_values: vec![VOID_VALUE],
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }

    /// Elevation interval between traced levels, in meters.
    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Key carrying the elevation value on each way.
    pub fn elevation_key(mut self, key: impl Into<String>) -> Self {
        self.tags.elevation_key = key.into();
        self
    }

    /// Key/value pair classifying each way as a contour.
    pub fn contour_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.contour_key = key.into();
        self.tags.contour_value = value.into();
        self
    }

    /// Key carrying the magnitude band on each way.
    pub fn magnitude_key(mut self, key: impl Into<String>) -> Self {
        self.tags.magnitude_key = key.into();
        self
    }

    /// The three magnitude band values (major, medium, minor).
    pub fn magnitude_values(
        mut self,
        major: impl Into<String>,
        medium: impl Into<String>,
        minor: impl Into<String>,
    ) -> Self {
        self.tags.magnitude_major = major.into();
        self.tags.magnitude_medium = medium.into();
        self.tags.magnitude_minor = minor.into();
        self
    }

    /// Sample values treated as no-data.
    pub fn void_values(mut self, values: Vec<i16>) -> Self {
        self.void_values = values;
        self
    }

    /// Attribution string for the bounding-box record.
    pub fn attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Finish the builder.
    ///
    /// Fails when the interval is zero.
    pub fn build(self) -> Result<ContourPipeline> {
        if self.interval == 0 {
            return Err(HgtError::Geometry {
                detail: "contour interval must be positive".to_string(),
            });
        }
        Ok(ContourPipeline {
            interval: self.interval,
            tags: self.tags,
            void_values: self.void_values,
            attribution: self.attribution,
        })
    }
}

/// A configured tile-to-entities conversion.
#[derive(Debug, Clone)]
pub struct ContourPipeline {
    interval: u32,
    tags: TagScheme,
    void_values: Vec<i16>,
    attribution: String,
}

impl ContourPipeline {
    pub fn builder() -> ContourPipelineBuilder {
        ContourPipelineBuilder::new()
    }

    /// Convert one `.hgt` file into an entity stream on `sink`.
    ///
    /// Emits the bounding box first, then nodes and ways in synthesis
    /// order, and completes the sink. Any failure propagates immediately
    /// without completing the sink.
    pub fn run<S: Sink>(&self, path: impl AsRef<Path>, sink: &mut S) -> Result<RunSummary> {
        let path = path.as_ref();

        info!(path = %path.display(), "loading HGT tile");
        let tile = HgtTile::from_file(path)?;

        info!(
            size = tile.size(),
            origin_lat = tile.origin_lat(),
            origin_lon = tile.origin_lon(),
            "tracing contour lines"
        );
        let lines = contour::trace(
            tile.samples(),
            tile.size(),
            self.interval,
            &self.void_values,
        )?;
        let lines_traced = lines.len();

        let transform = GridToGeo::for_tile(&tile);
        let timestamp = SystemTime::now();
        let mut synthesizer = EntitySynthesizer::new(
            IdAllocator::for_tile_origin(tile.origin_lat(), tile.origin_lon()),
            self.tags.clone(),
            timestamp,
        );

        info!(lines = lines_traced, "writing entity stream");
        sink.process(Record::Bound(BoundingBox::for_tile(
            tile.origin_lat(),
            tile.origin_lon(),
            tile.resolution().degrees(),
            self.attribution.clone(),
        )))?;

        for line in lines {
            // Filtered lines are never projected.
            if !plausible_elevation(line.level) {
                continue;
            }
            let line = transform.project(line);
            synthesizer.emit_line(&line, sink)?;
        }

        sink.complete()?;

        let summary = RunSummary {
            lines_traced,
            nodes_emitted: synthesizer.nodes_emitted(),
            ways_emitted: synthesizer.ways_emitted(),
        };
        info!(
            lines = summary.lines_traced,
            nodes = summary.nodes_emitted,
            ways = summary.ways_emitted,
            "entity stream complete"
        );
        Ok(summary)
    }
}
