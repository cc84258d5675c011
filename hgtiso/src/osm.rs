//! OSM entity model and deterministic entity synthesis.
//!
//! Traced contour lines become point nodes plus one tagged way per line.
//! Ids come from two per-run counters seeded from the tile origin, so
//! concurrent runs over different tiles can never collide in id space, and
//! both counters start well above a fixed floor to stay clear of ids from
//! the official dataset.

use std::time::SystemTime;

use tracing::debug;

use crate::contour::ContourLine;
use crate::error::Result;
use crate::sink::{Record, Sink};

/// Synthetic author uid attached to every generated entity.
pub const SYNTHETIC_UID: i64 = 888888;

/// Synthetic author name attached to every generated entity.
pub const SYNTHETIC_USER: &str = "dummyUser";

/// Entity version attached to every generated entity.
pub const ENTITY_VERSION: u32 = 1;

/// Contour levels below this are discarded as noise.
pub const MIN_ELEVATION: i32 = 50;

/// Contour levels above this are discarded as implausible.
pub const MAX_ELEVATION: i32 = 9000;

/// Whether a contour level falls inside the plausible elevation band.
///
/// The band is a fixed policy threshold, not configuration.
pub fn plausible_elevation(level: i32) -> bool {
    (MIN_ELEVATION..=MAX_ELEVATION).contains(&level)
}

/// A key/value entity tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A point entity.
#[derive(Debug, Clone)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub version: u32,
    pub timestamp: SystemTime,
}

/// A line entity referencing its member nodes by id.
#[derive(Debug, Clone)]
pub struct OsmWay {
    pub id: i64,
    pub node_refs: Vec<i64>,
    pub version: u32,
    pub timestamp: SystemTime,
    pub tags: Vec<Tag>,
}

/// The bounding-box record emitted ahead of all entities.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub origin: String,
}

impl BoundingBox {
    /// The box covering a 1° × 1° tile, padded by half a cell on every
    /// side to account for the sample-center-to-cell-edge offset.
    pub fn for_tile(
        origin_lat: i32,
        origin_lon: i32,
        resolution: f64,
        origin: impl Into<String>,
    ) -> Self {
        let half = resolution / 2.0;
        Self {
            left: f64::from(origin_lon) - half,
            right: f64::from(origin_lon) + 1.0 + half,
            top: f64::from(origin_lat) + 1.0 + half,
            bottom: f64::from(origin_lat) - half,
            origin: origin.into(),
        }
    }
}

/// Tag labels attached to generated ways.
///
/// Each label is independently configurable; the defaults match the
/// conventional contour rendering keys.
#[derive(Debug, Clone)]
pub struct TagScheme {
    /// Key carrying the elevation value (`ele`).
    pub elevation_key: String,
    /// Classification key marking the way as a contour (`contour`).
    pub contour_key: String,
    /// Value for the contour classification key (`elevation`).
    pub contour_value: String,
    /// Key carrying the magnitude band (`contour_ext`).
    pub magnitude_key: String,
    /// Band value for multiples of 500.
    pub magnitude_major: String,
    /// Band value for multiples of 100 that are not multiples of 500.
    pub magnitude_medium: String,
    /// Band value for everything else.
    pub magnitude_minor: String,
}

impl Default for TagScheme {
    fn default() -> Self {
        Self {
            elevation_key: "ele".to_string(),
            contour_key: "contour".to_string(),
            contour_value: "elevation".to_string(),
            magnitude_key: "contour_ext".to_string(),
            magnitude_major: "elevation_major".to_string(),
            magnitude_medium: "elevation_medium".to_string(),
            magnitude_minor: "elevation_minor".to_string(),
        }
    }
}

impl TagScheme {
    /// The magnitude band value for an elevation level.
    pub fn magnitude(&self, level: i32) -> &str {
        if level % 500 == 0 {
            &self.magnitude_major
        } else if level % 100 == 0 {
            &self.magnitude_medium
        } else {
            &self.magnitude_minor
        }
    }
}

/// Allocator for node and way ids.
///
/// Seeded once per run from the tile origin: each 1° × 1° tile owns a
/// disjoint block of the id space, and node blocks start above the last
/// way block. Counters only ever grow.
#[derive(Debug)]
pub struct IdAllocator {
    next_way: i64,
    next_node: i64,
}

/// Ids start above this floor to avoid the official dataset's id range.
const ID_FLOOR: i64 = 10_000_000;

/// Way ids reserved per tile.
const WAY_BLOCK: i64 = 10 * 4i64.pow(10);

/// Node ids reserved per tile.
const NODE_BLOCK: i64 = 100 * 4i64.pow(10);

impl IdAllocator {
    /// Seed the counters for the tile at the given southwest origin.
    pub fn for_tile_origin(origin_lat: i32, origin_lon: i32) -> Self {
        let lon = i64::from(origin_lon) + 180;
        let lat = i64::from(origin_lat) + 90;
        let cell = lon * 180 + lat;

        Self {
            next_way: ID_FLOOR + cell * WAY_BLOCK,
            next_node: ID_FLOOR + 360 * 180 * WAY_BLOCK + cell * NODE_BLOCK,
        }
    }

    pub fn next_node_id(&mut self) -> i64 {
        let id = self.next_node;
        self.next_node += 1;
        id
    }

    pub fn next_way_id(&mut self) -> i64 {
        let id = self.next_way;
        self.next_way += 1;
        id
    }
}

/// Walks geo-mapped contour lines and emits their entities.
pub struct EntitySynthesizer {
    ids: IdAllocator,
    tags: TagScheme,
    timestamp: SystemTime,
    nodes_emitted: u64,
    ways_emitted: u64,
}

impl EntitySynthesizer {
    pub fn new(ids: IdAllocator, tags: TagScheme, timestamp: SystemTime) -> Self {
        Self {
            ids,
            tags,
            timestamp,
            nodes_emitted: 0,
            ways_emitted: 0,
        }
    }

    /// Emit the node entities and the way entity for one geo-mapped line.
    ///
    /// Lines outside the plausible elevation band or with fewer than two
    /// vertices produce nothing. The closing vertex of a closed line
    /// re-references the first vertex's node id instead of allocating a
    /// new node.
    pub fn emit_line<S: Sink>(&mut self, line: &ContourLine, sink: &mut S) -> Result<()> {
        if !plausible_elevation(line.level) {
            debug!(level = line.level, "skipping implausible contour level");
            return Ok(());
        }
        let count = line.points.len();
        if count < 2 {
            return Ok(());
        }

        let mut node_refs = Vec::with_capacity(count);
        for (i, point) in line.points.iter().enumerate() {
            if line.closed && i == count - 1 {
                let first = node_refs[0];
                node_refs.push(first);
                break;
            }

            let id = self.ids.next_node_id();
            sink.process(Record::Node(OsmNode {
                id,
                lat: point.y,
                lon: point.x,
                version: ENTITY_VERSION,
                timestamp: self.timestamp,
            }))?;
            self.nodes_emitted += 1;
            node_refs.push(id);
        }

        let way = OsmWay {
            id: self.ids.next_way_id(),
            node_refs,
            version: ENTITY_VERSION,
            timestamp: self.timestamp,
            tags: vec![
                Tag::new(&self.tags.elevation_key, line.level.to_string()),
                Tag::new(&self.tags.contour_key, &self.tags.contour_value),
                Tag::new(&self.tags.magnitude_key, self.tags.magnitude(line.level)),
            ],
        };
        sink.process(Record::Way(way))?;
        self.ways_emitted += 1;

        Ok(())
    }

    /// Node entities emitted so far.
    pub fn nodes_emitted(&self) -> u64 {
        self.nodes_emitted
    }

    /// Way entities emitted so far.
    pub fn ways_emitted(&self) -> u64 {
        self.ways_emitted
    }
}
