//! Output boundary towards the entity sequencer.
//!
//! The pipeline hands one bounding-box record and then entities in
//! synthesis order to a [`Sink`]. Producing the final stable stream
//! (entities ordered by type, then ascending id) and persisting it is the
//! sink's job, not the pipeline's.

use crate::error::Result;
use crate::osm::{BoundingBox, OsmNode, OsmWay};

/// One record handed to the output sequencer.
#[derive(Debug, Clone)]
pub enum Record {
    Bound(BoundingBox),
    Node(OsmNode),
    Way(OsmWay),
}

/// Receiver for the generated record stream.
///
/// `process` is called once with the bounding box before any entity, then
/// with every entity; `complete` ends a successful run and must flush the
/// final stream. Implementations must release their underlying resources
/// on drop as well, since an aborted run never calls `complete`.
pub trait Sink {
    fn process(&mut self, record: Record) -> Result<()>;
    fn complete(&mut self) -> Result<()>;
}

/// In-memory sink collecting everything it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub bounds: Vec<BoundingBox>,
    pub nodes: Vec<OsmNode>,
    pub ways: Vec<OsmWay>,
    pub completed: bool,
}

impl Sink for CollectingSink {
    fn process(&mut self, record: Record) -> Result<()> {
        match record {
            Record::Bound(bound) => self.bounds.push(bound),
            Record::Node(node) => self.nodes.push(node),
            Record::Way(way) => self.ways.push(way),
        }
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        self.completed = true;
        Ok(())
    }
}
