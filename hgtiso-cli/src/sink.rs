//! OSM XML output sequencer.

use std::io::Write;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use hgtiso::{BoundingBox, HgtError, OsmNode, OsmWay, Record, Result, Sink};
use indicatif::ProgressBar;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// Changeset attribute attached to every entity.
const CHANGESET: &str = "0";

/// Buffering sequencer that writes an OSM XML 0.6 document.
///
/// Entities may arrive in any order; `complete` emits the final document
/// in stable order: the bounds element, then nodes and ways each sorted
/// by ascending id. The underlying writer is flushed on `complete` and
/// released on drop, so an aborted run still closes its output cleanly.
pub struct OsmXmlSink<W: Write> {
    writer: Writer<W>,
    bound: Option<BoundingBox>,
    nodes: Vec<OsmNode>,
    ways: Vec<OsmWay>,
    progress: Option<ProgressBar>,
    completed: bool,
}

fn xml_err<E: std::fmt::Display>(err: E) -> HgtError {
    HgtError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        err.to_string(),
    ))
}

fn format_timestamp(timestamp: SystemTime) -> String {
    DateTime::<Utc>::from(timestamp).to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<W: Write> OsmXmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
            bound: None,
            nodes: Vec::new(),
            ways: Vec::new(),
            progress: None,
            completed: false,
        }
    }

    /// Tick the given progress bar once per received record.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn write_document(&mut self) -> Result<()> {
        self.nodes.sort_by_key(|n| n.id);
        self.ways.sort_by_key(|w| w.id);

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;

        let mut osm = BytesStart::new("osm");
        osm.push_attribute(("version", "0.6"));
        osm.push_attribute((
            "generator",
            concat!("hgtiso ", env!("CARGO_PKG_VERSION")),
        ));
        self.writer
            .write_event(Event::Start(osm))
            .map_err(xml_err)?;

        if let Some(bound) = &self.bound {
            let mut el = BytesStart::new("bounds");
            el.push_attribute(("minlat", format!("{:.7}", bound.bottom).as_str()));
            el.push_attribute(("minlon", format!("{:.7}", bound.left).as_str()));
            el.push_attribute(("maxlat", format!("{:.7}", bound.top).as_str()));
            el.push_attribute(("maxlon", format!("{:.7}", bound.right).as_str()));
            el.push_attribute(("origin", bound.origin.as_str()));
            self.writer
                .write_event(Event::Empty(el))
                .map_err(xml_err)?;
        }

        for node in &self.nodes {
            let mut el = BytesStart::new("node");
            el.push_attribute(("id", node.id.to_string().as_str()));
            el.push_attribute(("version", node.version.to_string().as_str()));
            el.push_attribute(("timestamp", format_timestamp(node.timestamp).as_str()));
            el.push_attribute(("uid", hgtiso::osm::SYNTHETIC_UID.to_string().as_str()));
            el.push_attribute(("user", hgtiso::osm::SYNTHETIC_USER));
            el.push_attribute(("changeset", CHANGESET));
            el.push_attribute(("lat", format!("{:.7}", node.lat).as_str()));
            el.push_attribute(("lon", format!("{:.7}", node.lon).as_str()));
            self.writer
                .write_event(Event::Empty(el))
                .map_err(xml_err)?;
        }

        for way in &self.ways {
            let mut el = BytesStart::new("way");
            el.push_attribute(("id", way.id.to_string().as_str()));
            el.push_attribute(("version", way.version.to_string().as_str()));
            el.push_attribute(("timestamp", format_timestamp(way.timestamp).as_str()));
            el.push_attribute(("uid", hgtiso::osm::SYNTHETIC_UID.to_string().as_str()));
            el.push_attribute(("user", hgtiso::osm::SYNTHETIC_USER));
            el.push_attribute(("changeset", CHANGESET));
            self.writer
                .write_event(Event::Start(el))
                .map_err(xml_err)?;

            for node_ref in &way.node_refs {
                let mut nd = BytesStart::new("nd");
                nd.push_attribute(("ref", node_ref.to_string().as_str()));
                self.writer
                    .write_event(Event::Empty(nd))
                    .map_err(xml_err)?;
            }
            for tag in &way.tags {
                let mut t = BytesStart::new("tag");
                t.push_attribute(("k", tag.key.as_str()));
                t.push_attribute(("v", tag.value.as_str()));
                self.writer
                    .write_event(Event::Empty(t))
                    .map_err(xml_err)?;
            }

            self.writer
                .write_event(Event::End(BytesEnd::new("way")))
                .map_err(xml_err)?;
        }

        self.writer
            .write_event(Event::End(BytesEnd::new("osm")))
            .map_err(xml_err)?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

impl<W: Write> Sink for OsmXmlSink<W> {
    fn process(&mut self, record: Record) -> Result<()> {
        match record {
            Record::Bound(bound) => self.bound = Some(bound),
            Record::Node(node) => self.nodes.push(node),
            Record::Way(way) => self.ways.push(way),
        }
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        if self.completed {
            return Ok(());
        }
        self.write_document()?;
        self.completed = true;
        Ok(())
    }
}
