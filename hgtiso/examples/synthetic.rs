//! Trace contours over a synthetic volcano-shaped grid.
//!
//! Run with: cargo run --example synthetic

use std::time::SystemTime;

use hgtiso::osm::{EntitySynthesizer, IdAllocator, TagScheme};
use hgtiso::{contour, CollectingSink, GridToGeo, HgtError};

fn main() -> Result<(), HgtError> {
    // A cone rising to 900m in the middle of a 61x61 grid.
    let size = 61;
    let center = (size / 2) as f64;
    let mut samples = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let dx = col as f64 - center;
            let dy = row as f64 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            samples.push((900.0 * (1.0 - dist / center).max(0.0)) as i16);
        }
    }

    let lines = contour::trace(&samples, size, 100, &[])?;
    println!("Traced {} contour lines:", lines.len());
    for line in &lines {
        println!(
            "  level {:>4}m: {} vertices, {}",
            line.level,
            line.points.len(),
            if line.closed { "closed" } else { "open" }
        );
    }

    // Project into a pretend tile at N28E086 and synthesize entities.
    let transform = GridToGeo::new(28, 86, 1.0 / (size as f64 - 1.0));
    let mut synthesizer = EntitySynthesizer::new(
        IdAllocator::for_tile_origin(28, 86),
        TagScheme::default(),
        SystemTime::now(),
    );

    let mut sink = CollectingSink::default();
    for line in lines {
        let line = transform.project(line);
        synthesizer.emit_line(&line, &mut sink)?;
    }

    println!(
        "\nSynthesized {} nodes and {} ways",
        sink.nodes.len(),
        sink.ways.len()
    );
    if let Some(way) = sink.ways.first() {
        println!("First way tags:");
        for tag in &way.tags {
            println!("  {} = {}", tag.key, tag.value);
        }
    }

    Ok(())
}
