use anyhow::{Context, Result};
use hgtiso::{ContourPipeline, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::sink::OsmXmlSink;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    interval: u32,
    output: Option<PathBuf>,
    elev_key: String,
    contour_key: String,
    contour_val: String,
    contour_ext_key: String,
    contour_ext_major: String,
    contour_ext_medium: String,
    contour_ext_minor: String,
) -> Result<()> {
    let pipeline = ContourPipeline::builder()
        .interval(interval)
        .elevation_key(elev_key)
        .contour_tag(contour_key, contour_val)
        .magnitude_key(contour_ext_key)
        .magnitude_values(contour_ext_major, contour_ext_medium, contour_ext_minor)
        .build()
        .context("Invalid pipeline configuration")?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} {msg}: {pos} records")?,
    );
    progress.set_message("generating contour entities");

    let summary = match &output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_entities(&pipeline, &file, BufWriter::new(out), &progress)?
        }
        None => {
            let stdout = io::stdout();
            write_entities(&pipeline, &file, BufWriter::new(stdout.lock()), &progress)?
        }
    };

    progress.finish_and_clear();

    eprintln!("Traced {} contour lines", summary.lines_traced);
    eprintln!(
        "Wrote {} nodes and {} ways",
        summary.nodes_emitted, summary.ways_emitted
    );
    if let Some(path) = output {
        eprintln!("Output: {}", path.display());
    }

    Ok(())
}

fn write_entities<W: io::Write>(
    pipeline: &ContourPipeline,
    file: &PathBuf,
    writer: W,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    let mut sink = OsmXmlSink::new(writer).with_progress(progress.clone());
    let summary = pipeline
        .run(file, &mut sink)
        .with_context(|| format!("Failed to generate contours from {}", file.display()))?;
    Ok(summary)
}
