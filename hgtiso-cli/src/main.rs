use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod sink;

/// SRTM contour line generator
#[derive(Parser)]
#[command(name = "hgtiso")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate OSM contour entities from an .hgt tile
    Generate {
        /// Path to the .hgt file
        file: PathBuf,

        /// Elevation interval between contour lines, in meters
        #[arg(short, long, env = "HGTISO_INTERVAL", default_value_t = 25)]
        interval: u32,

        /// Output file for the OSM XML (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tag key carrying the elevation value
        #[arg(long, default_value = "ele")]
        elev_key: String,

        /// Tag key classifying ways as contours
        #[arg(long, default_value = "contour")]
        contour_key: String,

        /// Tag value for the contour classification key
        #[arg(long, default_value = "elevation")]
        contour_val: String,

        /// Tag key carrying the magnitude band
        #[arg(long, default_value = "contour_ext")]
        contour_ext_key: String,

        /// Band value for levels that are multiples of 500
        #[arg(long, default_value = "elevation_major")]
        contour_ext_major: String,

        /// Band value for levels that are multiples of 100
        #[arg(long, default_value = "elevation_medium")]
        contour_ext_medium: String,

        /// Band value for all other levels
        #[arg(long, default_value = "elevation_minor")]
        contour_ext_minor: String,
    },

    /// Display information about an .hgt tile
    Info {
        /// Path to the .hgt file
        file: PathBuf,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout may carry the generated XML.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hgtiso=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            interval,
            output,
            elev_key,
            contour_key,
            contour_val,
            contour_ext_key,
            contour_ext_major,
            contour_ext_medium,
            contour_ext_minor,
        } => commands::generate::run(
            file,
            interval,
            output,
            elev_key,
            contour_key,
            contour_val,
            contour_ext_key,
            contour_ext_major,
            contour_ext_medium,
            contour_ext_minor,
        ),
        Commands::Info { file, json } => commands::info::run(file, json),
    }
}
