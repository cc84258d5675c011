//! Error types for the hgtiso library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating contours from an HGT tile.
///
/// Every variant is fatal for the run: nothing is retried and no partial
/// output is promised once an error has been raised.
#[derive(Error, Debug)]
pub enum HgtError {
    /// IO error when reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input .hgt file does not exist.
    #[error("HGT file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File name does not follow the SRTM naming convention.
    #[error("Invalid file name {name:?}: expected the [N28E086.hgt] pattern")]
    InvalidFileName { name: String },

    /// File size doesn't match the SRTM1 or SRTM3 format.
    #[error("Invalid file size: {size} bytes (expected 25934402 for SRTM1 or 2884802 for SRTM3)")]
    InvalidFileSize { size: u64 },

    /// An internal invariant of the contour tracer was broken.
    #[error("Contour geometry error: {detail}")]
    Geometry { detail: String },
}

/// Result type alias using [`HgtError`].
pub type Result<T> = std::result::Result<T, HgtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HgtError::InvalidFileSize { size: 1000 };
        assert!(err.to_string().contains("1000"));

        let err = HgtError::InvalidFileName {
            name: "X35E138.hgt".to_string(),
        };
        assert!(err.to_string().contains("X35E138.hgt"));
        assert!(err.to_string().contains("N28E086.hgt"));

        let err = HgtError::FileNotFound {
            path: PathBuf::from("N35E138.hgt"),
        };
        assert!(err.to_string().contains("N35E138.hgt"));

        let err = HgtError::Geometry {
            detail: "unstitchable fragment".to_string(),
        };
        assert!(err.to_string().contains("unstitchable"));
    }
}
