//! Error types for rtfcraft library.

use std::io;
use thiserror::Error;

/// Result type alias for rtfcraft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading images or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Color is not a 3 or 6 digit hex number.
    #[error("Color must be a hex number of 3 or 6 digits, got: #{0}")]
    InvalidColor(String),

    /// Image data is not in a supported format.
    #[error("Unsupported image format")]
    UnsupportedImage,

    /// Image header could not be read.
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// Cell position outside of the table grid.
    #[error("Cell ({0}, {1}) is out of range (table has {2} rows and {3} columns)")]
    CellOutOfRange(usize, usize, usize, usize),

    /// Row index outside of the table.
    #[error("Row {0} is out of range (table has {1} rows)")]
    RowOutOfRange(usize, usize),

    /// Column index outside of the table.
    #[error("Column {0} is out of range (table has {1} columns)")]
    ColumnOutOfRange(usize, usize),

    /// Merge range is empty or inverted.
    #[error("Invalid merge range: {0}")]
    InvalidMergeRange(String),

    /// A width, height or size is zero, negative or not finite.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Document template could not be parsed.
    #[error("Template error: {0}")]
    Template(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
