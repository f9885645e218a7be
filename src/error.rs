//! Error and warning types for reading `.easy` recordings.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal (or caller-decided) outcomes of reading one recording.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The sample file does not carry the `.easy` extension
    #[error("EEG file must be .easy format: {path:?}")]
    Format {
        /// Offending sample file
        path: PathBuf,
    },

    /// The `.info` sidecar next to the sample file is absent
    #[error("metadata file not found, EEG data cannot be imported without it: {path:?}")]
    MissingMetadata {
        /// Expected sidecar location
        path: PathBuf,
    },

    /// A required label is not present in the metadata
    #[error("label {label:?} not found in {file}")]
    FieldNotFound {
        /// Label searched for
        label: String,
        /// Sidecar basename
        file: String,
    },

    /// A label was found but its value does not parse
    #[error("invalid value {value:?} for {label:?} in {file}")]
    InvalidField {
        /// Label of the offending line
        label: String,
        /// Raw text after the label
        value: String,
        /// Sidecar basename
        file: String,
    },

    /// The sample table does not line up with the descriptor
    #[error("shape mismatch in {file}: expected {expected} columns, found {actual}")]
    ShapeMismatch {
        /// Sample file basename
        file: String,
        /// Columns implied by the descriptor (channels + timestamp)
        expected: usize,
        /// Columns actually present
        actual: usize,
    },

    /// Column names present in the right number but the wrong order
    #[error("column order mismatch in {file}: expected {expected:?}, found {actual:?}")]
    ColumnOrder {
        /// Sample file basename
        file: String,
        /// Descriptor channel names plus `timestamp`
        expected: Vec<String>,
        /// Names carried by the table
        actual: Vec<String>,
    },

    /// A column whose length disagrees with the others
    #[error("column {column:?} in {file} has {actual} samples, expected {expected}")]
    RaggedColumns {
        /// Sample file basename
        file: String,
        /// Offending column
        column: String,
        /// Length of the first column
        expected: usize,
        /// Length of the offending column
        actual: usize,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sample parse error in {file}: {source}")]
    Polars {
        file: String,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("array shape error: {0}")]
    Array(#[from] ndarray::ShapeError),
}

impl ReadError {
    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> ReadError + '_ {
        move |source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the caller may reasonably skip this recording and carry on,
    /// e.g. a batch run over a directory where some sidecars are missing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReadError::MissingMetadata { .. })
    }
}

/// Non-fatal conditions collected while reading. Returned alongside the
/// recording so the caller decides whether and how to report them.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadWarning {
    /// No channel positions are attached to the descriptor
    GeometryUnavailable {
        /// Requested layout, if any
        layout: Option<String>,
        /// Why resolution did not happen
        reason: String,
    },
    /// `preload = false` was requested; data is loaded regardless
    PreloadIgnored,
}

impl std::fmt::Display for ReadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadWarning::GeometryUnavailable { layout: Some(layout), reason } => {
                write!(f, "layout {layout:?} not applied, channel locations unavailable: {reason}")
            }
            ReadWarning::GeometryUnavailable { layout: None, reason } => {
                write!(f, "no layout applied, channel locations unavailable: {reason}")
            }
            ReadWarning::PreloadIgnored => {
                write!(f, "preload=false is not supported for .easy files, data will be preloaded")
            }
        }
    }
}

/// Result type for reader operations
pub type ReadResult<T> = Result<T, ReadError>;
