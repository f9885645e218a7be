use super::RecordingDescriptor;
use crate::error::{ReadError, ReadResult};
use log::debug;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Device units to volts: `.easy` values are nanovolts.
pub const SCALING_FACTOR: f64 = 1e-9;

pub const EASY_EXTENSION: &str = "easy";
pub const INFO_EXTENSION: &str = "info";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// One named column of the sample file.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Sample-major view of a `.easy` file: signal channels in descriptor order,
/// then the stim channel, then the device timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    file_name: String,
    columns: Vec<SampleColumn>,
}

impl SampleTable {
    pub fn from_columns(file_name: impl Into<String>, columns: Vec<SampleColumn>) -> Self {
        SampleTable {
            file_name: file_name.into(),
            columns,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn columns(&self) -> &[SampleColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn timestamps(&self) -> Option<&[f64]> {
        self.column(TIMESTAMP_COLUMN)
    }

    /// Errors unless the table is exactly the descriptor's channels followed
    /// by the timestamp column, all of equal length.
    pub fn check_layout(&self, descriptor: &RecordingDescriptor) -> ReadResult<()> {
        let expected = expected_header(descriptor);
        if self.width() != expected.len() {
            return Err(ReadError::ShapeMismatch {
                file: self.file_name.clone(),
                expected: expected.len(),
                actual: self.width(),
            });
        }
        if self.columns.iter().zip(&expected).any(|(c, name)| &c.name != name) {
            return Err(ReadError::ColumnOrder {
                file: self.file_name.clone(),
                expected,
                actual: self.columns.iter().map(|c| c.name.clone()).collect(),
            });
        }
        let n_rows = self.n_rows();
        if let Some(ragged) = self.columns.iter().find(|c| c.values.len() != n_rows) {
            return Err(ReadError::RaggedColumns {
                file: self.file_name.clone(),
                column: ragged.name.clone(),
                expected: n_rows,
                actual: ragged.values.len(),
            });
        }
        Ok(())
    }

    /// Multiply every signal column by `factor`. Stim and timestamp columns
    /// are left alone.
    fn scale_signals(&mut self, descriptor: &RecordingDescriptor, factor: f64) {
        for (column, kind) in self.columns.iter_mut().zip(descriptor.channel_kinds()) {
            if kind.is_scaled() {
                column.values.iter_mut().for_each(|v| *v *= factor);
            }
        }
    }
}

/// Column names the sample file is assumed to carry. The file has no header
/// row; this order comes from the recording device.
pub fn expected_header(descriptor: &RecordingDescriptor) -> Vec<String> {
    let mut header = descriptor.channel_names().to_vec();
    header.push(TIMESTAMP_COLUMN.to_string());
    header
}

pub fn check_extension(path: &Path) -> ReadResult<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(EASY_EXTENSION) => Ok(()),
        _ => Err(ReadError::Format {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a `.easy` file and scale its signal columns by [`SCALING_FACTOR`].
pub fn read_samples<P: AsRef<Path>>(path: P, descriptor: &RecordingDescriptor) -> ReadResult<SampleTable> {
    let path = path.as_ref();
    check_extension(path)?;
    let mut table = read_unscaled(path, descriptor)?;
    table.scale_signals(descriptor, SCALING_FACTOR);
    Ok(table)
}

fn read_unscaled(path: &Path, descriptor: &RecordingDescriptor) -> ReadResult<SampleTable> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let header = expected_header(descriptor);

    let Some(width) = row_width(path, &file_name, header.len())? else {
        debug!("{file_name}: no samples");
        let columns = header
            .into_iter()
            .map(|name| SampleColumn { name, values: Vec::new() })
            .collect();
        return Ok(SampleTable::from_columns(file_name, columns));
    };

    // Positional names: channel labels are not guaranteed unique.
    let schema: Schema = (0..width)
        .map(|i| Field::new(format!("column_{}", i + 1).as_str().into(), DataType::Float64))
        .collect();

    let polars_err = |source: PolarsError| ReadError::Polars {
        file: file_name.clone(),
        source,
    };
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .with_parse_options(CsvParseOptions::default().with_separator(b'\t'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(polars_err)?;

    debug!("{}: read {} rows x {} columns", file_name, df.height(), df.width());

    let mut columns = Vec::with_capacity(width);
    for (series, name) in df.get_columns().iter().zip(header) {
        let values = series
            .f64()
            .map_err(polars_err)?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        columns.push(SampleColumn { name, values });
    }

    Ok(SampleTable::from_columns(file_name, columns))
}

/// Field count shared by every non-blank line, or `None` for an empty file.
///
/// There is no header row to validate against, so each row is counted
/// before the bulk parse; a row with a different count is a
/// [`ReadError::ShapeMismatch`].
fn row_width(path: &Path, file_name: &str, expected: usize) -> ReadResult<Option<usize>> {
    let reader = BufReader::new(File::open(path).map_err(ReadError::io(path))?);
    let mut seen = false;
    for line in reader.lines() {
        let line = line.map_err(ReadError::io(path))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let width = line.split('\t').count();
        if width != expected {
            return Err(ReadError::ShapeMismatch {
                file: file_name.to_string(),
                expected,
                actual: width,
            });
        }
        seen = true;
    }
    Ok(seen.then_some(expected))
}
