use super::samples::EASY_EXTENSION;
use super::EasyParser;
use crate::config::ReaderOptions;
use anyhow::Result;
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;
use walkdir::WalkDir;

pub struct EasyDataset;

impl EasyDataset {
    /// Read every .easy file under a directory into a summary DataFrame.
    /// Recordings that fail to read are logged and skipped.
    pub fn from_directory<P: AsRef<Path>>(dir_path: P, options: &ReaderOptions) -> Result<DataFrame> {
        let mut all_rows = Vec::new();
        let mut processed_count = 0;
        let mut error_count = 0;

        info!("Scanning directory: {:?}", dir_path.as_ref());

        for entry in WalkDir::new(dir_path).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some(EASY_EXTENSION) {
                processed_count += 1;
                if processed_count % 10 == 0 {
                    info!("Processed {} files...", processed_count);
                }

                match EasyParser::with_options(path, options, None) {
                    Ok(parser) => {
                        for warning in &parser.recording.warnings {
                            info!("{:?}: {}", path, warning);
                        }
                        match parser.to_summary_row() {
                            Ok(row_df) => all_rows.push(row_df),
                            Err(e) => {
                                error_count += 1;
                                warn!("Failed to create summary for {:?}: {}", path, e);
                            }
                        }
                    }
                    Err(e) => {
                        error_count += 1;
                        warn!("Failed to read {:?}: {}", path, e);
                    }
                }
            }
        }

        info!("Processed {} files, {} errors", processed_count, error_count);

        Self::stack(all_rows).map_err(|_| anyhow::anyhow!("No valid .easy recordings found in directory"))
    }

    /// Read specific files into a dataset. Any failure aborts.
    pub fn from_files<P: AsRef<Path>>(file_paths: &[P], options: &ReaderOptions) -> Result<DataFrame> {
        if file_paths.is_empty() {
            anyhow::bail!("No files provided");
        }
        let mut all_rows = Vec::new();
        for path in file_paths {
            let parser = EasyParser::with_options(path, options, None)?;
            all_rows.push(parser.to_summary_row()?);
        }
        Self::stack(all_rows)
    }

    fn stack(rows: Vec<DataFrame>) -> Result<DataFrame> {
        let mut rows = rows.into_iter();
        let Some(mut combined) = rows.next() else {
            anyhow::bail!("no rows to combine");
        };
        for row_df in rows {
            combined.vstack_mut(&row_df)?;
        }
        Ok(combined)
    }
}
