pub mod easy;
// this is where we'd add other file types

pub use easy::{EasyDataset, EasyParser};

use crate::config::ReaderOptions;
use anyhow::Result;
use polars::prelude::*;
use std::path::Path;

pub struct FileParser;

impl FileParser {
    /// Summary rows for every readable recording under `dir_path`.
    pub fn parse_directory<P: AsRef<Path>>(dir_path: P, options: &ReaderOptions) -> Result<LazyFrame> {
        let df = EasyDataset::from_directory(dir_path, options)?;
        Ok(df.lazy())
    }
}
