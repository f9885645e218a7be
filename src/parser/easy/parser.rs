use super::descriptor::DescriptorBuilder;
use super::recording::{assemble, Recording};
use super::samples::{check_extension, read_samples, INFO_EXTENSION};
use crate::config::ReaderOptions;
use crate::error::{ReadResult, ReadWarning};
use crate::geometry::{GeometryLookup, LayoutTable};
use anyhow::Result;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub struct EasyParser {
    pub recording: Recording,
    pub data_file_path: PathBuf,
}

impl EasyParser {
    pub fn from_data_file<P: AsRef<Path>>(data_path: P) -> ReadResult<Self> {
        Self::with_options(data_path, &ReaderOptions::default(), None)
    }

    /// Read a `.easy` file and its `.info` sidecar.
    ///
    /// The extension is checked before anything is opened. When a layout is
    /// configured but no `lookup` is given, layouts are read from JSON files
    /// under the configured (or default) layout path.
    pub fn with_options<P: AsRef<Path>>(
        data_path: P,
        options: &ReaderOptions,
        lookup: Option<&dyn GeometryLookup>,
    ) -> ReadResult<Self> {
        let data_path = data_path.as_ref();
        check_extension(data_path)?;

        let info_path = data_path.with_extension(INFO_EXTENSION);
        let file_layouts = LayoutTable::new();
        let lookup = lookup.unwrap_or(&file_layouts);

        let built = DescriptorBuilder::new(&info_path)
            .stim_channel(&options.stim_channel)
            .geometry(lookup, options.layout.clone(), options.layout_path.clone())
            .load_and_build()?;

        info!("Reading {}", data_path.display());
        let table = read_samples(data_path, &built.descriptor)?;
        let mut recording = assemble(built.descriptor, &table)?;

        recording.warnings = built.warnings;
        if !options.preload {
            recording.warnings.push(ReadWarning::PreloadIgnored);
        }

        Ok(EasyParser {
            recording,
            data_file_path: data_path.to_path_buf(),
        })
    }

    pub fn into_recording(self) -> Recording {
        self.recording
    }

    pub fn sample_rate(&self) -> f64 {
        self.recording.descriptor.sample_rate()
    }

    pub fn to_summary_row(&self) -> Result<DataFrame> {
        let rec = &self.recording;
        let descriptor = &rec.descriptor;

        let data_filename = self
            .data_file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let df = df! {
            // File identification
            "data_filename" => vec![data_filename],
            "info_filename" => vec![descriptor.file_name().to_string()],

            // Layout
            "n_channels" => vec![rec.n_channels() as u32],
            "channel_names" => vec![descriptor.channel_names().join(",")],
            "stim_channel" => vec![descriptor.stim_channel().to_string()],
            "has_geometry" => vec![descriptor.geometry().is_some()],

            // Timing
            "num_samples" => vec![rec.n_samples() as u64],
            "sample_rate_hz" => vec![descriptor.sample_rate()],
            "duration_s" => vec![rec.duration_s()],
            "start_time_s" => vec![descriptor.start_time()],

            // Events
            "num_events" => vec![rec.events().len() as u64],
            "num_warnings" => vec![rec.warnings.len() as u32],
        }?;

        Ok(df)
    }
}
