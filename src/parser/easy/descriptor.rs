use super::metadata::MetadataLines;
use super::ChannelKind;
use crate::config::STIM_CHANNEL;
use crate::error::{ReadError, ReadResult, ReadWarning};
use crate::geometry::{default_search_path, Geometry, GeometryLookup};
use log::debug;
use std::path::{Path, PathBuf};

/// Seconds of data per buffer expected by downstream containers. Fixed.
pub const BUFFER_SIZE_SEC: f64 = 1.0;

/// Channel layout and timing of one recording.
///
/// `channel_names` lists every signal channel in sample-file column order,
/// followed by the stim channel. `channel_kinds` is aligned 1:1 with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingDescriptor {
    channel_names: Vec<String>,
    channel_kinds: Vec<ChannelKind>,
    sample_rate: f64,
    start_time: Option<f64>,
    file_name: String,
    buffer_size_sec: f64,
    geometry: Option<Geometry>,
}

impl RecordingDescriptor {
    pub fn new(
        signal_names: Vec<String>,
        stim_channel: &str,
        sample_rate: f64,
        start_time: Option<f64>,
        file_name: impl Into<String>,
    ) -> Self {
        let mut channel_kinds = vec![ChannelKind::Eeg; signal_names.len()];
        channel_kinds.push(ChannelKind::Stim);
        let mut channel_names = signal_names;
        channel_names.push(stim_channel.to_string());
        RecordingDescriptor {
            channel_names,
            channel_kinds,
            sample_rate,
            start_time,
            file_name: file_name.into(),
            buffer_size_sec: BUFFER_SIZE_SEC,
            geometry: None,
        }
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    pub fn channel_kinds(&self) -> &[ChannelKind] {
        &self.channel_kinds
    }

    /// Signal channels plus the stim channel.
    pub fn n_channels(&self) -> usize {
        self.channel_names.len()
    }

    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.channel_names
            .iter()
            .zip(&self.channel_kinds)
            .filter(|(_, kind)| kind.is_scaled())
            .map(|(name, _)| name.as_str())
    }

    pub fn stim_channel(&self) -> &str {
        self.channel_names
            .iter()
            .zip(&self.channel_kinds)
            .find(|(_, kind)| **kind == ChannelKind::Stim)
            .map(|(name, _)| name.as_str())
            .unwrap_or(STIM_CHANNEL)
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Seconds since the Unix epoch.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn buffer_size_sec(&self) -> f64 {
        self.buffer_size_sec
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub(crate) fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub(crate) fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// A descriptor plus the non-fatal conditions hit while building it.
#[derive(Debug, Clone)]
pub struct BuiltDescriptor {
    pub descriptor: RecordingDescriptor,
    pub warnings: Vec<ReadWarning>,
}

struct GeometryRequest<'a> {
    lookup: &'a dyn GeometryLookup,
    layout: Option<String>,
    search_path: Option<PathBuf>,
}

pub struct DescriptorBuilder<'a> {
    sidecar_path: PathBuf,
    stim_channel: String,
    geometry: Option<GeometryRequest<'a>>,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new<P: AsRef<Path>>(sidecar_path: P) -> Self {
        DescriptorBuilder {
            sidecar_path: sidecar_path.as_ref().to_path_buf(),
            stim_channel: STIM_CHANNEL.to_string(),
            geometry: None,
        }
    }

    pub fn stim_channel(mut self, name: &str) -> Self {
        self.stim_channel = name.to_string();
        self
    }

    /// Resolve channel positions with `lookup`. A `None` layout skips
    /// resolution.
    pub fn geometry(
        mut self,
        lookup: &'a dyn GeometryLookup,
        layout: Option<String>,
        search_path: Option<PathBuf>,
    ) -> Self {
        self.geometry = Some(GeometryRequest {
            lookup,
            layout,
            search_path,
        });
        self
    }

    /// Read the sidecar if it exists, then build.
    pub fn load_and_build(&self) -> ReadResult<BuiltDescriptor> {
        if !self.sidecar_path.is_file() {
            return self.build(None);
        }
        let metadata = MetadataLines::load(&self.sidecar_path)?;
        self.build(Some(&metadata))
    }

    /// Absent metadata is reported as [`ReadError::MissingMetadata`]; no
    /// defaults are substituted.
    pub fn build(&self, metadata: Option<&MetadataLines>) -> ReadResult<BuiltDescriptor> {
        let metadata = metadata.ok_or_else(|| ReadError::MissingMetadata {
            path: self.sidecar_path.clone(),
        })?;

        let fields = metadata.extract()?;
        debug!(
            "{}: {} channels at {} Hz",
            metadata.file_name(),
            fields.channel_count,
            fields.sample_rate
        );

        let file_name = self
            .sidecar_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| metadata.file_name().to_string());

        let mut descriptor = RecordingDescriptor::new(
            fields.channel_names,
            &self.stim_channel,
            fields.sample_rate,
            Some(fields.start_time),
            file_name,
        );

        let mut warnings = Vec::new();
        match self.resolve_geometry(&descriptor) {
            Ok(geometry) => descriptor = descriptor.with_geometry(geometry),
            Err(warning) => warnings.push(warning),
        }

        Ok(BuiltDescriptor {
            descriptor,
            warnings,
        })
    }

    fn resolve_geometry(&self, descriptor: &RecordingDescriptor) -> Result<Geometry, ReadWarning> {
        let unavailable = |layout: Option<&String>, reason: String| ReadWarning::GeometryUnavailable {
            layout: layout.cloned(),
            reason,
        };

        let request = self
            .geometry
            .as_ref()
            .ok_or_else(|| unavailable(None, "no geometry lookup supplied".to_string()))?;
        let layout = request
            .layout
            .as_ref()
            .ok_or_else(|| unavailable(None, "no layout named".to_string()))?;

        let search_path = request.search_path.clone().unwrap_or_else(default_search_path);
        let signal_names: Vec<String> = descriptor.signal_names().map(str::to_string).collect();

        match request.lookup.resolve(layout, &signal_names, &search_path) {
            Ok(geometry) if geometry.is_empty() => {
                Err(unavailable(Some(layout), "layout matched no channels".to_string()))
            }
            Ok(geometry) => Ok(geometry),
            Err(e) => Err(unavailable(Some(layout), format!("{e:#}"))),
        }
    }
}
