use super::{RecordingDescriptor, SampleTable};
use crate::error::{ReadResult, ReadWarning};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// A non-zero sample on the stim channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub sample: usize,
    pub code: i64,
}

/// Channel-major signal data ready for a multichannel container.
#[derive(Debug, Clone)]
pub struct Recording {
    pub descriptor: RecordingDescriptor,
    /// `(n_channels, n_samples)`, rows in `descriptor.channel_names()` order
    pub data: Array2<f64>,
    /// Raw stim values, one per sample
    pub event_channel: Array1<f64>,
    pub warnings: Vec<ReadWarning>,
}

impl Recording {
    pub fn n_channels(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    pub fn duration_s(&self) -> f64 {
        self.n_samples() as f64 / self.descriptor.sample_rate()
    }

    pub fn channel(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let idx = self.descriptor.channel_names().iter().position(|n| n == name)?;
        Some(self.data.row(idx))
    }

    /// Samples where the stim channel is non-zero. Codes are truncated
    /// towards zero; NaN is skipped.
    pub fn events(&self) -> Vec<Event> {
        self.event_channel
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0 && !v.is_nan())
            .map(|(sample, v)| Event {
                sample,
                code: *v as i64,
            })
            .collect()
    }
}

/// Transpose `table` into channel-major layout.
///
/// The column count is checked against the descriptor first; a table that
/// does not match is never transposed.
pub fn assemble(descriptor: RecordingDescriptor, table: &SampleTable) -> ReadResult<Recording> {
    table.check_layout(&descriptor)?;

    let n_channels = descriptor.n_channels();
    let n_samples = table.n_rows();

    let flat: Vec<f64> = table.columns()[..n_channels]
        .iter()
        .flat_map(|c| c.values.iter().copied())
        .collect();
    let data = Array2::from_shape_vec((n_channels, n_samples), flat)?;
    let event_channel = data.index_axis(Axis(0), n_channels - 1).to_owned();

    let descriptor = match (descriptor.start_time(), table.timestamps().and_then(|t| t.first())) {
        (None, Some(first_ms)) => descriptor.with_start_time(first_ms / 1000.0),
        _ => descriptor,
    };

    Ok(Recording {
        descriptor,
        data,
        event_channel,
        warnings: Vec::new(),
    })
}
