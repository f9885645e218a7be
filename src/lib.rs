//! Reader for Enobio `.easy` recordings and their `.info` sidecars.
//!
//! ```no_run
//! use easy_reader::read_raw_easy;
//!
//! let recording = read_raw_easy("session.easy").unwrap();
//! println!("{} channels at {} Hz", recording.n_channels(), recording.descriptor.sample_rate());
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod parser;

pub use config::{ReaderOptions, STIM_CHANNEL};
pub use error::{ReadError, ReadResult, ReadWarning};
pub use parser::easy::{
    assemble, read_samples, ChannelKind, DescriptorBuilder, Event, MetadataLines, Recording,
    RecordingDescriptor, SampleTable, SCALING_FACTOR,
};

use std::path::Path;

/// Read a `.easy` file with default options.
pub fn read_raw_easy<P: AsRef<Path>>(path: P) -> ReadResult<Recording> {
    parser::EasyParser::from_data_file(path).map(parser::EasyParser::into_recording)
}
