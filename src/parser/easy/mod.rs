mod datatypes;
mod metadata;
mod descriptor;
mod samples;
mod recording;
mod parser;
mod dataset;

pub use datatypes::ChannelKind;
pub use metadata::{MetadataFields, MetadataLines};
pub use descriptor::{BuiltDescriptor, DescriptorBuilder, RecordingDescriptor, BUFFER_SIZE_SEC};
pub use samples::{
    check_extension, expected_header, read_samples, SampleColumn, SampleTable, SCALING_FACTOR, TIMESTAMP_COLUMN,
};
pub use recording::{assemble, Event, Recording};
pub use parser::EasyParser;
pub use dataset::EasyDataset;
