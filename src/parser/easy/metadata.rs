use crate::error::{ReadError, ReadResult};
use std::path::Path;

pub const CHANNEL_COUNT_LABEL: &str = "Total number of channels:";
pub const SAMPLE_RATE_LABEL: &str = "EEG sampling rate:";
pub const START_DATE_LABEL: &str = "StartDate";

/// Trimmed lines of an `.info` sidecar, in file order.
#[derive(Debug, Clone)]
pub struct MetadataLines {
    lines: Vec<String>,
    file_name: String,
}

/// Everything the sidecar tells us about a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFields {
    pub channel_count: usize,
    pub sample_rate: f64,
    pub channel_names: Vec<String>,
    /// Seconds since the Unix epoch
    pub start_time: f64,
}

impl MetadataLines {
    pub fn load<P: AsRef<Path>>(path: P) -> ReadResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ReadError::io(path))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::from_text(&content, file_name))
    }

    pub fn from_text(content: &str, file_name: impl Into<String>) -> Self {
        MetadataLines {
            lines: content.lines().map(|l| l.trim().to_string()).collect(),
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Index of the first line containing `label`.
    ///
    /// The sidecar has no grammar, so this is a plain substring scan and the
    /// first hit wins. Near-duplicate labels are not disambiguated: a
    /// `Channel 10` line that precedes `Channel 1` would satisfy a search
    /// for `Channel 1`.
    pub fn find_first(&self, label: &str) -> ReadResult<usize> {
        self.lines
            .iter()
            .position(|line| line.contains(label))
            .ok_or_else(|| ReadError::FieldNotFound {
                label: label.to_string(),
                file: self.file_name.clone(),
            })
    }

    /// Trimmed text after the final `:` of the first line matching `label`.
    pub fn value_of(&self, label: &str) -> ReadResult<&str> {
        let line = &self.lines[self.find_first(label)?];
        Ok(line.rsplit(':').next().unwrap_or(line).trim())
    }

    pub fn channel_count(&self) -> ReadResult<usize> {
        let raw = self.value_of(CHANNEL_COUNT_LABEL)?;
        raw.parse().map_err(|_| self.invalid(CHANNEL_COUNT_LABEL, raw))
    }

    /// Sampling rate in Hz. The unit suffix ("Samples/second") is dropped.
    pub fn sample_rate(&self) -> ReadResult<f64> {
        let raw = self.value_of(SAMPLE_RATE_LABEL)?;
        let token = raw.split_whitespace().next().unwrap_or("");
        match token.parse::<u32>() {
            Ok(rate) if rate > 0 => Ok(rate as f64),
            _ => Err(self.invalid(SAMPLE_RATE_LABEL, raw)),
        }
    }

    /// Names of `Channel 1` through `Channel {count}`, 0-based.
    pub fn channel_names(&self, count: usize) -> ReadResult<Vec<String>> {
        (1..=count)
            .map(|i| {
                let label = format!("Channel {i}");
                self.value_of(&label).map(str::to_string)
            })
            .collect()
    }

    /// `StartDate` is stored as epoch milliseconds; returned in seconds.
    pub fn start_time(&self) -> ReadResult<f64> {
        let raw = self.value_of(START_DATE_LABEL)?;
        let millis: i64 = raw.parse().map_err(|_| self.invalid(START_DATE_LABEL, raw))?;
        Ok(millis as f64 / 1000.0)
    }

    pub fn extract(&self) -> ReadResult<MetadataFields> {
        let channel_count = self.channel_count()?;
        let sample_rate = self.sample_rate()?;
        let channel_names = self.channel_names(channel_count)?;
        let start_time = self.start_time()?;
        Ok(MetadataFields {
            channel_count,
            sample_rate,
            channel_names,
            start_time,
        })
    }

    fn invalid(&self, label: &str, value: &str) -> ReadError {
        ReadError::InvalidField {
            label: label.to_string(),
            value: value.to_string(),
            file: self.file_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = "\
Device: Enobio8
Total number of channels: 3
  EEG sampling rate: 500 Samples/second
Accelerometer data: no
Channel 1: Fp1
Channel 2:  Fp2
Some note: unrelated
Channel 3: Cz
StartDate (firstEEGTimestamp): 1407322831165
";

    #[test]
    fn extracts_all_fields() {
        let meta = MetadataLines::from_text(INFO, "rec.info");
        let fields = meta.extract().unwrap();
        assert_eq!(fields.channel_count, 3);
        assert_eq!(fields.sample_rate, 500.0);
        assert_eq!(fields.channel_names, vec!["Fp1", "Fp2", "Cz"]);
        assert!((fields.start_time - 1407322831.165).abs() < 1e-6);
    }

    #[test]
    fn lines_are_trimmed() {
        let meta = MetadataLines::from_text(INFO, "rec.info");
        assert_eq!(meta.lines()[2], "EEG sampling rate: 500 Samples/second");
    }

    #[test]
    fn first_match_wins() {
        let meta = MetadataLines::from_text(
            "Total number of channels: 1\nChannel 1: A\nChannel 1: B\n",
            "dup.info",
        );
        assert_eq!(meta.find_first("Channel 1").unwrap(), 1);
        assert_eq!(meta.channel_names(1).unwrap(), vec!["A"]);
    }

    #[test]
    fn channel_order_ignores_interleaving() {
        let text = "Channel 2: B\nnoise\nTotal number of channels: 2\nChannel 1: A\n";
        let meta = MetadataLines::from_text(text, "x.info");
        let count = meta.channel_count().unwrap();
        assert_eq!(meta.channel_names(count).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn missing_label_is_fatal() {
        let meta = MetadataLines::from_text("Total number of channels: 2\n", "x.info");
        match meta.sample_rate() {
            Err(ReadError::FieldNotFound { label, file }) => {
                assert_eq!(label, SAMPLE_RATE_LABEL);
                assert_eq!(file, "x.info");
            }
            other => panic!("expected FieldNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let meta = MetadataLines::from_text(
            "Total number of channels: many\nEEG sampling rate: 0 Hz\nStartDate: soon\n",
            "bad.info",
        );
        assert!(matches!(meta.channel_count(), Err(ReadError::InvalidField { .. })));
        assert!(matches!(meta.sample_rate(), Err(ReadError::InvalidField { .. })));
        assert!(matches!(meta.start_time(), Err(ReadError::InvalidField { .. })));
    }

    #[test]
    fn unreadable_sidecar_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.info");
        match MetadataLines::load(&path) {
            Err(ReadError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
