//! WFDB header (`.hea`) parsing
//!
//! A header is a record line followed by one line per signal. Lines starting
//! with `#` are comments.
//!
//! ```text
//! chf01 2 250 11730944
//! chf01.dat 212 200/mV 12 0 -46 29183 0 ECG1
//! chf01.dat 212 200/mV 12 0 -25 56153 0 ECG2
//! ```
//!
//! Record line: `name nsig [fs[/counter[(base)]] [nsamp [time [date]]]]`.
//! Signal line: `file format[xspf][:skew][+offset] [gain[(baseline)][/units]
//! [adcres [adczero [initval [checksum [blocksize [description]]]]]]]`.

use crate::format::StorageFormat;
use ecg_core::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// Sampling rate assumed when the record line omits it
pub const DEFAULT_SAMPLING_RATE: f64 = 250.0;

/// ADC units per physical unit assumed when the gain is missing or zero
pub const DEFAULT_GAIN: f64 = 200.0;

/// One signal line of a header
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSpec {
    /// Signal file name, relative to the header's directory
    pub file_name: String,
    pub format: StorageFormat,
    /// Byte offset of the first sample in the signal file
    pub byte_offset: u64,
    /// ADC units per physical unit
    pub gain: f64,
    /// Digital value corresponding to physical zero
    pub baseline: i32,
    pub units: String,
    pub adc_resolution: u32,
    pub adc_zero: i32,
    pub initial_value: i32,
    /// Signal label, e.g. `ECG1`
    pub description: String,
}

impl SignalSpec {
    /// Physical value of a digital sample
    pub fn to_physical(&self, digital: i32) -> f64 {
        f64::from(digital - self.baseline) / self.gain
    }
}

/// A parsed single-segment record header
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    pub name: String,
    pub sampling_rate: f64,
    /// Samples per signal, when the header states it
    pub num_samples: Option<usize>,
    pub signals: Vec<SignalSpec>,
    /// `#` comment lines, without the marker
    pub comments: Vec<String>,
}

impl RecordHeader {
    /// Read and parse a header file
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::MalformedRecord(format!("{}: header is not valid UTF-8: {e}", path.display()))
        })?;
        text.parse()
    }

    /// Number of signals in the record
    pub fn num_signals(&self) -> usize {
        self.signals.len()
    }

    /// Signals stored in the same file as `channel`, and `channel`'s position among them
    pub fn file_group(&self, channel: usize) -> Option<(Vec<&SignalSpec>, usize)> {
        let target = self.signals.get(channel)?;
        let mut position = 0;
        let mut group = Vec::new();
        for (i, spec) in self.signals.iter().enumerate() {
            if spec.file_name == target.file_name {
                if i == channel {
                    position = group.len();
                }
                group.push(spec);
            }
        }
        Some((group, position))
    }
}

impl FromStr for RecordHeader {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut comments = Vec::new();
        let mut lines = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if let Some(comment) = trimmed.strip_prefix('#') {
                comments.push(comment.trim().to_string());
            } else if !trimmed.is_empty() {
                lines.push(trimmed);
            }
        }

        let (record_line, signal_lines) = lines
            .split_first()
            .ok_or_else(|| malformed("header has no record line"))?;
        let mut fields = record_line.split_whitespace();

        let name = fields.next().ok_or_else(|| malformed("missing record name"))?;
        if name.contains('/') {
            return Err(malformed(format!(
                "multi-segment record '{name}' is not supported"
            )));
        }

        let num_signals: usize = parse_field(fields.next(), "number of signals")?;

        let sampling_rate = match fields.next() {
            Some(token) => {
                // Strip the optional counter frequency and base counter value
                let fs_text = token.split(['/', '(']).next().unwrap_or(token);
                let fs: f64 = parse_field(Some(fs_text), "sampling frequency")?;
                if fs > 0.0 {
                    fs
                } else {
                    DEFAULT_SAMPLING_RATE
                }
            }
            None => DEFAULT_SAMPLING_RATE,
        };

        let num_samples = match fields.next() {
            Some(token) => Some(parse_field::<usize>(Some(token), "number of samples")?)
                .filter(|&n| n > 0),
            None => None,
        };

        if signal_lines.len() < num_signals {
            return Err(malformed(format!(
                "header declares {num_signals} signal(s) but has {} signal line(s)",
                signal_lines.len()
            )));
        }

        let signals = signal_lines[..num_signals]
            .iter()
            .map(|line| parse_signal_line(line))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            sampling_rate,
            num_samples,
            signals,
            comments,
        })
    }
}

fn parse_signal_line(line: &str) -> Result<SignalSpec> {
    let mut fields = line.split_whitespace();
    let file_name = fields
        .next()
        .ok_or_else(|| malformed("empty signal line"))?
        .to_string();

    let format_field = fields
        .next()
        .ok_or_else(|| malformed(format!("signal line for '{file_name}' has no format")))?;
    let (format, byte_offset) = parse_format_field(format_field)?;

    let gain_field = fields.next();
    let adc_resolution = parse_optional(fields.next(), "ADC resolution")?.unwrap_or(12);
    let adc_zero = parse_optional(fields.next(), "ADC zero")?.unwrap_or(0);
    let initial_value = parse_optional(fields.next(), "initial value")?.unwrap_or(adc_zero);
    let _checksum = fields.next();
    let _block_size = fields.next();
    let description = fields.collect::<Vec<_>>().join(" ");

    let (gain, baseline, units) = match gain_field {
        Some(field) => parse_gain_field(field, adc_zero)?,
        None => (DEFAULT_GAIN, adc_zero, "mV".to_string()),
    };

    Ok(SignalSpec {
        file_name,
        format,
        byte_offset,
        gain,
        baseline,
        units,
        adc_resolution,
        adc_zero,
        initial_value,
        description,
    })
}

/// `format[xspf][:skew][+offset]`
fn parse_format_field(field: &str) -> Result<(StorageFormat, u64)> {
    let (rest, byte_offset) = match field.split_once('+') {
        Some((rest, offset)) => (rest, parse_field::<u64>(Some(offset), "byte offset")?),
        None => (field, 0),
    };
    let (rest, skew) = match rest.split_once(':') {
        Some((rest, skew)) => (rest, parse_field::<i64>(Some(skew), "skew")?),
        None => (rest, 0),
    };
    let (code, samples_per_frame) = match rest.split_once('x') {
        Some((code, spf)) => (code, parse_field::<u32>(Some(spf), "samples per frame")?),
        None => (rest, 1),
    };

    if samples_per_frame != 1 {
        return Err(malformed(format!(
            "{samples_per_frame} samples per frame is not supported"
        )));
    }
    if skew != 0 {
        return Err(malformed(format!("skewed signals (skew {skew}) are not supported")));
    }

    let format = StorageFormat::from_code(parse_field(Some(code), "storage format")?)?;
    Ok((format, byte_offset))
}

/// `gain[(baseline)][/units]`
fn parse_gain_field(field: &str, adc_zero: i32) -> Result<(f64, i32, String)> {
    let (value, units) = match field.split_once('/') {
        Some((value, units)) => (value, units.to_string()),
        None => (field, "mV".to_string()),
    };
    let (gain_text, baseline) = match value.split_once('(') {
        Some((gain, baseline)) => {
            let baseline = baseline
                .strip_suffix(')')
                .ok_or_else(|| malformed(format!("unterminated baseline in '{field}'")))?;
            (gain, parse_field::<i32>(Some(baseline), "baseline")?)
        }
        None => (value, adc_zero),
    };
    let gain: f64 = parse_field(Some(gain_text), "gain")?;
    let gain = if gain == 0.0 { DEFAULT_GAIN } else { gain };
    Ok((gain, baseline, units))
}

fn parse_field<T: FromStr>(token: Option<&str>, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| malformed(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| malformed(format!("invalid {what} '{token}'")))
}

fn parse_optional<T: FromStr>(token: Option<&str>, what: &str) -> Result<Option<T>> {
    token.map(|t| parse_field(Some(t), what)).transpose()
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedRecord(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHF01: &str = "\
chf01 2 250 11730944
chf01.dat 212 200/mV 12 0 -46 29183 0 ECG1
chf01.dat 212 200/mV 12 0 -25 56153 0 ECG2
# Age: 71  Sex: M  NYHA class: III-IV
";

    #[test]
    fn test_parse_two_signal_header() {
        let header: RecordHeader = CHF01.parse().unwrap();
        assert_eq!(header.name, "chf01");
        assert_eq!(header.sampling_rate, 250.0);
        assert_eq!(header.num_samples, Some(11_730_944));
        assert_eq!(header.num_signals(), 2);
        assert_eq!(header.comments, vec!["Age: 71  Sex: M  NYHA class: III-IV"]);

        let ecg1 = &header.signals[0];
        assert_eq!(ecg1.file_name, "chf01.dat");
        assert_eq!(ecg1.format, StorageFormat::Format212);
        assert_eq!(ecg1.gain, 200.0);
        assert_eq!(ecg1.baseline, 0);
        assert_eq!(ecg1.units, "mV");
        assert_eq!(ecg1.initial_value, -46);
        assert_eq!(ecg1.description, "ECG1");
        assert_eq!(header.signals[1].description, "ECG2");
    }

    #[test]
    fn test_gain_baseline_and_offset() {
        let header: RecordHeader = "\
rec 1 360/1000(0) 650000
rec.dat 16+24 100(1024)/uV 16 1024 1000 0 0 lead II
"
        .parse()
        .unwrap();
        assert_eq!(header.sampling_rate, 360.0);
        let spec = &header.signals[0];
        assert_eq!(spec.format, StorageFormat::Format16);
        assert_eq!(spec.byte_offset, 24);
        assert_eq!(spec.gain, 100.0);
        assert_eq!(spec.baseline, 1024);
        assert_eq!(spec.units, "uV");
        assert_eq!(spec.description, "lead II");
        assert_eq!(spec.to_physical(1124), 1.0);
    }

    #[test]
    fn test_minimal_lines_use_defaults() {
        let header: RecordHeader = "rec 1\nrec.dat 80\n".parse().unwrap();
        assert_eq!(header.sampling_rate, DEFAULT_SAMPLING_RATE);
        assert_eq!(header.num_samples, None);
        let spec = &header.signals[0];
        assert_eq!(spec.gain, DEFAULT_GAIN);
        assert_eq!(spec.baseline, 0);
        assert_eq!(spec.units, "mV");
        assert!(spec.description.is_empty());
    }

    #[test]
    fn test_zero_gain_defaults() {
        let header: RecordHeader = "rec 1 128\nrec.dat 16 0 12 5\n".parse().unwrap();
        assert_eq!(header.signals[0].gain, DEFAULT_GAIN);
        assert_eq!(header.signals[0].baseline, 5);
    }

    #[test]
    fn test_file_group() {
        let header: RecordHeader = "\
rec 3 250
a.dat 16
b.dat 16
a.dat 16
"
        .parse()
        .unwrap();
        let (group, position) = header.file_group(2).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(position, 1);
        assert!(header.file_group(3).is_none());
    }

    #[test]
    fn test_malformed_headers() {
        let cases = [
            "",
            "# only a comment\n",
            "rec two 250\n",
            "rec 2 250\nrec.dat 16\n",
            "rec/2 2 250\n",
            "rec 1 250\nrec.dat 311\n",
            "rec 1 250\nrec.dat 16x2\n",
            "rec 1 250\nrec.dat 16 200(0/mV\n",
        ];
        for text in cases {
            assert!(
                matches!(text.parse::<RecordHeader>(), Err(Error::MalformedRecord(_))),
                "accepted {text:?}"
            );
        }
    }
}
