//! Raw Sample Types
//!
//! Data structures for captured biometric samples - no extraction logic.
//! Samples are immutable once captured; the capture collaborator attaches
//! the `AudioFormat` tag once, at acquisition time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::error::{VerifyError, VerifyResult};

// ============================================================================
// MODALITY
// ============================================================================

/// Biometric modalities the pipeline can fuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Voice,
    Keystroke,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Voice => "voice",
            Modality::Keystroke => "keystroke",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VOICE SAMPLE
// ============================================================================

/// Container format of an acquired audio sample, resolved once at
/// acquisition time. Never re-sniffed from file suffixes downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Webm,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Webm => "webm",
        }
    }
}

/// Mono audio waveform plus its sample rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSample {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub format: AudioFormat,
}

impl VoiceSample {
    pub fn new(samples: Vec<f32>, sample_rate: u32, format: AudioFormat) -> Self {
        Self {
            samples,
            sample_rate,
            format,
        }
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

// ============================================================================
// KEYSTROKE SAMPLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Down,
    Up,
}

/// One timestamped key event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub kind: KeyEventKind,
    /// Seconds since an arbitrary capture epoch
    pub time: f64,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>, time: f64) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Down,
            time,
        }
    }

    pub fn up(key: impl Into<String>, time: f64) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Up,
            time,
        }
    }
}

/// Captured keystroke timing, in either of the wire formats the capture
/// collaborator produces: full down/up event streams, or bare inter-key
/// delay lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeystrokeSample {
    Events(Vec<KeyEvent>),
    Delays(Vec<f32>),
}

impl KeystrokeSample {
    /// Parse a keystroke CSV.
    ///
    /// Two formats are accepted:
    /// - `key,event,time` header plus one row per event (`event` is
    ///   `down` or `up`)
    /// - a headerless single column of inter-key delays
    pub fn from_csv_str(raw: &str) -> VerifyResult<KeystrokeSample> {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());

        let first = lines.next().ok_or_else(|| {
            VerifyError::MalformedSample("empty keystroke CSV".to_string())
        })?;

        let header: Vec<&str> = first.split(',').map(str::trim).collect();
        let key_idx = header.iter().position(|c| *c == "key");
        let event_idx = header.iter().position(|c| *c == "event");
        let time_idx = header.iter().position(|c| *c == "time");

        match (key_idx, event_idx, time_idx) {
            (Some(ki), Some(ei), Some(ti)) => {
                let mut events = Vec::new();
                for (n, line) in lines.enumerate() {
                    let cols: Vec<&str> = line.split(',').map(str::trim).collect();
                    let width = ki.max(ei).max(ti) + 1;
                    if cols.len() < width {
                        return Err(VerifyError::MalformedSample(format!(
                            "row {} has {} columns, expected {}",
                            n + 2,
                            cols.len(),
                            width
                        )));
                    }
                    let kind = match cols[ei] {
                        "down" => KeyEventKind::Down,
                        "up" => KeyEventKind::Up,
                        other => {
                            return Err(VerifyError::MalformedSample(format!(
                                "unknown event type '{}' on row {}",
                                other,
                                n + 2
                            )))
                        }
                    };
                    let time: f64 = cols[ti].parse().map_err(|_| {
                        VerifyError::MalformedSample(format!(
                            "bad timestamp '{}' on row {}",
                            cols[ti],
                            n + 2
                        ))
                    })?;
                    events.push(KeyEvent {
                        key: cols[ki].to_string(),
                        kind,
                        time,
                    });
                }
                Ok(KeystrokeSample::Events(events))
            }
            _ => {
                // Headerless delay list; the first line is data too.
                let mut delays = Vec::new();
                for line in std::iter::once(first).chain(lines) {
                    let value = line.split(',').next().unwrap_or(line).trim();
                    let delay: f32 = value.parse().map_err(|_| {
                        VerifyError::MalformedSample(format!(
                            "expected columns key, event, time or a delay list; got '{}'",
                            value
                        ))
                    })?;
                    delays.push(delay);
                }
                Ok(KeystrokeSample::Delays(delays))
            }
        }
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> VerifyResult<KeystrokeSample> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_csv_str(&raw)
    }
}

// ============================================================================
// RAW SAMPLE
// ============================================================================

/// A captured biometric sample, tagged by modality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawSample {
    Voice(VoiceSample),
    Keystroke(KeystrokeSample),
}

impl RawSample {
    pub fn modality(&self) -> Modality {
        match self {
            RawSample::Voice(_) => Modality::Voice,
            RawSample::Keystroke(_) => Modality::Keystroke,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
