//! WAV Decoding
//!
//! File-based acquisition path: decode a PCM WAV file into a
//! `VoiceSample`, downmixing to mono. The `AudioFormat` tag is attached
//! here, once. Transcoding from other containers (WebM capture uploads)
//! belongs to the upstream conversion collaborator.

use std::path::Path;

use crate::logic::error::{VerifyError, VerifyResult};
use crate::logic::sample::{AudioFormat, VoiceSample};

/// Decode a WAV file into a mono `VoiceSample`
pub fn load_wav(path: impl AsRef<Path>) -> VerifyResult<VoiceSample> {
    let path = path.as_ref();
    let mut reader = hound::WavReader::open(path).map_err(|e| {
        VerifyError::InvalidAudio(format!("failed to read {}: {}", path.display(), e))
    })?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| VerifyError::InvalidAudio(format!("bad sample data: {}", e)))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| VerifyError::InvalidAudio(format!("bad sample data: {}", e)))?
        }
    };

    let samples = downmix(&interleaved, spec.channels as usize);

    log::debug!(
        "Decoded {}: {} Hz, {} ch, {} frames",
        path.display(),
        spec.sample_rate,
        spec.channels,
        samples.len()
    );

    Ok(VoiceSample::new(samples, spec.sample_rate, AudioFormat::Wav))
}

/// Average interleaved channels down to mono
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
