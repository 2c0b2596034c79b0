//! External collaborator: WAV decoding and STFT magnitude spectrogram
//! computation. The core (peaks/hashing/index/query/scorer) never touches
//! audio bytes directly — it only ever sees a [`Spectrogram`]. How that
//! spectrogram is produced is irrelevant to the core, but a complete crate
//! needs a real implementation of this boundary.

use std::path::{Path, PathBuf};

use rustfft::{num_complex::Complex, FftPlanner};
use tracing::debug;

use crate::error::{FingerprintError, Result};
use crate::index::TrackId;
use crate::spectrogram::Spectrogram;

/// FFT window length used when turning raw samples into a magnitude
/// spectrogram, with 50% overlap between successive frames.
pub const FFT_SIZE: usize = 2048;
pub const HOP_SIZE: usize = FFT_SIZE / 2;

/// Loads a WAV file, normalizes samples to `[-1.0, 1.0]` and downmixes to
/// mono, returning `(samples, sample_rate)`.
pub fn load_wav(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| FingerprintError::Decode(format!("failed to open {}: {e}", path.display())))?;
    let spec = reader.spec();
    debug!(sample_rate = spec.sample_rate, channels = spec.channels, bits = spec.bits_per_sample, "decoding wav");

    let samples: std::result::Result<Vec<f32>, hound::Error> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect(),
        hound::SampleFormat::Int => match spec.bits_per_sample {
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
                .collect(),
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / (1 << 23) as f32))
                .collect(),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / i32::MAX as f32))
                .collect(),
            bits => {
                return Err(FingerprintError::Decode(format!(
                    "unsupported bit depth: {bits}"
                )))
            }
        },
    };
    let samples = samples.map_err(|e| FingerprintError::Decode(e.to_string()))?;

    let mono = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|chunk| chunk.iter().sum::<f32>() / chunk.len() as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

/// Computes a magnitude spectrogram from mono audio samples using a
/// Hamming-windowed STFT with 50% overlap.
pub fn spectrogram_of(samples: &[f32]) -> Spectrogram {
    let rows = FFT_SIZE / 2;

    if samples.len() < FFT_SIZE {
        return Spectrogram::zeros(rows, 0);
    }

    let num_frames = (samples.len() - FFT_SIZE) / HOP_SIZE + 1;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);
    let window = hamming_window(FFT_SIZE);

    let mut spectrogram = Spectrogram::zeros(rows, num_frames);

    for frame in 0..num_frames {
        let start = frame * HOP_SIZE;
        let mut buffer: Vec<Complex<f32>> = samples[start..start + FFT_SIZE]
            .iter()
            .zip(window.iter())
            .map(|(&x, &w)| Complex::new(x * w, 0.0))
            .collect();

        fft.process(&mut buffer);

        for (row, bin) in buffer.iter().take(rows).enumerate() {
            spectrogram.set(row, frame, bin.norm());
        }
    }

    spectrogram
}

fn hamming_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * std::f32::consts::PI * i as f32 / (n - 1) as f32).cos())
        .collect()
}

/// Lists `.wav` files in `dir`, deriving each `TrackId` from the file stem.
/// Other extensions are silently ignored. Entries are sorted by track id
/// for deterministic ingestion order.
pub fn list_audio(dir: &Path) -> Result<Vec<(TrackId, PathBuf)>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("wav") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        entries.push((stem.to_string(), path));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_samples_yield_zero_frames() {
        let spectrogram = spectrogram_of(&[0.0; 10]);
        assert_eq!(spectrogram.cols(), 0);
    }

    #[test]
    fn hamming_window_is_symmetric() {
        let w = hamming_window(8);
        for i in 0..w.len() {
            assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-6);
        }
    }

    #[test]
    fn spectrogram_has_expected_shape() {
        let samples = vec![0.0f32; FFT_SIZE * 3];
        let spectrogram = spectrogram_of(&samples);
        assert_eq!(spectrogram.rows(), FFT_SIZE / 2);
        assert_eq!(spectrogram.cols(), (samples.len() - FFT_SIZE) / HOP_SIZE + 1);
    }
}
