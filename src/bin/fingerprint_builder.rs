//! Builds an inverted landmark index over a corpus of reference
//! recordings.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use landmark_id::audio::{list_audio, load_wav, spectrogram_of};
use landmark_id::reporter::{Reporter, TrackProgress, TracingReporter};
use landmark_id::{fingerprint, FingerprintConfig, HashedPeak, Index, PairHashingConfig, PeakPickingConfig};

#[derive(Parser)]
#[command(about = "Build an inverted landmark index over a corpus of reference recordings")]
struct Args {
    /// Directory containing reference .wav recordings
    corpus_dir: PathBuf,

    /// Path to write the serialized index to
    #[arg(short, long, default_value = "fingerprints.index")]
    output: PathBuf,

    #[arg(long, default_value_t = 32)]
    kappa: usize,
    #[arg(long, default_value_t = 16)]
    tau: usize,
    #[arg(long, default_value_t = 64)]
    hop_kappa: usize,
    #[arg(long, default_value_t = 4)]
    hop_tau: usize,
    #[arg(long, default_value_t = 3)]
    target_time_offset: usize,
    #[arg(long, default_value_t = 196)]
    target_time_width: usize,
    #[arg(long, default_value_t = 220)]
    target_freq_height: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = FingerprintConfig {
        peak_picking: PeakPickingConfig {
            kappa: args.kappa,
            tau: args.tau,
            hop_kappa: args.hop_kappa,
            hop_tau: args.hop_tau,
        },
        pair_hashing: PairHashingConfig {
            target_time_offset: args.target_time_offset,
            target_time_width: args.target_time_width,
            target_freq_height: args.target_freq_height,
        },
    };
    config.validate().context("invalid fingerprinting parameters")?;

    let mut index = Index::new();
    let mut reporter = TracingReporter::default();

    let tracks = list_audio(&args.corpus_dir)
        .with_context(|| format!("failed to list {}", args.corpus_dir.display()))?;

    for (track_id, path) in tracks {
        let start = Instant::now();
        match fingerprint_track(&path, &config) {
            Ok(hashes) => {
                let hash_count = hashes.len();
                if let Err(e) = index.ingest_track(track_id.clone(), hashes) {
                    tracing::warn!(track = %track_id, error = %e, "skipping track");
                    continue;
                }
                reporter.track_ingested(TrackProgress {
                    track_id: &track_id,
                    hash_count,
                    elapsed_secs: start.elapsed().as_secs_f64(),
                });
            }
            Err(e) => {
                tracing::warn!(track = %track_id, error = %e, "failed to fingerprint track, skipping");
            }
        }
    }

    let bytes = index.serialize().context("failed to serialize index")?;
    std::fs::write(&args.output, bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        tracks = index.track_count(),
        output = %args.output.display(),
        "wrote fingerprint index"
    );

    Ok(())
}

fn fingerprint_track(path: &Path, config: &FingerprintConfig) -> anyhow::Result<Vec<HashedPeak>> {
    let (samples, _sample_rate) = load_wav(path)?;
    let spectrogram = spectrogram_of(&samples);
    Ok(fingerprint(&spectrogram, config)?)
}
