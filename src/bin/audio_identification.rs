//! Identifies a directory of query clips against a prebuilt index and
//! writes a ranking output file.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use landmark_id::audio::{list_audio, load_wav, spectrogram_of};
use landmark_id::metrics::ground_truth_stem;
use landmark_id::reporter::{QueryProgress, Reporter, TracingReporter};
use landmark_id::{fingerprint, top_k, FingerprintConfig, Index, PairHashingConfig, PeakPickingConfig};

#[derive(Parser)]
#[command(about = "Identify query clips against a prebuilt landmark index")]
struct Args {
    /// Directory containing query .wav clips
    queries_dir: PathBuf,

    /// Path to a serialized index produced by fingerprint-builder
    #[arg(short, long, default_value = "fingerprints.index")]
    index: PathBuf,

    /// Path to write the ranking output file to
    #[arg(short, long, default_value = "output.txt")]
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

    let index_bytes = std::fs::read(&args.index)
        .with_context(|| format!("failed to read index {}", args.index.display()))?;
    let index = Index::deserialize(&index_bytes).context("failed to load index")?;

    let mut output_file = std::fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut reporter = TracingReporter::default();
    let queries = list_audio(&args.queries_dir)
        .with_context(|| format!("failed to list {}", args.queries_dir.display()))?;

    let mut n_queries = 0u64;
    let mut n_correct = 0u64;

    for (query_name, path) in queries {
        n_queries += 1;
        let query_file_name = format!("{query_name}.wav");

        let hash_start = Instant::now();
        let query_hashes = match fingerprint_query(&path, &config) {
            Ok(hashes) => hashes,
            Err(e) => {
                tracing::warn!(query = %query_name, error = %e, "failed to fingerprint query, skipping");
                continue;
            }
        };
        let hash_time = hash_start.elapsed().as_secs_f64();

        let search_start = Instant::now();
        let ranking = landmark_id::identify(&query_hashes, &index);
        let search_time = search_start.elapsed().as_secs_f64();

        let guesses = top_k(&ranking, 3);

        let ground_truth = ground_truth_stem(&query_name).to_string();
        let correct = guesses.first().map(|g| *g == ground_truth).unwrap_or(false);
        if correct {
            n_correct += 1;
        }

        reporter.query_identified(QueryProgress {
            query_name: &query_file_name,
            guesses,
            correct_so_far: Some(100.0 * n_correct as f64 / n_queries as f64),
            hash_time_secs: hash_time,
            search_time_secs: search_time,
        });

        write_ranking_line(&mut output_file, &query_file_name, guesses)?;
    }

    if n_queries > 0 {
        tracing::info!(
            accuracy = 100.0 * n_correct as f64 / n_queries as f64,
            n_queries,
            "finished identification run"
        );
    }

    Ok(())
}

fn fingerprint_query(
    path: &std::path::Path,
    config: &FingerprintConfig,
) -> anyhow::Result<Vec<landmark_id::HashedPeak>> {
    let (samples, _sample_rate) = load_wav(path)?;
    let spectrogram = spectrogram_of(&samples);
    Ok(fingerprint(&spectrogram, config)?)
}

fn write_ranking_line(
    output: &mut std::fs::File,
    query_file_name: &str,
    guesses: &[String],
) -> anyhow::Result<()> {
    if guesses.is_empty() {
        writeln!(output, "{query_file_name}")?;
    } else {
        write!(output, "{query_file_name}")?;
        for g in guesses {
            write!(output, "\t{g}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}
