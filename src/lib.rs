//! Shazam-style audio landmark fingerprinting and retrieval engine.
//!
//! The core pipeline is peak picking ([`peaks`]) -> pair hashing
//! ([`hashing`]) -> inverted index build ([`index`]) -> query matching
//! ([`query`]) backed by a scorer ([`scorer`]). Audio decode and STFT
//! computation ([`audio`]) are an external collaborator, not part of the
//! core algorithm.

pub mod audio;
pub mod config;
pub mod error;
pub mod hashing;
pub mod index;
pub mod metrics;
pub mod peaks;
pub mod query;
pub mod reporter;
pub mod scorer;
pub mod spectrogram;

pub use config::{FingerprintConfig, PairHashingConfig, PeakPickingConfig};
pub use error::{FingerprintError, Result};
pub use hashing::{hash_peaks, HashedPeak, PairHash};
pub use index::{Index, IndexEntry, TrackId};
pub use peaks::{pick_peaks, PeakMap};
pub use query::{identify, top_k, Ranking};
pub use scorer::score;
pub use spectrogram::Spectrogram;

/// Extracts a track's hashes from a spectrogram in one call: peak picking
/// followed by pair hashing, collected into an owned `Vec` (the hash
/// iterator is not restartable, so callers that need it more than once
/// should go through this helper or collect themselves).
pub fn fingerprint(
    spectrogram: &Spectrogram,
    config: &FingerprintConfig,
) -> Result<Vec<HashedPeak>> {
    let peaks = pick_peaks(spectrogram, &config.peak_picking)?;
    hash_peaks(&peaks, &config.pair_hashing).map(|iter| iter.collect())
}
