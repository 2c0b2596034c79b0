use serde::{Deserialize, Serialize};

use crate::config::PairHashingConfig;
use crate::error::Result;
use crate::peaks::PeakMap;

/// Triple `(k1, k2, delta_time)` identifying a time-invariant landmark pair.
/// `k1`/`k2` are absolute frequency bins, not offsets; `delta_time` is the
/// nonnegative gap between target and anchor time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairHash {
    pub anchor_freq: u32,
    pub target_freq: u32,
    pub delta_time: u32,
}

/// A `PairHash` tagged with the absolute anchor time of the recording it
/// came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashedPeak {
    pub hash: PairHash,
    pub anchor_time: u32,
}

/// For each anchor peak, enumerate peaks in its forward target zone
/// and emit pair hashes tagged with the anchor's time.
///
/// Returns a finite, non-restartable iterator: consumers that need to scan
/// the hashes more than once should `.collect()` into a `Vec`.
pub fn hash_peaks(
    peaks: &PeakMap,
    config: &PairHashingConfig,
) -> Result<PairHashIter> {
    config.validate()?;

    // PeakMap (a BTreeSet) already iterates in row-major, i.e. (freq, time)
    // ascending, order — the anchor and target orderings the spec requires.
    let ordered: Vec<(usize, usize)> = peaks.iter().copied().collect();

    Ok(PairHashIter {
        peaks: ordered,
        config: *config,
        anchor_idx: 0,
        target_idx: 0,
    })
}

/// Lazy anchor x target-zone iterator produced by [`hash_peaks`].
pub struct PairHashIter {
    peaks: Vec<(usize, usize)>,
    config: PairHashingConfig,
    anchor_idx: usize,
    target_idx: usize,
}

impl Iterator for PairHashIter {
    type Item = HashedPeak;

    fn next(&mut self) -> Option<HashedPeak> {
        loop {
            let anchor = *self.peaks.get(self.anchor_idx)?;
            let (k1, n1) = anchor;

            let freq_lo = k1.saturating_sub(self.config.target_freq_height);
            let freq_hi = k1 + self.config.target_freq_height;
            let time_lo = n1 + self.config.target_time_offset;
            let time_hi = time_lo + self.config.target_time_width;

            while self.target_idx < self.peaks.len() {
                let (k2, n2) = self.peaks[self.target_idx];

                if k2 >= freq_hi {
                    // Targets are sorted by frequency first; nothing further
                    // in this band can fall inside the zone. freq_hi is
                    // exclusive.
                    break;
                }
                self.target_idx += 1;

                if k2 < freq_lo || n2 < time_lo || n2 >= time_hi {
                    continue;
                }

                let delta_time = (n2 - n1) as u32;
                return Some(HashedPeak {
                    hash: PairHash {
                        anchor_freq: k1 as u32,
                        target_freq: k2 as u32,
                        delta_time,
                    },
                    anchor_time: n1 as u32,
                });
            }

            // Exhausted targets for this anchor, move to the next one.
            self.anchor_idx += 1;
            self.target_idx = 0;
        }
    }
}
