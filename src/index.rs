use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{FingerprintError, Result};
use crate::hashing::{HashedPeak, PairHash};

/// Opaque string identifier for a reference recording — the file stem of
/// the WAV it was ingested from.
pub type TrackId = String;

/// A single occurrence of a hash in a track's postings list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub track_id: TrackId,
    pub anchor_time: u32,
}

/// The inverted index: `PairHash -> [IndexEntry]`, built once over a
/// corpus and then frozen for read-only querying.
///
/// Write-only during build, read-only during query; this type enforces no
/// locking itself, it simply documents the phase separation the caller
/// must respect.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Index {
    postings: HashMap<PairHash, Vec<IndexEntry>>,
    ingested: HashSet<TrackId>,
}

impl Index {
    pub fn new() -> Self {
        Index::default()
    }

    /// Appends every hash from `hashes` to the index under `track_id`.
    /// Rejects re-ingesting a `track_id` that has already been seen rather
    /// than silently merging or overwriting its postings.
    pub fn ingest_track(
        &mut self,
        track_id: TrackId,
        hashes: impl IntoIterator<Item = HashedPeak>,
    ) -> Result<()> {
        if !self.ingested.insert(track_id.clone()) {
            return Err(FingerprintError::DuplicateTrack(track_id));
        }

        for h in hashes {
            self.postings.entry(h.hash).or_insert_with(Vec::new).push(IndexEntry {
                track_id: track_id.clone(),
                anchor_time: h.anchor_time,
            });
        }

        Ok(())
    }

    pub fn postings_for(&self, hash: &PairHash) -> &[IndexEntry] {
        self.postings.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn track_count(&self) -> usize {
        self.ingested.len()
    }

    pub fn contains_track(&self, track_id: &str) -> bool {
        self.ingested.contains(track_id)
    }

    /// Encodes the index to a binary blob. The format is an implementation
    /// detail; only self round-trip is guaranteed.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| FingerprintError::CorruptIndex(format!("serialize failed: {e}")))
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| FingerprintError::CorruptIndex(format!("deserialize failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::PairHash;

    fn hash(a: u32, b: u32, d: u32) -> PairHash {
        PairHash {
            anchor_freq: a,
            target_freq: b,
            delta_time: d,
        }
    }

    #[test]
    fn ingest_then_lookup() {
        let mut index = Index::new();
        let hashes = vec![HashedPeak {
            hash: hash(1, 2, 3),
            anchor_time: 10,
        }];
        index.ingest_track("track1".to_string(), hashes).unwrap();

        let entries = index.postings_for(&hash(1, 2, 3));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].track_id, "track1");
        assert_eq!(entries[0].anchor_time, 10);
    }

    #[test]
    fn duplicate_track_is_rejected() {
        let mut index = Index::new();
        index.ingest_track("t".to_string(), vec![]).unwrap();
        let err = index.ingest_track("t".to_string(), vec![]).unwrap_err();
        assert!(matches!(err, FingerprintError::DuplicateTrack(_)));
    }

    #[test]
    fn unknown_hash_returns_empty_postings() {
        let index = Index::new();
        assert!(index.postings_for(&hash(9, 9, 9)).is_empty());
    }

    /// Invariant 4 — round trip preserves query results.
    #[test]
    fn serialize_deserialize_round_trips() {
        let mut index = Index::new();
        index
            .ingest_track(
                "a".to_string(),
                vec![HashedPeak {
                    hash: hash(1, 2, 3),
                    anchor_time: 7,
                }],
            )
            .unwrap();

        let bytes = index.serialize().unwrap();
        let restored = Index::deserialize(&bytes).unwrap();

        assert_eq!(
            index.postings_for(&hash(1, 2, 3)),
            restored.postings_for(&hash(1, 2, 3))
        );
        assert_eq!(index.track_count(), restored.track_count());
    }

    #[test]
    fn corrupt_bytes_fail_to_deserialize() {
        let err = Index::deserialize(&[0xff, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, FingerprintError::CorruptIndex(_)));
    }
}
