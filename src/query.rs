use std::collections::HashMap;

use crate::hashing::HashedPeak;
use crate::index::{Index, TrackId};
use crate::scorer;

/// Ordered list of candidate tracks, best match first.
pub type Ranking = Vec<TrackId>;

/// Matches a query's hashes against the index and returns a ranking of
/// candidate tracks.
pub fn identify(query_hashes: &[HashedPeak], index: &Index) -> Ranking {
    let mut deltas: HashMap<TrackId, Vec<i64>> = HashMap::new();

    for q in query_hashes {
        for entry in index.postings_for(&q.hash) {
            let delta = entry.anchor_time as i64 - q.anchor_time as i64;
            deltas.entry(entry.track_id.clone()).or_default().push(delta);
        }
    }

    let mut scored: Vec<(TrackId, u64)> = deltas
        .into_iter()
        .filter(|(_, d)| !d.is_empty())
        .map(|(track_id, d)| (track_id, scorer::score(&d)))
        .collect();

    // Descending score; ties broken by track_id for determinism.
    scored.sort_by(|(a_id, a_score), (b_id, b_score)| {
        b_score.cmp(a_score).then_with(|| a_id.cmp(b_id))
    });

    scored.into_iter().map(|(track_id, _)| track_id).collect()
}

/// Truncates a ranking to its top `min(k, len)` entries, the shape used
/// for the tab-separated output lines written by the CLI binaries.
pub fn top_k(ranking: &Ranking, k: usize) -> &[TrackId] {
    &ranking[..ranking.len().min(k)]
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

    /// Indexing a single track and querying with itself ranks it first
    /// and the ranking has length 1.
    #[test]
    fn trivial_self_match() {
        let mut index = Index::new();
        let hashes = vec![
            HashedPeak { hash: hash(100, 150, 10), anchor_time: 200 },
            HashedPeak { hash: hash(100, 100, 200), anchor_time: 200 },
        ];
        index.ingest_track("R".to_string(), hashes.clone()).unwrap();

        let ranking = identify(&hashes, &index);
        assert_eq!(ranking, vec!["R".to_string()]);
    }

    /// An empty query against a non-empty index yields an empty ranking.
    #[test]
    fn empty_query_ranks_nothing() {
        let mut index = Index::new();
        index
            .ingest_track(
                "R".to_string(),
                vec![HashedPeak { hash: hash(1, 2, 3), anchor_time: 0 }],
            )
            .unwrap();

        let ranking = identify(&[], &index);
        assert!(ranking.is_empty());
    }

    /// Two tracks with disjoint hash spaces; querying with exactly one
    /// track's hashes ranks it first with a positive score.
    #[test]
    fn two_track_disambiguation() {
        let mut index = Index::new();
        let r1_hashes = vec![
            HashedPeak { hash: hash(10, 20, 5), anchor_time: 0 },
            HashedPeak { hash: hash(10, 20, 5), anchor_time: 10 },
            HashedPeak { hash: hash(10, 30, 5), anchor_time: 20 },
        ];
        let r2_hashes = vec![HashedPeak { hash: hash(500, 600, 5), anchor_time: 0 }];

        index.ingest_track("R1".to_string(), r1_hashes.clone()).unwrap();
        index.ingest_track("R2".to_string(), r2_hashes).unwrap();

        let ranking = identify(&r1_hashes, &index);
        assert_eq!(ranking[0], "R1");
        assert!(!ranking.contains(&"R2".to_string()) || ranking.len() == 2);
    }

    /// A time-shifted query still identifies the source track, with the
    /// winning delta histogram's mode at the (negated) shift.
    #[test]
    fn time_shift_robustness() {
        let mut index = Index::new();
        let shift = 50i64;
        let track_hashes: Vec<HashedPeak> = (0..20)
            .map(|i| HashedPeak { hash: hash(10, 20, 5), anchor_time: i * 3 })
            .collect();
        index.ingest_track("R".to_string(), track_hashes).unwrap();

        let query_hashes: Vec<HashedPeak> = (0..20)
            .map(|i| HashedPeak {
                hash: hash(10, 20, 5),
                anchor_time: i * 3 + shift as u32,
            })
            .collect();

        let ranking = identify(&query_hashes, &index);
        assert_eq!(ranking[0], "R");

        let mut deltas = Vec::new();
        for q in &query_hashes {
            for e in index.postings_for(&hash(10, 20, 5)) {
                deltas.push(e.anchor_time as i64 - q.anchor_time as i64);
            }
        }
        let mode = mode_of(&deltas);
        assert_eq!(mode, -shift);
    }

    fn mode_of(deltas: &[i64]) -> i64 {
        use std::collections::HashMap as Map;
        let mut counts: Map<i64, usize> = Map::new();
        for d in deltas {
            *counts.entry(*d).or_insert(0) += 1;
        }
        *counts.iter().max_by_key(|(_, c)| **c).unwrap().0
    }

    #[test]
    fn top_k_truncates() {
        let ranking = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        assert_eq!(top_k(&ranking, 3), &["a", "b", "c"]);
        assert_eq!(top_k(&ranking, 10), ranking.as_slice());
    }
}
