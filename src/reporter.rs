//! Explicit status reporting in place of a module-level mutable status
//! dictionary. The pipeline never mutates global state; callers pass a
//! `Reporter` through and the CLI binaries supply a `tracing`-backed one.

/// Per-track status emitted while building an index.
#[derive(Debug, Clone)]
pub struct TrackProgress<'a> {
    pub track_id: &'a str,
    pub hash_count: usize,
    pub elapsed_secs: f64,
}

/// Per-query status emitted while identifying a clip.
#[derive(Debug, Clone)]
pub struct QueryProgress<'a> {
    pub query_name: &'a str,
    pub guesses: &'a [String],
    pub correct_so_far: Option<f64>,
    pub hash_time_secs: f64,
    pub search_time_secs: f64,
}

/// Sink for pipeline progress. The core itself never calls this; only the
/// CLI drivers do, at track/query boundaries.
pub trait Reporter {
    fn track_ingested(&mut self, _progress: TrackProgress<'_>) {}
    fn query_identified(&mut self, _progress: QueryProgress<'_>) {}
}

/// Reporter that emits one `tracing` event per stage, mirroring the fields
/// the Python status strings used to print (time to hashes, time to DB,
/// running accuracy).
#[derive(Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn track_ingested(&mut self, progress: TrackProgress<'_>) {
        tracing::info!(
            track = progress.track_id,
            hashes = progress.hash_count,
            elapsed_secs = progress.elapsed_secs,
            "ingested track"
        );
    }

    fn query_identified(&mut self, progress: QueryProgress<'_>) {
        tracing::info!(
            query = progress.query_name,
            guesses = ?progress.guesses,
            correct_so_far = progress.correct_so_far,
            hash_time_secs = progress.hash_time_secs,
            search_time_secs = progress.search_time_secs,
            "identified query"
        );
    }
}

/// Reporter that discards everything — useful in tests and library
/// embedding contexts that don't want CLI-shaped output.
#[derive(Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}
