//! Retrieval-quality metrics (precision/recall/F-measure/MAP) over a
//! ranking output file and its ground truth. This is evaluation tooling,
//! not core: it consumes the core's output format, it does not feed back
//! into it.

use std::path::Path;

use crate::error::Result;

/// One query's ranked guesses, read from the `<query>\t<guess1>\t...`
/// output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingLine {
    pub query_name: String,
    pub guesses: Vec<String>,
}

/// Parses a ranking output file, one line per query.
pub fn parse_ranking_file(path: &Path) -> Result<Vec<RankingLine>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .filter(|l| !l.is_empty())
        .map(|line| {
            let mut parts = line.split('\t');
            let query_name = parts.next().unwrap_or_default().to_string();
            let guesses = parts.map(str::to_string).collect();
            RankingLine { query_name, guesses }
        })
        .collect())
}

/// Query filenames look like `<track_stem>-<variant>.wav`; the correct
/// reference track is `<track_stem>`.
pub fn ground_truth_stem(query_name: &str) -> &str {
    query_name.split('-').next().unwrap_or(query_name)
}

/// Builds a 0/1 relevance matrix, one row per query, one column per guess
/// rank, padded with zeros to the longest guess list.
pub fn relevance_matrix(lines: &[RankingLine]) -> Vec<Vec<u8>> {
    let width = lines.iter().map(|l| l.guesses.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|line| {
            let truth = ground_truth_stem(&line.query_name);
            let mut row: Vec<u8> = line
                .guesses
                .iter()
                .map(|g| if g == truth { 1 } else { 0 })
                .collect();
            row.resize(width, 0);
            row
        })
        .collect()
}

fn truncated_row_sum(row: &[u8], rank: usize) -> f64 {
    row.iter().take(rank).map(|&v| v as f64).sum()
}

pub fn precision(rank: usize, relevances: &[Vec<u8>]) -> Vec<f64> {
    relevances
        .iter()
        .map(|row| truncated_row_sum(row, rank) / rank as f64)
        .collect()
}

pub fn recall(rank: usize, relevances: &[Vec<u8>], num_relevant_docs: f64) -> Vec<f64> {
    relevances
        .iter()
        .map(|row| truncated_row_sum(row, rank) / num_relevant_docs)
        .collect()
}

pub fn f_measure(rank: usize, relevances: &[Vec<u8>], num_relevant_docs: f64) -> Vec<f64> {
    let prec = precision(rank, relevances);
    let rec = recall(rank, relevances, num_relevant_docs);
    prec.iter()
        .zip(rec.iter())
        .map(|(&p, &r)| {
            if p + r == 0.0 {
                0.0
            } else {
                2.0 * p * r / (p + r)
            }
        })
        .collect()
}

pub fn average_precision(relevances: &[Vec<u8>], num_relevant_docs: f64) -> Vec<f64> {
    let width = relevances.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return vec![0.0; relevances.len()];
    }

    relevances
        .iter()
        .map(|row| {
            let mut inner_sum = 0.0;
            for r in 0..width {
                let p = truncated_row_sum(row, r + 1) / (r + 1) as f64;
                inner_sum += p * row[r] as f64;
            }
            inner_sum / num_relevant_docs
        })
        .collect()
}

pub fn mean_average_precision(relevances: &[Vec<u8>], num_relevant_docs: f64) -> f64 {
    let ap = average_precision(relevances, num_relevant_docs);
    if ap.is_empty() {
        return 0.0;
    }
    ap.iter().sum::<f64>() / ap.len() as f64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn mean_precision(rank: usize, relevances: &[Vec<u8>]) -> f64 {
    mean(&precision(rank, relevances))
}

pub fn mean_recall(rank: usize, relevances: &[Vec<u8>], num_relevant_docs: f64) -> f64 {
    mean(&recall(rank, relevances, num_relevant_docs))
}

pub fn mean_f_measure(rank: usize, relevances: &[Vec<u8>], num_relevant_docs: f64) -> f64 {
    mean(&f_measure(rank, relevances, num_relevant_docs))
}
