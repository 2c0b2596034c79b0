//! Computes precision/recall/F-measure/MAP over a ranking output file
//! produced by audio-identification.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use landmark_id::metrics::{
    mean_average_precision, mean_f_measure, mean_precision, mean_recall, parse_ranking_file,
    relevance_matrix,
};

#[derive(Parser)]
#[command(about = "Evaluate a ranking output file against its embedded ground truth")]
struct Args {
    /// Ranking output file produced by audio-identification
    ranking_file: PathBuf,

    /// Number of relevant documents per query (normally 1: the source track)
    #[arg(long, default_value_t = 1.0)]
    num_relevant_docs: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let lines = parse_ranking_file(&args.ranking_file)
        .with_context(|| format!("failed to read {}", args.ranking_file.display()))?;
    let relevances = relevance_matrix(&lines);

    for rank in 1..=3 {
        println!("---- Rank {rank} ----");
        println!("Mean Precision: {:.3}", mean_precision(rank, &relevances));
        println!(
            "Mean Recall: {:.3}",
            mean_recall(rank, &relevances, args.num_relevant_docs)
        );
        println!(
            "Mean f-measure: {:.3}",
            mean_f_measure(rank, &relevances, args.num_relevant_docs)
        );
    }
    println!("----------------");
    println!(
        "Mean avg precision: {:.3}",
        mean_average_precision(&relevances, args.num_relevant_docs)
    );

    Ok(())
}
