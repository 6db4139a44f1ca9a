/*
cargo run --bin index_reviews -- --data-dir data --percentile 0.85
*/

use anyhow::Result;
use clap::Parser;
use review_prep::cli::{init_logging, CommonArgs, IndexArgs, SplitArgs};
use review_prep::pipeline::{build_index, persist_index};
use review_prep::reviews::load_reviews;
use review_prep::split::split_train_dev_test;
use review_prep::vocab::Vocabulary;

// Re-splits the cleaned dataset with the same seed, so the indexed rows are
// exactly the train and dev rows of `split_reviews`
#[derive(Parser, Debug)]
#[command(version, about = "Build per-user and per-item word id sequences")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    split: SplitArgs,
    #[command(flatten)]
    index: IndexArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.split.config()?;
    let percentile = cli.index.percentile()?;
    let log_path = init_logging("index_reviews", &cli.common)?;

    let paths = cli.common.paths();
    let vocab = Vocabulary::load(&paths.vocab)?;
    let splits = split_train_dev_test(load_reviews(&paths.reviews)?, &config)?;

    let index = build_index(&splits.known(), percentile, &vocab)?;
    persist_index(&paths, &index, &vocab)?;

    println!("\n=== Index summary ===");
    println!("Max review length : {}", index.max_length);
    println!("Users             : {} → {:?}", index.by_user.len(), paths.user_idx);
    println!("Items             : {} → {:?}", index.by_item.len(), paths.item_idx);
    println!("Metadata          : {:?}", paths.meta);
    println!("Log file          : {:?}", log_path);
    Ok(())
}
