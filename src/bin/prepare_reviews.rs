/*
cargo run --bin prepare_reviews

cargo run --bin prepare_reviews -- \
    --data-dir data \
    --lemmatizer stem \
    --write-splits
*/

use anyhow::Result;
use clap::Parser;
use log::info;
use review_prep::cli::{init_logging, CleanArgs, CommonArgs, IndexArgs, SplitArgs};
use review_prep::lemma::build_lemmatizer;
use review_prep::pipeline::run;
use review_prep::vocab::Vocabulary;

// CLI parameters
#[derive(Parser, Debug)]
#[command(version, about = "Clean, split and index the review dataset in one run")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    clean: CleanArgs,
    #[command(flatten)]
    split: SplitArgs,
    #[command(flatten)]
    index: IndexArgs,

    // Also write train/dev/test line-delimited JSON
    #[arg(long)]
    write_splits: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let split_config = cli.split.config()?;
    let percentile = cli.index.percentile()?;

    let log_path = init_logging("prepare_reviews", &cli.common)?;
    info!("Starting review preparation");

    let paths = cli.common.paths();
    let lemmatizer = build_lemmatizer(cli.clean.lemmatizer, &paths.resolve(&cli.clean.lemma_file))?;
    let vocab = Vocabulary::load(&paths.vocab)?;

    let (splits, index) = run(
        &paths,
        &split_config,
        percentile,
        lemmatizer.as_ref(),
        &vocab,
        cli.write_splits,
    )?;
    let total = splits.train.len() + splits.dev.len() + splits.test.len();
    info!("All done successfully.");

    println!("\n=== Prep summary ===");
    println!("Reviews            : {}", total);
    println!(
        "Train / dev / test : {} / {} / {}",
        splits.train.len(),
        splits.dev.len(),
        splits.test.len()
    );
    println!("Max review length  : {}", index.max_length);
    println!("Users / items      : {} / {}", index.by_user.len(), index.by_item.len());
    println!("Cleaned dataset    : {:?}", paths.reviews);
    println!("User index         : {:?}", paths.user_idx);
    println!("Item index         : {:?}", paths.item_idx);
    println!("Log file           : {:?}", log_path);

    Ok(())
}
