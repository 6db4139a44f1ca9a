/*
cargo run --bin split_reviews -- --seed 42 --test-ratio 0.2 --dev-ratio 0.1
*/

use anyhow::Result;
use clap::Parser;
use log::info;
use review_prep::cli::{init_logging, CommonArgs, SplitArgs};
use review_prep::pipeline::write_splits;
use review_prep::reviews::load_reviews;
use review_prep::split::split_train_dev_test;

#[derive(Parser, Debug)]
#[command(version, about = "Split the cleaned dataset into train/dev/test files")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    split: SplitArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.split.config()?;
    let log_path = init_logging("split_reviews", &cli.common)?;

    let paths = cli.common.paths();
    let reviews = load_reviews(&paths.reviews)?;
    info!("Ratios - test: {}, dev: {}, seed: {}", config.test_ratio, config.dev_ratio, config.seed);

    let splits = split_train_dev_test(reviews, &config)?;
    write_splits(&paths, &splits)?;

    println!("\n=== Split summary ===");
    println!("Train : {} → {:?}", splits.train.len(), paths.split_file("train"));
    println!("Dev   : {} → {:?}", splits.dev.len(), paths.split_file("dev"));
    println!("Test  : {} → {:?}", splits.test.len(), paths.split_file("test"));
    println!("Log   : {:?}", log_path);
    Ok(())
}
