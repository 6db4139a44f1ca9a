/*
cargo run --bin clean_reviews -- --data-dir data --lemmatizer table
*/

use anyhow::Result;
use clap::Parser;
use review_prep::cli::{init_logging, CleanArgs, CommonArgs};
use review_prep::lemma::build_lemmatizer;
use review_prep::pipeline::process_raw_data;

#[derive(Parser, Debug)]
#[command(version, about = "Clean raw review text and save the renamed dataset")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    clean: CleanArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging("clean_reviews", &cli.common)?;

    let paths = cli.common.paths();
    let lemmatizer = build_lemmatizer(cli.clean.lemmatizer, &paths.resolve(&cli.clean.lemma_file))?;
    let reviews = process_raw_data(&paths, lemmatizer.as_ref())?;

    println!("\n=== Clean summary ===");
    println!("Reviews cleaned : {}", reviews.len());
    println!("Output JSON     : {:?}", paths.reviews);
    println!("Log file        : {:?}", log_path);
    Ok(())
}
