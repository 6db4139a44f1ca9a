use crate::lemma::LemmatizerKind;
use crate::length::DEFAULT_PERCENTILE;
use crate::pipeline::DataPaths;
use crate::split::{SplitConfig, DEFAULT_DEV_RATIO, DEFAULT_SEED, DEFAULT_TEST_RATIO};
use anyhow::{ensure, Result};
use chrono::Local;
use clap::Args;
use simplelog::*;
use std::fs::{create_dir_all, File};
use std::path::PathBuf;

// Options every binary accepts
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    // Directory holding inputs and outputs
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    // Terminal log level; the log file always records info and above
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl CommonArgs {
    pub fn paths(&self) -> DataPaths {
        DataPaths::new(&self.data_dir)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Share of all rows held out as test; 0 disables the test split
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
    pub test_ratio: f64,

    /// Share of the remaining rows held out as dev; 0 disables the dev split
    #[arg(long, default_value_t = DEFAULT_DEV_RATIO)]
    pub dev_ratio: f64,
}

impl SplitArgs {
    pub fn config(&self) -> Result<SplitConfig> {
        let config = SplitConfig {
            test_ratio: self.test_ratio,
            dev_ratio: self.dev_ratio,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[arg(long, value_enum, default_value_t = LemmatizerKind::Table)]
    pub lemmatizer: LemmatizerKind,

    // `form lemma` table, relative to --data-dir unless absolute
    #[arg(long, default_value = "lemmas.txt")]
    pub lemma_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    #[arg(long, default_value_t = DEFAULT_PERCENTILE)]
    pub percentile: f64,
}

impl IndexArgs {
    pub fn percentile(&self) -> Result<f64> {
        ensure!(
            self.percentile > 0.0 && self.percentile <= 1.0,
            "--percentile must be in (0, 1], got {}",
            self.percentile
        );
        Ok(self.percentile)
    }
}

/// Terminal logger at the requested level plus a timestamped log file.
/// Returns the log file path.
pub fn init_logging(name: &str, args: &CommonArgs) -> Result<PathBuf> {
    create_dir_all(&args.log_dir)?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = args.log_dir.join(format!("{name}_{ts}.log"));

    CombinedLogger::init(vec![
        TermLogger::new(
            args.log_level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            LevelFilter::Info,
            ConfigBuilder::new().build(),
            File::create(&log_path)?,
        ),
    ])?;
    Ok(log_path)
}
