//! Stage wiring shared by the binaries: where files live, and the steps that
//! read and write them.

use crate::clean::{load_word_set, TextCleaner};
use crate::index::{reviews_in_idx, write_meta, write_word_idx, ReviewIndex};
use crate::lemma::Lemmatizer;
use crate::length::max_review_length;
use crate::reviews::{load_raw_reviews, load_reviews, write_reviews, Review};
use crate::split::{split_train_dev_test, SplitConfig, Splits};
use crate::vocab::Vocabulary;
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub raw: PathBuf,
    pub stop_words: PathBuf,
    pub punctuations: PathBuf,
    pub vocab: PathBuf,
    pub reviews: PathBuf,
    pub user_idx: PathBuf,
    pub item_idx: PathBuf,
    pub meta: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: &Path) -> Self {
        DataPaths {
            data_dir: data_dir.to_path_buf(),
            raw: data_dir.join("Digital_Music_5.json"),
            stop_words: data_dir.join("stopwords.txt"),
            punctuations: data_dir.join("punctuations.txt"),
            vocab: data_dir.join("vocab.txt"),
            reviews: data_dir.join("reviews.json"),
            user_idx: data_dir.join("user_review_word_idx.bin"),
            item_idx: data_dir.join("item_review_word_idx.bin"),
            meta: data_dir.join("review_index_meta.json"),
        }
    }

    /// Absolute paths are kept, relative ones resolve under the data dir.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn split_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.json"))
    }
}

/// Loads the raw dump, cleans every review and saves the cleaned dataset.
pub fn process_raw_data(paths: &DataPaths, lemmatizer: &dyn Lemmatizer) -> Result<Vec<Review>> {
    info!("Reading raw data from {:?}", paths.raw);
    let mut reviews = load_raw_reviews(&paths.raw)?;

    let stop_words = load_word_set(&paths.stop_words)?;
    let punctuations = load_word_set(&paths.punctuations)?;
    info!(
        "{} stopwords, {} punctuation symbols",
        stop_words.len(),
        punctuations.len()
    );
    let cleaner = TextCleaner::new(stop_words, punctuations, lemmatizer)?;

    cleaner.clean_all(&mut reviews)?;
    write_reviews(&paths.reviews, &reviews)?;
    info!("Processed data saved");
    Ok(reviews)
}

pub fn write_splits(paths: &DataPaths, splits: &Splits<Review>) -> Result<()> {
    for (name, rows) in [
        ("train", &splits.train),
        ("dev", &splits.dev),
        ("test", &splits.test),
    ] {
        write_reviews(&paths.split_file(name), rows)?;
    }
    Ok(())
}

/// Estimates the padding length on `known` (train + dev) and indexes it.
pub fn build_index(known: &[Review], percentile: f64, vocab: &Vocabulary) -> Result<ReviewIndex> {
    let max_length = max_review_length(known, percentile)?;
    info!("Max review length: {max_length}");
    Ok(reviews_in_idx(known, max_length, vocab))
}

pub fn persist_index(paths: &DataPaths, index: &ReviewIndex, vocab: &Vocabulary) -> Result<()> {
    write_word_idx(&paths.user_idx, &index.by_user)?;
    write_word_idx(&paths.item_idx, &index.by_item)?;
    write_meta(&paths.meta, &index.meta(vocab))?;
    Ok(())
}

/// Clean → split → estimate and index on train + dev → persist.
/// Test rows never reach the length estimate or the id maps.
pub fn run(
    paths: &DataPaths,
    split_config: &SplitConfig,
    percentile: f64,
    lemmatizer: &dyn Lemmatizer,
    vocab: &Vocabulary,
    save_splits: bool,
) -> Result<(Splits<Review>, ReviewIndex)> {
    process_raw_data(paths, lemmatizer)?;

    // read back what was saved so every run starts from the file on disk
    let reviews = load_reviews(&paths.reviews)?;
    let splits = split_train_dev_test(reviews, split_config)?;
    if save_splits {
        write_splits(paths, &splits)?;
    }

    let index = build_index(&splits.known(), percentile, vocab)?;
    persist_index(paths, &index, vocab)?;
    Ok((splits, index))
}
