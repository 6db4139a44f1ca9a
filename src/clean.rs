use crate::lemma::Lemmatizer;
use crate::reviews::Review;
use anyhow::{ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

/// Newline-delimited word list (stopwords, punctuation). Empty lines are skipped.
pub fn load_word_set(path: &Path) -> Result<HashSet<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(raw
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect())
}

pub struct TextCleaner<'a> {
    stop_words: HashSet<String>,
    // sorted so replacement order never depends on hashing
    punctuations: BTreeSet<String>,
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> TextCleaner<'a> {
    pub fn new(
        stop_words: HashSet<String>,
        punctuations: HashSet<String>,
        lemmatizer: &'a dyn Lemmatizer,
    ) -> Result<Self> {
        ensure!(
            !punctuations.contains("'"),
            "apostrophe must not be in the punctuation set"
        );
        Ok(TextCleaner {
            stop_words,
            punctuations: punctuations.into_iter().filter(|p| !p.is_empty()).collect(),
            lemmatizer,
        })
    }

    pub fn clean(&self, review: &str) -> Result<String> {
        let mut text = review.to_lowercase();
        for p in &self.punctuations {
            if text.contains(p.as_str()) {
                text = text.replace(p.as_str(), " ");
            }
        }

        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            if self.stop_words.contains(word) {
                continue;
            }
            tokens.push(self.lemmatizer.lemmatize(word)?);
        }
        Ok(tokens.join(" "))
    }

    /// Overwrites every review text with its cleaned form.
    pub fn clean_all(&self, reviews: &mut [Review]) -> Result<()> {
        info!("Cleaning {} review texts", reviews.len());

        let bar = ProgressBar::new(reviews.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("##-"),
        );

        for row in reviews.iter_mut() {
            row.review = self.clean(&row.review)?;
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(())
    }
}
