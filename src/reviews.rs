use anyhow::{Context, Result};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

// One line of the raw Amazon review dump; every other field is ignored
#[derive(Debug, Deserialize)]
pub struct RawReview {
    #[serde(rename = "reviewerID")]
    pub reviewer_id: String,
    pub asin: String,
    #[serde(rename = "reviewText", default)]
    pub review_text: Option<String>,
    pub overall: f64,
}

/// A review after column selection, the unit every later stage works on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Review {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "itemID")]
    pub item_id: String,
    pub review: String,
    pub rating: f64,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        Review {
            user_id: raw.reviewer_id,
            item_id: raw.asin,
            review: raw.review_text.unwrap_or_default(),
            rating: raw.overall,
        }
    }
}

/// Reads the raw dump and renames its columns to `userID/itemID/review/rating`.
pub fn load_raw_reviews(path: &Path) -> Result<Vec<Review>> {
    let raw: Vec<RawReview> = read_json_lines(path)?;
    let missing = raw.iter().filter(|r| r.review_text.is_none()).count();
    if missing > 0 {
        warn!("{missing} raw reviews have no reviewText, kept as empty reviews");
    }
    info!("Loaded {} raw reviews from {:?}", raw.len(), path);
    Ok(raw.into_iter().map(Review::from).collect())
}

/// Reads a dataset previously written by [`write_reviews`].
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let rows: Vec<Review> = read_json_lines(path)?;
    info!("Loaded {} reviews from {:?}", rows.len(), path);
    Ok(rows)
}

/// Writes one JSON object per line, creating the parent directory if needed.
pub fn write_reviews(path: &Path, reviews: &[Review]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for row in reviews {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    out.flush()?;
    info!("Wrote {} reviews → {:?}", reviews.len(), path);
    Ok(())
}

fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .with_context(|| format!("malformed JSON in {} at line {}", path.display(), idx + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
