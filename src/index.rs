use crate::reviews::Review;
use crate::vocab::{Vocabulary, PAD_WORD};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub type WordIdx = BTreeMap<String, Vec<u32>>;

/// Per-user and per-item word id sequences, all `max_length` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewIndex {
    pub max_length: usize,
    pub by_user: WordIdx,
    pub by_item: WordIdx,
}

// Written next to the two id maps so consumers know how they were built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub max_length: usize,
    pub pad_word: String,
    pub pad_id: u32,
    pub vocab_size: usize,
    pub users: usize,
    pub items: usize,
}

/// Joins the group's texts with single spaces, splits on single spaces, then
/// truncates or right-pads with [`PAD_WORD`] to exactly `max_length` tokens.
pub fn pad_review<S: AsRef<str>>(reviews: &[S], max_length: usize) -> Vec<String> {
    let joint = reviews.iter().map(|r| r.as_ref()).collect::<Vec<&str>>().join(" ");
    let mut tokens: Vec<String> = joint
        .split(' ')
        .take(max_length)
        .map(str::to_owned)
        .collect();
    tokens.resize(max_length, PAD_WORD.to_owned());
    tokens
}

fn group_reviews<'a, F>(reviews: &'a [Review], key: F) -> BTreeMap<&'a str, Vec<&'a str>>
where
    F: Fn(&'a Review) -> &'a str,
{
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for row in reviews {
        groups.entry(key(row)).or_default().push(row.review.as_str());
    }
    groups
}

fn index_groups(groups: BTreeMap<&str, Vec<&str>>, max_length: usize, vocab: &Vocabulary) -> WordIdx {
    groups
        .into_iter()
        .map(|(id, texts)| (id.to_owned(), vocab.encode(&pad_review(&texts, max_length))))
        .collect()
}

pub fn reviews_in_idx(reviews: &[Review], max_length: usize, vocab: &Vocabulary) -> ReviewIndex {
    let by_user = index_groups(group_reviews(reviews, |r| r.user_id.as_str()), max_length, vocab);
    let by_item = index_groups(group_reviews(reviews, |r| r.item_id.as_str()), max_length, vocab);

    info!(
        "Indexed {} users and {} items at length {}",
        by_user.len(),
        by_item.len(),
        max_length
    );
    ReviewIndex {
        max_length,
        by_user,
        by_item,
    }
}

impl ReviewIndex {
    pub fn meta(&self, vocab: &Vocabulary) -> IndexMeta {
        IndexMeta {
            max_length: self.max_length,
            pad_word: PAD_WORD.to_owned(),
            pad_id: vocab.pad_id(),
            vocab_size: vocab.len(),
            users: self.by_user.len(),
            items: self.by_item.len(),
        }
    }
}

pub fn write_word_idx(path: &Path, idx: &WordIdx) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, idx)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    writer.flush()?;
    info!("Wrote {} id sequences → {:?}", idx.len(), path);
    Ok(())
}

pub fn load_word_idx(path: &Path) -> Result<WordIdx> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", path.display()))
}

pub fn write_meta(path: &Path, meta: &IndexMeta) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, meta)?;
    writer.flush()?;
    info!("Wrote index metadata → {:?}", path);
    Ok(())
}

pub fn load_meta(path: &Path) -> Result<IndexMeta> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed index metadata {}", path.display()))
}
