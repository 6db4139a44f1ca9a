//! Token → base form services used by the text cleaner.

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub trait Lemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LemmatizerKind {
    /// Keep tokens unchanged
    None,
    /// Snowball English stemmer
    Stem,
    /// Lookup in a `form lemma` table
    Table,
}

pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        Ok(word.to_owned())
    }
}

pub struct StemLemmatizer {
    stemmer: Stemmer,
}

impl StemLemmatizer {
    pub fn new() -> Self {
        StemLemmatizer {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for StemLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for StemLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        Ok(self.stemmer.stem(word).into_owned())
    }
}

/// Inflected form → lemma lookup; words missing from the table pass through.
pub struct TableLemmatizer {
    lemmas: HashMap<String, String>,
}

impl TableLemmatizer {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        TableLemmatizer {
            lemmas: pairs.into_iter().map(|(f, l)| (f.into(), l.into())).collect(),
        }
    }

    /// One `form lemma` pair per line, separated by a tab or spaces.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read lemma table {}", path.display()))?;

        let mut lemmas = HashMap::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(form), Some(lemma)) => {
                    lemmas.insert(form.to_owned(), lemma.to_owned());
                }
                _ => anyhow::bail!(
                    "lemma table {} line {} needs `form lemma`",
                    path.display(),
                    idx + 1
                ),
            }
        }
        info!("Loaded {} lemma entries from {:?}", lemmas.len(), path);
        Ok(TableLemmatizer { lemmas })
    }
}

impl Lemmatizer for TableLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        Ok(self.lemmas.get(word).cloned().unwrap_or_else(|| word.to_owned()))
    }
}

pub fn build_lemmatizer(kind: LemmatizerKind, table: &Path) -> Result<Box<dyn Lemmatizer>> {
    Ok(match kind {
        LemmatizerKind::None => Box::new(IdentityLemmatizer),
        LemmatizerKind::Stem => Box::new(StemLemmatizer::new()),
        LemmatizerKind::Table => Box::new(TableLemmatizer::load(table)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn table_maps_known_forms_only() {
        let lemmatizer = TableLemmatizer::from_pairs([("songs", "song"), ("geese", "goose")]);
        assert_eq!(lemmatizer.lemmatize("songs").unwrap(), "song");
        assert_eq!(lemmatizer.lemmatize("geese").unwrap(), "goose");
        assert_eq!(lemmatizer.lemmatize("music").unwrap(), "music");
    }

    #[test]
    fn table_file_accepts_tabs_and_spaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lemmas.txt");
        fs::write(&path, "albums\talbum\n\nlyrics  lyric\n").unwrap();

        let lemmatizer = TableLemmatizer::load(&path).unwrap();
        assert_eq!(lemmatizer.lemmatize("albums").unwrap(), "album");
        assert_eq!(lemmatizer.lemmatize("lyrics").unwrap(), "lyric");
    }

    #[test]
    fn table_file_rejects_single_column_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lemmas.txt");
        fs::write(&path, "albums album\norphan\n").unwrap();

        let err = TableLemmatizer::load(&path).err().unwrap();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn stemmer_reduces_plurals() {
        let lemmatizer = StemLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("songs").unwrap(), "song");
    }

    #[test]
    fn bundled_table_loads_with_default_settings() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/lemmas.txt");
        let lemmatizer = build_lemmatizer(LemmatizerKind::Table, &path).unwrap();
        assert_eq!(lemmatizer.lemmatize("songs").unwrap(), "song");
        assert_eq!(lemmatizer.lemmatize("children").unwrap(), "child");
        assert_eq!(lemmatizer.lemmatize("jazz").unwrap(), "jazz");
    }

    #[test]
    fn missing_table_is_fatal() {
        let dir = TempDir::new().unwrap();
        assert!(build_lemmatizer(LemmatizerKind::Table, &dir.path().join("none.txt")).is_err());
        assert!(build_lemmatizer(LemmatizerKind::None, &dir.path().join("none.txt")).is_ok());
    }
}
