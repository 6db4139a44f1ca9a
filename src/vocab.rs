use anyhow::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const PAD_WORD: &str = "<pad>";

/// Word → id lookup. Ids follow insertion order; unknown words map to the pad id.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
    pad_id: u32,
}

impl Vocabulary {
    /// Builds ids from `words` in order, appending [`PAD_WORD`] when absent.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = HashMap::new();
        for word in words {
            let next = ids.len() as u32;
            ids.entry(word.into()).or_insert(next);
        }
        let next = ids.len() as u32;
        let pad_id = *ids.entry(PAD_WORD.to_owned()).or_insert(next);
        Vocabulary { ids, pad_id }
    }

    /// Plain word lists and word2vec text files both work: the first field of
    /// each line is the word, and a `<count> <dim>` header is skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read vocabulary {}", path.display()))?;

        let mut lines = raw.lines().peekable();
        if lines.peek().is_some_and(|first| is_word2vec_header(first)) {
            lines.next();
        }
        let vocab = Vocabulary::from_words(lines.filter_map(|l| l.split_whitespace().next()));

        info!(
            "Loaded vocabulary of {} words from {:?} (pad id {})",
            vocab.len(),
            path,
            vocab.pad_id
        );
        Ok(vocab)
    }

    pub fn pad_id(&self) -> u32 {
        self.pad_id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn word_id(&self, word: &str) -> u32 {
        self.ids.get(word).copied().unwrap_or(self.pad_id)
    }

    /// One id per token, so the output length always equals the input length.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        tokens.iter().map(|t| self.word_id(t.as_ref())).collect()
    }
}

fn is_word2vec_header(line: &str) -> bool {
    let fields: Vec<&str> = line.split_whitespace().collect();
    fields.len() == 2 && fields.iter().all(|f| f.parse::<u64>().is_ok())
}
