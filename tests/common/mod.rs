use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use review_prep::pipeline::DataPaths;

pub struct TestEnvironment {
    _temp_dir: TempDir, // kept for Drop cleanup
    pub data_dir: PathBuf,
    pub paths: DataPaths,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(&data_dir)?;
        let paths = DataPaths::new(&data_dir);

        fs::write(&paths.stop_words, "the\na\nis\nand\nit\n")?;
        fs::write(&paths.punctuations, ".\n,\n!\n?\n")?;
        fs::write(&paths.vocab, "great\nsong\nalbum\nbeat\nlove\n<pad>\n")?;
        fs::write(data_dir.join("lemmas.txt"), "songs\tsong\nalbums\talbum\nbeats\tbeat\n")?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            data_dir,
            paths,
        })
    }

    /// Writes `n` raw reviews spread over a handful of users and items.
    pub fn write_raw_reviews(&self, n: usize) -> Result<()> {
        let texts = [
            "The songs are great!",
            "Love it, love the beats.",
            "A great album and a great beat?",
            "Is it music? Songs, albums, beats.",
            "",
        ];
        let mut out = String::new();
        for i in 0..n {
            let line = serde_json::json!({
                "reviewerID": format!("U{}", i % 7),
                "asin": format!("B{}", i % 5),
                "reviewText": texts[i % texts.len()],
                "overall": (i % 5 + 1) as f64,
                "summary": "ignored",
            });
            out.push_str(&line.to_string());
            out.push('\n');
        }
        fs::write(&self.paths.raw, out)?;
        Ok(())
    }

    /// Writes one raw review per `(user, item, text)` row.
    pub fn write_raw_rows(&self, rows: &[(String, String, String)]) -> Result<()> {
        let mut out = String::new();
        for (user, item, text) in rows {
            let line = serde_json::json!({
                "reviewerID": user,
                "asin": item,
                "reviewText": text,
                "overall": 4.0,
            });
            out.push_str(&line.to_string());
            out.push('\n');
        }
        fs::write(&self.paths.raw, out)?;
        Ok(())
    }
}
