use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::CorpusRecord;

/// Appends records to the corpus as JSON lines. Earlier lines are never touched.
pub struct CorpusWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    lines_written: usize,
}

impl CorpusWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open corpus for append: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    pub fn append_record(&mut self, record: &CorpusRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .with_context(|| format!("failed to serialize record {}", record.id))?;
        self.writer
            .write_all(b"\n")
            .with_context(|| format!("failed to write corpus: {}", self.path.display()))?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .with_context(|| format!("failed to flush corpus: {}", self.path.display()))?;
        Ok(self.lines_written)
    }
}
