use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::build::MetadataTable;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub records: usize,
    pub records_with_metadata: usize,
    pub distinct_tafsirs: usize,
}

pub fn run(args: StatusArgs) -> Result<()> {
    info!(output = %args.output_file.display(), "status requested");

    if args.output_file.is_file() {
        let file = File::open(&args.output_file)
            .with_context(|| format!("failed to open {}", args.output_file.display()))?;
        let stats = corpus_stats(file)
            .with_context(|| format!("failed to scan {}", args.output_file.display()))?;

        info!(
            path = %args.output_file.display(),
            records = stats.records,
            with_metadata = stats.records_with_metadata,
            tafsirs = stats.distinct_tafsirs,
            "corpus status"
        );
    } else {
        warn!(path = %args.output_file.display(), "corpus file missing");
    }

    if args.metadata_path.is_file() {
        let table = MetadataTable::load(&args.metadata_path)?;
        info!(
            path = %args.metadata_path.display(),
            rows = table.row_count(),
            tafsirs = table.group_count(),
            "metadata table status"
        );
    } else {
        warn!(path = %args.metadata_path.display(), "metadata table missing");
    }

    Ok(())
}

fn corpus_stats<R: Read>(reader: R) -> Result<CorpusStats> {
    let mut stats = CorpusStats::default();
    let mut tafsirs = BTreeSet::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Value = serde_json::from_str(&line)
            .with_context(|| format!("invalid json on line {}", index + 1))?;
        stats.records += 1;

        if let Some(tafsir_id) = record.get("tafsir_id").and_then(Value::as_str) {
            stats.records_with_metadata += 1;
            tafsirs.insert(tafsir_id.to_string());
        }
    }

    stats.distinct_tafsirs = tafsirs.len();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::{CorpusStats, corpus_stats};

    #[test]
    fn corpus_stats_counts_records_and_tafsirs() {
        let corpus = concat!(
            r#"{"id":"a","series":"a","text":"t","original_text":"t","tafsir_id":"28"}"#,
            "\n",
            r#"{"id":"b","series":"b","text":"t","original_text":"t","tafsir_id":"28"}"#,
            "\n",
            r#"{"id":"c","series":"c","text":"t","original_text":"t"}"#,
            "\n\n",
        );

        let stats = corpus_stats(corpus.as_bytes()).expect("corpus should scan");
        assert_eq!(
            stats,
            CorpusStats {
                records: 3,
                records_with_metadata: 2,
                distinct_tafsirs: 1,
            }
        );
    }

    #[test]
    fn corpus_stats_reports_bad_line() {
        let err = corpus_stats("{}\nnot json\n".as_bytes()).expect_err("bad line should fail");
        assert!(err.to_string().contains("line 2"));
    }
}
