use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use super::filename::CoordinateParser;
use super::metadata::MetadataTable;
use super::record::build_record;
use super::writer::CorpusWriter;
use crate::cli::BuildArgs;
use crate::model::{RunCounts, RunManifest, RunPaths};
use crate::util::{
    ensure_parent_directory, sha256_file, utc_compact_string, utc_rfc3339, write_json_pretty,
};

/// Restricts a run to subchapters of one sura that cover a given aya.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AyaFilter {
    pub sura: u32,
    pub aya: u32,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let started_ts = Utc::now();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    info!(
        data_dir = %args.data_dir.display(),
        output = %args.output_file.display(),
        run_id = %run_id,
        "starting corpus build"
    );

    let metadata_path = if args.no_metadata {
        info!("metadata disabled by flag");
        None
    } else if args.metadata_path.is_file() {
        Some(args.metadata_path.clone())
    } else {
        warn!(
            path = %args.metadata_path.display(),
            "metadata table not found, building corpus without metadata"
        );
        None
    };

    let table = metadata_path
        .as_deref()
        .map(MetadataTable::load)
        .transpose()?;
    if let Some(table) = &table {
        info!(
            rows = table.row_count(),
            tafsirs = table.group_count(),
            "loaded metadata table"
        );
    }

    let filter = match (args.sura, args.aya) {
        (Some(sura), Some(aya)) => Some(AyaFilter { sura, aya }),
        _ => None,
    };

    let counts = convert_directory(&args.data_dir, &args.output_file, table.as_ref(), filter)?;

    info!(
        files = counts.files_seen,
        records = counts.records_written,
        with_metadata = counts.records_with_metadata,
        filtered = counts.files_filtered,
        skipped = counts.entries_skipped,
        "corpus build completed"
    );

    if let Some(manifest_path) = &args.run_manifest {
        let manifest = RunManifest {
            manifest_version: 1,
            run_id,
            started_at: utc_rfc3339(started_ts),
            completed_at: utc_rfc3339(Utc::now()),
            sura: args.sura,
            aya: args.aya,
            paths: RunPaths {
                data_dir: args.data_dir.display().to_string(),
                output_file: args.output_file.display().to_string(),
                metadata_path: metadata_path.as_ref().map(|p| p.display().to_string()),
            },
            counts,
            metadata_sha256: metadata_path.as_deref().map(sha256_file).transpose()?,
            output_sha256: sha256_file(&args.output_file)?,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote run manifest");
    }

    Ok(())
}

/// Converts every file in `data_dir` into one corpus line of `output_file`.
///
/// The output is deleted first, so repeated runs never accumulate lines.
/// A file that cannot be read as UTF-8 text aborts the run.
pub fn convert_directory(
    data_dir: &Path,
    output_file: &Path,
    metadata: Option<&MetadataTable>,
    filter: Option<AyaFilter>,
) -> Result<RunCounts> {
    reset_output(output_file)?;

    let coordinates = CoordinateParser::new()?;
    let entries = list_entries(data_dir)?;
    let mut writer = CorpusWriter::open(output_file)?;
    let mut counts = RunCounts::default();

    for path in entries {
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file entry");
            counts.entries_skipped += 1;
            continue;
        }
        counts.files_seen += 1;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(filter) = filter {
            let covered = coordinates
                .parse(&filename)
                .is_some_and(|position| position.covers(filter.sura, filter.aya));
            if !covered {
                debug!(filename = %filename, "outside requested sura/aya");
                counts.files_filtered += 1;
                continue;
            }
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read subchapter as UTF-8 text: {}", path.display()))?;

        let record = build_record(&filename, text, metadata);
        if !record.metadata.is_empty() {
            counts.records_with_metadata += 1;
        }
        writer.append_record(&record)?;
    }

    counts.records_written = writer.finish()?;
    Ok(counts)
}

fn reset_output(output_file: &Path) -> Result<()> {
    if output_file.exists() {
        fs::remove_file(output_file)
            .with_context(|| format!("failed to remove old corpus: {}", output_file.display()))?;
        debug!(path = %output_file.display(), "removed previous corpus");
    }
    ensure_parent_directory(output_file)
}

fn list_entries(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("failed to read {}", data_dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", data_dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();

    Ok(paths)
}
