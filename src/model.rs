use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type MetadataFields = Map<String, Value>;

#[derive(Debug, Clone, Serialize)]
pub struct CorpusRecord {
    pub id: String,
    pub series: String,
    #[serde(flatten)]
    pub metadata: MetadataFields,
    pub text: String,
    pub original_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataRow {
    #[serde(alias = "group_id")]
    pub tafsir_id: i64,
    #[serde(alias = "title")]
    pub tafsir_title: String,
    pub author_name: String,
    #[serde(alias = "death_year")]
    pub death_dce: Option<f64>,
    pub place_of_death: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunPaths {
    pub data_dir: String,
    pub output_file: String,
    pub metadata_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub files_seen: usize,
    pub records_written: usize,
    pub records_with_metadata: usize,
    pub files_filtered: usize,
    pub entries_skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub sura: Option<u32>,
    pub aya: Option<u32>,
    pub paths: RunPaths,
    pub counts: RunCounts,
    pub metadata_sha256: Option<String>,
    pub output_sha256: String,
}
