use tracing::warn;
use uuid::Uuid;

use super::filename::parse_group_id;
use super::metadata::{MetadataTable, join_metadata};
use crate::model::{CorpusRecord, MetadataFields};

pub const RECORD_ID_PREFIX: &str = "tafsir.subchapter";

pub fn build_record(filename: &str, text: String, metadata: Option<&MetadataTable>) -> CorpusRecord {
    build_record_with_id(Uuid::new_v4(), filename, text, metadata)
}

/// Every subchapter is its own passim series, so `series` reuses the id.
pub fn build_record_with_id(
    record_uuid: Uuid,
    filename: &str,
    text: String,
    metadata: Option<&MetadataTable>,
) -> CorpusRecord {
    let series = record_uuid.to_string();

    let fields = match metadata {
        Some(table) => match parse_group_id(filename) {
            Some(group_id) => join_metadata(&group_id, table),
            None => {
                warn!(filename, "could not parse tafsir id, skipping metadata");
                MetadataFields::new()
            }
        },
        None => MetadataFields::new(),
    };

    CorpusRecord {
        id: format!("{RECORD_ID_PREFIX}{series}"),
        series,
        metadata: fields,
        original_text: text.clone(),
        text,
    }
}
