use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use super::filename::GroupId;
use crate::model::{MetadataFields, MetadataRow};

/// Tafsir metadata keyed by tafsir id. Rows keep their CSV order, which
/// decides who counts as the first author of a multi-author tafsir.
#[derive(Debug, Default)]
pub struct MetadataTable {
    rows: Vec<MetadataRow>,
    index: HashMap<i64, Vec<usize>>,
}

impl MetadataTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open metadata table: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("failed to load metadata table: {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, result) in csv_reader.deserialize::<MetadataRow>().enumerate() {
            let row = result.with_context(|| format!("invalid metadata row {}", line + 1))?;
            rows.push(row);
        }

        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<MetadataRow>) -> Self {
        let mut index: HashMap<i64, Vec<usize>> = HashMap::new();
        for (position, row) in rows.iter().enumerate() {
            index.entry(row.tafsir_id).or_default().push(position);
        }
        Self { rows, index }
    }

    pub fn rows_for(&self, tafsir_id: i64) -> Vec<&MetadataRow> {
        self.index
            .get(&tafsir_id)
            .map(|positions| positions.iter().map(|&p| &self.rows[p]).collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn group_count(&self) -> usize {
        self.index.len()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MetadataAttribute {
    Title,
    AuthorName,
    AuthorDeath,
    AuthorPlaceOfDeath,
}

impl MetadataAttribute {
    const ALL: [Self; 4] = [
        Self::Title,
        Self::AuthorName,
        Self::AuthorDeath,
        Self::AuthorPlaceOfDeath,
    ];

    fn field_name(self) -> &'static str {
        match self {
            Self::Title => "tafsir_title",
            Self::AuthorName => "author_name",
            Self::AuthorDeath => "author_death_dce",
            Self::AuthorPlaceOfDeath => "author_place_of_death",
        }
    }

    /// Row 0 is unsuffixed; row n is suffixed `_{n+1}`.
    fn field_name_for_row(self, row_index: usize) -> String {
        if row_index == 0 {
            self.field_name().to_string()
        } else {
            format!("{}_{}", self.field_name(), row_index + 1)
        }
    }

    fn value(self, row: &MetadataRow) -> Value {
        match self {
            Self::Title => Value::from(row.tafsir_title.clone()),
            Self::AuthorName => Value::from(row.author_name.clone()),
            Self::AuthorDeath => match row.death_dce {
                Some(year) if year.is_finite() => Value::from(year.trunc() as i64),
                _ => Value::Null,
            },
            Self::AuthorPlaceOfDeath => {
                Value::from(row.place_of_death.clone().unwrap_or_default())
            }
        }
    }
}

/// Flattens every metadata row of a tafsir into record fields.
///
/// `tafsir_id` is always present. Attributes with no rows are left out.
pub fn join_metadata(group_id: &GroupId, table: &MetadataTable) -> MetadataFields {
    let mut fields = MetadataFields::new();
    fields.insert(
        "tafsir_id".to_string(),
        Value::from(group_id.as_str().to_string()),
    );

    let key = match group_id.to_i64() {
        Ok(key) => key,
        Err(err) => {
            warn!(group_id = %group_id, error = %err, "skipping metadata lookup");
            return fields;
        }
    };

    let rows = table.rows_for(key);
    for attribute in MetadataAttribute::ALL {
        if rows.is_empty() {
            warn!(
                group_id = %group_id,
                attribute = attribute.field_name(),
                "could not retrieve metadata attribute"
            );
            continue;
        }

        for (row_index, row) in rows.iter().enumerate() {
            fields.insert(attribute.field_name_for_row(row_index), attribute.value(row));
        }
    }

    fields
}
