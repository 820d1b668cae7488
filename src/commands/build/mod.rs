mod filename;
mod metadata;
mod record;
mod run;
mod writer;

pub use metadata::MetadataTable;
pub use run::run;
