pub mod build;
pub mod status;
