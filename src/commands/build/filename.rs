use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

/// Tafsir identifier taken verbatim from a subchapter filename.
///
/// The digits are kept exactly as written, leading zeros included, so the
/// value echoed into `tafsir_id` matches the filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_i64(&self) -> Result<i64> {
        self.0
            .parse::<i64>()
            .with_context(|| format!("tafsir id is not a valid integer: {}", self.0))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the tafsir id from `<prefix>.<id>_<sura>_<aya>_<aya>.<ext>`.
///
/// Only the base name is inspected. Anything off-pattern yields `None`.
pub fn parse_group_id(filename: &str) -> Option<GroupId> {
    let base = Path::new(filename).file_name()?.to_str()?;

    let segments = base.split('_').collect::<Vec<_>>();
    if segments.len() != 4 {
        return None;
    }

    let parts = segments[0].split('.').collect::<Vec<_>>();
    if parts.len() != 2 {
        return None;
    }

    let digits = parts[1];
    if digits.is_empty() || !digits.chars().all(|character| character.is_ascii_digit()) {
        return None;
    }

    Some(GroupId(digits.to_string()))
}

/// Position of a subchapter inside the Quran, as encoded in its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubchapterCoordinates {
    pub sura: u32,
    pub aya_start: u32,
    pub aya_end: u32,
}

impl SubchapterCoordinates {
    pub fn covers(&self, sura: u32, aya: u32) -> bool {
        self.sura == sura && self.aya_start <= aya && aya <= self.aya_end
    }
}

/// Matches the same names as `parse_group_id`, with numeric sura and aya
/// segments on top.
pub struct CoordinateParser {
    pattern: Regex,
}

impl CoordinateParser {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^[^._]*\.[0-9]+_([0-9]+)_([0-9]+)_([0-9]+)(?:\.[^_]*)?$")
            .context("failed to compile subchapter filename regex")?;
        Ok(Self { pattern })
    }

    pub fn parse(&self, filename: &str) -> Option<SubchapterCoordinates> {
        let base = Path::new(filename).file_name()?.to_str()?;
        let captures = self.pattern.captures(base)?;

        let number = |index: usize| {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        };

        Some(SubchapterCoordinates {
            sura: number(1)?,
            aya_start: number(2)?,
            aya_end: number(3)?,
        })
    }
}
