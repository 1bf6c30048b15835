//! Content sources feeding text blocks into a [`LocationSet`].
//!
//! A source is passed in at call time instead of being read from global
//! state, so the same pipeline runs over in-memory blocks, JSON files, or
//! any storage that implements [`ContentSource`].

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::parser::parse_multiline;
use super::set::LocationSet;
use super::types::SourceMeta;

/// One block of location lines plus the metadata shared by all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBlock {
    pub text: String,
    #[serde(flatten)]
    pub meta: SourceMeta,
}

impl SourceBlock {
    pub fn new(text: impl Into<String>, meta: SourceMeta) -> Self {
        Self {
            text: text.into(),
            meta,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid source file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand out blocks of location text in rendering order.
pub trait ContentSource {
    fn blocks(&self) -> Result<Vec<SourceBlock>, SourceError>;
}

impl ContentSource for Vec<SourceBlock> {
    fn blocks(&self) -> Result<Vec<SourceBlock>, SourceError> {
        Ok(self.clone())
    }
}

impl ContentSource for [SourceBlock] {
    fn blocks(&self) -> Result<Vec<SourceBlock>, SourceError> {
        Ok(self.to_vec())
    }
}

/// JSON array of blocks on disk, yielded newest first (undated last).
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for JsonFileSource {
    fn blocks(&self) -> Result<Vec<SourceBlock>, SourceError> {
        let data = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut blocks: Vec<SourceBlock> =
            serde_json::from_str(&data).map_err(|source| SourceError::Json {
                path: self.path.clone(),
                source,
            })?;
        // Stable sort: Some(later) < Some(earlier) < None.
        blocks.sort_by(|a, b| match (a.meta.date, b.meta.date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(blocks)
    }
}

/// Parse every block of `source` into `set`. Returns the number of accepted lines.
pub fn collect_locations<S: ContentSource + ?Sized>(
    source: &S,
    set: &mut LocationSet,
) -> Result<usize, SourceError> {
    let blocks = source.blocks()?;
    let mut accepted = 0;
    for block in &blocks {
        accepted += parse_multiline(&block.text, &block.meta, set);
    }
    info!(
        "collected {} lines from {} blocks into {} locations",
        accepted,
        blocks.len(),
        set.len()
    );
    Ok(accepted)
}
