//! Load works from a JSON content export.
//!
//! The content source is external; this module only accepts its export
//! format. Two shapes are understood:
//!
//! ```text
//! [ { "_id": "...", "_title": "...", ... }, ... ]
//! { "works": [ ... ] }
//! ```
//!
//! Ids must be unique, since selection identifies works by id.

use crate::types::Work;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate work id: {0}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    List(Vec<Work>),
    Wrapped { works: Vec<Work> },
}

pub fn parse_works(json: &str) -> Result<Vec<Work>, ContentError> {
    let works = match serde_json::from_str::<Export>(json)? {
        Export::List(works) | Export::Wrapped { works } => works,
    };

    let mut seen = HashSet::new();
    for work in &works {
        if !seen.insert(work.id.as_str()) {
            return Err(ContentError::DuplicateId(work.id.clone()));
        }
    }
    Ok(works)
}

pub fn load_works(path: &Path) -> Result<Vec<Work>, ContentError> {
    let json = fs::read_to_string(path)?;
    parse_works(&json)
}
