// Catalog loading from JSON files
use crate::catalog::InMemoryCatalog;
use ragshelf_core::{Document, Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Value>),
    Wrapped { documents: Vec<Value> },
}

/// Load a catalog from a JSON file holding either an array of documents or
/// an object with a `documents` array. Entries that are not objects are
/// skipped.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<InMemoryCatalog> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&raw)?;
    info!("Loaded {} documents from {:?}", catalog.len(), path);
    Ok(catalog)
}

pub fn parse_catalog(raw: &str) -> Result<InMemoryCatalog> {
    let file: CatalogFile = serde_json::from_str(raw)
        .map_err(|e| Error::Serialization(format!("invalid catalog: {}", e)))?;
    let values = match file {
        CatalogFile::List(values) => values,
        CatalogFile::Wrapped { documents } => documents,
    };

    let mut documents = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        match Document::from_value(value) {
            Some(doc) => documents.push(doc),
            None => warn!("Skipping catalog entry {}: not an object", position),
        }
    }

    Ok(InMemoryCatalog::from_documents(documents))
}
