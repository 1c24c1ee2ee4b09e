use parking_lot::RwLock;
use ragshelf_core::{Document, Filter, ProductFilter, Result};
use std::sync::Arc;

/// Backing store for catalog documents
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, in the store's natural order
    fn find(&self, filter: &ProductFilter) -> Result<Vec<Document>>;
}

/// Catalog held in memory, iterated in insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    pub fn insert(&self, document: Document) {
        self.documents.write().push(document);
    }

    pub fn extend<I: IntoIterator<Item = Document>>(&self, documents: I) {
        self.documents.write().extend(documents);
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    pub fn clear(&self) {
        self.documents.write().clear();
    }

    /// Snapshot of every document
    pub fn iter(&self) -> Vec<Document> {
        self.documents.read().clone()
    }
}

impl DocumentStore for InMemoryCatalog {
    fn find(&self, filter: &ProductFilter) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }
}
