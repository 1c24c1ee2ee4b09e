use crate::catalog::DocumentStore;
use ragshelf_core::{Criteria, ProductFilter, ProductRecord, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves criteria to the well-formed catalog entries that satisfy them
#[derive(Clone)]
pub struct CandidateFilter {
    store: Arc<dyn DocumentStore>,
}

impl CandidateFilter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Matching documents reduced to name and description, in store order.
    /// Documents without a description are dropped and logged.
    pub fn find(&self, criteria: &Criteria) -> Result<Vec<ProductRecord>> {
        let filter = ProductFilter::from_criteria(criteria)?;
        debug!(predicate = %filter.to_json(), "querying document store");

        let documents = self.store.find(&filter)?;
        let matched = documents.len();

        let records: Vec<ProductRecord> = documents
            .iter()
            .filter_map(|doc| {
                let record = doc.to_record();
                if record.is_none() {
                    warn!(document = ?doc.fields(), "Skipping product without 'description'");
                }
                record
            })
            .collect();

        debug!(matched, kept = records.len(), "document store results");
        Ok(records)
    }
}

impl std::fmt::Debug for CandidateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFilter").finish_non_exhaustive()
    }
}
