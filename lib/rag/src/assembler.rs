use ragshelf_core::{Chunker, CriteriaExtractor, Query, Result};
use ragshelf_storage::CandidateFilter;
use tracing::{debug, info};

/// Builds the chunk pool for a batch of queries.
///
/// The pool is shared by the whole batch: chunks of every query's matching
/// documents are appended to one list, in query order then store order.
#[derive(Debug, Clone)]
pub struct RetrievalAssembler {
    extractor: CriteriaExtractor,
    candidates: CandidateFilter,
    chunker: Chunker,
}

impl RetrievalAssembler {
    pub fn new(extractor: CriteriaExtractor, candidates: CandidateFilter, chunker: Chunker) -> Self {
        Self {
            extractor,
            candidates,
            chunker,
        }
    }

    pub fn assemble(&self, queries: &[Query]) -> Result<Vec<String>> {
        let mut pool = Vec::new();

        for query in queries {
            let criteria = query.resolve_criteria(&self.extractor);
            if let Query::Text(text) = query {
                debug!(query = %text, ?criteria, "Parsed criteria for query");
            }

            let products = self.candidates.find(&criteria)?;
            if products.is_empty() {
                info!(?criteria, "No products found for criteria");
                continue;
            }

            for product in &products {
                pool.extend(self.chunker.chunk(&product.merged_text()));
            }
        }

        if pool.is_empty() {
            info!("No data to process into chunks");
        } else {
            debug!(chunks = pool.len(), "Chunks created");
        }

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragshelf_core::{Criteria, Document};
    use ragshelf_storage::InMemoryCatalog;
    use serde_json::json;
    use std::sync::Arc;

    fn assembler(docs: Vec<serde_json::Value>, max_len: usize) -> RetrievalAssembler {
        let catalog = InMemoryCatalog::from_documents(
            docs.into_iter().filter_map(Document::from_value).collect(),
        );
        RetrievalAssembler::new(
            CriteriaExtractor::default(),
            CandidateFilter::new(Arc::new(catalog)),
            Chunker::new(max_len),
        )
    }

    #[test]
    fn test_merged_document_becomes_chunks() {
        let assembler = assembler(
            vec![json!({"type": "product", "product_name": "Gentle Cream", "description": "Contains aloe vera and is affordable"})],
            512,
        );
        let pool = assembler
            .assemble(&[Query::from("affordable cream with aloe vera")])
            .unwrap();
        assert_eq!(
            pool,
            vec!["Product Name: Gentle Cream\nDescription: Contains aloe vera and is affordable\n"]
        );
    }

    #[test]
    fn test_long_document_is_split() {
        let description = "a".repeat(40);
        let assembler = assembler(
            vec![json!({"product_name": "Long", "description": description})],
            16,
        );
        let pool = assembler.assemble(&[Query::from("")]).unwrap();
        let merged = format!("Product Name: Long\nDescription: {}\n", "a".repeat(40));
        assert_eq!(pool.concat(), merged);
        assert!(pool.iter().all(|c| c.chars().count() <= 16));
    }

    #[test]
    fn test_pool_is_shared_across_queries() {
        let assembler = assembler(
            vec![
                json!({"type": "product", "product_name": "Aloe Gel", "description": "aloe"}),
                json!({"type": "product", "product_name": "Glyco Wash", "description": "glycerin"}),
            ],
            512,
        );
        let pool = assembler
            .assemble(&[Query::from("glycerin"), Query::from("aloe"), Query::from("retinol cream")])
            .unwrap();
        // "retinol cream" only constrains the type, so it sees both documents
        assert_eq!(pool.len(), 4);
        assert!(pool[0].contains("Glyco Wash"));
        assert!(pool[1].contains("Aloe Gel"));
    }

    #[test]
    fn test_structured_query_uses_given_criteria() {
        let assembler = assembler(
            vec![
                json!({"type": "product", "product_name": "Aloe Gel", "description": "aloe"}),
                json!({"type": "tool", "product_name": "Roller", "description": "stone"}),
            ],
            512,
        );
        let query = Query::Structured {
            query: "aloe please".to_string(),
            criteria: Criteria::new().with_product_type("tool"),
        };
        let pool = assembler.assemble(&[query]).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(pool[0].contains("Roller"));
    }

    #[test]
    fn test_no_matches_contribute_nothing() {
        let assembler = assembler(
            vec![json!({"type": "product", "product_name": "Aloe Gel"})],
            512,
        );
        assert!(assembler.assemble(&[Query::from("anything")]).unwrap().is_empty());
    }
}
