use crate::criteria::{Criteria, CriteriaExtractor};
use serde::{Deserialize, Serialize};

/// One entry of a question batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    /// Free text; criteria are extracted from it
    Text(String),
    /// Display text plus criteria that were extracted upstream
    Structured {
        #[serde(default)]
        query: String,
        #[serde(default)]
        criteria: Criteria,
    },
}

impl Query {
    /// Text that is embedded and shown to the generator
    pub fn text(&self) -> &str {
        match self {
            Query::Text(text) => text,
            Query::Structured { query, .. } => query,
        }
    }

    /// Criteria for this query. Structured queries bypass extraction.
    pub fn resolve_criteria(&self, extractor: &CriteriaExtractor) -> Criteria {
        match self {
            Query::Text(text) => extractor.extract(text),
            Query::Structured { criteria, .. } => criteria.clone(),
        }
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Query::Text(text)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Query::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::PriceRange;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_batch() {
        let queries: Vec<Query> = serde_json::from_value(json!([
            "cheap cleanser",
            {"query": "something premium", "criteria": {"price_range": "premium"}},
            {"criteria": {"product_type": "product"}}
        ]))
        .unwrap();

        assert_eq!(queries[0], Query::Text("cheap cleanser".to_string()));
        assert_eq!(queries[1].text(), "something premium");
        assert_eq!(queries[2].text(), "");
    }

    #[test]
    fn test_structured_query_bypasses_extraction() {
        let extractor = CriteriaExtractor::default();
        let query = Query::Structured {
            query: "affordable cream with aloe vera".to_string(),
            criteria: Criteria::new().with_price_range(PriceRange::Premium),
        };
        let criteria = query.resolve_criteria(&extractor);
        assert_eq!(criteria, Criteria::new().with_price_range(PriceRange::Premium));
    }

    #[test]
    fn test_text_query_is_extracted() {
        let extractor = CriteriaExtractor::default();
        let criteria = Query::from("glycerin cleanser").resolve_criteria(&extractor);
        assert_eq!(criteria.product_type.as_deref(), Some("product"));
        assert!(criteria.ingredients().is_some());
    }
}
