//! # ragshelf Core
//!
//! Core library for the ragshelf catalog question-answering service.
//!
//! This crate provides the retrieval building blocks that do not depend on
//! any external model or store:
//!
//! - [`CriteriaExtractor`] - free text to structured [`Criteria`]
//! - [`ProductFilter`] - criteria to a document predicate
//! - [`Chunker`] - lossless fixed-size text chunking
//! - [`Vector`] - embedding vectors and cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use ragshelf_core::{CriteriaExtractor, ProductFilter, Filter, Document, PriceRange};
//! use serde_json::json;
//!
//! let criteria = CriteriaExtractor::default().extract("affordable cream with aloe vera");
//! assert_eq!(criteria.price_range, Some(PriceRange::Affordable));
//!
//! let filter = ProductFilter::from_criteria(&criteria).unwrap();
//! let doc = Document::from_value(json!({
//!     "type": "product",
//!     "product_name": "Gentle Cream",
//!     "description": "Contains aloe vera and is affordable"
//! })).unwrap();
//! assert!(filter.matches(&doc));
//! ```

pub mod chunker;
pub mod criteria;
pub mod document;
pub mod error;
pub mod filter;
pub mod parser;
pub mod query;
pub mod vector;
pub mod vocabulary;

pub use chunker::{chunk_text, Chunker, DEFAULT_MAX_CHUNK_LEN};
pub use criteria::{Criteria, CriteriaExtractor, PriceRange};
pub use document::{Document, ProductRecord};
pub use error::{Error, Result};
pub use filter::{Filter, FilterCondition, ProductFilter, TermPattern};
pub use parser::{Entity, LinguisticParser, ParsedText, RuleBasedParser, Token};
pub use query::Query;
pub use vector::Vector;
