//! # ragshelf
//!
//! Retrieval-augmented question answering over a small product catalog.
//!
//! A batch of shopper questions goes through five stages: criteria are
//! pulled out of each question, the catalog is filtered by them, the matches
//! are merged and cut into fixed-size chunks shared by the whole batch, each
//! question ranks that pool by cosine similarity, and the best chunk is handed
//! to a text generator together with the question.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! GEMINI_API_KEY=... ragshelf --catalog ./catalog.json --http-port 5000
//! curl -X POST localhost:5000/query -H 'content-type: application/json' \
//!      -d '{"queries": ["affordable moisturizer with aloe vera"]}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use ragshelf::prelude::*;
//! use std::sync::Arc;
//!
//! # fn generator() -> Arc<dyn Generator> { unimplemented!() }
//! let catalog = load_catalog("./catalog.json").unwrap();
//! let pipeline = RagPipeline::builder(
//!     Arc::new(catalog),
//!     Arc::new(HashingEmbedder::default()),
//!     generator(),
//! )
//! .build()
//! .unwrap();
//!
//! let answers = pipeline
//!     .answer_batch(&[Query::from("cheap cleanser with glycerin")])
//!     .unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - `ragshelf-core` - documents, criteria extraction, filters, chunking, errors
//! - `ragshelf-similarity` - embedders and the cosine ranker
//! - `ragshelf-storage` - document store seam and the in-memory catalog
//! - `ragshelf-rag` - retrieval assembly, synthesis and the pipeline
//! - `ragshelf-providers` - OpenAI-compatible embeddings and Gemini generation
//! - `ragshelf-api` - REST surface

// Re-export core types
pub use ragshelf_core::{
    chunk_text, Chunker, Criteria, CriteriaExtractor, Document, Error, LinguisticParser,
    PriceRange, ProductFilter, ProductRecord, Query, Result, RuleBasedParser, Vector,
};

pub use ragshelf_similarity::{Embedder, HashingEmbedder, RankedResult, SimilarityRanker};

pub use ragshelf_storage::{load_catalog, CandidateFilter, DocumentStore, InMemoryCatalog};

pub use ragshelf_rag::{
    BatchOutcome, Generator, PipelineConfig, RagPipeline, ResponseSynthesizer,
    RetrievalAssembler,
};

pub use ragshelf_providers::{GeminiGenerator, OpenAiEmbedder, OpenAiEmbedderConfig};

pub use ragshelf_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_catalog, BatchOutcome, Criteria, Document, DocumentStore, Embedder, Error,
        Generator, HashingEmbedder, InMemoryCatalog, PipelineConfig, PriceRange, Query,
        RagPipeline, Result,
    };
}
