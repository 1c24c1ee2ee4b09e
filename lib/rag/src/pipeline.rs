use crate::assembler::RetrievalAssembler;
use crate::synthesizer::{Generator, ResponseSynthesizer};
use ragshelf_core::{
    Chunker, CriteriaExtractor, Error, LinguisticParser, Query, Result, DEFAULT_MAX_CHUNK_LEN,
};
use ragshelf_similarity::{Embedder, RankedResult, SimilarityRanker, DEFAULT_TOP_N};
use ragshelf_storage::{CandidateFilter, DocumentStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Response returned for the whole batch when no document matched any query
pub const NO_RESULTS_MESSAGE: &str = "No products found matching the given criteria.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Chunks ranked per query
    pub top_n: usize,
    /// Maximum chunk length in characters
    pub max_chunk_len: usize,
    pub no_results_message: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            no_results_message: NO_RESULTS_MESSAGE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if self.max_chunk_len == 0 {
            return Err(Error::InvalidConfig(
                "max_chunk_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Chunk pool of a batch together with each query's ranking over it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retrieval {
    pub chunks: Vec<String>,
    pub ranked: Vec<RankedResult>,
}

/// Result of answering a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// One response per query, in query order
    Answered(Vec<String>),
    /// No query matched any document; nothing was ranked or generated
    NoResults,
}

/// End-to-end question answering over a document store.
///
/// Collaborators are injected at construction and shared read-only, so one
/// pipeline can serve concurrent batches; each batch builds its own pool.
#[derive(Debug, Clone)]
pub struct RagPipeline {
    assembler: RetrievalAssembler,
    ranker: SimilarityRanker,
    synthesizer: ResponseSynthesizer,
    config: PipelineConfig,
}

impl RagPipeline {
    pub fn builder(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> PipelineBuilder {
        PipelineBuilder::new(store, embedder, generator)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the shared chunk pool and rank it for every query
    pub fn retrieve(&self, queries: &[Query]) -> Result<Retrieval> {
        let chunks = self.assembler.assemble(queries)?;
        if chunks.is_empty() {
            return Ok(Retrieval {
                chunks,
                ranked: vec![RankedResult::default(); queries.len()],
            });
        }

        let texts: Vec<&str> = queries.iter().map(Query::text).collect();
        let pool: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let ranked = self.ranker.rank(&pool, &texts)?;
        Ok(Retrieval { chunks, ranked })
    }

    pub fn run(&self, queries: &[Query]) -> Result<BatchOutcome> {
        let retrieval = self.retrieve(queries)?;
        if retrieval.chunks.is_empty() {
            info!(queries = queries.len(), "No chunks for batch");
            return Ok(BatchOutcome::NoResults);
        }

        let mut responses = Vec::with_capacity(queries.len());
        for (query, ranked) in queries.iter().zip(&retrieval.ranked) {
            debug!(query = %query.text(), indices = ?ranked.indices(), "synthesizing answer");
            responses.push(
                self.synthesizer
                    .synthesize(query.text(), ranked, &retrieval.chunks)?,
            );
        }

        Ok(BatchOutcome::Answered(responses))
    }

    /// Answer every query of a batch, aligned by position. When nothing
    /// matched, the batch gets the single no-results message instead.
    pub fn answer_batch(&self, queries: &[Query]) -> Result<Vec<String>> {
        match self.run(queries)? {
            BatchOutcome::Answered(responses) => Ok(responses),
            BatchOutcome::NoResults => Ok(vec![self.config.no_results_message.clone()]),
        }
    }
}

/// Builder for [`RagPipeline`]
pub struct PipelineBuilder {
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    parser: Option<Arc<dyn LinguisticParser>>,
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            store,
            embedder,
            generator,
            parser: None,
            config: PipelineConfig::default(),
        }
    }

    pub fn parser(mut self, parser: Arc<dyn LinguisticParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.config.top_n = top_n;
        self
    }

    pub fn max_chunk_len(mut self, max_chunk_len: usize) -> Self {
        self.config.max_chunk_len = max_chunk_len;
        self
    }

    pub fn build(self) -> Result<RagPipeline> {
        self.config.validate()?;

        let extractor = match self.parser {
            Some(parser) => CriteriaExtractor::new(parser),
            None => CriteriaExtractor::default(),
        };
        let assembler = RetrievalAssembler::new(
            extractor,
            CandidateFilter::new(self.store),
            Chunker::new(self.config.max_chunk_len),
        );

        Ok(RagPipeline {
            assembler,
            ranker: SimilarityRanker::new(self.embedder).with_top_n(self.config.top_n),
            synthesizer: ResponseSynthesizer::new(self.generator),
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragshelf_core::{Document, ParsedText, Token};
    use ragshelf_similarity::HashingEmbedder;
    use ragshelf_storage::InMemoryCatalog;
    use serde_json::json;

    struct LengthGenerator;

    impl Generator for LengthGenerator {
        fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.len().to_string())
        }
    }

    fn pipeline(docs: Vec<serde_json::Value>) -> RagPipeline {
        let catalog = InMemoryCatalog::from_documents(
            docs.into_iter().filter_map(Document::from_value).collect(),
        );
        RagPipeline::builder(
            Arc::new(catalog),
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let builder = RagPipeline::builder(
            Arc::new(InMemoryCatalog::new()),
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        );
        assert!(matches!(builder.top_n(0).build(), Err(Error::InvalidConfig(_))));

        let builder = RagPipeline::builder(
            Arc::new(InMemoryCatalog::new()),
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        );
        assert!(matches!(
            builder.max_chunk_len(0).build(),
            Err(Error::InvalidConfig(_))
        ));
    }

    /// Reads every query as a request for glycerin
    struct GlycerinParser;

    impl LinguisticParser for GlycerinParser {
        fn parse(&self, _text: &str) -> ParsedText {
            ParsedText {
                tokens: vec![Token {
                    text: "glycerin".to_string(),
                    start: 0,
                    end: 0,
                }],
                entities: Vec::new(),
            }
        }
    }

    #[test]
    fn test_injected_parser_drives_extraction() {
        let docs = vec![
            json!({"product_name": "Aloe Gel", "description": "aloe"}),
            json!({"product_name": "Glycerin Wash", "description": "glycerin"}),
        ];
        let catalog = InMemoryCatalog::from_documents(
            docs.into_iter().filter_map(Document::from_value).collect(),
        );
        let store: Arc<dyn DocumentStore> = Arc::new(catalog);

        let default = RagPipeline::builder(
            store.clone(),
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        )
        .build()
        .unwrap();
        assert_eq!(default.retrieve(&[Query::from("anything")]).unwrap().chunks.len(), 2);

        let custom = RagPipeline::builder(
            store,
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        )
        .parser(Arc::new(GlycerinParser))
        .build()
        .unwrap();
        let retrieval = custom.retrieve(&[Query::from("anything")]).unwrap();
        assert_eq!(retrieval.chunks.len(), 1);
        assert!(retrieval.chunks[0].contains("Glycerin Wash"));
    }

    #[test]
    fn test_config_replaces_defaults() {
        let pipeline = RagPipeline::builder(
            Arc::new(InMemoryCatalog::new()),
            Arc::new(HashingEmbedder::default()),
            Arc::new(LengthGenerator),
        )
        .config(PipelineConfig {
            top_n: 1,
            max_chunk_len: 64,
            no_results_message: "Nothing on the shelf.".to_string(),
        })
        .build()
        .unwrap();
        assert_eq!(pipeline.config().top_n, 1);
        assert_eq!(pipeline.config().max_chunk_len, 64);
        assert_eq!(
            pipeline.answer_batch(&[Query::from("cream")]).unwrap(),
            vec!["Nothing on the shelf.".to_string()]
        );
    }

    #[test]
    fn test_empty_store_yields_no_results() {
        let pipeline = pipeline(vec![]);
        let queries = vec![Query::from("cream"), Query::from("cleanser")];
        assert_eq!(pipeline.run(&queries).unwrap(), BatchOutcome::NoResults);
        assert_eq!(
            pipeline.answer_batch(&queries).unwrap(),
            vec![NO_RESULTS_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_one_response_per_query() {
        let pipeline = pipeline(vec![
            json!({"type": "product", "product_name": "Aloe Gel", "description": "aloe"}),
        ]);
        let queries = vec![Query::from("aloe"), Query::from("glycerin"), Query::from("")];
        let responses = pipeline.answer_batch(&queries).unwrap();
        assert_eq!(responses.len(), 3);
    }

    #[test]
    fn test_retrieve_ranks_within_top_n() {
        let docs = (0..5)
            .map(|i| json!({"product_name": format!("P{}", i), "description": "plain"}))
            .collect();
        let pipeline = pipeline(docs);
        let retrieval = pipeline.retrieve(&[Query::from("plain")]).unwrap();
        assert_eq!(retrieval.chunks.len(), 5);
        assert_eq!(retrieval.ranked.len(), 1);
        assert_eq!(retrieval.ranked[0].hits.len(), DEFAULT_TOP_N);
    }
}
