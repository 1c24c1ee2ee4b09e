//! Cosine top-N ranking over a shared chunk pool

use crate::embedder::Embedder;
use ordered_float::OrderedFloat;
use ragshelf_core::{Error, Result, Vector};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::debug;

/// Default number of chunks kept per query
pub const DEFAULT_TOP_N: usize = 3;

/// A chunk index into the pool with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk {
    pub index: usize,
    pub score: f32,
}

/// Ranked chunks for one query, best first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    pub hits: Vec<ScoredChunk>,
}

impl RankedResult {
    pub fn indices(&self) -> Vec<usize> {
        self.hits.iter().map(|h| h.index).collect()
    }

    pub fn best(&self) -> Option<&ScoredChunk> {
        self.hits.first()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Select the `n` pool vectors most similar to `query`.
///
/// Sorting is stable, so equal scores keep pool order.
pub fn top_n(query: &Vector, pool: &[Vector], n: usize) -> RankedResult {
    let mut scored: Vec<ScoredChunk> = pool
        .iter()
        .enumerate()
        .map(|(index, chunk)| ScoredChunk {
            index,
            score: query.cosine_similarity(chunk),
        })
        .collect();

    scored.sort_by_key(|hit| Reverse(OrderedFloat(hit.score)));
    scored.truncate(n);

    RankedResult { hits: scored }
}

/// Embeds a chunk pool and a batch of query texts once, then ranks the
/// whole pool for every query.
#[derive(Clone)]
pub struct SimilarityRanker {
    embedder: Arc<dyn Embedder>,
    top_n: usize,
}

impl SimilarityRanker {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// One [`RankedResult`] per query, in query order.
    ///
    /// Every query ranks against the same pool, so queries in one batch may
    /// receive overlapping chunks.
    pub fn rank<S: AsRef<str>>(&self, chunks: &[S], queries: &[S]) -> Result<Vec<RankedResult>> {
        if chunks.is_empty() {
            return Ok(vec![RankedResult::default(); queries.len()]);
        }

        let chunk_vectors = self.embed_all(chunks)?;
        let query_vectors = self.embed_all(queries)?;
        check_dimensions(&chunk_vectors, &query_vectors)?;

        debug!(
            chunks = chunk_vectors.len(),
            queries = query_vectors.len(),
            top_n = self.top_n,
            "ranking chunk pool"
        );

        Ok(query_vectors
            .iter()
            .map(|query| top_n(query, &chunk_vectors, self.top_n))
            .collect())
    }

    fn embed_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let refs: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
        let vectors = self.embedder.embed(&refs)?;
        if vectors.len() != refs.len() {
            return Err(Error::EmbeddingCount {
                expected: refs.len(),
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }
}

impl std::fmt::Debug for SimilarityRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityRanker")
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

/// All vectors of one run must share a dimension
fn check_dimensions(chunks: &[Vector], queries: &[Vector]) -> Result<()> {
    let Some(expected) = chunks.first().map(Vector::dim) else {
        return Ok(());
    };
    match chunks.iter().chain(queries).find(|v| v.dim() != expected) {
        Some(v) => Err(Error::InvalidDimension {
            expected,
            actual: v.dim(),
        }),
        None => Ok(()),
    }
}
