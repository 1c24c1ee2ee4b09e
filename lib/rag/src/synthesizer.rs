use ragshelf_core::Result;
use ragshelf_similarity::RankedResult;
use std::sync::Arc;

/// Produces a response for a prompt
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Prompt handed to the generator for one query and its context
pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are an intelligent assistant. I'll give you a question and context, \
         and you'll return the answer. Query: {} Contexts: {}",
        query, context
    )
}

/// Turns a query and its ranked chunks into a generated answer.
///
/// Only the best-ranked chunk is passed as context, however many were
/// ranked.
#[derive(Clone)]
pub struct ResponseSynthesizer {
    generator: Arc<dyn Generator>,
}

impl ResponseSynthesizer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generator errors are returned as-is
    pub fn synthesize(&self, query: &str, ranked: &RankedResult, pool: &[String]) -> Result<String> {
        let context = ranked
            .best()
            .and_then(|hit| pool.get(hit.index))
            .map(String::as_str)
            .unwrap_or_default();
        self.generator.generate(&build_prompt(query, context))
    }
}

impl std::fmt::Debug for ResponseSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSynthesizer").finish_non_exhaustive()
    }
}
