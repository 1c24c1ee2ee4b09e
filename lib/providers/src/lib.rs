//! HTTP-backed collaborators for the ragshelf pipeline: an OpenAI-compatible
//! [`Embedder`](ragshelf_similarity::Embedder) and a Gemini
//! [`Generator`](ragshelf_rag::Generator). Both use blocking clients; the
//! pipeline calls them synchronously.

pub mod gemini;
pub mod openai;

pub use gemini::{GeminiGenerator, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use openai::{
    OpenAiEmbedder, OpenAiEmbedderConfig, DEFAULT_EMBEDDING_MODEL, DEFAULT_OPENAI_BASE_URL,
};
