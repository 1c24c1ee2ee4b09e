use anyhow::Context;
use clap::{Parser, ValueEnum};
use ragshelf_api::RestApi;
use ragshelf_providers::{
    GeminiGenerator, OpenAiEmbedder, OpenAiEmbedderConfig, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL,
};
use ragshelf_rag::RagPipeline;
use ragshelf_similarity::{Embedder, HashingEmbedder, DEFAULT_HASHING_DIM};
use ragshelf_storage::load_catalog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// Local feature hashing, no network
    Hashing,
    /// OpenAI-compatible embeddings endpoint
    Openai,
}

/// Question answering over a product catalog
#[derive(Parser, Debug)]
#[command(name = "ragshelf")]
#[command(about = "Retrieval-augmented answers over a product catalog", long_about = None)]
struct Args {
    /// Path to the JSON catalog
    #[arg(long, env = "RAGSHELF_CATALOG", default_value = "./catalog.json")]
    catalog: PathBuf,

    /// HTTP API port
    #[arg(long, env = "RAGSHELF_HTTP_PORT", default_value_t = 5000)]
    http_port: u16,

    /// Chunks ranked per query
    #[arg(long, env = "RAGSHELF_TOP_N", default_value_t = ragshelf_similarity::DEFAULT_TOP_N)]
    top_n: usize,

    /// Maximum chunk length in characters
    #[arg(long, env = "RAGSHELF_MAX_CHUNK_LEN", default_value_t = ragshelf_core::DEFAULT_MAX_CHUNK_LEN)]
    max_chunk_len: usize,

    #[arg(long, env = "RAGSHELF_EMBEDDER", value_enum, default_value_t = EmbedderKind::Hashing)]
    embedder: EmbedderKind,

    /// Dimension of the hashing embedder
    #[arg(long, default_value_t = DEFAULT_HASHING_DIM)]
    hashing_dim: usize,

    #[arg(long, default_value = DEFAULT_EMBEDDING_MODEL)]
    embedding_model: String,

    #[arg(long, default_value = DEFAULT_OPENAI_BASE_URL)]
    embedding_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_embedder(args: &Args) -> anyhow::Result<Arc<dyn Embedder>> {
    match args.embedder {
        EmbedderKind::Hashing => Ok(Arc::new(HashingEmbedder::new(args.hashing_dim)?)),
        EmbedderKind::Openai => {
            let api_key = args
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY must be set to use the openai embedder")?;
            let mut config = OpenAiEmbedderConfig::new(api_key);
            config.model = args.embedding_model.clone();
            config.base_url = args.embedding_url.clone();
            Ok(Arc::new(OpenAiEmbedder::new(config)?))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ragshelf v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("Embedder: {:?}", args.embedder);

    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("failed to load catalog {:?}", args.catalog))?;
    if catalog.is_empty() {
        warn!("Catalog is empty; every batch will get the no-results message");
    }

    let embedder = build_embedder(&args)?;
    let gemini_key = args
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY must be set")?;
    let generator = Arc::new(GeminiGenerator::new(gemini_key, args.gemini_model.clone())?);

    let pipeline = RagPipeline::builder(Arc::new(catalog), embedder, generator)
        .top_n(args.top_n)
        .max_chunk_len(args.max_chunk_len)
        .build()?;
    let pipeline = Arc::new(pipeline);

    info!("HTTP API: http://localhost:{}/", args.http_port);
    let sys = actix_web::rt::System::new();
    sys.block_on(RestApi::start(pipeline, args.http_port))?;

    info!("Shutting down...");
    Ok(())
}
