use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use ragshelf_core::Query;
use ragshelf_rag::RagPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

#[derive(Deserialize)]
struct QueryRequest {
    /// Absent and `null` are both treated as no queries
    #[serde(default)]
    queries: Option<Vec<Query>>,
}

#[derive(Serialize)]
struct QueryResponse {
    responses: Vec<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(pipeline: Arc<RagPipeline>, port: u16) -> std::io::Result<()> {
        info!(port, "binding HTTP server");
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new().wrap(cors).configure(routes(pipeline.clone()))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Registers the routes and shared pipeline on an app
pub fn routes(pipeline: Arc<RagPipeline>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let body = serde_json::json!({ "error": err.to_string() });
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

        cfg.app_data(web::Data::new(pipeline))
            .app_data(json_config)
            .route("/query", web::post().to(query))
            .route("/health", web::get().to(health));
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn query(
    pipeline: web::Data<Arc<RagPipeline>>,
    req: web::Json<QueryRequest>,
) -> ActixResult<HttpResponse> {
    let queries = req.into_inner().queries.unwrap_or_default();
    if queries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No queries provided"
        })));
    }

    let request_id = Uuid::new_v4();
    let span = info_span!("query", %request_id, queries = queries.len());
    let pipeline = pipeline.get_ref().clone();

    async move {
        let outcome = web::block(move || pipeline.answer_batch(&queries)).await;
        match outcome {
            Ok(Ok(responses)) => {
                info!(responses = responses.len(), "batch answered");
                Ok(HttpResponse::Ok().json(QueryResponse { responses }))
            }
            Ok(Err(e)) => {
                error!(error = %e, "pipeline failed");
                Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": e.to_string()
                })))
            }
            Err(e) => {
                error!(error = %e, "pipeline task aborted");
                Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": e.to_string()
                })))
            }
        }
    }
    .instrument(span)
    .await
}
