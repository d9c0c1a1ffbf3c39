pub mod dtos;
pub mod errors;
pub mod handlers;

use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::analysis::{
    AnalysisResult, AnalysisStatus, ConfidenceTier, ErrorKind, LanguageResult, PipelineState,
    SentimentLabel, SentimentResult, SummaryResult, TextStatistics, WordCount,
};
use crate::api::dtos::{
    AnalyzeForm, AnalyzeRequest, ArticleIndex, ErrorResponse, FeedArticlesRequest,
    FeedArticlesResponse, PopularFeedsResponse,
};
use crate::app_state::AppState;
use crate::feeds::{FeedArticle, FeedCategory, PopularFeed};
use crate::health::{HealthResponse, health_check};
use crate::middleware::{RateLimit, rate_limit_middleware};
use crate::models::{ModelChoice, ModelTier};
use crate::sources::{ExtractedDocument, MAX_UPLOAD_BYTES, SourceInfo, SourceKind};

/// Multipart framing and the other form fields on top of the largest upload.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::analyze_form,
        handlers::analyze_json,
        handlers::feed_articles,
        handlers::popular_feed_catalog,
        crate::health::health_check,
    ),
    components(schemas(
        AnalysisResult,
        AnalysisStatus,
        AnalyzeForm,
        AnalyzeRequest,
        ArticleIndex,
        ConfidenceTier,
        ErrorKind,
        ErrorResponse,
        ExtractedDocument,
        FeedArticle,
        FeedArticlesRequest,
        FeedArticlesResponse,
        FeedCategory,
        HealthResponse,
        LanguageResult,
        ModelChoice,
        ModelTier,
        PipelineState,
        PopularFeed,
        PopularFeedsResponse,
        SentimentLabel,
        SentimentResult,
        SourceInfo,
        SourceKind,
        SummaryResult,
        TextStatistics,
        WordCount,
    )),
    tags(
        (name = "analysis", description = "Language, summary and sentiment analysis"),
        (name = "feeds", description = "RSS and Atom feed browsing"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    let rate_limit = RateLimit::from_config(&state.config);

    let analysis = Router::new()
        .route("/analyze", post(handlers::analyze_form))
        .route("/api/analyze", post(handlers::analyze_json))
        .route("/api/rss/articles", post(handlers::feed_articles))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + FORM_OVERHEAD_BYTES))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/rss/popular", get(handlers::popular_feed_catalog))
        .merge(analysis)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
