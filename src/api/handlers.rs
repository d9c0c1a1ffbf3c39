use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
};
use tracing::{debug, instrument};

use crate::analysis::{AnalysisResult, PipelineOutput};
use crate::api::dtos::{
    AnalyzeForm, AnalyzeRequest, AnalyzeResponse, ErrorResponse, FeedArticlesRequest,
    FeedArticlesResponse, PopularFeedsResponse, UploadedFile,
};
use crate::api::errors::ApiError;
use crate::app_state::AppState;
use crate::feeds::popular_feeds;
use crate::sources::{AnalysisRequest, list_feed_articles};

/// Analyze text from a form submission: direct text, a URL, an uploaded
/// file or an RSS feed article.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body(content = AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis result (`mode` = `analysis`) or feed articles to choose from (`mode` = `article_selection`)", body = AnalysisResult),
        (status = 400, description = "Text too short, unsupported file or bad article index", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 422, description = "No usable text could be extracted", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "Source could not be fetched", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn analyze_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let form = read_form(multipart).await?;
    let request = form.into_request().map_err(ApiError::BadRequest)?;
    run(&state, request).await
}

/// Analyze text sent as JSON.
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result (`mode` = `analysis`) or feed articles to choose from (`mode` = `article_selection`)", body = AnalysisResult),
        (status = 400, description = "Malformed request, text too short or bad article index", body = ErrorResponse),
        (status = 422, description = "No usable text could be extracted", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "Source could not be fetched", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn analyze_json(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = payload.into_request().map_err(ApiError::BadRequest)?;
    run(&state, request).await
}

/// Well-known feeds to pick from, by category.
#[utoipa::path(
    get,
    path = "/api/rss/popular",
    tag = "feeds",
    responses(
        (status = 200, description = "Feed catalogue", body = PopularFeedsResponse)
    )
)]
pub async fn popular_feed_catalog() -> Json<PopularFeedsResponse> {
    Json(PopularFeedsResponse {
        categories: popular_feeds(),
    })
}

/// List the articles of a feed.
#[utoipa::path(
    post,
    path = "/api/rss/articles",
    tag = "feeds",
    request_body = FeedArticlesRequest,
    responses(
        (status = 200, description = "Articles of the feed", body = FeedArticlesResponse),
        (status = 400, description = "Missing feed URL", body = ErrorResponse),
        (status = 422, description = "Not a feed, or no article carries text", body = ErrorResponse),
        (status = 502, description = "Feed could not be fetched", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn feed_articles(
    payload: Result<Json<FeedArticlesRequest>, JsonRejection>,
) -> Result<Json<FeedArticlesResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let feed_url = payload.rss_url.trim();
    if feed_url.is_empty() {
        return Err(ApiError::BadRequest("rss_url is required".to_string()));
    }

    let articles = list_feed_articles(feed_url).await?;
    Ok(Json(FeedArticlesResponse {
        feed_url: feed_url.to_string(),
        articles,
    }))
}

async fn run(state: &AppState, request: AnalysisRequest) -> Result<Json<AnalyzeResponse>, ApiError> {
    let response = match state.pipeline.run(request).await? {
        PipelineOutput::Analysis(result) => AnalyzeResponse::Analysis(result),
        PipelineOutput::ArticleSelection { feed_url, articles } => {
            AnalyzeResponse::ArticleSelection { feed_url, articles }
        }
    };
    Ok(Json(response))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, ApiError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen
                if !file_name.is_empty() || !bytes.is_empty() {
                    form.file = Some(UploadedFile { file_name, bytes });
                }
            }
            "input_method" => form.input_method = Some(field.text().await.map_err(multipart_error)?),
            "direct_text" => form.direct_text = Some(field.text().await.map_err(multipart_error)?),
            "url" => form.url = Some(field.text().await.map_err(multipart_error)?),
            "rss_url" => form.rss_url = Some(field.text().await.map_err(multipart_error)?),
            "article_index" => {
                form.article_index = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => debug!(field = %name, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn multipart_error(error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(error.body_text())
    } else {
        ApiError::BadRequest(error.body_text())
    }
}
