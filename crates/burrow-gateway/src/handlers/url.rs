use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, UrlListing, UrlStatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{ShortCode, ShortenerError};
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<CreateUrlResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected shorten request body");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("expected Content-Type: application/json".to_string())
            }
            _ => AppError::BadRequest("invalid JSON".to_string()),
        }
    })?;

    if request.url.is_empty() {
        return Err(AppError::BadRequest("URL is required".to_string()));
    }

    let record = state.shortener().shorten(&request.url).await?;
    Ok(Json(CreateUrlResponse::new(record, state.base_url())))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Only generated codes are routable; anything else cannot be stored.
    let code = ShortCode::parse(short_code.as_str())
        .map_err(|_| ShortenerError::NotFound(short_code))?;

    let record = state.shortener().resolve(&code).await?;
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, record.original_url)],
    )
        .into_response())
}

pub async fn stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatsResponse>> {
    let record = state
        .shortener()
        .stats(&ShortCode::new_unchecked(short_code))
        .await?;
    Ok(Json(record.into()))
}

pub async fn list_urls_handler(State(state): State<AppState>) -> Result<Json<Vec<UrlListing>>> {
    let records = state.shortener().list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}
