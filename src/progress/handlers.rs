use axum::{extract::State, http::StatusCode, Json};
use time::OffsetDateTime;
use tracing::instrument;

use crate::errors::ApiError;
use crate::state::AppState;

use super::dto::{DataBody, ProgressDraft};
use super::record::{NewProgressRecord, ProgressRecord};

#[instrument(skip(state))]
pub async fn list_progress(
    State(state): State<AppState>,
) -> Result<Json<DataBody<Vec<ProgressRecord>>>, ApiError> {
    let records = state.store.list().await?;
    Ok(Json(DataBody { data: records }))
}

/// The body is read raw rather than through the `Json` extractor so that a
/// missing or unparsable payload maps to a plain-text 400, distinct from the
/// 500 a storage failure produces.
#[instrument(skip(state, body))]
pub async fn create_progress(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<DataBody<ProgressRecord>>), ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::bad_request("Missing request body"));
    }
    let draft: ProgressDraft = serde_json::from_str(&body)
        .map_err(|err| ApiError::bad_request(format!("Invalid request body: {err}")))?;

    let record = state
        .store
        .insert(NewProgressRecord {
            date: draft.date,
            food: draft.food,
            exercise: draft.exercise,
            whey_grams: draft.whey_grams,
            creatine_grams: draft.creatine_grams,
            image_data: draft.image_data,
            image_name: draft.image_name,
            created_at: OffsetDateTime::now_utc(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataBody { data: record })))
}

pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
