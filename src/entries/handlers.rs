use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{jwt::AuthUser, repo::User},
    entries::{
        dto::{CreateEntryRequest, EntryPatch, MessageResponse},
        repo::CalorieEntry,
    },
    error::ApiError,
    nutrition::CalorieLookup,
    state::AppState,
};

/// GET /api/calories — list all entries.
#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<Vec<CalorieEntry>>, ApiError> {
    let entries = CalorieEntry::list_all(&state.db).await?;
    Ok(Json(entries))
}

/// GET /api/calories/:id — fetch one entry.
#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<CalorieEntry>, ApiError> {
    let entry = CalorieEntry::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Calorie Entry Not Found".into()))?;
    Ok(Json(entry))
}

/// Use the provided calorie value when present, otherwise fall back to the
/// nutrition lookup. A lookup miss is a bad request, nothing gets persisted.
pub async fn resolve_calories(
    provided: Option<f64>,
    text: Option<&str>,
    lookup: &dyn CalorieLookup,
) -> Result<f64, ApiError> {
    if let Some(calories) = provided {
        return Ok(calories);
    }
    info!("calories not provided, querying nutrition service");
    match lookup.lookup_calories(text.unwrap_or_default()).await {
        Some(calories) => {
            info!(calories, "calories fetched from nutrition service");
            Ok(calories)
        }
        None => Err(ApiError::BadRequest(
            "Calories information not found".into(),
        )),
    }
}

/// POST /api/calories — create an entry, resolving calories when absent.
#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CalorieEntry>), ApiError> {
    if User::find_by_id(&state.db, payload.user_id).await?.is_none() {
        return Err(ApiError::BadRequest("User Not Found".into()));
    }

    let calories = resolve_calories(
        payload.calories,
        payload.text.as_deref(),
        state.lookup.as_ref(),
    )
    .await?;

    let entry = CalorieEntry::insert(
        &state.db,
        payload.date,
        payload.time,
        payload.text.as_deref(),
        calories,
        payload.user_id,
    )
    .await?;

    info!(entry_id = entry.id, user_id = entry.user_id, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/calories/:id — partial update.
#[instrument(skip(state, patch))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<CalorieEntry>, ApiError> {
    let mut entry = CalorieEntry::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Calorie Entry Not Found".into()))?;

    patch.apply(&mut entry);

    let updated = CalorieEntry::update(&state.db, &entry).await.map_err(|e| {
        error!(error = %e, entry_id = id, "entry update failed, rolled back");
        ApiError::UpdateFailed("Calorie Entry Not Updated".into())
    })?;

    info!(entry_id = updated.id, "entry updated");
    Ok(Json(updated))
}

/// DELETE /api/calories/:id — remove an entry.
#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = CalorieEntry::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Calorie Entry Not Found".into()));
    }

    info!(entry_id = id, "entry deleted");
    Ok(Json(MessageResponse {
        message: "Entry Deleted Successfully".into(),
    }))
}
