use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::info;

use crate::database::{Hive, HiveListItem, HiveSectionListItem, UpdateHiveRequest};
use crate::services::HiveService;
use crate::utils::error::ApiError;

use super::{ensure_positive_id, ApiJson};

pub async fn get_hives(
    State(service): State<Arc<HiveService>>,
) -> Result<Json<Vec<HiveListItem>>, ApiError> {
    let hives = service.list_hives().await?;
    Ok(Json(hives))
}

pub async fn get_hive(
    State(service): State<Arc<HiveService>>,
    Path(hive_id): Path<i32>,
) -> Result<Json<Hive>, ApiError> {
    ensure_positive_id("hiveId", hive_id)?;

    let hive = service.get_hive(hive_id).await?;
    Ok(Json(hive))
}

pub async fn add_hive(
    State(service): State<Arc<HiveService>>,
    ApiJson(request): ApiJson<UpdateHiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let hive = service.create_hive(request).await?;
    let location = format!("/api/hives/{}", hive.id);

    info!("Hive {} created at {}", hive.id, location);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(hive),
    ))
}

pub async fn update_hive(
    State(service): State<Arc<HiveService>>,
    Path(hive_id): Path<i32>,
    ApiJson(request): ApiJson<UpdateHiveRequest>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveId", hive_id)?;

    service.update_hive(hive_id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_hive(
    State(service): State<Arc<HiveService>>,
    Path(hive_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveId", hive_id)?;

    service.delete_hive(hive_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_hive_sections(
    State(service): State<Arc<HiveService>>,
    Path(hive_id): Path<i32>,
) -> Result<Json<Vec<HiveSectionListItem>>, ApiError> {
    ensure_positive_id("hiveId", hive_id)?;

    let sections = service.list_hive_sections(hive_id).await?;
    Ok(Json(sections))
}

pub async fn set_status(
    State(service): State<Arc<HiveService>>,
    Path((hive_id, deleted_status)): Path<(i32, bool)>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveId", hive_id)?;

    service.set_status(hive_id, deleted_status).await?;
    Ok(StatusCode::NO_CONTENT)
}
