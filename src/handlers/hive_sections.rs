use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::info;

use crate::database::{HiveSection, HiveSectionListItem, UpdateHiveSectionRequest};
use crate::services::HiveSectionService;
use crate::utils::error::ApiError;

use super::{ensure_positive_id, ApiJson};

pub async fn get_sections(
    State(service): State<Arc<HiveSectionService>>,
) -> Result<Json<Vec<HiveSectionListItem>>, ApiError> {
    let sections = service.list_sections().await?;
    Ok(Json(sections))
}

pub async fn get_section(
    State(service): State<Arc<HiveSectionService>>,
    Path(section_id): Path<i32>,
) -> Result<Json<HiveSection>, ApiError> {
    ensure_positive_id("hiveSectionId", section_id)?;

    let section = service.get_section(section_id).await?;
    Ok(Json(section))
}

pub async fn add_section(
    State(service): State<Arc<HiveSectionService>>,
    ApiJson(request): ApiJson<UpdateHiveSectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let section = service.create_section(request).await?;
    let location = format!("/api/sections/{}", section.id);

    info!("Section {} created at {}", section.id, location);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(section),
    ))
}

pub async fn update_section(
    State(service): State<Arc<HiveSectionService>>,
    Path(section_id): Path<i32>,
    ApiJson(request): ApiJson<UpdateHiveSectionRequest>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveSectionId", section_id)?;

    service.update_section(section_id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_section(
    State(service): State<Arc<HiveSectionService>>,
    Path(section_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveSectionId", section_id)?;

    service.delete_section(section_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_status(
    State(service): State<Arc<HiveSectionService>>,
    Path((section_id, deleted_status)): Path<(i32, bool)>,
) -> Result<StatusCode, ApiError> {
    ensure_positive_id("hiveSectionId", section_id)?;

    service.set_status(section_id, deleted_status).await?;
    Ok(StatusCode::NO_CONTENT)
}
