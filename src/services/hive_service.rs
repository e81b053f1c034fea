use std::sync::Arc;

use tracing::info;

use crate::database::{
    Hive, HiveListItem, HiveRepository, HiveSectionListItem, UpdateHiveRequest,
};
use crate::services::HiveSectionService;
use crate::utils::error::ApiError;

/// Business rules for hives: validation, lifecycle, status toggling and
/// projection of child sections (delegated to the section service).
pub struct HiveService {
    hives: Arc<dyn HiveRepository>,
    section_service: Arc<HiveSectionService>,
}

impl HiveService {
    pub fn new(hives: Arc<dyn HiveRepository>, section_service: Arc<HiveSectionService>) -> Self {
        Self {
            hives,
            section_service,
        }
    }

    pub async fn list_hives(&self) -> Result<Vec<HiveListItem>, ApiError> {
        let hives = self
            .hives
            .list()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(hives.into_iter().map(HiveListItem::from).collect())
    }

    pub async fn get_hive(&self, hive_id: i32) -> Result<Hive, ApiError> {
        self.hives
            .find(hive_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
            .ok_or_else(|| ApiError::NotFound(format!("Hive {hive_id} was not found")))
    }

    pub async fn create_hive(&self, request: UpdateHiveRequest) -> Result<Hive, ApiError> {
        validate_hive_request(&request)?;

        if let Some(existing) = self
            .hives
            .find_by_code(&request.code)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        {
            return Err(ApiError::Conflict(format!(
                "Hive {} already uses code {}",
                existing.id, request.code
            )));
        }

        let hive = self
            .hives
            .insert(&request)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        info!("Created hive {} with code {}", hive.id, hive.code);

        Ok(hive)
    }

    /// Full-field replace. Soft-deleted hives are frozen: updating one is a
    /// conflict, not a validation failure.
    pub async fn update_hive(
        &self,
        hive_id: i32,
        request: UpdateHiveRequest,
    ) -> Result<Hive, ApiError> {
        validate_hive_request(&request)?;

        let existing = self.get_hive(hive_id).await?;

        if existing.is_deleted {
            return Err(ApiError::Conflict(format!(
                "Hive {hive_id} is marked as deleted and cannot be updated"
            )));
        }

        if let Some(other) = self
            .hives
            .find_by_code(&request.code)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
        {
            if other.id != hive_id {
                return Err(ApiError::Conflict(format!(
                    "Hive {} already uses code {}",
                    other.id, request.code
                )));
            }
        }

        let updated = Hive {
            id: hive_id,
            code: request.code,
            name: request.name,
            address: request.address,
            is_deleted: existing.is_deleted,
        };

        self.hives
            .update(&updated)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(updated)
    }

    /// Hard delete, permitted only for hives already marked as deleted and
    /// with no remaining sections.
    pub async fn delete_hive(&self, hive_id: i32) -> Result<(), ApiError> {
        let hive = self.get_hive(hive_id).await?;

        if !hive.is_deleted {
            return Err(ApiError::Conflict(format!(
                "Hive {hive_id} must be marked as deleted before it can be removed"
            )));
        }

        let sections = self
            .section_service
            .list_sections_for_hive(hive_id)
            .await?;
        if !sections.is_empty() {
            return Err(ApiError::Conflict(format!(
                "Hive {hive_id} still has {} sections",
                sections.len()
            )));
        }

        self.hives
            .delete(hive_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        info!("Deleted hive {}", hive_id);

        Ok(())
    }

    /// Idempotent soft-delete toggle. Never cascades to sections.
    pub async fn set_status(&self, hive_id: i32, deleted: bool) -> Result<(), ApiError> {
        self.get_hive(hive_id).await?;

        self.hives
            .set_deleted(hive_id, deleted)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    pub async fn list_hive_sections(
        &self,
        hive_id: i32,
    ) -> Result<Vec<HiveSectionListItem>, ApiError> {
        self.get_hive(hive_id).await?;

        self.section_service.list_sections_for_hive(hive_id).await
    }
}

/// Aggregates every violated field into one message, not just the first.
fn validate_hive_request(request: &UpdateHiveRequest) -> Result<(), ApiError> {
    let mut message = String::new();

    if request.address.is_empty() {
        message.push_str("Invalid Address. ");
    }
    if request.code.is_empty() {
        message.push_str("Invalid Code. ");
    }
    if request.name.is_empty() {
        message.push_str("Invalid Name. ");
    }

    if message.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(message.trim_end().to_string()))
    }
}
