use std::sync::Arc;

use tracing::info;

use crate::database::{
    HiveRepository, HiveSection, HiveSectionListItem, HiveSectionRepository,
    UpdateHiveSectionRequest,
};
use crate::utils::error::ApiError;

/// Business rules for hive sections. Holds the hive repository as well so it
/// can check parent hives when sections are created.
pub struct HiveSectionService {
    sections: Arc<dyn HiveSectionRepository>,
    hives: Arc<dyn HiveRepository>,
}

impl HiveSectionService {
    pub fn new(sections: Arc<dyn HiveSectionRepository>, hives: Arc<dyn HiveRepository>) -> Self {
        Self { sections, hives }
    }

    pub async fn list_sections(&self) -> Result<Vec<HiveSectionListItem>, ApiError> {
        let sections = self
            .sections
            .list()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(sections.into_iter().map(HiveSectionListItem::from).collect())
    }

    /// Sections of one hive, soft-deleted included, ordered by id. Existence
    /// of the hive itself is the caller's concern.
    pub async fn list_sections_for_hive(
        &self,
        hive_id: i32,
    ) -> Result<Vec<HiveSectionListItem>, ApiError> {
        let sections = self
            .sections
            .list_for_hive(hive_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(sections.into_iter().map(HiveSectionListItem::from).collect())
    }

    pub async fn get_section(&self, section_id: i32) -> Result<HiveSection, ApiError> {
        self.sections
            .find(section_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
            .ok_or_else(|| ApiError::NotFound(format!("Hive section {section_id} was not found")))
    }

    /// The parent hive must exist and not be soft-deleted; sections are never
    /// silently created as orphans.
    pub async fn create_section(
        &self,
        request: UpdateHiveSectionRequest,
    ) -> Result<HiveSection, ApiError> {
        validate_section_request(&request)?;

        let parent = self
            .hives
            .find(request.store_hive_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Hive {} was not found", request.store_hive_id))
            })?;

        if parent.is_deleted {
            return Err(ApiError::Conflict(format!(
                "Hive {} is marked as deleted and cannot take new sections",
                parent.id
            )));
        }

        self.ensure_code_free(request.store_hive_id, &request.code, None)
            .await?;

        let section = self
            .sections
            .insert(&request)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        info!(
            "Created section {} in hive {}",
            section.id, section.store_hive_id
        );

        Ok(section)
    }

    pub async fn update_section(
        &self,
        section_id: i32,
        request: UpdateHiveSectionRequest,
    ) -> Result<HiveSection, ApiError> {
        validate_section_request(&request)?;

        let existing = self.get_section(section_id).await?;

        // The parent hive is fixed at creation time.
        if request.store_hive_id != existing.store_hive_id {
            return Err(ApiError::Validation(format!(
                "Invalid StoreHiveId. Section {section_id} belongs to hive {} and cannot be moved",
                existing.store_hive_id
            )));
        }

        if existing.is_deleted {
            return Err(ApiError::Conflict(format!(
                "Hive section {section_id} is marked as deleted and cannot be updated"
            )));
        }

        self.ensure_code_free(existing.store_hive_id, &request.code, Some(section_id))
            .await?;

        let updated = HiveSection {
            id: section_id,
            store_hive_id: existing.store_hive_id,
            code: request.code,
            name: request.name,
            is_deleted: existing.is_deleted,
        };

        self.sections
            .update(&updated)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(updated)
    }

    /// Hard delete, permitted only for sections already marked as deleted.
    pub async fn delete_section(&self, section_id: i32) -> Result<(), ApiError> {
        let section = self.get_section(section_id).await?;

        if !section.is_deleted {
            return Err(ApiError::Conflict(format!(
                "Hive section {section_id} must be marked as deleted before it can be removed"
            )));
        }

        self.sections
            .delete(section_id)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        info!("Deleted section {}", section_id);

        Ok(())
    }

    /// Idempotent soft-delete toggle.
    pub async fn set_status(&self, section_id: i32, deleted: bool) -> Result<(), ApiError> {
        self.get_section(section_id).await?;

        self.sections
            .set_deleted(section_id, deleted)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Section codes are unique within their hive.
    async fn ensure_code_free(
        &self,
        hive_id: i32,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ApiError> {
        let collision = self
            .sections
            .find_by_code_in_hive(hive_id, code)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        if let Some(other) = collision {
            if Some(other.id) != exclude_id {
                return Err(ApiError::Conflict(format!(
                    "Section {} in hive {hive_id} already uses code {code}",
                    other.id
                )));
            }
        }

        Ok(())
    }
}

/// Aggregated field validation, mirroring the hive rules.
fn validate_section_request(request: &UpdateHiveSectionRequest) -> Result<(), ApiError> {
    let mut message = String::new();

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
