use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A physical storage unit (shelf or rack) in the warehouse.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hive {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub address: String,
    pub is_deleted: bool,
}

/// A subdivision of a hive.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSection {
    pub id: i32,
    pub store_hive_id: i32,
    pub code: String,
    pub name: String,
    pub is_deleted: bool,
}

/// Projection of a hive for listing views (no address).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveListItem {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub is_deleted: bool,
}

impl From<Hive> for HiveListItem {
    fn from(hive: Hive) -> Self {
        Self {
            id: hive.id,
            code: hive.code,
            name: hive.name,
            is_deleted: hive.is_deleted,
        }
    }
}

/// Projection of a hive section for listing views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSectionListItem {
    pub id: i32,
    pub store_hive_id: i32,
    pub code: String,
    pub name: String,
    pub is_deleted: bool,
}

impl From<HiveSection> for HiveSectionListItem {
    fn from(section: HiveSection) -> Self {
        Self {
            id: section.id,
            store_hive_id: section.store_hive_id,
            code: section.code,
            name: section.name,
            is_deleted: section.is_deleted,
        }
    }
}

/// Body of hive create and update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHiveRequest {
    pub address: String,
    pub code: String,
    pub name: String,
}

/// Body of hive section create and update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHiveSectionRequest {
    pub store_hive_id: i32,
    pub code: String,
    pub name: String,
}
