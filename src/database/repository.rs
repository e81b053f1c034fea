use anyhow::Result;
use async_trait::async_trait;

use super::models::{Hive, HiveSection, UpdateHiveRequest, UpdateHiveSectionRequest};

/// Persistence abstraction for hive records.
///
/// Id assignment happens in the store: `insert` returns the created record
/// with its fresh id. Services receive this trait by injection and never
/// touch the backing store directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HiveRepository: Send + Sync {
    /// All hives ordered by id ascending, soft-deleted included.
    async fn list(&self) -> Result<Vec<Hive>>;

    async fn find(&self, hive_id: i32) -> Result<Option<Hive>>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Hive>>;

    async fn insert(&self, request: &UpdateHiveRequest) -> Result<Hive>;

    /// Full replace of code/name/address. The deleted flag is only ever
    /// touched through `set_deleted`.
    async fn update(&self, hive: &Hive) -> Result<()>;

    async fn set_deleted(&self, hive_id: i32, deleted: bool) -> Result<()>;

    async fn delete(&self, hive_id: i32) -> Result<()>;
}

/// Persistence abstraction for hive section records, scoped by parent hive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HiveSectionRepository: Send + Sync {
    /// All sections ordered by id ascending, soft-deleted included.
    async fn list(&self) -> Result<Vec<HiveSection>>;

    /// Sections whose `store_hive_id` matches, ordered by id, regardless of
    /// their own deleted flag.
    async fn list_for_hive(&self, hive_id: i32) -> Result<Vec<HiveSection>>;

    async fn find(&self, section_id: i32) -> Result<Option<HiveSection>>;

    async fn find_by_code_in_hive(&self, hive_id: i32, code: &str)
        -> Result<Option<HiveSection>>;

    async fn insert(&self, request: &UpdateHiveSectionRequest) -> Result<HiveSection>;

    async fn update(&self, section: &HiveSection) -> Result<()>;

    async fn set_deleted(&self, section_id: i32, deleted: bool) -> Result<()>;

    async fn delete(&self, section_id: i32) -> Result<()>;
}
