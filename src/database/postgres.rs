use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::models::{Hive, HiveSection, UpdateHiveRequest, UpdateHiveSectionRequest};
use super::pool::DbPool;
use super::repository::{HiveRepository, HiveSectionRepository};

/// Hive persistence over Postgres. See `sql/schema.sql` for the table layout.
pub struct PostgresHiveRepository {
    pool: DbPool,
}

impl PostgresHiveRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HiveRepository for PostgresHiveRepository {
    async fn list(&self) -> Result<Vec<Hive>> {
        let hives = sqlx::query_as::<_, Hive>(
            "SELECT id, code, name, address, is_deleted FROM hives ORDER BY id",
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        Ok(hives)
    }

    async fn find(&self, hive_id: i32) -> Result<Option<Hive>> {
        let hive = sqlx::query_as::<_, Hive>(
            "SELECT id, code, name, address, is_deleted FROM hives WHERE id = $1",
        )
        .bind(hive_id)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(hive)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Hive>> {
        let hive = sqlx::query_as::<_, Hive>(
            "SELECT id, code, name, address, is_deleted FROM hives WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(hive)
    }

    async fn insert(&self, request: &UpdateHiveRequest) -> Result<Hive> {
        let hive = sqlx::query_as::<_, Hive>(
            r#"INSERT INTO hives (code, name, address, is_deleted)
               VALUES ($1, $2, $3, false)
               RETURNING id, code, name, address, is_deleted"#,
        )
        .bind(&request.code)
        .bind(&request.name)
        .bind(&request.address)
        .fetch_one(self.pool.get_pool())
        .await?;

        debug!("Inserted hive {} with code {}", hive.id, hive.code);

        Ok(hive)
    }

    async fn update(&self, hive: &Hive) -> Result<()> {
        sqlx::query("UPDATE hives SET code = $2, name = $3, address = $4 WHERE id = $1")
            .bind(hive.id)
            .bind(&hive.code)
            .bind(&hive.name)
            .bind(&hive.address)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn set_deleted(&self, hive_id: i32, deleted: bool) -> Result<()> {
        sqlx::query("UPDATE hives SET is_deleted = $2 WHERE id = $1")
            .bind(hive_id)
            .bind(deleted)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn delete(&self, hive_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM hives WHERE id = $1")
            .bind(hive_id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}

/// Hive section persistence over Postgres.
pub struct PostgresHiveSectionRepository {
    pool: DbPool,
}

impl PostgresHiveSectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HiveSectionRepository for PostgresHiveSectionRepository {
    async fn list(&self) -> Result<Vec<HiveSection>> {
        let sections = sqlx::query_as::<_, HiveSection>(
            "SELECT id, store_hive_id, code, name, is_deleted FROM hive_sections ORDER BY id",
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        Ok(sections)
    }

    async fn list_for_hive(&self, hive_id: i32) -> Result<Vec<HiveSection>> {
        let sections = sqlx::query_as::<_, HiveSection>(
            r#"SELECT id, store_hive_id, code, name, is_deleted
               FROM hive_sections
               WHERE store_hive_id = $1
               ORDER BY id"#,
        )
        .bind(hive_id)
        .fetch_all(self.pool.get_pool())
        .await?;

        Ok(sections)
    }

    async fn find(&self, section_id: i32) -> Result<Option<HiveSection>> {
        let section = sqlx::query_as::<_, HiveSection>(
            "SELECT id, store_hive_id, code, name, is_deleted FROM hive_sections WHERE id = $1",
        )
        .bind(section_id)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(section)
    }

    async fn find_by_code_in_hive(
        &self,
        hive_id: i32,
        code: &str,
    ) -> Result<Option<HiveSection>> {
        let section = sqlx::query_as::<_, HiveSection>(
            r#"SELECT id, store_hive_id, code, name, is_deleted
               FROM hive_sections
               WHERE store_hive_id = $1 AND code = $2"#,
        )
        .bind(hive_id)
        .bind(code)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(section)
    }

    async fn insert(&self, request: &UpdateHiveSectionRequest) -> Result<HiveSection> {
        let section = sqlx::query_as::<_, HiveSection>(
            r#"INSERT INTO hive_sections (store_hive_id, code, name, is_deleted)
               VALUES ($1, $2, $3, false)
               RETURNING id, store_hive_id, code, name, is_deleted"#,
        )
        .bind(request.store_hive_id)
        .bind(&request.code)
        .bind(&request.name)
        .fetch_one(self.pool.get_pool())
        .await?;

        debug!(
            "Inserted section {} in hive {}",
            section.id, section.store_hive_id
        );

        Ok(section)
    }

    async fn update(&self, section: &HiveSection) -> Result<()> {
        sqlx::query("UPDATE hive_sections SET code = $2, name = $3 WHERE id = $1")
            .bind(section.id)
            .bind(&section.code)
            .bind(&section.name)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn set_deleted(&self, section_id: i32, deleted: bool) -> Result<()> {
        sqlx::query("UPDATE hive_sections SET is_deleted = $2 WHERE id = $1")
            .bind(section_id)
            .bind(deleted)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn delete(&self, section_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM hive_sections WHERE id = $1")
            .bind(section_id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
