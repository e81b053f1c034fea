//! In-memory repositories backed by `BTreeMap`, mainly for tests and local
//! runs without Postgres. Id assignment mirrors the store contract: fresh,
//! monotonically increasing, never reused.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::models::{Hive, HiveSection, UpdateHiveRequest, UpdateHiveSectionRequest};
use super::repository::{HiveRepository, HiveSectionRepository};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn assign_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct InMemoryHiveRepository {
    table: RwLock<Table<Hive>>,
}

impl InMemoryHiveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HiveRepository for InMemoryHiveRepository {
    async fn list(&self) -> Result<Vec<Hive>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn find(&self, hive_id: i32) -> Result<Option<Hive>> {
        Ok(self.table.read().rows.get(&hive_id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Hive>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|hive| hive.code == code)
            .cloned())
    }

    async fn insert(&self, request: &UpdateHiveRequest) -> Result<Hive> {
        let mut table = self.table.write();
        let hive = Hive {
            id: table.assign_id(),
            code: request.code.clone(),
            name: request.name.clone(),
            address: request.address.clone(),
            is_deleted: false,
        };
        table.rows.insert(hive.id, hive.clone());
        Ok(hive)
    }

    async fn update(&self, hive: &Hive) -> Result<()> {
        let mut table = self.table.write();
        if let Some(row) = table.rows.get_mut(&hive.id) {
            row.code = hive.code.clone();
            row.name = hive.name.clone();
            row.address = hive.address.clone();
        }
        Ok(())
    }

    async fn set_deleted(&self, hive_id: i32, deleted: bool) -> Result<()> {
        let mut table = self.table.write();
        if let Some(row) = table.rows.get_mut(&hive_id) {
            row.is_deleted = deleted;
        }
        Ok(())
    }

    async fn delete(&self, hive_id: i32) -> Result<()> {
        self.table.write().rows.remove(&hive_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHiveSectionRepository {
    table: RwLock<Table<HiveSection>>,
}

impl InMemoryHiveSectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HiveSectionRepository for InMemoryHiveSectionRepository {
    async fn list(&self) -> Result<Vec<HiveSection>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn list_for_hive(&self, hive_id: i32) -> Result<Vec<HiveSection>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .filter(|section| section.store_hive_id == hive_id)
            .cloned()
            .collect())
    }

    async fn find(&self, section_id: i32) -> Result<Option<HiveSection>> {
        Ok(self.table.read().rows.get(&section_id).cloned())
    }

    async fn find_by_code_in_hive(
        &self,
        hive_id: i32,
        code: &str,
    ) -> Result<Option<HiveSection>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|section| section.store_hive_id == hive_id && section.code == code)
            .cloned())
    }

    async fn insert(&self, request: &UpdateHiveSectionRequest) -> Result<HiveSection> {
        let mut table = self.table.write();
        let section = HiveSection {
            id: table.assign_id(),
            store_hive_id: request.store_hive_id,
            code: request.code.clone(),
            name: request.name.clone(),
            is_deleted: false,
        };
        table.rows.insert(section.id, section.clone());
        Ok(section)
    }

    async fn update(&self, section: &HiveSection) -> Result<()> {
        let mut table = self.table.write();
        if let Some(row) = table.rows.get_mut(&section.id) {
            row.code = section.code.clone();
            row.name = section.name.clone();
        }
        Ok(())
    }

    async fn set_deleted(&self, section_id: i32, deleted: bool) -> Result<()> {
        let mut table = self.table.write();
        if let Some(row) = table.rows.get_mut(&section_id) {
            row.is_deleted = deleted;
        }
        Ok(())
    }

    async fn delete(&self, section_id: i32) -> Result<()> {
        self.table.write().rows.remove(&section_id);
        Ok(())
    }
}
