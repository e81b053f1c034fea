use std::sync::Arc;

use axum::extract::FromRef;

use crate::database::DbPool;
use crate::services::{HiveSectionService, HiveService};

/// Application state shared across handlers. Services are built once at
/// startup with their repositories injected; nothing here is global.
#[derive(Clone)]
pub struct AppState {
    /// Present when running against Postgres; `None` for in-memory backends.
    pub db_pool: Option<DbPool>,
    pub hive_service: Arc<HiveService>,
    pub hive_section_service: Arc<HiveSectionService>,
}

impl FromRef<AppState> for Arc<HiveService> {
    fn from_ref(state: &AppState) -> Self {
        state.hive_service.clone()
    }
}

impl FromRef<AppState> for Arc<HiveSectionService> {
    fn from_ref(state: &AppState) -> Self {
        state.hive_section_service.clone()
    }
}
