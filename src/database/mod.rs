pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use models::*;
pub use pool::DbPool;
pub use postgres::{PostgresHiveRepository, PostgresHiveSectionRepository};
pub use repository::{HiveRepository, HiveSectionRepository};
