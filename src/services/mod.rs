pub mod hive_section_service;
pub mod hive_service;

pub use hive_section_service::HiveSectionService;
pub use hive_service::HiveService;
