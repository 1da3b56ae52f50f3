//! SQLite storage implementation for source-priority groupings.

mod model;
mod repository;

pub use model::{DataSourceGroupingDB, NewDataSourceGroupingDB};
pub use repository::GroupingRepository;

// Re-export trait from core for convenience
pub use unistock_core::stocks::SourcePriorityStore;
