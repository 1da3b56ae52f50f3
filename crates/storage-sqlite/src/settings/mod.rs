//! SQLite storage implementation for runtime settings.

mod model;
mod repository;

pub use model::AppSettingDB;
pub use repository::SettingsRepository;

// Re-export trait from market-data for convenience
pub use unistock_market_data::SettingsReader;
