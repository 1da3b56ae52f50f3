use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "data/unistock.db";

pub struct Config {
    pub db_path: String,
    pub log_format: String,
    pub cache_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path = std::env::var("UNISTOCK_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
        let log_format = std::env::var("UNISTOCK_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        let cache_file = std::env::var("UNISTOCK_MY_CACHE_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self {
            db_path,
            log_format,
            cache_file,
        }
    }
}
