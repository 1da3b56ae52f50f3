//! SQLite storage implementation for stock documents.

mod model;
mod repository;

pub use model::{decode_body, NewDocumentDB};
pub use repository::DocumentRepository;

// Re-export trait from core for convenience
pub use unistock_core::stocks::StockDocumentStore;
