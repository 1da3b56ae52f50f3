use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

use super::model::{decode_body, NewDocumentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::documents::dsl;
use unistock_core::constants::TRADE_DATE_FORMAT;
use unistock_core::errors::Result;
use unistock_core::stocks::{
    DailyBar, DailyBarQuery, InstrumentRecord, QuoteRecord, SearchPattern, StockDocumentStore,
};

/// Per-market document collections in a single SQLite table.
pub struct DocumentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DocumentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Append documents to `collection`. Returns the number written.
    pub async fn insert_documents(&self, collection: &str, documents: Vec<Value>) -> Result<usize> {
        let rows = documents
            .into_iter()
            .map(|doc| NewDocumentDB::from_value(collection, doc))
            .collect::<Result<Vec<_>>>()?;
        if rows.is_empty() {
            return Ok(0);
        }

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let written = diesel::insert_into(dsl::documents)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(written)
            })
            .await
    }

    fn first_body(&self, collection: &str, code: &str, source: Option<&str>) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = dsl::documents
            .filter(dsl::collection.eq(collection))
            .filter(dsl::code.eq(code))
            .into_boxed();
        if let Some(source) = source {
            query = query.filter(dsl::source.eq(source));
        }

        query
            .order(dsl::id.asc())
            .select(dsl::body)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }
}

#[async_trait]
impl StockDocumentStore for DocumentRepository {
    async fn find_instrument(
        &self,
        collection: &str,
        code: &str,
        source: Option<&str>,
    ) -> Result<Option<InstrumentRecord>> {
        self.first_body(collection, code, source)?
            .map(|body| decode_body(&body))
            .transpose()
    }

    async fn search_instruments(
        &self,
        collection: &str,
        pattern: &SearchPattern,
    ) -> Result<Vec<InstrumentRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let bodies: Vec<String> = dsl::documents
            .filter(dsl::collection.eq(collection))
            .order(dsl::id.asc())
            .select(dsl::body)
            .load(&mut conn)
            .into_core()?;

        let scanned = bodies.len();
        let matches: Vec<InstrumentRecord> = bodies
            .iter()
            .filter_map(|body| match decode_body::<InstrumentRecord>(body) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping undecodable document in '{}': {}", collection, e);
                    None
                }
            })
            .filter(|record| pattern.matches(record))
            .collect();

        debug!(
            "Scanned {} documents in '{}' for '{}', {} matched",
            scanned,
            collection,
            pattern.query(),
            matches.len()
        );
        Ok(matches)
    }

    async fn find_quote(&self, collection: &str, code: &str) -> Result<Option<QuoteRecord>> {
        self.first_body(collection, code, None)?
            .map(|body| decode_body(&body))
            .transpose()
    }

    async fn find_daily_bars(
        &self,
        collection: &str,
        query: &DailyBarQuery,
    ) -> Result<Vec<DailyBar>> {
        let mut conn = get_connection(&self.pool)?;
        let mut sql = dsl::documents
            .filter(dsl::collection.eq(collection))
            .filter(dsl::code.eq(&query.code))
            .filter(dsl::trade_date.is_not_null())
            .into_boxed();
        if let Some(start) = query.start {
            sql = sql.filter(dsl::trade_date.ge(start.format(TRADE_DATE_FORMAT).to_string()));
        }
        if let Some(end) = query.end {
            sql = sql.filter(dsl::trade_date.le(end.format(TRADE_DATE_FORMAT).to_string()));
        }

        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let bodies: Vec<String> = sql
            .order((dsl::trade_date.desc(), dsl::id.asc()))
            .limit(limit)
            .select(dsl::body)
            .load(&mut conn)
            .into_core()?;

        bodies.iter().map(|body| decode_body(body)).collect()
    }
}
