use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::{DataSourceGroupingDB, NewDataSourceGroupingDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::datasource_groupings::dsl;
use unistock_core::errors::Result;
use unistock_core::stocks::{SourcePriorityEntry, SourcePriorityStore};

pub struct GroupingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GroupingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Insert or replace entries, keyed by category and source name.
    pub async fn insert_entries(&self, entries: &[SourcePriorityEntry]) -> Result<usize> {
        let rows: Vec<NewDataSourceGroupingDB> =
            entries.iter().map(NewDataSourceGroupingDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut written = 0;
                for row in &rows {
                    written += diesel::replace_into(dsl::datasource_groupings)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(written)
            })
            .await
    }
}

#[async_trait]
impl SourcePriorityStore for GroupingRepository {
    async fn enabled_entries(&self, market_category: &str) -> Result<Vec<SourcePriorityEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<DataSourceGroupingDB> = dsl::datasource_groupings
            .filter(dsl::market_category_id.eq(market_category))
            .filter(dsl::enabled.eq(true))
            .order((dsl::priority.desc(), dsl::id.asc()))
            .select(DataSourceGroupingDB::as_select())
            .load(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(SourcePriorityEntry::from).collect())
    }
}
