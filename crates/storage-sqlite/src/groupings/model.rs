//! Database models for source-priority groupings.

use diesel::prelude::*;

use unistock_core::stocks::SourcePriorityEntry;

/// Database model for one data source within a market category
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::datasource_groupings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DataSourceGroupingDB {
    pub id: i32,
    pub market_category_id: String,
    pub data_source_name: String,
    pub priority: i32,
    pub enabled: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::datasource_groupings)]
pub struct NewDataSourceGroupingDB {
    pub market_category_id: String,
    pub data_source_name: String,
    pub priority: i32,
    pub enabled: bool,
}

impl From<DataSourceGroupingDB> for SourcePriorityEntry {
    fn from(db: DataSourceGroupingDB) -> Self {
        SourcePriorityEntry::new(
            db.market_category_id,
            db.data_source_name,
            db.priority,
            db.enabled,
        )
    }
}

impl From<&SourcePriorityEntry> for NewDataSourceGroupingDB {
    fn from(entry: &SourcePriorityEntry) -> Self {
        Self {
            market_category_id: entry.market_category_id.clone(),
            data_source_name: entry.data_source_name.clone(),
            priority: entry.priority,
            enabled: entry.enabled,
        }
    }
}
