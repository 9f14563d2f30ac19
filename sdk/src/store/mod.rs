// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Access to the storage backends.
//!
//! Every entity family has its own store trait (`UserStore`, `FarmStore`, ...). A
//! `StoreFactory` hands out stores that all share one backend: either in-process memory, or a
//! PostgreSQL or SQLite database reached through a diesel connection pool.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(test)]
mod tests;

use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike, Utc};
#[cfg(feature = "diesel")]
use diesel::r2d2::{ConnectionManager, Pool};

use crate::crops::store::CropStore;
use crate::devices::store::DeviceStore;
use crate::error::InternalError;
use crate::farms::store::FarmStore;
use crate::learning::store::LearningStore;
use crate::marketplace::store::MarketplaceStore;
use crate::recommendations::store::RecommendationStore;
use crate::tasks::store::TaskStore;
use crate::users::store::UserStore;
use crate::weather::store::WeatherStore;

/// The current UTC time, truncated to whole microseconds.
///
/// Both databases store timestamps with microsecond precision, so values produced here read
/// back unchanged from every backend.
pub fn current_timestamp() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// An abstract factory for creating stores backed by the same storage
pub trait StoreFactory: Send + Sync {
    /// Get a new `UserStore`
    fn get_user_store<'a>(&'a self) -> Box<dyn UserStore + 'a>;
    /// Get a new `FarmStore`
    fn get_farm_store<'a>(&'a self) -> Box<dyn FarmStore + 'a>;
    /// Get a new `DeviceStore`
    fn get_device_store<'a>(&'a self) -> Box<dyn DeviceStore + 'a>;
    /// Get a new `CropStore`
    fn get_crop_store<'a>(&'a self) -> Box<dyn CropStore + 'a>;
    /// Get a new `TaskStore`
    fn get_task_store<'a>(&'a self) -> Box<dyn TaskStore + 'a>;
    /// Get a new `MarketplaceStore`
    fn get_marketplace_store<'a>(&'a self) -> Box<dyn MarketplaceStore + 'a>;
    /// Get a new `LearningStore`
    fn get_learning_store<'a>(&'a self) -> Box<dyn LearningStore + 'a>;
    /// Get a new `WeatherStore`
    fn get_weather_store<'a>(&'a self) -> Box<dyn WeatherStore + 'a>;
    /// Get a new `RecommendationStore`
    fn get_recommendation_store<'a>(&'a self) -> Box<dyn RecommendationStore + 'a>;
}

/// Creates a `StoreFactory` backed by the given connection
///
/// Database schemas are brought up to date before the factory is returned.
///
/// # Arguments
///
/// * `connection_uri` - The identifier of the storage connection that will be used by all stores
///   created by the resulting factory
pub fn create_store_factory(
    connection_uri: &ConnectionUri,
) -> Result<Box<dyn StoreFactory>, InternalError> {
    match connection_uri {
        ConnectionUri::Memory => Ok(Box::new(memory::MemoryStoreFactory::new())),
        #[cfg(feature = "postgres")]
        ConnectionUri::Postgres(url) => {
            let connection_manager = ConnectionManager::<diesel::pg::PgConnection>::new(url);
            let pool = Pool::builder().build(connection_manager).map_err(|err| {
                InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Failed to build connection pool".to_string(),
                )
            })?;
            let conn = pool.get().map_err(|err| {
                InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Failed to get a database connection".to_string(),
                )
            })?;
            crate::migrations::run_postgres_migrations(&conn).map_err(|err| {
                InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Failed to migrate the database".to_string(),
                )
            })?;
            Ok(Box::new(postgres::PgStoreFactory::new(pool)))
        }
        #[cfg(feature = "sqlite")]
        ConnectionUri::Sqlite(conn_str) => {
            let connection_manager =
                ConnectionManager::<diesel::sqlite::SqliteConnection>::new(conn_str);
            let mut pool_builder = Pool::builder();
            // Each connection to ":memory:" opens its own database, so the stores must all share
            // a single connection.
            if conn_str == ":memory:" {
                pool_builder = pool_builder
                    .max_size(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            }
            let pool = pool_builder.build(connection_manager).map_err(|err| {
                InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Failed to build connection pool".to_string(),
                )
            })?;
            {
                let conn = pool.get().map_err(|err| {
                    InternalError::from_source_with_prefix(
                        Box::new(err),
                        "Failed to get a database connection".to_string(),
                    )
                })?;
                crate::migrations::run_sqlite_migrations(&conn).map_err(|err| {
                    InternalError::from_source_with_prefix(
                        Box::new(err),
                        "Failed to migrate the database".to_string(),
                    )
                })?;
            }
            Ok(Box::new(sqlite::SqliteStoreFactory::new(pool)))
        }
    }
}

/// The possible connection types and identifiers for a `StoreFactory`
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionUri {
    Memory,
    #[cfg(feature = "postgres")]
    Postgres(String),
    #[cfg(feature = "sqlite")]
    Sqlite(String),
}

impl FromStr for ConnectionUri {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(ConnectionUri::Memory),
            #[cfg(feature = "postgres")]
            _ if s.starts_with("postgres://") || s.starts_with("postgresql://") => {
                Ok(ConnectionUri::Postgres(s.into()))
            }
            #[cfg(feature = "sqlite")]
            _ => Ok(ConnectionUri::Sqlite(s.into())),
            #[cfg(not(feature = "sqlite"))]
            _ => Err(InternalError::with_message(format!(
                "No compatible connection type: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod uri_tests {
    use super::*;

    #[test]
    fn test_parse_connection_uri() {
        assert_eq!(
            "memory".parse::<ConnectionUri>().expect("Failed to parse"),
            ConnectionUri::Memory
        );

        #[cfg(feature = "sqlite")]
        assert_eq!(
            ":memory:".parse::<ConnectionUri>().expect("Failed to parse"),
            ConnectionUri::Sqlite(":memory:".to_string())
        );

        #[cfg(feature = "postgres")]
        assert_eq!(
            "postgres://agro:agro@db:5432/agrosakhi"
                .parse::<ConnectionUri>()
                .expect("Failed to parse"),
            ConnectionUri::Postgres("postgres://agro:agro@db:5432/agrosakhi".to_string())
        );
    }

    #[test]
    fn test_current_timestamp_has_microsecond_precision() {
        assert_eq!(current_timestamp().nanosecond() % 1_000, 0);
    }
}
