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

//! Database schema management for the relational backends.
//!
//! The schema is embedded in the library at build time, one migration set per database type.

mod diesel;
mod error;

#[cfg(feature = "postgres")]
pub use self::diesel::postgres::{
    clear_database as clear_postgres_database, run_migrations as run_postgres_migrations,
};
#[cfg(feature = "sqlite")]
pub use self::diesel::sqlite::{
    clear_database as clear_sqlite_database, run_migrations as run_sqlite_migrations,
};
pub use error::MigrationsError;
