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

use diesel::{sqlite, Connection, RunQueryDsl};

use crate::crops::store::diesel::schema::crops;
use crate::devices::store::diesel::schema::{devices, sensor_readings};
use crate::error::ResourceTemporarilyUnavailableError;
use crate::farms::store::diesel::schema::farms;
use crate::learning::store::diesel::schema::{learning_modules, user_learning_progress};
use crate::marketplace::store::diesel::schema::{blockchain_transactions, marketplace_listings};
use crate::migrations::error::MigrationsError;
use crate::recommendations::store::diesel::schema::crop_recommendations;
use crate::tasks::store::diesel::schema::tasks;
use crate::users::store::diesel::schema::users;
use crate::weather::store::diesel::schema::weather_forecasts;

embed_migrations!("./src/migrations/diesel/sqlite/migrations");

/// Runs any migrations not yet applied to the database.
pub fn run_migrations(conn: &sqlite::SqliteConnection) -> Result<(), MigrationsError> {
    embedded_migrations::run(conn).map_err(|err| {
        MigrationsError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    })?;

    info!("Successfully applied AgroSakhi migrations");

    Ok(())
}

/// Deletes every row from every table, leaving the schema in place.
pub fn clear_database(conn: &sqlite::SqliteConnection) -> Result<(), MigrationsError> {
    conn.transaction::<_, MigrationsError, _>(|| {
        diesel::delete(users::table).execute(conn)?;
        diesel::delete(farms::table).execute(conn)?;
        diesel::delete(devices::table).execute(conn)?;
        diesel::delete(sensor_readings::table).execute(conn)?;
        diesel::delete(crops::table).execute(conn)?;
        diesel::delete(tasks::table).execute(conn)?;
        diesel::delete(marketplace_listings::table).execute(conn)?;
        diesel::delete(blockchain_transactions::table).execute(conn)?;
        diesel::delete(learning_modules::table).execute(conn)?;
        diesel::delete(user_learning_progress::table).execute(conn)?;
        diesel::delete(weather_forecasts::table).execute(conn)?;
        diesel::delete(crop_recommendations::table).execute(conn)?;

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use diesel::sqlite::SqliteConnection;
    use diesel::QueryDsl;

    use crate::users::store::diesel::models::NewUserModel;

    #[test]
    fn test_clear_database_keeps_schema() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_migrations(&conn)?;
        // applying twice is a no-op
        run_migrations(&conn)?;

        diesel::insert_into(users::table)
            .values(&NewUserModel {
                username: "ravi".to_string(),
                password: "secret".to_string(),
                display_name: "Ravi".to_string(),
                location: None,
                preferred_language: "en".to_string(),
                role: "farmer".to_string(),
            })
            .execute(&conn)?;

        clear_database(&conn)?;

        assert_eq!(users::table.count().get_result::<i64>(&conn)?, 0);

        Ok(())
    }
}
