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

use chrono::NaiveDateTime;
use diesel::{
    dsl::{insert_into, update},
    prelude::*,
};

use super::LearningStoreOperations;
use crate::learning::store::diesel::{
    models::{LearningProgressModel, NewLearningProgressModel},
    schema::user_learning_progress,
};
use crate::learning::store::{LearningProgress, LearningStoreError};

pub(in crate::learning::store::diesel) trait LearningStoreUpsertProgressOperation {
    fn upsert_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
        accessed_at: NaiveDateTime,
    ) -> Result<LearningProgress, LearningStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreUpsertProgressOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn upsert_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
        accessed_at: NaiveDateTime,
    ) -> Result<LearningProgress, LearningStoreError> {
        self.conn.transaction::<_, LearningStoreError, _>(|| {
            let existing = user_learning_progress::table
                .filter(user_learning_progress::user_id.eq(user_id))
                .filter(user_learning_progress::module_id.eq(module_id))
                .select(user_learning_progress::id)
                .first::<i64>(self.conn)
                .optional()?;

            let model = match existing {
                Some(id) => update(user_learning_progress::table.find(id))
                    .set((
                        user_learning_progress::progress.eq(progress),
                        user_learning_progress::completed.eq(completed),
                        user_learning_progress::last_accessed_at.eq(accessed_at),
                    ))
                    .get_result::<LearningProgressModel>(self.conn)?,
                None => insert_into(user_learning_progress::table)
                    .values(&NewLearningProgressModel {
                        user_id,
                        module_id,
                        progress,
                        completed,
                        last_accessed_at: accessed_at,
                    })
                    .get_result::<LearningProgressModel>(self.conn)?,
            };

            Ok(LearningProgress::from(model))
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreUpsertProgressOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn upsert_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
        accessed_at: NaiveDateTime,
    ) -> Result<LearningProgress, LearningStoreError> {
        self.conn.transaction::<_, LearningStoreError, _>(|| {
            let existing = user_learning_progress::table
                .filter(user_learning_progress::user_id.eq(user_id))
                .filter(user_learning_progress::module_id.eq(module_id))
                .select(user_learning_progress::id)
                .first::<i64>(self.conn)
                .optional()?;

            let id = match existing {
                Some(id) => {
                    update(user_learning_progress::table.find(id))
                        .set((
                            user_learning_progress::progress.eq(progress),
                            user_learning_progress::completed.eq(completed),
                            user_learning_progress::last_accessed_at.eq(accessed_at),
                        ))
                        .execute(self.conn)?;
                    id
                }
                None => {
                    insert_into(user_learning_progress::table)
                        .values(&NewLearningProgressModel {
                            user_id,
                            module_id,
                            progress,
                            completed,
                            last_accessed_at: accessed_at,
                        })
                        .execute(self.conn)?;
                    user_learning_progress::table
                        .select(user_learning_progress::id)
                        .order(user_learning_progress::id.desc())
                        .first::<i64>(self.conn)?
                }
            };

            user_learning_progress::table
                .find(id)
                .first::<LearningProgressModel>(self.conn)
                .map(LearningProgress::from)
                .map_err(LearningStoreError::from)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;

    use crate::learning::store::diesel::operations::add_progress::LearningStoreAddProgressOperation;
    use crate::learning::store::diesel::operations::fetch_progress::LearningStoreFetchProgressOperation;
    use crate::migrations::run_sqlite_migrations;

    #[test]
    fn test_upsert_inserts_then_updates() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = LearningStoreOperations::new(&conn);
        let first_visit = NaiveDate::from_ymd(2024, 2, 1).and_hms(10, 0, 0);
        let created = ops.upsert_progress(1, 2, 25, false, first_visit)?;
        assert_eq!(created.id, 1);
        assert_eq!(created.progress, 25);
        assert_eq!(created.last_accessed_at, first_visit);

        let second_visit = NaiveDate::from_ymd(2024, 2, 3).and_hms(18, 20, 0);
        let updated = ops.upsert_progress(1, 2, 100, true, second_visit)?;
        assert_eq!(updated.id, created.id);
        assert!(updated.completed);
        assert_eq!(updated.last_accessed_at, second_visit);

        assert_eq!(ops.fetch_progress(1, 2)?, Some(updated));
        assert_eq!(ops.fetch_progress(2, 1)?, None);

        Ok(())
    }

    #[test]
    fn test_add_progress_rejects_duplicate_pair() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = LearningStoreOperations::new(&conn);
        let accessed_at = NaiveDate::from_ymd(2024, 2, 1).and_hms(10, 0, 0);
        let new_progress = || NewLearningProgressModel {
            user_id: 4,
            module_id: 1,
            progress: 0,
            completed: false,
            last_accessed_at: accessed_at,
        };

        ops.add_progress(new_progress())?;
        match ops.add_progress(new_progress()) {
            Err(LearningStoreError::ConstraintViolationError(_)) => (),
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        Ok(())
    }
}
