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

use diesel::{dsl::insert_into, prelude::*};

use super::LearningStoreOperations;
use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::learning::store::diesel::{
    models::{LearningProgressModel, NewLearningProgressModel},
    schema::user_learning_progress,
};
use crate::learning::store::{LearningProgress, LearningStoreError};

pub(in crate::learning::store::diesel) trait LearningStoreAddProgressOperation {
    fn add_progress(
        &self,
        progress: NewLearningProgressModel,
    ) -> Result<LearningProgress, LearningStoreError>;
}

fn progress_exists(progress: &NewLearningProgressModel) -> LearningStoreError {
    LearningStoreError::ConstraintViolationError(
        ConstraintViolationError::with_violation_type_and_message(
            ConstraintViolationType::Unique,
            format!(
                "User {} already has progress on module {}",
                progress.user_id, progress.module_id
            ),
        ),
    )
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreAddProgressOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_progress(
        &self,
        progress: NewLearningProgressModel,
    ) -> Result<LearningProgress, LearningStoreError> {
        self.conn.transaction::<_, LearningStoreError, _>(|| {
            let existing = user_learning_progress::table
                .filter(user_learning_progress::user_id.eq(progress.user_id))
                .filter(user_learning_progress::module_id.eq(progress.module_id))
                .select(user_learning_progress::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(progress_exists(&progress));
            }

            insert_into(user_learning_progress::table)
                .values(&progress)
                .get_result::<LearningProgressModel>(self.conn)
                .map(LearningProgress::from)
                .map_err(LearningStoreError::from)
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreAddProgressOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_progress(
        &self,
        progress: NewLearningProgressModel,
    ) -> Result<LearningProgress, LearningStoreError> {
        self.conn.transaction::<_, LearningStoreError, _>(|| {
            let existing = user_learning_progress::table
                .filter(user_learning_progress::user_id.eq(progress.user_id))
                .filter(user_learning_progress::module_id.eq(progress.module_id))
                .select(user_learning_progress::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(progress_exists(&progress));
            }

            insert_into(user_learning_progress::table)
                .values(&progress)
                .execute(self.conn)?;

            user_learning_progress::table
                .order(user_learning_progress::id.desc())
                .first::<LearningProgressModel>(self.conn)
                .map(LearningProgress::from)
                .map_err(LearningStoreError::from)
        })
    }
}
