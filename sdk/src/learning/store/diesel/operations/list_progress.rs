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

use diesel::prelude::*;

use super::LearningStoreOperations;
use crate::learning::store::diesel::{
    models::LearningProgressModel, schema::user_learning_progress,
};
use crate::learning::store::{LearningProgress, LearningStoreError};

pub(in crate::learning::store::diesel) trait LearningStoreListProgressOperation {
    fn list_progress(&self, user_id: i64) -> Result<Vec<LearningProgress>, LearningStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreListProgressOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_progress(&self, user_id: i64) -> Result<Vec<LearningProgress>, LearningStoreError> {
        Ok(user_learning_progress::table
            .filter(user_learning_progress::user_id.eq(user_id))
            .order(user_learning_progress::id.asc())
            .load::<LearningProgressModel>(self.conn)?
            .into_iter()
            .map(LearningProgress::from)
            .collect())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreListProgressOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_progress(&self, user_id: i64) -> Result<Vec<LearningProgress>, LearningStoreError> {
        Ok(user_learning_progress::table
            .filter(user_learning_progress::user_id.eq(user_id))
            .order(user_learning_progress::id.asc())
            .load::<LearningProgressModel>(self.conn)?
            .into_iter()
            .map(LearningProgress::from)
            .collect())
    }
}
