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

pub(in crate::learning::store::diesel) trait LearningStoreFetchProgressOperation {
    fn fetch_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreFetchProgressOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        Ok(user_learning_progress::table
            .filter(user_learning_progress::user_id.eq(user_id))
            .filter(user_learning_progress::module_id.eq(module_id))
            .first::<LearningProgressModel>(self.conn)
            .optional()?
            .map(LearningProgress::from))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreFetchProgressOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        Ok(user_learning_progress::table
            .filter(user_learning_progress::user_id.eq(user_id))
            .filter(user_learning_progress::module_id.eq(module_id))
            .first::<LearningProgressModel>(self.conn)
            .optional()?
            .map(LearningProgress::from))
    }
}
