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

use std::convert::TryFrom;

use diesel::prelude::*;

use super::LearningStoreOperations;
use crate::learning::store::diesel::{models::LearningModuleModel, schema::learning_modules};
use crate::learning::store::{LearningModule, LearningStoreError};

pub(in crate::learning::store::diesel) trait LearningStoreFetchModuleOperation {
    fn fetch_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreFetchModuleOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        learning_modules::table
            .find(id)
            .first::<LearningModuleModel>(self.conn)
            .optional()?
            .map(LearningModule::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreFetchModuleOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        learning_modules::table
            .find(id)
            .first::<LearningModuleModel>(self.conn)
            .optional()?
            .map(LearningModule::try_from)
            .transpose()
    }
}
