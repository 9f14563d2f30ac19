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

use diesel::{dsl::insert_into, prelude::*};

use super::LearningStoreOperations;
use crate::learning::store::diesel::{
    models::{LearningModuleModel, NewLearningModuleModel},
    schema::learning_modules,
};
use crate::learning::store::{LearningModule, LearningStoreError};

pub(in crate::learning::store::diesel) trait LearningStoreAddModuleOperation {
    fn add_module(
        &self,
        module: NewLearningModuleModel,
    ) -> Result<LearningModule, LearningStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> LearningStoreAddModuleOperation
    for LearningStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_module(
        &self,
        module: NewLearningModuleModel,
    ) -> Result<LearningModule, LearningStoreError> {
        let model = insert_into(learning_modules::table)
            .values(&module)
            .get_result::<LearningModuleModel>(self.conn)?;

        LearningModule::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> LearningStoreAddModuleOperation
    for LearningStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_module(
        &self,
        module: NewLearningModuleModel,
    ) -> Result<LearningModule, LearningStoreError> {
        self.conn.transaction::<_, LearningStoreError, _>(|| {
            insert_into(learning_modules::table)
                .values(&module)
                .execute(self.conn)?;

            let model = learning_modules::table
                .order(learning_modules::id.desc())
                .first::<LearningModuleModel>(self.conn)?;

            LearningModule::try_from(model)
        })
    }
}
