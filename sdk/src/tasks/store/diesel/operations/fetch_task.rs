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

use super::TaskStoreOperations;
use crate::tasks::store::diesel::{models::TaskModel, schema::tasks};
use crate::tasks::store::{Task, TaskStoreError};

pub(in crate::tasks::store::diesel) trait TaskStoreFetchTaskOperation {
    fn fetch_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TaskStoreFetchTaskOperation
    for TaskStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        tasks::table
            .find(id)
            .first::<TaskModel>(self.conn)
            .optional()?
            .map(Task::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TaskStoreFetchTaskOperation
    for TaskStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        tasks::table
            .find(id)
            .first::<TaskModel>(self.conn)
            .optional()?
            .map(Task::try_from)
            .transpose()
    }
}
