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

use super::TaskStoreOperations;
use crate::tasks::store::diesel::{
    models::{TaskModel, NewTaskModel},
    schema::tasks,
};
use crate::tasks::store::{Task, TaskStoreError};

pub(in crate::tasks::store::diesel) trait TaskStoreAddTaskOperation {
    fn add_task(&self, task: NewTaskModel) -> Result<Task, TaskStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TaskStoreAddTaskOperation
    for TaskStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_task(&self, task: NewTaskModel) -> Result<Task, TaskStoreError> {
        let model = insert_into(tasks::table)
            .values(&task)
            .get_result::<TaskModel>(self.conn)?;

        Task::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TaskStoreAddTaskOperation
    for TaskStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_task(&self, task: NewTaskModel) -> Result<Task, TaskStoreError> {
        self.conn.transaction::<_, TaskStoreError, _>(|| {
            insert_into(tasks::table)
                .values(&task)
                .execute(self.conn)?;

            let model = tasks::table
                .order(tasks::id.desc())
                .first::<TaskModel>(self.conn)?;

            Task::try_from(model)
        })
    }
}
