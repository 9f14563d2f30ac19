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

pub(in crate::tasks::store::diesel) enum TaskFilter {
    User(i64),
    Farm(i64),
    Crop(i64),
}

pub(in crate::tasks::store::diesel) trait TaskStoreListTasksOperation {
    fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TaskStoreListTasksOperation
    for TaskStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskStoreError> {
        let mut query = tasks::table.into_boxed().order(tasks::id.asc());

        query = match filter {
            TaskFilter::User(user_id) => query.filter(tasks::user_id.eq(user_id)),
            TaskFilter::Farm(farm_id) => query.filter(tasks::farm_id.eq(farm_id)),
            TaskFilter::Crop(crop_id) => query.filter(tasks::crop_id.eq(crop_id)),
        };

        query
            .load::<TaskModel>(self.conn)?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TaskStoreListTasksOperation
    for TaskStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskStoreError> {
        let mut query = tasks::table.into_boxed().order(tasks::id.asc());

        query = match filter {
            TaskFilter::User(user_id) => query.filter(tasks::user_id.eq(user_id)),
            TaskFilter::Farm(farm_id) => query.filter(tasks::farm_id.eq(farm_id)),
            TaskFilter::Crop(crop_id) => query.filter(tasks::crop_id.eq(crop_id)),
        };

        query
            .load::<TaskModel>(self.conn)?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }
}
