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

pub mod models;
mod operations;
pub(crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{NewTask, Task, TaskStore, TaskStoreError};
use crate::store::current_timestamp;
use operations::add_task::TaskStoreAddTaskOperation as _;
use operations::fetch_task::TaskStoreFetchTaskOperation as _;
use operations::list_tasks::{TaskFilter, TaskStoreListTasksOperation as _};
use operations::update_task_completion::TaskStoreUpdateTaskCompletionOperation as _;
use operations::TaskStoreOperations;

/// A `TaskStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselTaskStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselTaskStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselTaskStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl TaskStore for DieselTaskStore<diesel::pg::PgConnection> {
    fn get_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?).fetch_task(id)
    }

    fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::User(user_id))
    }

    fn list_tasks_by_farm(&self, farm_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::Farm(farm_id))
    }

    fn list_tasks_by_crop(&self, crop_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::Crop(crop_id))
    }

    fn create_task(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?).add_task(task.into())
    }

    fn update_task_completion(&self, id: i64, completed: bool) -> Result<Task, TaskStoreError> {
        let completed_date = if completed {
            Some(current_timestamp())
        } else {
            None
        };
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .update_task_completion(id, completed, completed_date)
    }
}

#[cfg(feature = "sqlite")]
impl TaskStore for DieselTaskStore<diesel::sqlite::SqliteConnection> {
    fn get_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?).fetch_task(id)
    }

    fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::User(user_id))
    }

    fn list_tasks_by_farm(&self, farm_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::Farm(farm_id))
    }

    fn list_tasks_by_crop(&self, crop_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .list_tasks(TaskFilter::Crop(crop_id))
    }

    fn create_task(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        TaskStoreOperations::new(&*self.connection_pool.get()?).add_task(task.into())
    }

    fn update_task_completion(&self, id: i64, completed: bool) -> Result<Task, TaskStoreError> {
        let completed_date = if completed {
            Some(current_timestamp())
        } else {
            None
        };
        TaskStoreOperations::new(&*self.connection_pool.get()?)
            .update_task_completion(id, completed, completed_date)
    }
}
