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

use chrono::NaiveDateTime;

use super::schema::tasks;
use crate::error::InternalError;
use crate::tasks::store::{NewTask, Task, TaskStoreError};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "tasks"]
pub struct NewTaskModel {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDateTime>,
    pub completed_date: Option<NaiveDateTime>,
    pub completed: bool,
    pub priority: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct TaskModel {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDateTime>,
    pub completed_date: Option<NaiveDateTime>,
    pub completed: bool,
    pub priority: String,
}

impl From<NewTask> for NewTaskModel {
    fn from(task: NewTask) -> Self {
        Self {
            user_id: task.user_id,
            farm_id: task.farm_id,
            crop_id: task.crop_id,
            title: task.title,
            description: task.description,
            scheduled_date: task.scheduled_date,
            completed_date: None,
            completed: false,
            priority: task.priority.unwrap_or_default().to_string(),
        }
    }
}

impl TryFrom<TaskModel> for Task {
    type Error = TaskStoreError;

    fn try_from(model: TaskModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            farm_id: model.farm_id,
            crop_id: model.crop_id,
            title: model.title,
            description: model.description,
            scheduled_date: model.scheduled_date,
            completed_date: model.completed_date,
            completed: model.completed,
            priority: model.priority.parse().map_err(|err| {
                TaskStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
        })
    }
}
