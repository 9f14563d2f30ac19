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

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::rest_api::resources::utc;
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};
use crate::tasks::store::{NewTask, Task, TaskPriority};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSlice {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub priority: TaskPriority,
}

impl From<Task> for TaskSlice {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            farm_id: task.farm_id,
            crop_id: task.crop_id,
            title: task.title,
            description: task.description,
            scheduled_date: task.scheduled_date.map(utc),
            completed_date: task.completed_date.map(utc),
            completed: task.completed,
            priority: task.priority,
        }
    }
}

impl FromJson for NewTask {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let task = NewTask {
            user_id: validator.required_integer("userId"),
            farm_id: validator.optional_integer("farmId"),
            crop_id: validator.optional_integer("cropId"),
            title: validator.required_non_empty("title"),
            description: validator.optional_string("description"),
            scheduled_date: validator.optional_timestamp("scheduledDate"),
            priority: validator.optional_enum("priority"),
        };
        validator.finish()?;
        Ok(task)
    }
}

#[derive(Debug, PartialEq)]
pub struct TaskCompletionUpdate {
    pub completed: bool,
}

impl FromJson for TaskCompletionUpdate {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let update = TaskCompletionUpdate {
            completed: validator.required_bool("completed"),
        };
        validator.finish()?;
        Ok(update)
    }
}
