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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;
pub mod memory;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::InvalidArgumentError;

pub use error::TaskStoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(InvalidArgumentError::new(
                "priority".to_string(),
                format!("unknown task priority '{}'", s),
            )),
        }
    }
}

/// A unit of farm work. `completed_date` is set exactly when `completed` is true.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDateTime>,
    pub completed_date: Option<NaiveDateTime>,
    pub completed: bool,
    pub priority: TaskPriority,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDateTime>,
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    pub(crate) fn into_task(self, id: i64) -> Task {
        Task {
            id,
            user_id: self.user_id,
            farm_id: self.farm_id,
            crop_id: self.crop_id,
            title: self.title,
            description: self.description,
            scheduled_date: self.scheduled_date,
            completed_date: None,
            completed: false,
            priority: self.priority.unwrap_or_default(),
        }
    }
}

pub trait TaskStore: Send + Sync {
    fn get_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError>;

    fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, TaskStoreError>;

    fn list_tasks_by_farm(&self, farm_id: i64) -> Result<Vec<Task>, TaskStoreError>;

    fn list_tasks_by_crop(&self, crop_id: i64) -> Result<Vec<Task>, TaskStoreError>;

    fn create_task(&self, task: NewTask) -> Result<Task, TaskStoreError>;

    /// Marks a task complete or incomplete. Completing stamps `completed_date` with the current
    /// time; reopening clears it.
    fn update_task_completion(&self, id: i64, completed: bool) -> Result<Task, TaskStoreError>;
}

impl<TS> TaskStore for Box<TS>
where
    TS: TaskStore + ?Sized,
{
    fn get_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        (**self).get_task(id)
    }

    fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        (**self).list_tasks_by_user(user_id)
    }

    fn list_tasks_by_farm(&self, farm_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        (**self).list_tasks_by_farm(farm_id)
    }

    fn list_tasks_by_crop(&self, crop_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        (**self).list_tasks_by_crop(crop_id)
    }

    fn create_task(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        (**self).create_task(task)
    }

    fn update_task_completion(&self, id: i64, completed: bool) -> Result<Task, TaskStoreError> {
        (**self).update_task_completion(id, completed)
    }
}
