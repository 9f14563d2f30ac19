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

use serde_json::Value;

use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;
use crate::tasks::store::{NewTask, TaskStore, TaskStoreError};

use super::payloads::{TaskCompletionUpdate, TaskSlice};

fn store_error(err: TaskStoreError) -> ErrorResponse {
    match err {
        TaskStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        TaskStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        TaskStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        TaskStoreError::NotFoundError(_) => ErrorResponse::new(404, "Task not found"),
    }
}

pub fn list_tasks_by_user<'a>(
    store: Box<dyn TaskStore + 'a>,
    user_id: &str,
) -> Result<Vec<TaskSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_tasks_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(TaskSlice::from)
        .collect())
}

pub fn create_task<'a>(
    store: Box<dyn TaskStore + 'a>,
    body: &Value,
) -> Result<TaskSlice, ErrorResponse> {
    let new_task = NewTask::from_json(body)?;
    store
        .create_task(new_task)
        .map(TaskSlice::from)
        .map_err(store_error)
}

/// Marks a task done, stamping the completion date, or reopens it, clearing the date.
pub fn update_task_completion<'a>(
    store: Box<dyn TaskStore + 'a>,
    id: &str,
    body: &Value,
) -> Result<TaskSlice, ErrorResponse> {
    let id = parse_id(id, "task")?;
    let update = TaskCompletionUpdate::from_json(body)?;
    store
        .update_task_completion(id, update.completed)
        .map(TaskSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::tasks::store::memory::MemoryTaskStore;
    use crate::tasks::store::TaskPriority;

    #[test]
    fn test_task_completion() {
        let store = MemoryTaskStore::new();
        let task = create_task(
            Box::new(store.clone()),
            &json!({ "userId": 1, "title": "Irrigate wheat", "priority": "high" }),
        )
        .expect("Failed to create task");
        assert_eq!(task.priority, TaskPriority::High);
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);

        let id = task.id.to_string();
        let done = update_task_completion(
            Box::new(store.clone()),
            &id,
            &json!({ "completed": true }),
        )
        .expect("Failed to complete task");
        assert!(done.completed);
        assert!(done.completed_date.is_some());

        let reopened =
            update_task_completion(Box::new(store.clone()), &id, &json!({ "completed": false }))
                .expect("Failed to reopen task");
        assert!(!reopened.completed);
        assert_eq!(reopened.completed_date, None);

        let err = update_task_completion(Box::new(store.clone()), &id, &json!({})).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let tasks = list_tasks_by_user(Box::new(store), "1").expect("Failed to list tasks");
        assert_eq!(tasks, vec![reopened]);
    }
}
