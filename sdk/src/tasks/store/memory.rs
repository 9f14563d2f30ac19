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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;
use crate::store::current_timestamp;

use super::{NewTask, Task, TaskStore, TaskStoreError};

#[derive(Default)]
struct TaskTable {
    last_id: i64,
    tasks: BTreeMap<i64, Task>,
}

#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    inner: Arc<Mutex<TaskTable>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_where<F>(&self, predicate: F) -> Result<Vec<Task>, TaskStoreError>
    where
        F: Fn(&Task) -> bool,
    {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect())
    }
}

fn poisoned() -> TaskStoreError {
    TaskStoreError::InternalError(InternalError::with_message(
        "Cannot access tasks: mutex lock poisoned".to_string(),
    ))
}

impl TaskStore for MemoryTaskStore {
    fn get_task(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.tasks.get(&id).cloned())
    }

    fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        self.list_where(|task| task.user_id == user_id)
    }

    fn list_tasks_by_farm(&self, farm_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        self.list_where(|task| task.farm_id == Some(farm_id))
    }

    fn list_tasks_by_crop(&self, crop_id: i64) -> Result<Vec<Task>, TaskStoreError> {
        self.list_where(|task| task.crop_id == Some(crop_id))
    }

    fn create_task(&self, task: NewTask) -> Result<Task, TaskStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_id += 1;
        let task = task.into_task(inner.last_id);
        inner.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    fn update_task_completion(&self, id: i64, completed: bool) -> Result<Task, TaskStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| TaskStoreError::NotFoundError(format!("task {}", id)))?;

        task.completed = completed;
        task.completed_date = if completed {
            Some(current_timestamp())
        } else {
            None
        };

        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tasks::store::TaskPriority;

    #[test]
    fn test_completion_toggles_completed_date() {
        let store = MemoryTaskStore::new();
        let task = store
            .create_task(NewTask {
                user_id: 1,
                farm_id: Some(1),
                crop_id: Some(2),
                title: "Apply fertilizer".to_string(),
                description: None,
                scheduled_date: None,
                priority: None,
            })
            .expect("Failed to create task");

        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);

        let done = store
            .update_task_completion(task.id, true)
            .expect("Failed to complete task");
        assert!(done.completed);
        assert!(done.completed_date.is_some());

        let reopened = store
            .update_task_completion(task.id, false)
            .expect("Failed to reopen task");
        assert!(!reopened.completed);
        assert_eq!(reopened.completed_date, None);

        match store.update_task_completion(7, true) {
            Err(TaskStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }
}
