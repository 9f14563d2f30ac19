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
use diesel::{dsl::update, prelude::*};

use super::TaskStoreOperations;
use crate::tasks::store::diesel::{models::TaskModel, schema::tasks};
use crate::tasks::store::{Task, TaskStoreError};

pub(in crate::tasks::store::diesel) trait TaskStoreUpdateTaskCompletionOperation {
    fn update_task_completion(
        &self,
        id: i64,
        completed: bool,
        completed_date: Option<NaiveDateTime>,
    ) -> Result<Task, TaskStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TaskStoreUpdateTaskCompletionOperation
    for TaskStoreOperations<'a, diesel::pg::PgConnection>
{
    fn update_task_completion(
        &self,
        id: i64,
        completed: bool,
        completed_date: Option<NaiveDateTime>,
    ) -> Result<Task, TaskStoreError> {
        let model = update(tasks::table.find(id))
            .set((
                tasks::completed.eq(completed),
                tasks::completed_date.eq(completed_date),
            ))
            .get_result::<TaskModel>(self.conn)
            .optional()?
            .ok_or_else(|| TaskStoreError::NotFoundError(format!("task {}", id)))?;

        Task::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TaskStoreUpdateTaskCompletionOperation
    for TaskStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn update_task_completion(
        &self,
        id: i64,
        completed: bool,
        completed_date: Option<NaiveDateTime>,
    ) -> Result<Task, TaskStoreError> {
        self.conn.transaction::<_, TaskStoreError, _>(|| {
            let updated = update(tasks::table.find(id))
                .set((
                    tasks::completed.eq(completed),
                    tasks::completed_date.eq(completed_date),
                ))
                .execute(self.conn)?;

            if updated == 0 {
                return Err(TaskStoreError::NotFoundError(format!("task {}", id)));
            }

            let model = tasks::table.find(id).first::<TaskModel>(self.conn)?;

            Task::try_from(model)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;

    use crate::migrations::run_sqlite_migrations;
    use crate::tasks::store::diesel::models::NewTaskModel;
    use crate::tasks::store::diesel::operations::add_task::TaskStoreAddTaskOperation;
    use crate::tasks::store::diesel::operations::list_tasks::{
        TaskFilter, TaskStoreListTasksOperation,
    };
    use crate::tasks::store::TaskPriority;

    fn new_task(crop_id: Option<i64>, title: &str) -> NewTaskModel {
        NewTaskModel {
            user_id: 1,
            farm_id: Some(1),
            crop_id,
            title: title.to_string(),
            description: None,
            scheduled_date: None,
            completed_date: None,
            completed: false,
            priority: "high".to_string(),
        }
    }

    #[test]
    fn test_update_task_completion() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = TaskStoreOperations::new(&conn);
        let task = ops.add_task(new_task(Some(3), "Irrigate rice field"))?;
        assert_eq!(task.priority, TaskPriority::High);

        let done_at = NaiveDate::from_ymd(2024, 7, 14).and_hms(17, 45, 0);
        let done = ops.update_task_completion(task.id, true, Some(done_at))?;
        assert!(done.completed);
        assert_eq!(done.completed_date, Some(done_at));

        let reopened = ops.update_task_completion(task.id, false, None)?;
        assert!(!reopened.completed);
        assert_eq!(reopened.completed_date, None);

        match ops.update_task_completion(12, true, Some(done_at)) {
            Err(TaskStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }

        Ok(())
    }

    #[test]
    fn test_list_tasks_by_crop() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = TaskStoreOperations::new(&conn);
        ops.add_task(new_task(Some(1), "Weed"))?;
        ops.add_task(new_task(None, "Repair fence"))?;
        ops.add_task(new_task(Some(1), "Spray neem oil"))?;

        let titles = ops
            .list_tasks(TaskFilter::Crop(1))?
            .into_iter()
            .map(|task| task.title)
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Weed".to_string(), "Spray neem oil".to_string()]);
        assert_eq!(ops.list_tasks(TaskFilter::Farm(1))?.len(), 3);

        Ok(())
    }
}
