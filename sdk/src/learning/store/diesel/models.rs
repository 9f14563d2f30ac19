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

use super::schema::{learning_modules, user_learning_progress};
use crate::error::InternalError;
use crate::learning::store::{
    LearningModule, LearningProgress, LearningStoreError, NewLearningModule, NewLearningProgress,
};
use crate::store::current_timestamp;

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "learning_modules"]
pub struct NewLearningModuleModel {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub lesson_count: Option<i32>,
    pub difficulty: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct LearningModuleModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub lesson_count: Option<i32>,
    pub difficulty: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "user_learning_progress"]
pub struct NewLearningProgressModel {
    pub user_id: i64,
    pub module_id: i64,
    pub progress: i32,
    pub completed: bool,
    pub last_accessed_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct LearningProgressModel {
    pub id: i64,
    pub user_id: i64,
    pub module_id: i64,
    pub progress: i32,
    pub completed: bool,
    pub last_accessed_at: NaiveDateTime,
}

impl From<NewLearningModule> for NewLearningModuleModel {
    fn from(module: NewLearningModule) -> Self {
        Self {
            title: module.title,
            description: module.description,
            duration_minutes: module.duration_minutes,
            lesson_count: module.lesson_count,
            difficulty: module.difficulty.unwrap_or_default().to_string(),
        }
    }
}

impl TryFrom<LearningModuleModel> for LearningModule {
    type Error = LearningStoreError;

    fn try_from(model: LearningModuleModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            duration_minutes: model.duration_minutes,
            lesson_count: model.lesson_count,
            difficulty: model.difficulty.parse().map_err(|err| {
                LearningStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
        })
    }
}

impl From<NewLearningProgress> for NewLearningProgressModel {
    fn from(progress: NewLearningProgress) -> Self {
        Self {
            user_id: progress.user_id,
            module_id: progress.module_id,
            progress: progress.progress.unwrap_or(0),
            completed: progress.completed.unwrap_or(false),
            last_accessed_at: current_timestamp(),
        }
    }
}

impl From<LearningProgressModel> for LearningProgress {
    fn from(model: LearningProgressModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            module_id: model.module_id,
            progress: model.progress,
            completed: model.completed,
            last_accessed_at: model.last_accessed_at,
        }
    }
}
