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

use crate::learning::store::{
    Difficulty, LearningModule, LearningProgress, NewLearningModule, NewLearningProgress,
};
use crate::rest_api::resources::utc;
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningModuleSlice {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub lesson_count: Option<i32>,
    pub difficulty: Difficulty,
}

impl From<LearningModule> for LearningModuleSlice {
    fn from(module: LearningModule) -> Self {
        Self {
            id: module.id,
            title: module.title,
            description: module.description,
            duration_minutes: module.duration_minutes,
            lesson_count: module.lesson_count,
            difficulty: module.difficulty,
        }
    }
}

impl FromJson for NewLearningModule {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let module = NewLearningModule {
            title: validator.required_non_empty("title"),
            description: validator.optional_string("description"),
            duration_minutes: validator.optional_i32("durationMinutes"),
            lesson_count: validator.optional_i32("lessonCount"),
            difficulty: validator.optional_enum("difficulty"),
        };
        validator.finish()?;
        Ok(module)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgressSlice {
    pub id: i64,
    pub user_id: i64,
    pub module_id: i64,
    pub progress: i32,
    pub completed: bool,
    pub last_accessed_at: DateTime<Utc>,
}

impl From<LearningProgress> for LearningProgressSlice {
    fn from(progress: LearningProgress) -> Self {
        Self {
            id: progress.id,
            user_id: progress.user_id,
            module_id: progress.module_id,
            progress: progress.progress,
            completed: progress.completed,
            last_accessed_at: utc(progress.last_accessed_at),
        }
    }
}

impl FromJson for NewLearningProgress {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let progress = NewLearningProgress {
            user_id: validator.required_integer("userId"),
            module_id: validator.required_integer("moduleId"),
            progress: validator.optional_in_range("progress", 0, 100),
            completed: validator.optional_bool("completed"),
        };
        validator.finish()?;
        Ok(progress)
    }
}

/// Body of a progress upsert; both fields are required.
#[derive(Debug, PartialEq)]
pub struct ProgressUpdate {
    pub progress: i32,
    pub completed: bool,
}

impl FromJson for ProgressUpdate {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let update = ProgressUpdate {
            progress: validator.required_in_range("progress", 0, 100),
            completed: validator.required_bool("completed"),
        };
        validator.finish()?;
        Ok(update)
    }
}
