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
use crate::store::current_timestamp;

pub use error::LearningStoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Beginner
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(InvalidArgumentError::new(
                "difficulty".to_string(),
                format!("unknown difficulty '{}'", s),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningModule {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub lesson_count: Option<i32>,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLearningModule {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub lesson_count: Option<i32>,
    pub difficulty: Option<Difficulty>,
}

impl NewLearningModule {
    pub(crate) fn into_module(self, id: i64) -> LearningModule {
        LearningModule {
            id,
            title: self.title,
            description: self.description,
            duration_minutes: self.duration_minutes,
            lesson_count: self.lesson_count,
            difficulty: self.difficulty.unwrap_or_default(),
        }
    }
}

/// How far a user has come through one module. There is at most one record per
/// `(user_id, module_id)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct LearningProgress {
    pub id: i64,
    pub user_id: i64,
    pub module_id: i64,
    /// Percentage, 0 to 100.
    pub progress: i32,
    pub completed: bool,
    pub last_accessed_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLearningProgress {
    pub user_id: i64,
    pub module_id: i64,
    pub progress: Option<i32>,
    pub completed: Option<bool>,
}

impl NewLearningProgress {
    pub(crate) fn into_progress(self, id: i64) -> LearningProgress {
        LearningProgress {
            id,
            user_id: self.user_id,
            module_id: self.module_id,
            progress: self.progress.unwrap_or(0),
            completed: self.completed.unwrap_or(false),
            last_accessed_at: current_timestamp(),
        }
    }
}

pub trait LearningStore: Send + Sync {
    fn get_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError>;

    fn list_modules(&self) -> Result<Vec<LearningModule>, LearningStoreError>;

    fn create_module(
        &self,
        module: NewLearningModule,
    ) -> Result<LearningModule, LearningStoreError>;

    fn get_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError>;

    fn list_progress_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LearningProgress>, LearningStoreError>;

    /// Records a user's first progress on a module.
    ///
    /// Returns a `ConstraintViolationError` when the user already has progress on the module.
    fn create_progress(
        &self,
        progress: NewLearningProgress,
    ) -> Result<LearningProgress, LearningStoreError>;

    /// Sets a user's progress on a module, creating the record if it does not exist yet.
    /// `last_accessed_at` is refreshed either way.
    fn update_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
    ) -> Result<LearningProgress, LearningStoreError>;
}

impl<LS> LearningStore for Box<LS>
where
    LS: LearningStore + ?Sized,
{
    fn get_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        (**self).get_module(id)
    }

    fn list_modules(&self) -> Result<Vec<LearningModule>, LearningStoreError> {
        (**self).list_modules()
    }

    fn create_module(
        &self,
        module: NewLearningModule,
    ) -> Result<LearningModule, LearningStoreError> {
        (**self).create_module(module)
    }

    fn get_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        (**self).get_progress(user_id, module_id)
    }

    fn list_progress_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LearningProgress>, LearningStoreError> {
        (**self).list_progress_by_user(user_id)
    }

    fn create_progress(
        &self,
        progress: NewLearningProgress,
    ) -> Result<LearningProgress, LearningStoreError> {
        (**self).create_progress(progress)
    }

    fn update_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
    ) -> Result<LearningProgress, LearningStoreError> {
        (**self).update_progress(user_id, module_id, progress, completed)
    }
}
