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

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};
use crate::store::current_timestamp;

use super::{
    LearningModule, LearningProgress, LearningStore, LearningStoreError, NewLearningModule,
    NewLearningProgress,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ProgressKey {
    user_id: i64,
    module_id: i64,
}

#[derive(Default)]
struct LearningTables {
    last_module_id: i64,
    modules: BTreeMap<i64, LearningModule>,
    last_progress_id: i64,
    progress: BTreeMap<ProgressKey, LearningProgress>,
}

#[derive(Clone, Default)]
pub struct MemoryLearningStore {
    inner: Arc<Mutex<LearningTables>>,
}

impl MemoryLearningStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> LearningStoreError {
    LearningStoreError::InternalError(InternalError::with_message(
        "Cannot access learning records: mutex lock poisoned".to_string(),
    ))
}

impl LearningStore for MemoryLearningStore {
    fn get_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.modules.get(&id).cloned())
    }

    fn list_modules(&self) -> Result<Vec<LearningModule>, LearningStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.modules.values().cloned().collect())
    }

    fn create_module(
        &self,
        module: NewLearningModule,
    ) -> Result<LearningModule, LearningStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_module_id += 1;
        let module = module.into_module(inner.last_module_id);
        inner.modules.insert(module.id, module.clone());

        Ok(module)
    }

    fn get_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .progress
            .get(&ProgressKey { user_id, module_id })
            .cloned())
    }

    fn list_progress_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LearningProgress>, LearningStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        let mut progress = inner
            .progress
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        progress.sort_by_key(|record| record.id);

        Ok(progress)
    }

    fn create_progress(
        &self,
        progress: NewLearningProgress,
    ) -> Result<LearningProgress, LearningStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let key = ProgressKey {
            user_id: progress.user_id,
            module_id: progress.module_id,
        };
        if inner.progress.contains_key(&key) {
            return Err(LearningStoreError::ConstraintViolationError(
                ConstraintViolationError::with_violation_type_and_message(
                    ConstraintViolationType::Unique,
                    format!(
                        "User {} already has progress on module {}",
                        key.user_id, key.module_id
                    ),
                ),
            ));
        }

        inner.last_progress_id += 1;
        let progress = progress.into_progress(inner.last_progress_id);
        inner.progress.insert(key, progress.clone());

        Ok(progress)
    }

    fn update_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
    ) -> Result<LearningProgress, LearningStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let key = ProgressKey { user_id, module_id };
        if let Some(record) = inner.progress.get_mut(&key) {
            record.progress = progress;
            record.completed = completed;
            record.last_accessed_at = current_timestamp();
            return Ok(record.clone());
        }

        inner.last_progress_id += 1;
        let record = NewLearningProgress {
            user_id,
            module_id,
            progress: Some(progress),
            completed: Some(completed),
        }
        .into_progress(inner.last_progress_id);
        inner.progress.insert(key, record.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_unique_per_user_and_module() {
        let store = MemoryLearningStore::new();

        let first = store
            .create_progress(NewLearningProgress {
                user_id: 1,
                module_id: 2,
                progress: None,
                completed: None,
            })
            .expect("Failed to create progress");
        assert_eq!(first.progress, 0);
        assert!(!first.completed);

        match store.create_progress(NewLearningProgress {
            user_id: 1,
            module_id: 2,
            progress: Some(10),
            completed: None,
        }) {
            Err(LearningStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::Unique)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        let updated = store
            .update_progress(1, 2, 100, true)
            .expect("Failed to update progress");
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.progress, 100);
        assert!(updated.completed);
    }

    #[test]
    fn test_update_progress_creates_missing_record() {
        let store = MemoryLearningStore::new();

        let created = store
            .update_progress(3, 1, 40, false)
            .expect("Failed to upsert progress");
        assert_eq!(created.id, 1);
        assert_eq!(created.progress, 40);

        // a module with a lower id is listed after, because it was recorded later
        store
            .update_progress(3, 0, 5, false)
            .expect("Failed to upsert progress");
        let modules = store
            .list_progress_by_user(3)
            .expect("Failed to list progress")
            .into_iter()
            .map(|record| record.module_id)
            .collect::<Vec<_>>();
        assert_eq!(modules, vec![1, 0]);
    }
}
