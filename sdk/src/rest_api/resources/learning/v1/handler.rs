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

use crate::learning::store::{
    LearningStore, LearningStoreError, NewLearningModule, NewLearningProgress,
};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::{LearningModuleSlice, LearningProgressSlice, ProgressUpdate};

fn store_error(err: LearningStoreError) -> ErrorResponse {
    match err {
        LearningStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        LearningStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        LearningStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        LearningStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

pub fn list_modules<'a>(
    store: Box<dyn LearningStore + 'a>,
) -> Result<Vec<LearningModuleSlice>, ErrorResponse> {
    Ok(store
        .list_modules()
        .map_err(store_error)?
        .into_iter()
        .map(LearningModuleSlice::from)
        .collect())
}

pub fn get_module<'a>(
    store: Box<dyn LearningStore + 'a>,
    id: &str,
) -> Result<LearningModuleSlice, ErrorResponse> {
    let id = parse_id(id, "module")?;
    store
        .get_module(id)
        .map_err(store_error)?
        .map(LearningModuleSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "Learning module not found"))
}

pub fn create_module<'a>(
    store: Box<dyn LearningStore + 'a>,
    body: &Value,
) -> Result<LearningModuleSlice, ErrorResponse> {
    let new_module = NewLearningModule::from_json(body)?;
    store
        .create_module(new_module)
        .map(LearningModuleSlice::from)
        .map_err(store_error)
}

pub fn list_progress_by_user<'a>(
    store: Box<dyn LearningStore + 'a>,
    user_id: &str,
) -> Result<Vec<LearningProgressSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_progress_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(LearningProgressSlice::from)
        .collect())
}

pub fn get_progress<'a>(
    store: Box<dyn LearningStore + 'a>,
    user_id: &str,
    module_id: &str,
) -> Result<LearningProgressSlice, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    let module_id = parse_id(module_id, "module")?;
    store
        .get_progress(user_id, module_id)
        .map_err(store_error)?
        .map(LearningProgressSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "Learning progress not found"))
}

/// Records a user's first progress on a module; a second record for the same pair is a 400.
pub fn create_progress<'a>(
    store: Box<dyn LearningStore + 'a>,
    body: &Value,
) -> Result<LearningProgressSlice, ErrorResponse> {
    let new_progress = NewLearningProgress::from_json(body)?;
    store
        .create_progress(new_progress)
        .map(LearningProgressSlice::from)
        .map_err(store_error)
}

pub fn update_progress<'a>(
    store: Box<dyn LearningStore + 'a>,
    user_id: &str,
    module_id: &str,
    body: &Value,
) -> Result<LearningProgressSlice, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    let module_id = parse_id(module_id, "module")?;
    let update = ProgressUpdate::from_json(body)?;
    store
        .update_progress(user_id, module_id, update.progress, update.completed)
        .map(LearningProgressSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::learning::store::memory::MemoryLearningStore;

    #[test]
    fn test_progress_upsert() {
        let store = MemoryLearningStore::new();

        let first = update_progress(
            Box::new(store.clone()),
            "1",
            "2",
            &json!({ "progress": 40, "completed": false }),
        )
        .expect("Failed to record progress");
        let second = update_progress(
            Box::new(store.clone()),
            "1",
            "2",
            &json!({ "progress": 100, "completed": true }),
        )
        .expect("Failed to update progress");

        assert_eq!(first.id, second.id);
        assert_eq!(second.progress, 100);
        assert!(second.completed);
        assert!(second.last_accessed_at >= first.last_accessed_at);
        assert_eq!(
            list_progress_by_user(Box::new(store.clone()), "1")
                .expect("Failed to list progress")
                .len(),
            1
        );

        let err = create_progress(
            Box::new(store.clone()),
            &json!({ "userId": 1, "moduleId": 2 }),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = update_progress(
            Box::new(store),
            "1",
            "2",
            &json!({ "progress": 101, "completed": true }),
        )
        .unwrap_err();
        assert_eq!(err.errors()[0].field, "progress");
    }

    #[test]
    fn test_module_not_found() {
        let err = get_module(Box::new(MemoryLearningStore::new()), "3").unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Learning module not found");
    }
}
