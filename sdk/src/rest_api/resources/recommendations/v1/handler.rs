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

use crate::recommendations::store::{
    NewRecommendation, RecommendationStore, RecommendationStoreError,
};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::RecommendationSlice;

fn store_error(err: RecommendationStoreError) -> ErrorResponse {
    match err {
        RecommendationStoreError::InternalError(err) => {
            ErrorResponse::internal_error(Box::new(err))
        }
        RecommendationStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        RecommendationStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        RecommendationStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

pub fn list_recommendations_by_user<'a>(
    store: Box<dyn RecommendationStore + 'a>,
    user_id: &str,
) -> Result<Vec<RecommendationSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_recommendations_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(RecommendationSlice::from)
        .collect())
}

pub fn list_recommendations_by_location<'a>(
    store: Box<dyn RecommendationStore + 'a>,
    location: &str,
) -> Result<Vec<RecommendationSlice>, ErrorResponse> {
    Ok(store
        .list_recommendations_by_location(location)
        .map_err(store_error)?
        .into_iter()
        .map(RecommendationSlice::from)
        .collect())
}

pub fn create_recommendation<'a>(
    store: Box<dyn RecommendationStore + 'a>,
    body: &Value,
) -> Result<RecommendationSlice, ErrorResponse> {
    let new_recommendation = NewRecommendation::from_json(body)?;
    store
        .create_recommendation(new_recommendation)
        .map(RecommendationSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::recommendations::store::memory::MemoryRecommendationStore;

    #[test]
    fn test_recommendations_by_user_and_location() {
        let store = MemoryRecommendationStore::new();
        let saved = create_recommendation(
            Box::new(store.clone()),
            &json!({
                "userId": 1,
                "location": "Barabanki",
                "cropName": "Wheat",
                "matchPercentage": 95,
            }),
        )
        .expect("Failed to create recommendation");
        create_recommendation(
            Box::new(store.clone()),
            &json!({ "location": "Lucknow", "cropName": "Mustard" }),
        )
        .expect("Failed to create recommendation");

        assert_eq!(
            list_recommendations_by_user(Box::new(store.clone()), "1")
                .expect("Failed to list"),
            vec![saved]
        );
        let by_location = list_recommendations_by_location(Box::new(store.clone()), "Lucknow")
            .expect("Failed to list");
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].crop_name, "Mustard");

        let err = create_recommendation(
            Box::new(store),
            &json!({ "cropName": "Wheat", "matchPercentage": 140 }),
        )
        .unwrap_err();
        assert_eq!(err.errors()[0].field, "matchPercentage");
    }
}
