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

use crate::advisor::{Advisor, CompletionError};
use crate::recommendations::store::{
    NewRecommendation, RecommendationStore, RecommendationStoreError,
};
use crate::rest_api::resources::error::ErrorResponse;
use crate::rest_api::resources::recommendations::v1::RecommendationSlice;
use crate::rest_api::resources::validation::FromJson;

use super::payloads::{
    CropRecommendationRequest, CropSuggestionSlice, FarmingAdviceRequest, FarmingAdviceResponse,
    VoiceQueryRequest, VoiceQueryResponse, WeatherImpactRequest, WeatherImpactResponse,
};

/// The outcome of a crop recommendation request: suggestions only, or suggestions saved for a
/// user.
#[derive(Debug, PartialEq)]
pub enum CropRecommendations {
    Suggested(Vec<CropSuggestionSlice>),
    Saved(Vec<RecommendationSlice>),
}

fn require_advisor(advisor: Option<&Advisor>) -> Result<&Advisor, ErrorResponse> {
    advisor.ok_or_else(|| ErrorResponse::new(503, "AI assistant is not configured"))
}

fn completion_error(action: &str, err: CompletionError) -> ErrorResponse {
    error!("Failed to {}: {}", action, err);
    ErrorResponse::new(500, &format!("Failed to {}: {}", action, err.message))
}

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

pub async fn generate_crop_recommendations<'a>(
    advisor: Option<&Advisor>,
    store: Box<dyn RecommendationStore + 'a>,
    body: &Value,
) -> Result<CropRecommendations, ErrorResponse> {
    let request = CropRecommendationRequest::from_json(body)?;
    let suggestions = require_advisor(advisor)?
        .generate_crop_recommendations(&request.conditions)
        .await
        .map_err(|err| completion_error("generate crop recommendations", err))?;

    let user_id = match request.user_id {
        Some(user_id) => user_id,
        None => {
            return Ok(CropRecommendations::Suggested(
                suggestions
                    .into_iter()
                    .map(CropSuggestionSlice::from)
                    .collect(),
            ))
        }
    };

    let saved = suggestions
        .into_iter()
        .map(|suggestion| {
            store
                .create_recommendation(NewRecommendation {
                    user_id: Some(user_id),
                    location: Some(request.conditions.location.clone()),
                    crop_name: suggestion.crop_name,
                    variety: suggestion.variety,
                    match_percentage: suggestion.match_percentage,
                    reason: suggestion.reason,
                })
                .map(RecommendationSlice::from)
                .map_err(store_error)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CropRecommendations::Saved(saved))
}

pub async fn process_voice_query(
    advisor: Option<&Advisor>,
    body: &Value,
) -> Result<VoiceQueryResponse, ErrorResponse> {
    let request = VoiceQueryRequest::from_json(body)?;
    let response = require_advisor(advisor)?
        .process_voice_query(&request.query, &request.user_context)
        .await
        .map_err(|err| completion_error("process voice query", err))?;
    Ok(VoiceQueryResponse { response })
}

pub async fn generate_farming_advice(
    advisor: Option<&Advisor>,
    body: &Value,
) -> Result<FarmingAdviceResponse, ErrorResponse> {
    let request = FarmingAdviceRequest::from_json(body)?;
    let advice = require_advisor(advisor)?
        .generate_farming_advice(&request.crop_name, &request.growth_stage, &request.issues)
        .await
        .map_err(|err| completion_error("generate farming advice", err))?;
    Ok(FarmingAdviceResponse { advice })
}

pub async fn analyze_weather_impact(
    advisor: Option<&Advisor>,
    body: &Value,
) -> Result<WeatherImpactResponse, ErrorResponse> {
    let request = WeatherImpactRequest::from_json(body)?;
    let analysis = require_advisor(advisor)?
        .analyze_weather_impact(&request.crop_name, &request.weather_forecast)
        .await
        .map_err(|err| completion_error("analyze weather impact", err))?;
    Ok(WeatherImpactResponse { analysis })
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::future;
    use futures::FutureExt;
    use serde_json::json;

    use crate::advisor::{CompletionClient, CompletionFuture, CompletionRequest};
    use crate::recommendations::store::memory::MemoryRecommendationStore;

    #[derive(Clone)]
    struct FixedClient(Result<String, CompletionError>);

    impl CompletionClient for FixedClient {
        fn complete(&self, _: CompletionRequest) -> CompletionFuture {
            future::ready(self.0.clone()).boxed()
        }

        fn cloned_box(&self) -> Box<dyn CompletionClient> {
            Box::new(self.clone())
        }
    }

    fn advisor(reply: Result<&str, CompletionError>) -> Advisor {
        Advisor::new(Box::new(FixedClient(reply.map(String::from))), "gpt-4o")
    }

    const RICE: &str = r#"[{"cropName": "Rice", "variety": "Swarna", "reason": "Wet season",
        "matchPercentage": 90}]"#;

    #[actix_rt::test]
    async fn test_recommendations_saved_for_user() {
        let store = MemoryRecommendationStore::new();
        let advisor = advisor(Ok(RICE));

        let suggested = generate_crop_recommendations(
            Some(&advisor),
            Box::new(store.clone()),
            &json!({ "location": "Barabanki" }),
        )
        .await
        .expect("Failed to generate recommendations");
        match suggested {
            CropRecommendations::Suggested(suggestions) => {
                assert_eq!(suggestions[0].crop_name, "Rice")
            }
            other => panic!("Expected suggestions, got {:?}", other),
        }
        assert!(store
            .list_recommendations_by_location("Barabanki")
            .expect("Failed to list")
            .is_empty());

        let saved = generate_crop_recommendations(
            Some(&advisor),
            Box::new(store.clone()),
            &json!({ "location": "Barabanki", "userId": 4, "season": "kharif" }),
        )
        .await
        .expect("Failed to generate recommendations");
        match saved {
            CropRecommendations::Saved(saved) => {
                assert_eq!(saved.len(), 1);
                assert_eq!(saved[0].user_id, Some(4));
                assert_eq!(saved[0].location.as_deref(), Some("Barabanki"));
                assert_eq!(saved[0].match_percentage, Some(90));
            }
            other => panic!("Expected saved recommendations, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_unconfigured_and_failing_advisor() {
        let err = process_voice_query(None, &json!({ "query": "When to sow wheat?" }))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.message(), "AI assistant is not configured");

        let failing = advisor(Err(CompletionError::new(401, "Incorrect API key provided")));
        let err = generate_farming_advice(
            Some(&failing),
            &json!({ "cropName": "Wheat", "growthStage": "tillering" }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.message(),
            "Failed to generate farming advice: Incorrect API key provided"
        );

        let err = analyze_weather_impact(Some(&failing), &json!({})).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
