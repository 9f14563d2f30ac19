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

use serde_json::{json, Value};

use crate::advisor::{CropConditions, CropSuggestion};
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

/// Farm conditions to recommend crops for. When `user_id` is given the suggestions are saved
/// as that user's recommendations.
#[derive(Debug, PartialEq)]
pub struct CropRecommendationRequest {
    pub conditions: CropConditions,
    pub user_id: Option<i64>,
}

impl FromJson for CropRecommendationRequest {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let request = CropRecommendationRequest {
            conditions: CropConditions {
                location: validator.required_non_empty("location"),
                soil_type: validator.optional_string("soilType"),
                soil_ph: validator.optional_number("soilPH"),
                soil_moisture: validator.optional_number("soilMoisture"),
                temperature: validator.optional_number("temperature"),
                season: validator.optional_string("season"),
            },
            user_id: validator.optional_integer("userId"),
        };
        validator.finish()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropSuggestionSlice {
    pub crop_name: String,
    pub variety: Option<String>,
    pub reason: Option<String>,
    pub match_percentage: Option<i32>,
}

impl From<CropSuggestion> for CropSuggestionSlice {
    fn from(suggestion: CropSuggestion) -> Self {
        Self {
            crop_name: suggestion.crop_name,
            variety: suggestion.variety,
            reason: suggestion.reason,
            match_percentage: suggestion.match_percentage,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct VoiceQueryRequest {
    pub query: String,
    pub user_context: Value,
}

impl FromJson for VoiceQueryRequest {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let request = VoiceQueryRequest {
            query: validator.required_non_empty("query"),
            user_context: validator
                .optional_json("userContext")
                .unwrap_or_else(|| json!({})),
        };
        validator.finish()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceQueryResponse {
    pub response: String,
}

#[derive(Debug, PartialEq)]
pub struct FarmingAdviceRequest {
    pub crop_name: String,
    pub growth_stage: String,
    pub issues: Vec<String>,
}

impl FromJson for FarmingAdviceRequest {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let request = FarmingAdviceRequest {
            crop_name: validator.required_non_empty("cropName"),
            growth_stage: validator.required_non_empty("growthStage"),
            issues: validator.optional_string_list("issues"),
        };
        validator.finish()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FarmingAdviceResponse {
    pub advice: String,
}

#[derive(Debug, PartialEq)]
pub struct WeatherImpactRequest {
    pub crop_name: String,
    pub weather_forecast: Value,
}

impl FromJson for WeatherImpactRequest {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let request = WeatherImpactRequest {
            crop_name: validator.required_non_empty("cropName"),
            weather_forecast: validator.required_json("weatherForecast"),
        };
        validator.finish()?;
        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WeatherImpactResponse {
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farming_advice_issues_must_be_strings() {
        let request = FarmingAdviceRequest::from_json(&json!({
            "cropName": "Wheat",
            "growthStage": "tillering",
            "issues": ["aphids", "yellow leaves"],
        }))
        .expect("valid request");
        assert_eq!(request.issues, vec!["aphids", "yellow leaves"]);

        let err = FarmingAdviceRequest::from_json(&json!({
            "cropName": "Wheat",
            "growthStage": "tillering",
            "issues": "aphids",
        }))
        .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "issues");
    }

    #[test]
    fn test_weather_impact_requires_forecast() {
        let err = WeatherImpactRequest::from_json(&json!({ "cropName": "Wheat" })).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "weatherForecast");
    }
}
