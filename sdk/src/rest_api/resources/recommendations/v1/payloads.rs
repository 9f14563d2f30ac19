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

use crate::recommendations::store::{NewRecommendation, Recommendation};
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSlice {
    pub id: i64,
    pub user_id: Option<i64>,
    pub location: Option<String>,
    pub crop_name: String,
    pub variety: Option<String>,
    pub match_percentage: Option<i32>,
    pub reason: Option<String>,
}

impl From<Recommendation> for RecommendationSlice {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            id: recommendation.id,
            user_id: recommendation.user_id,
            location: recommendation.location,
            crop_name: recommendation.crop_name,
            variety: recommendation.variety,
            match_percentage: recommendation.match_percentage,
            reason: recommendation.reason,
        }
    }
}

impl FromJson for NewRecommendation {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let recommendation = NewRecommendation {
            user_id: validator.optional_integer("userId"),
            location: validator.optional_string("location"),
            crop_name: validator.required_non_empty("cropName"),
            variety: validator.optional_string("variety"),
            match_percentage: validator.optional_in_range("matchPercentage", 0, 100),
            reason: validator.optional_string("reason"),
        };
        validator.finish()?;
        Ok(recommendation)
    }
}
