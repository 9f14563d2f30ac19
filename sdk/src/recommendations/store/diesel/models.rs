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

use super::schema::crop_recommendations;
use crate::recommendations::store::{NewRecommendation, Recommendation};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "crop_recommendations"]
pub struct NewRecommendationModel {
    pub user_id: Option<i64>,
    pub location: Option<String>,
    pub crop_name: String,
    pub variety: Option<String>,
    pub match_percentage: Option<i32>,
    pub reason: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct RecommendationModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub location: Option<String>,
    pub crop_name: String,
    pub variety: Option<String>,
    pub match_percentage: Option<i32>,
    pub reason: Option<String>,
}

impl From<NewRecommendation> for NewRecommendationModel {
    fn from(recommendation: NewRecommendation) -> Self {
        Self {
            user_id: recommendation.user_id,
            location: recommendation.location,
            crop_name: recommendation.crop_name,
            variety: recommendation.variety,
            match_percentage: recommendation.match_percentage,
            reason: recommendation.reason,
        }
    }
}

impl From<RecommendationModel> for Recommendation {
    fn from(model: RecommendationModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            location: model.location,
            crop_name: model.crop_name,
            variety: model.variety,
            match_percentage: model.match_percentage,
            reason: model.reason,
        }
    }
}
