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

pub use error::RecommendationStoreError;

/// A suggested crop for a user or a location. `match_percentage` runs from 0 to 100.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub id: i64,
    pub user_id: Option<i64>,
    pub location: Option<String>,
    pub crop_name: String,
    pub variety: Option<String>,
    pub match_percentage: Option<i32>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewRecommendation {
    pub user_id: Option<i64>,
    pub location: Option<String>,
    pub crop_name: String,
    pub variety: Option<String>,
    pub match_percentage: Option<i32>,
    pub reason: Option<String>,
}

impl NewRecommendation {
    pub(crate) fn into_recommendation(self, id: i64) -> Recommendation {
        Recommendation {
            id,
            user_id: self.user_id,
            location: self.location,
            crop_name: self.crop_name,
            variety: self.variety,
            match_percentage: self.match_percentage,
            reason: self.reason,
        }
    }
}

pub trait RecommendationStore: Send + Sync {
    fn get_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError>;

    fn list_recommendations_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError>;

    fn list_recommendations_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError>;

    fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, RecommendationStoreError>;
}

impl<RS> RecommendationStore for Box<RS>
where
    RS: RecommendationStore + ?Sized,
{
    fn get_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        (**self).get_recommendation(id)
    }

    fn list_recommendations_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        (**self).list_recommendations_by_user(user_id)
    }

    fn list_recommendations_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        (**self).list_recommendations_by_location(location)
    }

    fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, RecommendationStoreError> {
        (**self).create_recommendation(recommendation)
    }
}
