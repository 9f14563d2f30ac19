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

use diesel::prelude::*;

use super::RecommendationStoreOperations;
use crate::recommendations::store::diesel::{
    models::RecommendationModel, schema::crop_recommendations,
};
use crate::recommendations::store::{Recommendation, RecommendationStoreError};

pub(in crate::recommendations::store::diesel) trait RecommendationStoreFetchRecommendationOperation
{
    fn fetch_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> RecommendationStoreFetchRecommendationOperation
    for RecommendationStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        Ok(crop_recommendations::table
            .find(id)
            .first::<RecommendationModel>(self.conn)
            .optional()?
            .map(Recommendation::from))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> RecommendationStoreFetchRecommendationOperation
    for RecommendationStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        Ok(crop_recommendations::table
            .find(id)
            .first::<RecommendationModel>(self.conn)
            .optional()?
            .map(Recommendation::from))
    }
}
