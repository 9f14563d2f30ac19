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

pub(in crate::recommendations::store::diesel) enum RecommendationFilter<'f> {
    User(i64),
    Location(&'f str),
}

pub(in crate::recommendations::store::diesel) trait RecommendationStoreListRecommendationsOperation
{
    fn list_recommendations(
        &self,
        filter: RecommendationFilter,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> RecommendationStoreListRecommendationsOperation
    for RecommendationStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_recommendations(
        &self,
        filter: RecommendationFilter,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        let mut query = crop_recommendations::table
            .into_boxed()
            .order(crop_recommendations::id.asc());

        query = match filter {
            RecommendationFilter::User(user_id) => {
                query.filter(crop_recommendations::user_id.eq(user_id))
            }
            RecommendationFilter::Location(location) => {
                query.filter(crop_recommendations::location.eq(location))
            }
        };

        Ok(query
            .load::<RecommendationModel>(self.conn)?
            .into_iter()
            .map(Recommendation::from)
            .collect())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> RecommendationStoreListRecommendationsOperation
    for RecommendationStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_recommendations(
        &self,
        filter: RecommendationFilter,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        let mut query = crop_recommendations::table
            .into_boxed()
            .order(crop_recommendations::id.asc());

        query = match filter {
            RecommendationFilter::User(user_id) => {
                query.filter(crop_recommendations::user_id.eq(user_id))
            }
            RecommendationFilter::Location(location) => {
                query.filter(crop_recommendations::location.eq(location))
            }
        };

        Ok(query
            .load::<RecommendationModel>(self.conn)?
            .into_iter()
            .map(Recommendation::from)
            .collect())
    }
}
