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

pub mod models;
mod operations;
pub(crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{NewRecommendation, Recommendation, RecommendationStore, RecommendationStoreError};
use operations::add_recommendation::RecommendationStoreAddRecommendationOperation as _;
use operations::fetch_recommendation::RecommendationStoreFetchRecommendationOperation as _;
use operations::list_recommendations::{
    RecommendationFilter, RecommendationStoreListRecommendationsOperation as _,
};
use operations::RecommendationStoreOperations;

/// A `RecommendationStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselRecommendationStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselRecommendationStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselRecommendationStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl RecommendationStore for DieselRecommendationStore<diesel::pg::PgConnection> {
    fn get_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?).fetch_recommendation(id)
    }

    fn list_recommendations_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .list_recommendations(RecommendationFilter::User(user_id))
    }

    fn list_recommendations_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .list_recommendations(RecommendationFilter::Location(location))
    }

    fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .add_recommendation(recommendation.into())
    }
}

#[cfg(feature = "sqlite")]
impl RecommendationStore for DieselRecommendationStore<diesel::sqlite::SqliteConnection> {
    fn get_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?).fetch_recommendation(id)
    }

    fn list_recommendations_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .list_recommendations(RecommendationFilter::User(user_id))
    }

    fn list_recommendations_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .list_recommendations(RecommendationFilter::Location(location))
    }

    fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, RecommendationStoreError> {
        RecommendationStoreOperations::new(&*self.connection_pool.get()?)
            .add_recommendation(recommendation.into())
    }
}
