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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;

use super::{NewRecommendation, Recommendation, RecommendationStore, RecommendationStoreError};

#[derive(Default)]
struct RecommendationTable {
    last_id: i64,
    recommendations: BTreeMap<i64, Recommendation>,
}

#[derive(Clone, Default)]
pub struct MemoryRecommendationStore {
    inner: Arc<Mutex<RecommendationTable>>,
}

impl MemoryRecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_where<F>(&self, predicate: F) -> Result<Vec<Recommendation>, RecommendationStoreError>
    where
        F: Fn(&Recommendation) -> bool,
    {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .recommendations
            .values()
            .filter(|recommendation| predicate(recommendation))
            .cloned()
            .collect())
    }
}

fn poisoned() -> RecommendationStoreError {
    RecommendationStoreError::InternalError(InternalError::with_message(
        "Cannot access recommendations: mutex lock poisoned".to_string(),
    ))
}

impl RecommendationStore for MemoryRecommendationStore {
    fn get_recommendation(
        &self,
        id: i64,
    ) -> Result<Option<Recommendation>, RecommendationStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.recommendations.get(&id).cloned())
    }

    fn list_recommendations_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        self.list_where(|recommendation| recommendation.user_id == Some(user_id))
    }

    fn list_recommendations_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Recommendation>, RecommendationStoreError> {
        self.list_where(|recommendation| recommendation.location.as_deref() == Some(location))
    }

    fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, RecommendationStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_id += 1;
        let recommendation = recommendation.into_recommendation(inner.last_id);
        inner
            .recommendations
            .insert(recommendation.id, recommendation.clone());

        Ok(recommendation)
    }
}
