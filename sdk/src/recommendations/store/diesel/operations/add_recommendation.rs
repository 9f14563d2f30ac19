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

use diesel::{dsl::insert_into, prelude::*};

use super::RecommendationStoreOperations;
use crate::recommendations::store::diesel::{
    models::{NewRecommendationModel, RecommendationModel},
    schema::crop_recommendations,
};
use crate::recommendations::store::{Recommendation, RecommendationStoreError};

pub(in crate::recommendations::store::diesel) trait RecommendationStoreAddRecommendationOperation {
    fn add_recommendation(
        &self,
        recommendation: NewRecommendationModel,
    ) -> Result<Recommendation, RecommendationStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> RecommendationStoreAddRecommendationOperation
    for RecommendationStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_recommendation(
        &self,
        recommendation: NewRecommendationModel,
    ) -> Result<Recommendation, RecommendationStoreError> {
        let model = insert_into(crop_recommendations::table)
            .values(&recommendation)
            .get_result::<RecommendationModel>(self.conn)?;

        Ok(Recommendation::from(model))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> RecommendationStoreAddRecommendationOperation
    for RecommendationStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_recommendation(
        &self,
        recommendation: NewRecommendationModel,
    ) -> Result<Recommendation, RecommendationStoreError> {
        self.conn.transaction::<_, RecommendationStoreError, _>(|| {
            insert_into(crop_recommendations::table)
                .values(&recommendation)
                .execute(self.conn)?;

            let model = crop_recommendations::table
                .order(crop_recommendations::id.desc())
                .first::<RecommendationModel>(self.conn)?;

            Ok(Recommendation::from(model))
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use diesel::sqlite::SqliteConnection;

    use crate::migrations::run_sqlite_migrations;
    use crate::recommendations::store::diesel::operations::list_recommendations::{
        RecommendationFilter, RecommendationStoreListRecommendationsOperation,
    };

    fn new_recommendation(user_id: Option<i64>, location: &str) -> NewRecommendationModel {
        NewRecommendationModel {
            user_id,
            location: Some(location.to_string()),
            crop_name: "Mustard".to_string(),
            variety: Some("Pusa Bold".to_string()),
            match_percentage: Some(88),
            reason: None,
        }
    }

    #[test]
    fn test_list_by_user_and_location() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = RecommendationStoreOperations::new(&conn);
        ops.add_recommendation(new_recommendation(Some(1), "Barabanki"))?;
        ops.add_recommendation(new_recommendation(None, "Barabanki"))?;
        ops.add_recommendation(new_recommendation(Some(1), "Sitapur"))?;

        let by_user = ops.list_recommendations(RecommendationFilter::User(1))?;
        assert_eq!(
            by_user.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let by_location = ops.list_recommendations(RecommendationFilter::Location("Barabanki"))?;
        assert_eq!(
            by_location.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        Ok(())
    }
}
