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

use std::convert::TryFrom;

use diesel::{dsl::update, prelude::*};

use super::CropStoreOperations;
use crate::crops::store::diesel::{models::CropModel, schema::crops};
use crate::crops::store::{Crop, CropStoreError, HealthStatus};

pub(in crate::crops::store::diesel) trait CropStoreUpdateCropStatusOperation {
    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> CropStoreUpdateCropStatusOperation
    for CropStoreOperations<'a, diesel::pg::PgConnection>
{
    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        self.conn.transaction::<_, CropStoreError, _>(|| {
            let current = crops::table
                .find(id)
                .first::<CropModel>(self.conn)
                .optional()?
                .ok_or_else(|| CropStoreError::NotFoundError(format!("crop {}", id)))?;

            let health_status = health_status
                .map(|health| health.as_str().to_string())
                .unwrap_or(current.health_status);

            let model = update(crops::table.find(id))
                .set((
                    crops::status.eq(status),
                    crops::health_status.eq(health_status),
                ))
                .get_result::<CropModel>(self.conn)?;

            Crop::try_from(model)
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> CropStoreUpdateCropStatusOperation
    for CropStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        self.conn.transaction::<_, CropStoreError, _>(|| {
            let current = crops::table
                .find(id)
                .first::<CropModel>(self.conn)
                .optional()?
                .ok_or_else(|| CropStoreError::NotFoundError(format!("crop {}", id)))?;

            let health_status = health_status
                .map(|health| health.as_str().to_string())
                .unwrap_or(current.health_status);

            update(crops::table.find(id))
                .set((
                    crops::status.eq(status),
                    crops::health_status.eq(health_status),
                ))
                .execute(self.conn)?;

            let model = crops::table.find(id).first::<CropModel>(self.conn)?;

            Crop::try_from(model)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use diesel::sqlite::SqliteConnection;

    use crate::crops::store::diesel::models::NewCropModel;
    use crate::crops::store::diesel::operations::add_crop::CropStoreAddCropOperation;
    use crate::crops::store::diesel::operations::list_crops::{
        CropFilter, CropStoreListCropsOperation,
    };
    use crate::migrations::run_sqlite_migrations;

    fn new_crop(user_id: i64, farm_id: Option<i64>, name: &str) -> NewCropModel {
        NewCropModel {
            user_id,
            farm_id,
            name: name.to_string(),
            variety: None,
            planting_date: None,
            harvest_date: None,
            status: "active".to_string(),
            health_status: "good".to_string(),
            area: Some(1.5),
        }
    }

    #[test]
    fn test_update_crop_status() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = CropStoreOperations::new(&conn);
        let crop = ops.add_crop(new_crop(1, Some(1), "Rice"))?;

        let updated = ops.update_crop_status(crop.id, "harvested", None)?;
        assert_eq!(updated.status, "harvested");
        assert_eq!(updated.health_status, HealthStatus::Good);

        let updated =
            ops.update_crop_status(crop.id, "active", Some(HealthStatus::NeedsAttention))?;
        assert_eq!(updated.status, "active");
        assert_eq!(updated.health_status, HealthStatus::NeedsAttention);

        match ops.update_crop_status(42, "active", None) {
            Err(CropStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }

        Ok(())
    }

    #[test]
    fn test_list_crops_by_farm() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = CropStoreOperations::new(&conn);
        ops.add_crop(new_crop(1, Some(1), "Rice"))?;
        ops.add_crop(new_crop(1, Some(2), "Wheat"))?;
        ops.add_crop(new_crop(1, Some(1), "Tomato"))?;

        let names = ops
            .list_crops(CropFilter::Farm(1))?
            .into_iter()
            .map(|crop| crop.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Rice".to_string(), "Tomato".to_string()]);

        assert_eq!(ops.list_crops(CropFilter::User(1))?.len(), 3);
        assert!(ops.list_crops(CropFilter::User(2))?.is_empty());

        Ok(())
    }
}
