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

use super::{Crop, CropStore, CropStoreError, HealthStatus, NewCrop};
use operations::add_crop::CropStoreAddCropOperation as _;
use operations::fetch_crop::CropStoreFetchCropOperation as _;
use operations::list_crops::{CropFilter, CropStoreListCropsOperation as _};
use operations::update_crop_status::CropStoreUpdateCropStatusOperation as _;
use operations::CropStoreOperations;

/// A `CropStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselCropStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselCropStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselCropStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl CropStore for DieselCropStore<diesel::pg::PgConnection> {
    fn get_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).fetch_crop(id)
    }

    fn list_crops_by_user(&self, user_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?)
            .list_crops(CropFilter::User(user_id))
    }

    fn list_crops_by_farm(&self, farm_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?)
            .list_crops(CropFilter::Farm(farm_id))
    }

    fn create_crop(&self, crop: NewCrop) -> Result<Crop, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).add_crop(crop.into())
    }

    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).update_crop_status(
            id,
            status,
            health_status,
        )
    }
}

#[cfg(feature = "sqlite")]
impl CropStore for DieselCropStore<diesel::sqlite::SqliteConnection> {
    fn get_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).fetch_crop(id)
    }

    fn list_crops_by_user(&self, user_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?)
            .list_crops(CropFilter::User(user_id))
    }

    fn list_crops_by_farm(&self, farm_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?)
            .list_crops(CropFilter::Farm(farm_id))
    }

    fn create_crop(&self, crop: NewCrop) -> Result<Crop, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).add_crop(crop.into())
    }

    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        CropStoreOperations::new(&*self.connection_pool.get()?).update_crop_status(
            id,
            status,
            health_status,
        )
    }
}
