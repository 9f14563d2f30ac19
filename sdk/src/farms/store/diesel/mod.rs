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

use super::{Farm, FarmStore, FarmStoreError, NewFarm};
use operations::add_farm::FarmStoreAddFarmOperation as _;
use operations::fetch_farm::FarmStoreFetchFarmOperation as _;
use operations::list_farms::FarmStoreListFarmsOperation as _;
use operations::FarmStoreOperations;

/// A `FarmStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselFarmStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselFarmStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselFarmStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl FarmStore for DieselFarmStore<diesel::pg::PgConnection> {
    fn get_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).fetch_farm(id)
    }

    fn list_farms_by_user(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).list_farms(user_id)
    }

    fn create_farm(&self, farm: NewFarm) -> Result<Farm, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).add_farm(farm.into())
    }
}

#[cfg(feature = "sqlite")]
impl FarmStore for DieselFarmStore<diesel::sqlite::SqliteConnection> {
    fn get_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).fetch_farm(id)
    }

    fn list_farms_by_user(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).list_farms(user_id)
    }

    fn create_farm(&self, farm: NewFarm) -> Result<Farm, FarmStoreError> {
        FarmStoreOperations::new(&*self.connection_pool.get()?).add_farm(farm.into())
    }
}
