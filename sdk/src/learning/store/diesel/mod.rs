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

use super::{
    LearningModule, LearningProgress, LearningStore, LearningStoreError, NewLearningModule,
    NewLearningProgress,
};
use crate::store::current_timestamp;
use operations::add_module::LearningStoreAddModuleOperation as _;
use operations::add_progress::LearningStoreAddProgressOperation as _;
use operations::fetch_module::LearningStoreFetchModuleOperation as _;
use operations::fetch_progress::LearningStoreFetchProgressOperation as _;
use operations::list_modules::LearningStoreListModulesOperation as _;
use operations::list_progress::LearningStoreListProgressOperation as _;
use operations::upsert_progress::LearningStoreUpsertProgressOperation as _;
use operations::LearningStoreOperations;

/// A `LearningStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselLearningStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselLearningStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselLearningStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl LearningStore for DieselLearningStore<diesel::pg::PgConnection> {
    fn get_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).fetch_module(id)
    }

    fn list_modules(&self) -> Result<Vec<LearningModule>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).list_modules()
    }

    fn create_module(
        &self,
        module: NewLearningModule,
    ) -> Result<LearningModule, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).add_module(module.into())
    }

    fn get_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_progress(user_id, module_id)
    }

    fn list_progress_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LearningProgress>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).list_progress(user_id)
    }

    fn create_progress(
        &self,
        progress: NewLearningProgress,
    ) -> Result<LearningProgress, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).add_progress(progress.into())
    }

    fn update_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
    ) -> Result<LearningProgress, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).upsert_progress(
            user_id,
            module_id,
            progress,
            completed,
            current_timestamp(),
        )
    }
}

#[cfg(feature = "sqlite")]
impl LearningStore for DieselLearningStore<diesel::sqlite::SqliteConnection> {
    fn get_module(&self, id: i64) -> Result<Option<LearningModule>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).fetch_module(id)
    }

    fn list_modules(&self) -> Result<Vec<LearningModule>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).list_modules()
    }

    fn create_module(
        &self,
        module: NewLearningModule,
    ) -> Result<LearningModule, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).add_module(module.into())
    }

    fn get_progress(
        &self,
        user_id: i64,
        module_id: i64,
    ) -> Result<Option<LearningProgress>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_progress(user_id, module_id)
    }

    fn list_progress_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LearningProgress>, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).list_progress(user_id)
    }

    fn create_progress(
        &self,
        progress: NewLearningProgress,
    ) -> Result<LearningProgress, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).add_progress(progress.into())
    }

    fn update_progress(
        &self,
        user_id: i64,
        module_id: i64,
        progress: i32,
        completed: bool,
    ) -> Result<LearningProgress, LearningStoreError> {
        LearningStoreOperations::new(&*self.connection_pool.get()?).upsert_progress(
            user_id,
            module_id,
            progress,
            completed,
            current_timestamp(),
        )
    }
}
