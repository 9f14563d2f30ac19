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

use diesel::{
    r2d2::{ConnectionManager, Pool},
    sqlite::SqliteConnection,
};

use crate::crops::store::{diesel::DieselCropStore, CropStore};
use crate::devices::store::{diesel::DieselDeviceStore, DeviceStore};
use crate::farms::store::{diesel::DieselFarmStore, FarmStore};
use crate::learning::store::{diesel::DieselLearningStore, LearningStore};
use crate::marketplace::store::{diesel::DieselMarketplaceStore, MarketplaceStore};
use crate::recommendations::store::{diesel::DieselRecommendationStore, RecommendationStore};
use crate::tasks::store::{diesel::DieselTaskStore, TaskStore};
use crate::users::store::{diesel::DieselUserStore, UserStore};
use crate::weather::store::{diesel::DieselWeatherStore, WeatherStore};

use super::StoreFactory;

/// A `StoreFactory` backed by a SQLite database.
#[derive(Clone)]
pub struct SqliteStoreFactory {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl SqliteStoreFactory {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }
}

impl StoreFactory for SqliteStoreFactory {
    fn get_user_store<'a>(&'a self) -> Box<dyn UserStore + 'a> {
        Box::new(DieselUserStore::new(self.pool.clone()))
    }

    fn get_farm_store<'a>(&'a self) -> Box<dyn FarmStore + 'a> {
        Box::new(DieselFarmStore::new(self.pool.clone()))
    }

    fn get_device_store<'a>(&'a self) -> Box<dyn DeviceStore + 'a> {
        Box::new(DieselDeviceStore::new(self.pool.clone()))
    }

    fn get_crop_store<'a>(&'a self) -> Box<dyn CropStore + 'a> {
        Box::new(DieselCropStore::new(self.pool.clone()))
    }

    fn get_task_store<'a>(&'a self) -> Box<dyn TaskStore + 'a> {
        Box::new(DieselTaskStore::new(self.pool.clone()))
    }

    fn get_marketplace_store<'a>(&'a self) -> Box<dyn MarketplaceStore + 'a> {
        Box::new(DieselMarketplaceStore::new(self.pool.clone()))
    }

    fn get_learning_store<'a>(&'a self) -> Box<dyn LearningStore + 'a> {
        Box::new(DieselLearningStore::new(self.pool.clone()))
    }

    fn get_weather_store<'a>(&'a self) -> Box<dyn WeatherStore + 'a> {
        Box::new(DieselWeatherStore::new(self.pool.clone()))
    }

    fn get_recommendation_store<'a>(&'a self) -> Box<dyn RecommendationStore + 'a> {
        Box::new(DieselRecommendationStore::new(self.pool.clone()))
    }
}
