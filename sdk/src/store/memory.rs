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

use crate::crops::store::{memory::MemoryCropStore, CropStore};
use crate::devices::store::{memory::MemoryDeviceStore, DeviceStore};
use crate::farms::store::{memory::MemoryFarmStore, FarmStore};
use crate::learning::store::{memory::MemoryLearningStore, LearningStore};
use crate::marketplace::store::{memory::MemoryMarketplaceStore, MarketplaceStore};
use crate::recommendations::store::{memory::MemoryRecommendationStore, RecommendationStore};
use crate::tasks::store::{memory::MemoryTaskStore, TaskStore};
use crate::users::store::{memory::MemoryUserStore, UserStore};
use crate::weather::store::{memory::MemoryWeatherStore, WeatherStore};

use super::StoreFactory;

/// A `StoreFactory` whose stores live in process memory.
///
/// Every store handed out by one factory sees the same data; the data is lost when the last
/// clone of the factory is dropped.
#[derive(Clone, Default)]
pub struct MemoryStoreFactory {
    users: MemoryUserStore,
    farms: MemoryFarmStore,
    devices: MemoryDeviceStore,
    crops: MemoryCropStore,
    tasks: MemoryTaskStore,
    marketplace: MemoryMarketplaceStore,
    learning: MemoryLearningStore,
    weather: MemoryWeatherStore,
    recommendations: MemoryRecommendationStore,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn get_user_store<'a>(&'a self) -> Box<dyn UserStore + 'a> {
        Box::new(self.users.clone())
    }

    fn get_farm_store<'a>(&'a self) -> Box<dyn FarmStore + 'a> {
        Box::new(self.farms.clone())
    }

    fn get_device_store<'a>(&'a self) -> Box<dyn DeviceStore + 'a> {
        Box::new(self.devices.clone())
    }

    fn get_crop_store<'a>(&'a self) -> Box<dyn CropStore + 'a> {
        Box::new(self.crops.clone())
    }

    fn get_task_store<'a>(&'a self) -> Box<dyn TaskStore + 'a> {
        Box::new(self.tasks.clone())
    }

    fn get_marketplace_store<'a>(&'a self) -> Box<dyn MarketplaceStore + 'a> {
        Box::new(self.marketplace.clone())
    }

    fn get_learning_store<'a>(&'a self) -> Box<dyn LearningStore + 'a> {
        Box::new(self.learning.clone())
    }

    fn get_weather_store<'a>(&'a self) -> Box<dyn WeatherStore + 'a> {
        Box::new(self.weather.clone())
    }

    fn get_recommendation_store<'a>(&'a self) -> Box<dyn RecommendationStore + 'a> {
        Box::new(self.recommendations.clone())
    }
}
