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

//! Behaviour every backend must share, checked against each available `StoreFactory`.

use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use pretty_assertions::assert_eq;

use super::memory::MemoryStoreFactory;
use super::*;
use crate::crops::store::{Crop, CropStoreError, HealthStatus, NewCrop};
use crate::devices::store::{
    Device, DeviceStatus, NewDevice, NewSensorReading, SensorReading, SensorType,
};
use crate::farms::store::{Farm, NewFarm};
use crate::learning::store::{
    Difficulty, LearningModule, LearningProgress, LearningStoreError, NewLearningModule,
    NewLearningProgress,
};
use crate::marketplace::store::{
    Listing, NewListing, NewTransaction, Transaction, TransactionType,
};
use crate::recommendations::store::{NewRecommendation, Recommendation};
use crate::tasks::store::{NewTask, Task, TaskPriority};
use crate::users::store::{NewUser, User, UserStoreError};
use crate::weather::store::{Forecast, NewForecast, WeatherCondition, WeatherStoreError};

fn factories() -> Vec<(&'static str, Box<dyn StoreFactory>)> {
    let mut factories: Vec<(&'static str, Box<dyn StoreFactory>)> =
        vec![("memory", Box::new(MemoryStoreFactory::new()))];

    #[cfg(feature = "sqlite")]
    factories.push((
        "sqlite",
        create_store_factory(&ConnectionUri::Sqlite(":memory:".to_string()))
            .expect("Failed to create sqlite store factory"),
    ));

    factories
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "password123".to_string(),
        display_name: "Priya Singh".to_string(),
        location: Some("Barabanki".to_string()),
        preferred_language: None,
    }
}

fn new_forecast(date: NaiveDate, rainfall: Option<f64>) -> NewForecast {
    NewForecast {
        location: "Barabanki".to_string(),
        forecast_date: date,
        temperature: Some(30.0),
        min_temperature: Some(25.0),
        max_temperature: Some(34.0),
        humidity: Some(65.0),
        rainfall,
        condition: Some(WeatherCondition::PartlyCloudy),
    }
}

#[test]
fn users_get_defaults_and_unique_usernames() {
    for (backend, factory) in factories() {
        let store = factory.get_user_store();

        let user = store.create_user(new_user("priya")).expect(backend);
        assert_eq!(user.id, 1, "{}", backend);
        assert_eq!(user.preferred_language, "en", "{}", backend);
        assert_eq!(user.role, "farmer", "{}", backend);

        match store.create_user(new_user("priya")) {
            Err(UserStoreError::ConstraintViolationError(_)) => (),
            res => panic!("{}: expected ConstraintViolationError, got {:?}", backend, res),
        }

        let second = store.create_user(new_user("arjun")).expect(backend);
        assert_eq!(second.id, 2, "{}: a rejected insert must not use an id", backend);

        assert_eq!(
            store.get_user_by_username("priya").expect(backend),
            Some(user.clone()),
            "{}",
            backend
        );
        assert_eq!(store.get_user(user.id).expect(backend), Some(user), "{}", backend);
        assert_eq!(store.get_user(99).expect(backend), None, "{}", backend);
    }
}

#[test]
fn devices_and_sensor_readings() {
    for (backend, factory) in factories() {
        let store = factory.get_device_store();

        let device = store
            .create_device(NewDevice {
                user_id: 1,
                farm_id: Some(1),
                name: "Field Station".to_string(),
                device_type: "SakhiSense Station".to_string(),
                location: None,
                status: None,
                battery_level: Some(80),
            })
            .expect(backend);
        assert_eq!(device.status, DeviceStatus::Online, "{}", backend);

        let updated = store
            .update_device_status(device.id, DeviceStatus::LowSignal, None)
            .expect(backend);
        assert_eq!(updated.status, DeviceStatus::LowSignal, "{}", backend);
        assert_eq!(updated.battery_level, Some(80), "{}", backend);
        assert!(updated.last_seen >= device.last_seen, "{}", backend);
        assert!(
            store
                .update_device_status(42, DeviceStatus::Online, None)
                .is_err(),
            "{}",
            backend
        );

        let base = NaiveDate::from_ymd(2024, 6, 1).and_hms(6, 0, 0);
        for (hours, value) in &[(0, 41.0), (2, 38.5), (1, 40.0)] {
            store
                .create_sensor_reading(NewSensorReading {
                    device_id: device.id,
                    sensor_type: SensorType::SoilMoisture,
                    value: *value,
                    unit: "%".to_string(),
                    timestamp: Some(base + Duration::hours(*hours)),
                })
                .expect(backend);
        }
        store
            .create_sensor_reading(NewSensorReading {
                device_id: device.id,
                sensor_type: SensorType::SoilPh,
                value: 6.8,
                unit: "pH".to_string(),
                timestamp: None,
            })
            .expect(backend);

        let values = store
            .list_sensor_readings(device.id, SensorType::SoilMoisture, None)
            .expect(backend)
            .into_iter()
            .map(|reading| reading.value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![38.5, 40.0, 41.0], "{}: newest first", backend);

        let latest = store
            .list_sensor_readings(device.id, SensorType::SoilMoisture, Some(1))
            .expect(backend);
        assert_eq!(latest.len(), 1, "{}", backend);
        assert_eq!(latest[0].value, 38.5, "{}", backend);

        assert!(
            store
                .list_sensor_readings(device.id, SensorType::SoilMoisture, Some(0))
                .expect(backend)
                .is_empty(),
            "{}",
            backend
        );
        assert!(
            store
                .list_sensor_readings(device.id, SensorType::LightLevel, None)
                .expect(backend)
                .is_empty(),
            "{}",
            backend
        );
    }
}

#[test]
fn crops_and_tasks() {
    for (backend, factory) in factories() {
        let crops = factory.get_crop_store();
        let crop = crops
            .create_crop(NewCrop {
                user_id: 1,
                farm_id: Some(1),
                name: "Rice".to_string(),
                variety: Some("Basmati".to_string()),
                planting_date: Some(NaiveDate::from_ymd(2024, 6, 15).and_hms(0, 0, 0)),
                harvest_date: None,
                status: None,
                health_status: None,
                area: Some(2.5),
            })
            .expect(backend);
        assert_eq!(crop.status, "active", "{}", backend);
        assert_eq!(crop.health_status, HealthStatus::Good, "{}", backend);

        let updated = crops
            .update_crop_status(crop.id, "harvested", Some(HealthStatus::Poor))
            .expect(backend);
        assert_eq!(updated.status, "harvested", "{}", backend);
        assert_eq!(updated.health_status, HealthStatus::Poor, "{}", backend);
        match crops.update_crop_status(7, "active", None) {
            Err(CropStoreError::NotFoundError(_)) => (),
            res => panic!("{}: expected NotFoundError, got {:?}", backend, res),
        }
        assert_eq!(
            crops.list_crops_by_farm(1).expect(backend),
            vec![updated],
            "{}",
            backend
        );

        let tasks = factory.get_task_store();
        let task = tasks
            .create_task(NewTask {
                user_id: 1,
                farm_id: Some(1),
                crop_id: Some(crop.id),
                title: "Transplant seedlings".to_string(),
                description: None,
                scheduled_date: None,
                priority: Some(TaskPriority::High),
            })
            .expect(backend);
        assert!(!task.completed, "{}", backend);
        assert_eq!(task.completed_date, None, "{}", backend);

        let done = tasks.update_task_completion(task.id, true).expect(backend);
        assert!(done.completed && done.completed_date.is_some(), "{}", backend);
        let reopened = tasks.update_task_completion(task.id, false).expect(backend);
        assert!(!reopened.completed, "{}", backend);
        assert_eq!(reopened.completed_date, None, "{}", backend);

        assert_eq!(
            tasks.list_tasks_by_crop(crop.id).expect(backend),
            vec![reopened],
            "{}",
            backend
        );
        assert!(tasks.list_tasks_by_user(2).expect(backend).is_empty(), "{}", backend);
    }
}

#[test]
fn marketplace_listings_and_transactions() {
    for (backend, factory) in factories() {
        let store = factory.get_marketplace_store();

        let listing = store
            .create_listing(NewListing {
                user_id: 1,
                crop_name: "Wheat".to_string(),
                variety: None,
                quantity: 500.0,
                unit: "kg".to_string(),
                price: 24.5,
                currency: None,
                description: None,
                location: Some("Barabanki".to_string()),
                is_organic: None,
            })
            .expect(backend);
        assert_eq!(listing.currency, "INR", "{}", backend);
        assert!(!listing.is_organic && !listing.is_verified, "{}", backend);

        for transaction_type in &[TransactionType::Harvest, TransactionType::Sale] {
            store
                .create_transaction(NewTransaction {
                    user_id: 1,
                    listing_id: Some(listing.id),
                    transaction_type: *transaction_type,
                    details: Some(serde_json::json!({"quantity": 500})),
                    transaction_hash: Some("0xabc".to_string()),
                })
                .expect(backend);
        }

        let types = store
            .list_transactions_by_listing(listing.id)
            .expect(backend)
            .into_iter()
            .map(|transaction| transaction.transaction_type)
            .collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![TransactionType::Harvest, TransactionType::Sale],
            "{}",
            backend
        );
        assert_eq!(store.list_listings().expect(backend), vec![listing], "{}", backend);
    }
}

#[test]
fn learning_progress_is_unique_and_upserted() {
    for (backend, factory) in factories() {
        let store = factory.get_learning_store();

        let module = store
            .create_module(NewLearningModule {
                title: "Drip irrigation basics".to_string(),
                description: None,
                duration_minutes: Some(30),
                lesson_count: Some(4),
                difficulty: None,
            })
            .expect(backend);
        assert_eq!(module.difficulty, Difficulty::Beginner, "{}", backend);

        let progress = store
            .create_progress(NewLearningProgress {
                user_id: 1,
                module_id: module.id,
                progress: None,
                completed: None,
            })
            .expect(backend);
        assert_eq!(progress.progress, 0, "{}", backend);

        match store.create_progress(NewLearningProgress {
            user_id: 1,
            module_id: module.id,
            progress: Some(50),
            completed: None,
        }) {
            Err(LearningStoreError::ConstraintViolationError(_)) => (),
            res => panic!("{}: expected ConstraintViolationError, got {:?}", backend, res),
        }

        let updated = store
            .update_progress(1, module.id, 60, false)
            .expect(backend);
        assert_eq!(updated.id, progress.id, "{}", backend);
        assert_eq!(updated.progress, 60, "{}", backend);

        let inserted = store.update_progress(2, module.id, 10, false).expect(backend);
        assert_eq!(inserted.id, progress.id + 1, "{}", backend);

        assert_eq!(
            store.list_progress_by_user(1).expect(backend),
            vec![updated],
            "{}",
            backend
        );
    }
}

#[test]
fn weather_forecast_windows() {
    for (backend, factory) in factories() {
        let store = factory.get_weather_store();
        let today = Utc::now().date_naive();

        for offset in 0..10 {
            store
                .create_forecast(new_forecast(today + Duration::days(offset), None))
                .expect(backend);
        }
        store
            .create_forecast(new_forecast(today - Duration::days(1), Some(12.0)))
            .expect(backend);

        match store.create_forecast(new_forecast(today, None)) {
            Err(WeatherStoreError::ConstraintViolationError(_)) => (),
            res => panic!("{}: expected ConstraintViolationError, got {:?}", backend, res),
        }

        let week = store.list_forecasts("Barabanki", today, 7).expect(backend);
        assert_eq!(week.len(), 7, "{}", backend);
        assert_eq!(week[0].forecast_date, today, "{}", backend);
        assert_eq!(
            week[6].forecast_date,
            today + Duration::days(6),
            "{}",
            backend
        );

        assert!(
            store
                .list_forecasts("Barabanki", today, 0)
                .expect(backend)
                .is_empty(),
            "{}",
            backend
        );

        let latest = store
            .get_forecast("Barabanki", None)
            .expect(backend)
            .expect("no forecast");
        assert_eq!(latest.forecast_date, today + Duration::days(9), "{}", backend);

        let yesterday = store
            .get_forecast("Barabanki", Some(today - Duration::days(1)))
            .expect(backend)
            .expect("no forecast");
        assert_eq!(yesterday.rainfall, Some(12.0), "{}", backend);
        assert_eq!(
            yesterday.condition,
            Some(WeatherCondition::PartlyCloudy),
            "{}",
            backend
        );

        assert_eq!(
            store.get_forecast("Sitapur", None).expect(backend),
            None,
            "{}",
            backend
        );
    }
}

#[test]
fn recommendations_by_user_and_location() {
    for (backend, factory) in factories() {
        let store = factory.get_recommendation_store();

        let owners = [(Some(1), "Barabanki"), (None, "Barabanki"), (Some(1), "Gonda")];
        for (user_id, location) in &owners {
            store
                .create_recommendation(NewRecommendation {
                    user_id: *user_id,
                    location: Some(location.to_string()),
                    crop_name: "Chickpea".to_string(),
                    variety: None,
                    match_percentage: Some(82),
                    reason: Some("Suited to loamy soil".to_string()),
                })
                .expect(backend);
        }

        let by_user = store
            .list_recommendations_by_user(1)
            .expect(backend)
            .into_iter()
            .map(|recommendation| recommendation.id)
            .collect::<Vec<_>>();
        assert_eq!(by_user, vec![1, 3], "{}", backend);

        let by_location = store
            .list_recommendations_by_location("Barabanki")
            .expect(backend)
            .into_iter()
            .map(|recommendation| recommendation.id)
            .collect::<Vec<_>>();
        assert_eq!(by_location, vec![1, 2], "{}", backend);
    }
}

#[test]
fn farms_round_trip() {
    for (backend, factory) in factories() {
        let store = factory.get_farm_store();

        let farm = store
            .create_farm(NewFarm {
                user_id: 1,
                name: "Green Valley Farm".to_string(),
                location: Some("Barabanki".to_string()),
                size: Some(5.5),
                description: Some("Wheat and rice".to_string()),
            })
            .expect(backend);
        assert_eq!(
            farm,
            Farm {
                id: 1,
                user_id: 1,
                name: "Green Valley Farm".to_string(),
                location: Some("Barabanki".to_string()),
                size: Some(5.5),
                description: Some("Wheat and rice".to_string()),
            },
            "{}",
            backend
        );

        let bare = store
            .create_farm(NewFarm {
                user_id: 1,
                name: "River Plot".to_string(),
                location: None,
                size: None,
                description: None,
            })
            .expect(backend);

        assert_eq!(store.get_farm(farm.id).expect(backend), Some(farm.clone()), "{}", backend);
        assert_eq!(store.get_farm(bare.id).expect(backend), Some(bare.clone()), "{}", backend);
        assert_eq!(store.get_farm(99).expect(backend), None, "{}", backend);
        assert_eq!(
            store.list_farms_by_user(1).expect(backend),
            vec![farm, bare],
            "{}",
            backend
        );
        assert!(store.list_farms_by_user(2).expect(backend).is_empty(), "{}", backend);
    }
}

#[test]
fn created_records_read_back_unchanged() {
    for (backend, factory) in factories() {
        let devices = factory.get_device_store();
        let device = devices
            .create_device(NewDevice {
                user_id: 1,
                farm_id: None,
                name: "Pump Controller".to_string(),
                device_type: "SakhiFlow".to_string(),
                location: Some("North well".to_string()),
                status: Some(DeviceStatus::Offline),
                battery_level: None,
            })
            .expect(backend);
        assert_eq!(devices.get_device(device.id).expect(backend), Some(device), "{}", backend);

        let crops = factory.get_crop_store();
        let crop = crops
            .create_crop(NewCrop {
                user_id: 1,
                farm_id: None,
                name: "Mustard".to_string(),
                variety: None,
                planting_date: Some(NaiveDate::from_ymd(2024, 10, 20).and_hms(0, 0, 0)),
                harvest_date: Some(NaiveDate::from_ymd(2025, 2, 28).and_hms(0, 0, 0)),
                status: Some("planned".to_string()),
                health_status: Some(HealthStatus::NeedsAttention),
                area: Some(1.25),
            })
            .expect(backend);
        assert_eq!(crops.get_crop(crop.id).expect(backend), Some(crop.clone()), "{}", backend);

        let tasks = factory.get_task_store();
        let task = tasks
            .create_task(NewTask {
                user_id: 1,
                farm_id: None,
                crop_id: Some(crop.id),
                title: "Apply compost".to_string(),
                description: Some("Two trolleys".to_string()),
                scheduled_date: Some(NaiveDate::from_ymd(2024, 10, 18).and_hms(7, 30, 0)),
                priority: None,
            })
            .expect(backend);
        assert_eq!(task.priority, TaskPriority::Medium, "{}", backend);
        assert_eq!(tasks.get_task(task.id).expect(backend), Some(task.clone()), "{}", backend);
        let done = tasks.update_task_completion(task.id, true).expect(backend);
        assert_eq!(tasks.get_task(task.id).expect(backend), Some(done), "{}", backend);

        let marketplace = factory.get_marketplace_store();
        let listing = marketplace
            .create_listing(NewListing {
                user_id: 1,
                crop_name: "Rice".to_string(),
                variety: Some("Basmati".to_string()),
                quantity: 1200.0,
                unit: "kg".to_string(),
                price: 38.0,
                currency: Some("USD".to_string()),
                description: Some("Sorted and dried".to_string()),
                location: None,
                is_organic: Some(true),
            })
            .expect(backend);
        assert_eq!(
            marketplace.get_listing(listing.id).expect(backend),
            Some(listing.clone()),
            "{}",
            backend
        );
        let transaction = marketplace
            .create_transaction(NewTransaction {
                user_id: 1,
                listing_id: Some(listing.id),
                transaction_type: TransactionType::MarketListing,
                details: Some(serde_json::json!({
                    "vehicle": "UP-41-T-2231",
                    "stops": ["Barabanki", "Lucknow"],
                    "sealed": true
                })),
                transaction_hash: None,
            })
            .expect(backend);
        assert_eq!(
            marketplace.get_transaction(transaction.id).expect(backend),
            Some(transaction),
            "{}",
            backend
        );
        assert_eq!(marketplace.get_listing(99).expect(backend), None, "{}", backend);

        let learning = factory.get_learning_store();
        let module = learning
            .create_module(NewLearningModule {
                title: "Soil testing".to_string(),
                description: Some("Reading a soil health card".to_string()),
                duration_minutes: None,
                lesson_count: Some(3),
                difficulty: Some(Difficulty::Advanced),
            })
            .expect(backend);
        assert_eq!(
            learning.get_module(module.id).expect(backend),
            Some(module.clone()),
            "{}",
            backend
        );
        let progress = learning
            .create_progress(NewLearningProgress {
                user_id: 1,
                module_id: module.id,
                progress: Some(100),
                completed: Some(true),
            })
            .expect(backend);
        assert_eq!(
            learning.get_progress(1, module.id).expect(backend),
            Some(progress),
            "{}",
            backend
        );
        assert_eq!(learning.get_progress(2, module.id).expect(backend), None, "{}", backend);

        let recommendations = factory.get_recommendation_store();
        let recommendation = recommendations
            .create_recommendation(NewRecommendation {
                user_id: None,
                location: None,
                crop_name: "Pearl Millet".to_string(),
                variety: Some("HHB-67".to_string()),
                match_percentage: None,
                reason: None,
            })
            .expect(backend);
        assert_eq!(
            recommendations
                .get_recommendation(recommendation.id)
                .expect(backend),
            Some(recommendation),
            "{}",
            backend
        );
    }
}

#[test]
fn update_progress_refreshes_last_accessed_at() {
    for (backend, factory) in factories() {
        let store = factory.get_learning_store();

        let first = store.update_progress(1, 1, 20, false).expect(backend);
        thread::sleep(StdDuration::from_millis(5));
        let second = store.update_progress(1, 1, 40, false).expect(backend);

        assert_eq!(second.id, first.id, "{}", backend);
        assert!(
            second.last_accessed_at > first.last_accessed_at,
            "{}: {} is not after {}",
            backend,
            second.last_accessed_at,
            first.last_accessed_at
        );
        assert_eq!(
            store.get_progress(1, 1).expect(backend),
            Some(second),
            "{}",
            backend
        );
    }
}

/// Everything a scenario can read back, with server-set timestamps cleared.
#[derive(Debug, PartialEq)]
struct Snapshot {
    users: Vec<Option<User>>,
    farms: Vec<Farm>,
    devices: Vec<Device>,
    readings: Vec<SensorReading>,
    crops: Vec<Crop>,
    tasks: Vec<Task>,
    listings: Vec<Listing>,
    transactions: Vec<Transaction>,
    modules: Vec<LearningModule>,
    progress: Vec<LearningProgress>,
    forecasts: Vec<Forecast>,
    recommendations: Vec<Recommendation>,
}

fn cleared() -> NaiveDateTime {
    NaiveDate::from_ymd(2000, 1, 1).and_hms(0, 0, 0)
}

fn run_scenario(backend: &str, factory: &dyn StoreFactory) -> Snapshot {
    let users = factory.get_user_store();
    users.create_user(new_user("priya")).expect(backend);
    assert!(users.create_user(new_user("priya")).is_err(), "{}", backend);
    users.create_user(new_user("arjun")).expect(backend);

    let farms = factory.get_farm_store();
    for name in &["Green Valley Farm", "River Plot"] {
        farms
            .create_farm(NewFarm {
                user_id: 1,
                name: name.to_string(),
                location: None,
                size: Some(2.0),
                description: None,
            })
            .expect(backend);
    }

    let devices = factory.get_device_store();
    for (name, farm_id) in &[("Soil Sensor", Some(1)), ("Weather Mast", None)] {
        devices
            .create_device(NewDevice {
                user_id: 1,
                farm_id: *farm_id,
                name: name.to_string(),
                device_type: "SakhiSense Station".to_string(),
                location: None,
                status: None,
                battery_level: Some(64),
            })
            .expect(backend);
    }
    devices
        .update_device_status(2, DeviceStatus::Offline, Some(12))
        .expect(backend);
    let base = NaiveDate::from_ymd(2024, 6, 1).and_hms(6, 0, 0);
    for (hours, value) in &[(1, 31.0), (0, 33.5), (1, 30.5), (3, 29.0)] {
        devices
            .create_sensor_reading(NewSensorReading {
                device_id: 1,
                sensor_type: SensorType::SoilMoisture,
                value: *value,
                unit: "%".to_string(),
                timestamp: Some(base + Duration::hours(*hours)),
            })
            .expect(backend);
    }

    let crops = factory.get_crop_store();
    for (name, farm_id) in &[("Wheat", Some(1)), ("Chickpea", Some(2)), ("Rice", None)] {
        crops
            .create_crop(NewCrop {
                user_id: 1,
                farm_id: *farm_id,
                name: name.to_string(),
                variety: None,
                planting_date: Some(base),
                harvest_date: None,
                status: None,
                health_status: None,
                area: Some(1.5),
            })
            .expect(backend);
    }
    crops
        .update_crop_status(2, "harvested", Some(HealthStatus::Good))
        .expect(backend);

    let tasks = factory.get_task_store();
    for (title, crop_id, priority) in &[
        ("Irrigate", Some(1), Some(TaskPriority::High)),
        ("Weed", Some(1), None),
        ("Repair fence", None, Some(TaskPriority::Low)),
    ] {
        tasks
            .create_task(NewTask {
                user_id: 1,
                farm_id: Some(1),
                crop_id: *crop_id,
                title: title.to_string(),
                description: None,
                scheduled_date: Some(base + Duration::days(1)),
                priority: *priority,
            })
            .expect(backend);
    }
    tasks.update_task_completion(2, true).expect(backend);

    let marketplace = factory.get_marketplace_store();
    for (user_id, crop_name) in &[(1, "Wheat"), (2, "Onion"), (1, "Rice")] {
        marketplace
            .create_listing(NewListing {
                user_id: *user_id,
                crop_name: crop_name.to_string(),
                variety: None,
                quantity: 100.0,
                unit: "kg".to_string(),
                price: 20.0,
                currency: None,
                description: None,
                location: None,
                is_organic: None,
            })
            .expect(backend);
    }
    for (listing_id, transaction_type) in &[
        (Some(1), TransactionType::Harvest),
        (Some(3), TransactionType::MarketListing),
        (Some(1), TransactionType::Sale),
        (None, TransactionType::QualityCheck),
    ] {
        marketplace
            .create_transaction(NewTransaction {
                user_id: 1,
                listing_id: *listing_id,
                transaction_type: *transaction_type,
                details: Some(serde_json::json!({ "bags": 4 })),
                transaction_hash: Some("0x51f0".to_string()),
            })
            .expect(backend);
    }

    let learning = factory.get_learning_store();
    for title in &["Composting", "Drip irrigation"] {
        learning
            .create_module(NewLearningModule {
                title: title.to_string(),
                description: None,
                duration_minutes: Some(20),
                lesson_count: Some(2),
                difficulty: None,
            })
            .expect(backend);
    }
    learning
        .create_progress(NewLearningProgress {
            user_id: 1,
            module_id: 2,
            progress: Some(30),
            completed: None,
        })
        .expect(backend);
    learning.update_progress(1, 1, 100, true).expect(backend);
    learning.update_progress(1, 2, 70, false).expect(backend);

    let weather = factory.get_weather_store();
    let start = NaiveDate::from_ymd(2024, 6, 1);
    for offset in &[3, 0, 2, 1] {
        weather
            .create_forecast(new_forecast(start + Duration::days(*offset), Some(1.5)))
            .expect(backend);
    }

    let recommendations = factory.get_recommendation_store();
    for (user_id, location) in &[(Some(1), "Barabanki"), (None, "Barabanki"), (Some(2), "Gonda")] {
        recommendations
            .create_recommendation(NewRecommendation {
                user_id: *user_id,
                location: Some(location.to_string()),
                crop_name: "Maize".to_string(),
                variety: None,
                match_percentage: Some(75),
                reason: None,
            })
            .expect(backend);
    }

    let mut device_list = devices.list_devices_by_user(1).expect(backend);
    device_list.extend(devices.list_devices_by_farm(1).expect(backend));
    for device in device_list.iter_mut() {
        device.last_seen = cleared();
    }

    let mut readings = devices
        .list_sensor_readings(1, SensorType::SoilMoisture, None)
        .expect(backend);
    readings.extend(
        devices
            .list_sensor_readings(1, SensorType::SoilMoisture, Some(2))
            .expect(backend),
    );

    let mut crop_list = crops.list_crops_by_user(1).expect(backend);
    crop_list.extend(crops.list_crops_by_farm(2).expect(backend));

    let mut task_list = tasks.list_tasks_by_user(1).expect(backend);
    task_list.extend(tasks.list_tasks_by_crop(1).expect(backend));
    for task in task_list.iter_mut() {
        task.completed_date = task.completed_date.map(|_| cleared());
    }

    let mut listings = marketplace.list_listings().expect(backend);
    listings.extend(marketplace.list_listings_by_user(1).expect(backend));
    for listing in listings.iter_mut() {
        listing.created_at = cleared();
    }

    let mut transactions = marketplace.list_transactions_by_user(1).expect(backend);
    transactions.extend(marketplace.list_transactions_by_listing(1).expect(backend));
    for transaction in transactions.iter_mut() {
        transaction.timestamp = cleared();
    }

    let mut progress = learning.list_progress_by_user(1).expect(backend);
    for record in progress.iter_mut() {
        record.last_accessed_at = cleared();
    }

    let mut forecasts = weather.list_forecasts("Barabanki", start, 3).expect(backend);
    forecasts.extend(weather.get_forecast("Barabanki", None).expect(backend));

    let mut recommendation_list = recommendations
        .list_recommendations_by_user(1)
        .expect(backend);
    recommendation_list.extend(
        recommendations
            .list_recommendations_by_location("Barabanki")
            .expect(backend),
    );

    Snapshot {
        users: vec![
            users.get_user_by_username("priya").expect(backend),
            users.get_user(2).expect(backend),
            users.get_user(3).expect(backend),
        ],
        farms: farms.list_farms_by_user(1).expect(backend),
        devices: device_list,
        readings,
        crops: crop_list,
        tasks: task_list,
        listings,
        transactions,
        modules: learning.list_modules().expect(backend),
        progress,
        forecasts,
        recommendations: recommendation_list,
    }
}

#[test]
fn backends_agree_on_query_results() {
    let mut snapshots = factories()
        .into_iter()
        .map(|(backend, factory)| (backend, run_scenario(backend, &*factory)));

    let (reference_backend, reference) = snapshots.next().expect("no backends");
    assert_eq!(reference.readings[0].value, 29.0);
    assert_eq!(reference.readings.len(), 6);
    assert_eq!(reference.forecasts.len(), 4);
    assert_eq!(reference.users[2], None);

    for (backend, snapshot) in snapshots {
        assert_eq!(
            snapshot, reference,
            "{} disagrees with {}",
            backend, reference_backend
        );
    }
}
