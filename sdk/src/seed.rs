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

//! Demo data for a fresh deployment: one farmer in Barabanki with a farm, devices, crops,
//! forecasts, a marketplace listing and learning progress.

use std::error::Error;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::json;

use crate::crops::store::{HealthStatus, NewCrop};
use crate::devices::store::{DeviceStatus, NewDevice, NewSensorReading, SensorType};
use crate::error::InternalError;
use crate::farms::store::NewFarm;
use crate::learning::store::{Difficulty, NewLearningModule, NewLearningProgress};
use crate::marketplace::store::{NewListing, NewTransaction, TransactionType};
use crate::recommendations::store::NewRecommendation;
use crate::store::{current_timestamp, StoreFactory};
use crate::tasks::store::{NewTask, TaskPriority};
use crate::users::store::NewUser;
use crate::weather::store::{NewForecast, WeatherCondition};

pub const DEMO_USERNAME: &str = "priya";
pub const DEMO_LOCATION: &str = "Barabanki";

#[derive(Debug)]
pub enum SeedError {
    /// The demo user exists, so the backend has been seeded before.
    AlreadySeeded,
    InternalError(InternalError),
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SeedError::AlreadySeeded => None,
            SeedError::InternalError(err) => Some(err),
        }
    }
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeedError::AlreadySeeded => {
                write!(f, "Demo user '{}' already exists", DEMO_USERNAME)
            }
            SeedError::InternalError(err) => f.write_str(&err.to_string()),
        }
    }
}

impl From<InternalError> for SeedError {
    fn from(err: InternalError) -> Self {
        SeedError::InternalError(err)
    }
}

fn seed_error<E: Error + 'static>(err: E) -> SeedError {
    SeedError::InternalError(InternalError::from_source_with_prefix(
        Box::new(err),
        "Failed to seed demo data".to_string(),
    ))
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDateTime, SeedError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            SeedError::InternalError(InternalError::with_message(format!(
                "Invalid seed date {}-{}-{}",
                year, month, day
            )))
        })
}

/// Populates the backend behind `store_factory` with the demo farmer and their data.
///
/// Returns `SeedError::AlreadySeeded` without writing anything when the demo user exists.
pub fn seed_demo_data(store_factory: &dyn StoreFactory) -> Result<(), SeedError> {
    let user_store = store_factory.get_user_store();
    if user_store
        .get_user_by_username(DEMO_USERNAME)
        .map_err(seed_error)?
        .is_some()
    {
        return Err(SeedError::AlreadySeeded);
    }

    let user = user_store
        .create_user(NewUser {
            username: DEMO_USERNAME.to_string(),
            password: "password123".to_string(),
            display_name: "Priya Singh".to_string(),
            location: Some("Barabanki, Uttar Pradesh".to_string()),
            preferred_language: Some("hi".to_string()),
        })
        .map_err(seed_error)?;

    let farm = store_factory
        .get_farm_store()
        .create_farm(NewFarm {
            user_id: user.id,
            name: "Priya's Farm".to_string(),
            location: Some(DEMO_LOCATION.to_string()),
            size: Some(5.4),
            description: Some("Main agricultural farm with mixed crops".to_string()),
        })
        .map_err(seed_error)?;

    let device_store = store_factory.get_device_store();
    let mut device_ids = Vec::new();
    for (name, location, status, battery_level) in [
        ("AgroSakhi Band #1", "North Wheat Field", DeviceStatus::Online, 85),
        ("SakhiSense Station", "Central Hub", DeviceStatus::Online, 92),
        ("Pest Monitor", "East Rice Paddy", DeviceStatus::LowSignal, 42),
    ] {
        let device = device_store
            .create_device(NewDevice {
                user_id: user.id,
                farm_id: Some(farm.id),
                name: name.to_string(),
                device_type: name.trim_end_matches(" #1").to_string(),
                location: Some(location.to_string()),
                status: Some(status),
                battery_level: Some(battery_level),
            })
            .map_err(seed_error)?;
        device_ids.push(device.id);
    }

    // Ten days of readings ending today: three soil sensors on the band, pH on the station.
    let now = current_timestamp();
    for day in 0..10i64 {
        let timestamp = now - Duration::days(9 - day);
        let readings = [
            (device_ids[0], SensorType::SoilMoisture, 40.0 + ((day * 7) % 30) as f64, "%"),
            (device_ids[0], SensorType::SoilTemperature, 22.0 + ((day * 3) % 10) as f64, "°C"),
            (device_ids[0], SensorType::LightLevel, 50.0 + ((day * 11) % 50) as f64, "%"),
            (device_ids[1], SensorType::SoilPh, 6.0 + (day % 4) as f64 * 0.4, "pH"),
        ];
        for (device_id, sensor_type, value, unit) in readings {
            device_store
                .create_sensor_reading(NewSensorReading {
                    device_id,
                    sensor_type,
                    value,
                    unit: unit.to_string(),
                    timestamp: Some(timestamp),
                })
                .map_err(seed_error)?;
        }
    }

    let crop_store = store_factory.get_crop_store();
    let mut crop_ids = Vec::new();
    for (name, variety, planted, harvest, health_status, area) in [
        ("Wheat", "HD-2967", date(2022, 11, 15)?, date(2023, 4, 5)?, HealthStatus::Good, 2.5),
        (
            "Rice",
            "Pusa-1509",
            date(2022, 6, 20)?,
            date(2023, 3, 15)?,
            HealthStatus::NeedsAttention,
            1.8,
        ),
        ("Mustard", "Pusa Bold", date(2022, 10, 10)?, date(2023, 3, 25)?, HealthStatus::Good, 1.1),
    ] {
        let crop = crop_store
            .create_crop(NewCrop {
                user_id: user.id,
                farm_id: Some(farm.id),
                name: name.to_string(),
                variety: Some(variety.to_string()),
                planting_date: Some(planted),
                harvest_date: Some(harvest),
                status: Some("active".to_string()),
                health_status: Some(health_status),
                area: Some(area),
            })
            .map_err(seed_error)?;
        crop_ids.push(crop.id);
    }

    let task_store = store_factory.get_task_store();
    for (crop_id, title, description, priority) in [
        (
            crop_ids[0],
            "Irrigation check for wheat field",
            "Check irrigation levels and adjust if necessary",
            TaskPriority::High,
        ),
        (
            crop_ids[0],
            "Apply fertilizer to tomato plants",
            "Use organic fertilizer on kitchen garden tomatoes",
            TaskPriority::Medium,
        ),
        (
            crop_ids[1],
            "Inspect rice paddy for pest damage",
            "Look for signs of pest activity and document findings",
            TaskPriority::High,
        ),
    ] {
        task_store
            .create_task(NewTask {
                user_id: user.id,
                farm_id: Some(farm.id),
                crop_id: Some(crop_id),
                title: title.to_string(),
                description: Some(description.to_string()),
                scheduled_date: Some(now),
                priority: Some(priority),
            })
            .map_err(seed_error)?;
    }

    let weather_store = store_factory.get_weather_store();
    let today = Utc::now().date_naive();
    for day in 0..10i64 {
        let (rainfall, condition) = match day {
            3 => (15.0, WeatherCondition::Rainy),
            4 => (5.0, WeatherCondition::Cloudy),
            8 => (0.0, WeatherCondition::Cloudy),
            9 => (3.0, WeatherCondition::Cloudy),
            _ => (0.0, WeatherCondition::Sunny),
        };
        weather_store
            .create_forecast(NewForecast {
                location: DEMO_LOCATION.to_string(),
                forecast_date: today + Duration::days(day),
                temperature: Some(30.0 + (day % 6) as f64),
                min_temperature: Some(20.0 + (day % 5) as f64),
                max_temperature: Some(32.0 + (day % 4) as f64),
                humidity: Some(50.0 + ((day * 3) % 30) as f64),
                rainfall: Some(rainfall),
                condition: Some(condition),
            })
            .map_err(seed_error)?;
    }

    let recommendation_store = store_factory.get_recommendation_store();
    for (crop_name, variety, match_percentage, reason) in [
        ("Wheat", "HD-2967", 95, "Ideal for your soil pH and upcoming winter season"),
        ("Mustard", "Pusa Bold", 90, "Good companion crop with low water requirements"),
        ("Chickpea", "JG-11", 82, "Nitrogen-fixing crop ideal after rice harvest"),
    ] {
        recommendation_store
            .create_recommendation(NewRecommendation {
                user_id: Some(user.id),
                location: Some(DEMO_LOCATION.to_string()),
                crop_name: crop_name.to_string(),
                variety: Some(variety.to_string()),
                match_percentage: Some(match_percentage),
                reason: Some(reason.to_string()),
            })
            .map_err(seed_error)?;
    }

    let marketplace_store = store_factory.get_marketplace_store();
    let listing = marketplace_store
        .create_listing(NewListing {
            user_id: user.id,
            crop_name: "Wheat".to_string(),
            variety: Some("HD-2967".to_string()),
            quantity: 500.0,
            unit: "kg".to_string(),
            price: 2400.0,
            currency: Some("INR".to_string()),
            description: Some("Organically grown wheat, harvested last week".to_string()),
            location: Some(DEMO_LOCATION.to_string()),
            is_organic: Some(true),
        })
        .map_err(seed_error)?;
    for (transaction_type, details, transaction_hash) in [
        (
            TransactionType::Harvest,
            json!({
                "crop": "Wheat",
                "variety": "HD-2967",
                "quantity": "200 kg",
                "quality": "Grade A"
            }),
            "0x7e21...8f92",
        ),
        (
            TransactionType::QualityCheck,
            json!({
                "crop": "Wheat",
                "variety": "HD-2967",
                "moisture": "12%",
                "protein": "11.5%",
                "grade": "A"
            }),
            "0x9a45...2e71",
        ),
        (
            TransactionType::MarketListing,
            json!({
                "crop": "Wheat",
                "variety": "HD-2967",
                "quantity": "200 kg",
                "price": "₹2,240/quintal"
            }),
            "0x3f62...1a47",
        ),
    ] {
        marketplace_store
            .create_transaction(NewTransaction {
                user_id: user.id,
                listing_id: Some(listing.id),
                transaction_type,
                details: Some(details),
                transaction_hash: Some(transaction_hash.to_string()),
            })
            .map_err(seed_error)?;
    }

    let learning_store = store_factory.get_learning_store();
    let mut module_ids = Vec::new();
    for (title, description, duration_minutes, lesson_count, difficulty) in [
        (
            "Advanced Pest Management",
            "Learn environmentally friendly techniques to control pests without harmful chemicals.",
            150,
            6,
            Difficulty::Intermediate,
        ),
        (
            "Water Conservation Techniques",
            "Discover modern irrigation methods to reduce water usage while improving crop yields.",
            180,
            8,
            Difficulty::Intermediate,
        ),
        (
            "Organic Farming",
            "Comprehensive guide to organic farming practices and certification.",
            210,
            10,
            Difficulty::Beginner,
        ),
    ] {
        let module = learning_store
            .create_module(NewLearningModule {
                title: title.to_string(),
                description: Some(description.to_string()),
                duration_minutes: Some(duration_minutes),
                lesson_count: Some(lesson_count),
                difficulty: Some(difficulty),
            })
            .map_err(seed_error)?;
        module_ids.push(module.id);
    }
    learning_store
        .create_progress(NewLearningProgress {
            user_id: user.id,
            module_id: module_ids[2],
            progress: Some(65),
            completed: Some(false),
        })
        .map_err(seed_error)?;

    info!("Seeded demo data for user '{}'", DEMO_USERNAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::store::memory::MemoryStoreFactory;

    /// Verifies that seeding populates every store and that a second run is refused.
    #[test]
    fn test_seed_demo_data() {
        let factory = MemoryStoreFactory::new();
        seed_demo_data(&factory).expect("Failed to seed demo data");

        let user = factory
            .get_user_store()
            .get_user_by_username(DEMO_USERNAME)
            .expect("Failed to fetch user")
            .expect("Demo user missing");
        assert_eq!(user.display_name, "Priya Singh");

        assert_eq!(
            factory
                .get_farm_store()
                .list_farms_by_user(user.id)
                .expect("Failed to list farms")
                .len(),
            1
        );
        let devices = factory
            .get_device_store()
            .list_devices_by_user(user.id)
            .expect("Failed to list devices");
        assert_eq!(devices.len(), 3);
        assert_eq!(
            factory
                .get_device_store()
                .list_sensor_readings(devices[0].id, SensorType::SoilMoisture, None)
                .expect("Failed to list readings")
                .len(),
            10
        );
        assert_eq!(
            factory
                .get_crop_store()
                .list_crops_by_user(user.id)
                .expect("Failed to list crops")
                .len(),
            3
        );
        assert_eq!(
            factory
                .get_weather_store()
                .list_forecasts(DEMO_LOCATION, Utc::now().date_naive(), 10)
                .expect("Failed to list forecasts")
                .len(),
            10
        );
        let listings = factory
            .get_marketplace_store()
            .list_listings_by_user(user.id)
            .expect("Failed to list listings");
        assert_eq!(listings.len(), 1);
        assert_eq!(
            factory
                .get_marketplace_store()
                .list_transactions_by_listing(listings[0].id)
                .expect("Failed to list transactions")
                .len(),
            3
        );
        assert_eq!(
            factory
                .get_learning_store()
                .list_progress_by_user(user.id)
                .expect("Failed to list progress")[0]
                .progress,
            65
        );

        match seed_demo_data(&factory) {
            Err(SeedError::AlreadySeeded) => (),
            res => panic!("Expected AlreadySeeded, got {:?}", res),
        }
    }
}
