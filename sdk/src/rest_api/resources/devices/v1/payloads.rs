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

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::devices::store::{
    Device, DeviceStatus, NewDevice, NewSensorReading, SensorReading, SensorType,
};
use crate::rest_api::resources::utc;
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSlice {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub location: Option<String>,
    pub status: DeviceStatus,
    pub battery_level: Option<i32>,
    pub last_seen: DateTime<Utc>,
}

impl From<Device> for DeviceSlice {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            user_id: device.user_id,
            farm_id: device.farm_id,
            name: device.name,
            device_type: device.device_type,
            location: device.location,
            status: device.status,
            battery_level: device.battery_level,
            last_seen: utc(device.last_seen),
        }
    }
}

impl FromJson for NewDevice {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let device = NewDevice {
            user_id: validator.required_integer("userId"),
            farm_id: validator.optional_integer("farmId"),
            name: validator.required_non_empty("name"),
            device_type: validator.required_string("type"),
            location: validator.optional_string("location"),
            status: validator.optional_enum("status"),
            battery_level: validator.optional_in_range("batteryLevel", 0, 100),
        };
        validator.finish()?;
        Ok(device)
    }
}

/// Body of a device status change. The battery level is kept when not given.
#[derive(Debug, PartialEq)]
pub struct DeviceStatusUpdate {
    pub status: DeviceStatus,
    pub battery_level: Option<i32>,
}

impl FromJson for DeviceStatusUpdate {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let update = DeviceStatusUpdate {
            status: validator.required_enum("status"),
            battery_level: validator.optional_in_range("batteryLevel", 0, 100),
        };
        validator.finish()?;
        Ok(update)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReadingSlice {
    pub id: i64,
    pub device_id: i64,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

impl From<SensorReading> for SensorReadingSlice {
    fn from(reading: SensorReading) -> Self {
        Self {
            id: reading.id,
            device_id: reading.device_id,
            sensor_type: reading.sensor_type,
            value: reading.value,
            unit: reading.unit,
            timestamp: utc(reading.timestamp),
        }
    }
}

impl FromJson for NewSensorReading {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let reading = NewSensorReading {
            device_id: validator.required_integer("deviceId"),
            sensor_type: validator.required_enum("type"),
            value: validator.required_number("value"),
            unit: validator.required_string("unit"),
            timestamp: validator.optional_timestamp("timestamp"),
        };
        validator.finish()?;
        Ok(reading)
    }
}

/// Summary of every reading of one type from one device.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SensorStatistics {
    pub min: f64,
    pub max: f64,
    /// Rounded to two decimal places
    pub avg: f64,
    pub count: usize,
    pub unit: String,
}

impl SensorStatistics {
    /// Returns `None` when there are no readings to summarize.
    pub fn from_readings(readings: &[SensorReading]) -> Option<Self> {
        let first = readings.first()?;
        let (min, max, sum) = readings.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), reading| {
                (min.min(reading.value), max.max(reading.value), sum + reading.value)
            },
        );
        let avg = sum / readings.len() as f64;

        Some(Self {
            min,
            max,
            avg: (avg * 100.0).round() / 100.0,
            count: readings.len(),
            unit: first.unit.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reading(id: i64, value: f64) -> SensorReading {
        SensorReading {
            id,
            device_id: 1,
            sensor_type: SensorType::SoilMoisture,
            value,
            unit: "%".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .and_then(|date| date.and_hms_opt(6, 0, id as u32))
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn test_sensor_statistics() {
        let readings = vec![reading(1, 40.0), reading(2, 41.5), reading(3, 43.0), reading(4, 40.0)];

        assert_eq!(
            SensorStatistics::from_readings(&readings),
            Some(SensorStatistics {
                min: 40.0,
                max: 43.0,
                avg: 41.13,
                count: 4,
                unit: "%".to_string(),
            })
        );
        assert_eq!(SensorStatistics::from_readings(&[]), None);
    }

    #[test]
    fn test_sensor_reading_serializes_type_and_utc_timestamp() {
        let json = serde_json::to_value(SensorReadingSlice::from(reading(1, 42.0)))
            .expect("serializable");

        assert_eq!(json["type"], "soil_moisture");
        assert_eq!(json["deviceId"], 1);
        assert_eq!(json["timestamp"], "2024-06-01T06:00:01Z");
    }

    #[test]
    fn test_status_update_rejects_battery_out_of_range() {
        let err =
            DeviceStatusUpdate::from_json(&json!({ "status": "offline", "batteryLevel": 120 }))
                .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "batteryLevel");

        let update = DeviceStatusUpdate::from_json(&json!({ "status": "offline" }))
            .expect("valid update");
        assert_eq!(
            update,
            DeviceStatusUpdate {
                status: DeviceStatus::Offline,
                battery_level: None,
            }
        );
    }
}
