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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;
pub mod memory;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::InvalidArgumentError;
use crate::store::current_timestamp;

pub use error::DeviceStoreError;

/// Connectivity reported for a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
    LowSignal,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::LowSignal => "low_signal",
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus::Online
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(DeviceStatus::Online),
            "offline" => Ok(DeviceStatus::Offline),
            "low_signal" => Ok(DeviceStatus::LowSignal),
            _ => Err(InvalidArgumentError::new(
                "status".to_string(),
                format!("unknown device status '{}'", s),
            )),
        }
    }
}

/// What a sensor reading measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    SoilMoisture,
    SoilTemperature,
    LightLevel,
    SoilPh,
}

impl SensorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::SoilMoisture => "soil_moisture",
            SensorType::SoilTemperature => "soil_temperature",
            SensorType::LightLevel => "light_level",
            SensorType::SoilPh => "soil_ph",
        }
    }
}

impl Default for SensorType {
    fn default() -> Self {
        SensorType::SoilMoisture
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soil_moisture" => Ok(SensorType::SoilMoisture),
            "soil_temperature" => Ok(SensorType::SoilTemperature),
            "light_level" => Ok(SensorType::LightLevel),
            "soil_ph" => Ok(SensorType::SoilPh),
            _ => Err(InvalidArgumentError::new(
                "type".to_string(),
                format!("unknown sensor type '{}'", s),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Device {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub device_type: String,
    pub location: Option<String>,
    pub status: DeviceStatus,
    /// Percentage, 0 to 100.
    pub battery_level: Option<i32>,
    pub last_seen: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDevice {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub device_type: String,
    pub location: Option<String>,
    pub status: Option<DeviceStatus>,
    pub battery_level: Option<i32>,
}

impl NewDevice {
    pub(crate) fn into_device(self, id: i64) -> Device {
        Device {
            id,
            user_id: self.user_id,
            farm_id: self.farm_id,
            name: self.name,
            device_type: self.device_type,
            location: self.location,
            status: self.status.unwrap_or_default(),
            battery_level: self.battery_level,
            last_seen: current_timestamp(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub id: i64,
    pub device_id: i64,
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSensorReading {
    pub device_id: i64,
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    /// Defaults to the time of insertion.
    pub timestamp: Option<NaiveDateTime>,
}

impl NewSensorReading {
    pub(crate) fn into_reading(self, id: i64) -> SensorReading {
        SensorReading {
            id,
            device_id: self.device_id,
            sensor_type: self.sensor_type,
            value: self.value,
            unit: self.unit,
            timestamp: self.timestamp.unwrap_or_else(current_timestamp),
        }
    }
}

pub trait DeviceStore: Send + Sync {
    fn get_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError>;

    fn list_devices_by_user(&self, user_id: i64) -> Result<Vec<Device>, DeviceStoreError>;

    fn list_devices_by_farm(&self, farm_id: i64) -> Result<Vec<Device>, DeviceStoreError>;

    fn create_device(&self, device: NewDevice) -> Result<Device, DeviceStoreError>;

    /// Sets the status of a device and marks it as seen now. The battery level is only
    /// replaced when one is given.
    ///
    /// Returns `NotFoundError` if the device does not exist.
    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
    ) -> Result<Device, DeviceStoreError>;

    /// Lists readings of one type from one device, newest first, at most `limit` of them.
    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError>;

    fn create_sensor_reading(
        &self,
        reading: NewSensorReading,
    ) -> Result<SensorReading, DeviceStoreError>;
}

impl<DS> DeviceStore for Box<DS>
where
    DS: DeviceStore + ?Sized,
{
    fn get_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        (**self).get_device(id)
    }

    fn list_devices_by_user(&self, user_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        (**self).list_devices_by_user(user_id)
    }

    fn list_devices_by_farm(&self, farm_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        (**self).list_devices_by_farm(farm_id)
    }

    fn create_device(&self, device: NewDevice) -> Result<Device, DeviceStoreError> {
        (**self).create_device(device)
    }

    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
    ) -> Result<Device, DeviceStoreError> {
        (**self).update_device_status(id, status, battery_level)
    }

    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        (**self).list_sensor_readings(device_id, sensor_type, limit)
    }

    fn create_sensor_reading(
        &self,
        reading: NewSensorReading,
    ) -> Result<SensorReading, DeviceStoreError> {
        (**self).create_sensor_reading(reading)
    }
}
