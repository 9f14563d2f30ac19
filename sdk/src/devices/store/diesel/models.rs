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

use chrono::NaiveDateTime;

use super::schema::{devices, sensor_readings};
use crate::devices::store::{
    Device, DeviceStoreError, NewDevice, NewSensorReading, SensorReading,
};
use crate::error::InternalError;
use crate::store::current_timestamp;

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "devices"]
pub struct NewDeviceModel {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub device_type: String,
    pub location: Option<String>,
    pub status: String,
    pub battery_level: Option<i32>,
    pub last_seen: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct DeviceModel {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub device_type: String,
    pub location: Option<String>,
    pub status: String,
    pub battery_level: Option<i32>,
    pub last_seen: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "sensor_readings"]
pub struct NewSensorReadingModel {
    pub device_id: i64,
    pub sensor_type: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct SensorReadingModel {
    pub id: i64,
    pub device_id: i64,
    pub sensor_type: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: NaiveDateTime,
}

impl From<NewDevice> for NewDeviceModel {
    fn from(device: NewDevice) -> Self {
        Self {
            user_id: device.user_id,
            farm_id: device.farm_id,
            name: device.name,
            device_type: device.device_type,
            location: device.location,
            status: device.status.unwrap_or_default().to_string(),
            battery_level: device.battery_level,
            last_seen: current_timestamp(),
        }
    }
}

impl TryFrom<DeviceModel> for Device {
    type Error = DeviceStoreError;

    fn try_from(model: DeviceModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            farm_id: model.farm_id,
            name: model.name,
            device_type: model.device_type,
            location: model.location,
            status: model.status.parse().map_err(|err| {
                DeviceStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
            battery_level: model.battery_level,
            last_seen: model.last_seen,
        })
    }
}

impl From<NewSensorReading> for NewSensorReadingModel {
    fn from(reading: NewSensorReading) -> Self {
        Self {
            device_id: reading.device_id,
            sensor_type: reading.sensor_type.to_string(),
            value: reading.value,
            unit: reading.unit,
            timestamp: reading.timestamp.unwrap_or_else(current_timestamp),
        }
    }
}

impl TryFrom<SensorReadingModel> for SensorReading {
    type Error = DeviceStoreError;

    fn try_from(model: SensorReadingModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            device_id: model.device_id,
            sensor_type: model.sensor_type.parse().map_err(|err| {
                DeviceStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
            value: model.value,
            unit: model.unit,
            timestamp: model.timestamp,
        })
    }
}
