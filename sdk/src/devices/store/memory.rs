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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;
use crate::store::current_timestamp;

use super::{
    Device, DeviceStatus, DeviceStore, DeviceStoreError, NewDevice, NewSensorReading,
    SensorReading, SensorType,
};

#[derive(Default)]
struct DeviceTables {
    last_device_id: i64,
    devices: BTreeMap<i64, Device>,
    last_reading_id: i64,
    readings: BTreeMap<i64, SensorReading>,
}

#[derive(Clone, Default)]
pub struct MemoryDeviceStore {
    inner: Arc<Mutex<DeviceTables>>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DeviceStoreError {
    DeviceStoreError::InternalError(InternalError::with_message(
        "Cannot access devices: mutex lock poisoned".to_string(),
    ))
}

impl DeviceStore for MemoryDeviceStore {
    fn get_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.devices.get(&id).cloned())
    }

    fn list_devices_by_user(&self, user_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .devices
            .values()
            .filter(|device| device.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_devices_by_farm(&self, farm_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .devices
            .values()
            .filter(|device| device.farm_id == Some(farm_id))
            .cloned()
            .collect())
    }

    fn create_device(&self, device: NewDevice) -> Result<Device, DeviceStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_device_id += 1;
        let device = device.into_device(inner.last_device_id);
        inner.devices.insert(device.id, device.clone());

        Ok(device)
    }

    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
    ) -> Result<Device, DeviceStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let device = inner
            .devices
            .get_mut(&id)
            .ok_or_else(|| DeviceStoreError::NotFoundError(format!("device {}", id)))?;

        device.status = status;
        if battery_level.is_some() {
            device.battery_level = battery_level;
        }
        device.last_seen = current_timestamp();

        Ok(device.clone())
    }

    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        let mut readings = inner
            .readings
            .values()
            .filter(|reading| reading.device_id == device_id && reading.sensor_type == sensor_type)
            .cloned()
            .collect::<Vec<_>>();

        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        if let Some(limit) = limit {
            readings.truncate(limit.max(0) as usize);
        }

        Ok(readings)
    }

    fn create_sensor_reading(
        &self,
        reading: NewSensorReading,
    ) -> Result<SensorReading, DeviceStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_reading_id += 1;
        let reading = reading.into_reading(inner.last_reading_id);
        inner.readings.insert(reading.id, reading.clone());

        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_unknown_device() {
        let store = MemoryDeviceStore::new();

        match store.update_device_status(42, DeviceStatus::Offline, None) {
            Err(DeviceStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }
    }
}
