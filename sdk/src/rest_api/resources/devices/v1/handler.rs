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

use serde_json::Value;

use crate::devices::store::{
    DeviceStore, DeviceStoreError, NewDevice, NewSensorReading, SensorReading, SensorType,
};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::{DeviceSlice, DeviceStatusUpdate, SensorReadingSlice, SensorStatistics};

fn store_error(err: DeviceStoreError) -> ErrorResponse {
    match err {
        DeviceStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        DeviceStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        DeviceStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        DeviceStoreError::NotFoundError(_) => ErrorResponse::new(404, "Device not found"),
    }
}

fn parse_sensor_type(sensor_type: &str) -> Result<SensorType, ErrorResponse> {
    sensor_type
        .parse()
        .map_err(|_| ErrorResponse::new(400, "Invalid sensor type"))
}

fn parse_limit(limit: Option<&str>) -> Result<Option<i64>, ErrorResponse> {
    match limit {
        None => Ok(None),
        Some(limit) => match limit.parse::<i64>() {
            Ok(limit) if limit >= 0 => Ok(Some(limit)),
            _ => Err(ErrorResponse::new(400, "Invalid limit")),
        },
    }
}

pub fn list_devices_by_user<'a>(
    store: Box<dyn DeviceStore + 'a>,
    user_id: &str,
) -> Result<Vec<DeviceSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_devices_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(DeviceSlice::from)
        .collect())
}

pub fn create_device<'a>(
    store: Box<dyn DeviceStore + 'a>,
    body: &Value,
) -> Result<DeviceSlice, ErrorResponse> {
    let new_device = NewDevice::from_json(body)?;
    store
        .create_device(new_device)
        .map(DeviceSlice::from)
        .map_err(store_error)
}

pub fn update_device_status<'a>(
    store: Box<dyn DeviceStore + 'a>,
    id: &str,
    body: &Value,
) -> Result<DeviceSlice, ErrorResponse> {
    let id = parse_id(id, "device")?;
    let update = DeviceStatusUpdate::from_json(body)?;
    store
        .update_device_status(id, update.status, update.battery_level)
        .map(DeviceSlice::from)
        .map_err(store_error)
}

fn readings<'a>(
    store: Box<dyn DeviceStore + 'a>,
    device_id: &str,
    sensor_type: &str,
    limit: Option<i64>,
) -> Result<Vec<SensorReading>, ErrorResponse> {
    let device_id = parse_id(device_id, "device")?;
    let sensor_type = parse_sensor_type(sensor_type)?;
    store
        .list_sensor_readings(device_id, sensor_type, limit)
        .map_err(store_error)
}

/// Lists a device's readings of one type, newest first.
pub fn list_sensor_readings<'a>(
    store: Box<dyn DeviceStore + 'a>,
    device_id: &str,
    sensor_type: &str,
    limit: Option<&str>,
) -> Result<Vec<SensorReadingSlice>, ErrorResponse> {
    let limit = parse_limit(limit)?;
    Ok(readings(store, device_id, sensor_type, limit)?
        .into_iter()
        .map(SensorReadingSlice::from)
        .collect())
}

pub fn get_latest_sensor_reading<'a>(
    store: Box<dyn DeviceStore + 'a>,
    device_id: &str,
    sensor_type: &str,
) -> Result<SensorReadingSlice, ErrorResponse> {
    readings(store, device_id, sensor_type, Some(1))?
        .into_iter()
        .next()
        .map(SensorReadingSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "No sensor readings found"))
}

pub fn get_sensor_statistics<'a>(
    store: Box<dyn DeviceStore + 'a>,
    device_id: &str,
    sensor_type: &str,
) -> Result<SensorStatistics, ErrorResponse> {
    let readings = readings(store, device_id, sensor_type, None)?;
    SensorStatistics::from_readings(&readings)
        .ok_or_else(|| ErrorResponse::new(404, "No sensor readings found"))
}

pub fn create_sensor_reading<'a>(
    store: Box<dyn DeviceStore + 'a>,
    body: &Value,
) -> Result<SensorReadingSlice, ErrorResponse> {
    let new_reading = NewSensorReading::from_json(body)?;
    store
        .create_sensor_reading(new_reading)
        .map(SensorReadingSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::devices::store::memory::MemoryDeviceStore;
    use crate::devices::store::DeviceStatus;

    #[test]
    fn test_update_device_status_keeps_battery_level() {
        let store = MemoryDeviceStore::new();
        let device = create_device(
            Box::new(store.clone()),
            &json!({ "userId": 1, "name": "Soil sensor", "type": "soil", "batteryLevel": 85 }),
        )
        .expect("Failed to create device");

        let updated = update_device_status(
            Box::new(store.clone()),
            &device.id.to_string(),
            &json!({ "status": "offline" }),
        )
        .expect("Failed to update device");
        assert_eq!(updated.status, DeviceStatus::Offline);
        assert_eq!(updated.battery_level, Some(85));
        assert!(updated.last_seen >= device.last_seen);

        let err = update_device_status(Box::new(store), "99", &json!({ "status": "online" }))
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_sensor_reading_queries() {
        let store = MemoryDeviceStore::new();
        for (value, timestamp) in &[
            (40.0, "2024-06-01T06:00:00Z"),
            (44.0, "2024-06-01T08:00:00Z"),
            (42.0, "2024-06-01T07:00:00Z"),
        ] {
            create_sensor_reading(
                Box::new(store.clone()),
                &json!({
                    "deviceId": 1,
                    "type": "soil_moisture",
                    "value": value,
                    "unit": "%",
                    "timestamp": timestamp,
                }),
            )
            .expect("Failed to create reading");
        }

        let readings =
            list_sensor_readings(Box::new(store.clone()), "1", "soil_moisture", Some("2"))
                .expect("Failed to list readings");
        let values: Vec<f64> = readings.iter().map(|reading| reading.value).collect();
        assert_eq!(values, vec![44.0, 42.0]);

        let latest = get_latest_sensor_reading(Box::new(store.clone()), "1", "soil_moisture")
            .expect("Failed to get latest reading");
        assert_eq!(latest.value, 44.0);

        let stats = get_sensor_statistics(Box::new(store.clone()), "1", "soil_moisture")
            .expect("Failed to get statistics");
        assert_eq!(stats.count, 3);
        assert_eq!(stats.avg, 42.0);

        let err = get_latest_sensor_reading(Box::new(store.clone()), "1", "soil_ph").unwrap_err();
        assert_eq!(err.message(), "No sensor readings found");

        let err = list_sensor_readings(Box::new(store.clone()), "1", "humidity", None).unwrap_err();
        assert_eq!(err.message(), "Invalid sensor type");

        let err = list_sensor_readings(Box::new(store), "1", "soil_moisture", Some("-1"))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
