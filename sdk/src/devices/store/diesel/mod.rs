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
    Device, DeviceStatus, DeviceStore, DeviceStoreError, NewDevice, NewSensorReading,
    SensorReading, SensorType,
};
use crate::store::current_timestamp;
use operations::add_device::DeviceStoreAddDeviceOperation as _;
use operations::add_sensor_reading::DeviceStoreAddSensorReadingOperation as _;
use operations::fetch_device::DeviceStoreFetchDeviceOperation as _;
use operations::list_devices::{DeviceFilter, DeviceStoreListDevicesOperation as _};
use operations::list_sensor_readings::DeviceStoreListSensorReadingsOperation as _;
use operations::update_device_status::DeviceStoreUpdateDeviceStatusOperation as _;
use operations::DeviceStoreOperations;

/// A `DeviceStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselDeviceStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselDeviceStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselDeviceStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl DeviceStore for DieselDeviceStore<diesel::pg::PgConnection> {
    fn get_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).fetch_device(id)
    }

    fn list_devices_by_user(&self, user_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .list_devices(DeviceFilter::User(user_id))
    }

    fn list_devices_by_farm(&self, farm_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .list_devices(DeviceFilter::Farm(farm_id))
    }

    fn create_device(&self, device: NewDevice) -> Result<Device, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).add_device(device.into())
    }

    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
    ) -> Result<Device, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).update_device_status(
            id,
            status,
            battery_level,
            current_timestamp(),
        )
    }

    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).list_sensor_readings(
            device_id,
            sensor_type,
            limit,
        )
    }

    fn create_sensor_reading(
        &self,
        reading: NewSensorReading,
    ) -> Result<SensorReading, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .add_sensor_reading(reading.into())
    }
}

#[cfg(feature = "sqlite")]
impl DeviceStore for DieselDeviceStore<diesel::sqlite::SqliteConnection> {
    fn get_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).fetch_device(id)
    }

    fn list_devices_by_user(&self, user_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .list_devices(DeviceFilter::User(user_id))
    }

    fn list_devices_by_farm(&self, farm_id: i64) -> Result<Vec<Device>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .list_devices(DeviceFilter::Farm(farm_id))
    }

    fn create_device(&self, device: NewDevice) -> Result<Device, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).add_device(device.into())
    }

    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
    ) -> Result<Device, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).update_device_status(
            id,
            status,
            battery_level,
            current_timestamp(),
        )
    }

    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?).list_sensor_readings(
            device_id,
            sensor_type,
            limit,
        )
    }

    fn create_sensor_reading(
        &self,
        reading: NewSensorReading,
    ) -> Result<SensorReading, DeviceStoreError> {
        DeviceStoreOperations::new(&*self.connection_pool.get()?)
            .add_sensor_reading(reading.into())
    }
}
