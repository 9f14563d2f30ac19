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

use diesel::{dsl::insert_into, prelude::*};

use super::DeviceStoreOperations;
use crate::devices::store::diesel::{
    models::{DeviceModel, NewDeviceModel},
    schema::devices,
};
use crate::devices::store::{Device, DeviceStoreError};

pub(in crate::devices::store::diesel) trait DeviceStoreAddDeviceOperation {
    fn add_device(&self, device: NewDeviceModel) -> Result<Device, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreAddDeviceOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_device(&self, device: NewDeviceModel) -> Result<Device, DeviceStoreError> {
        let model = insert_into(devices::table)
            .values(&device)
            .get_result::<DeviceModel>(self.conn)?;

        Device::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreAddDeviceOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_device(&self, device: NewDeviceModel) -> Result<Device, DeviceStoreError> {
        self.conn.transaction::<_, DeviceStoreError, _>(|| {
            insert_into(devices::table)
                .values(&device)
                .execute(self.conn)?;

            let model = devices::table
                .order(devices::id.desc())
                .first::<DeviceModel>(self.conn)?;

            Device::try_from(model)
        })
    }
}
