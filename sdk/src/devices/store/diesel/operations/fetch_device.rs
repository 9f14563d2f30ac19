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

use diesel::prelude::*;

use super::DeviceStoreOperations;
use crate::devices::store::diesel::{models::DeviceModel, schema::devices};
use crate::devices::store::{Device, DeviceStoreError};

pub(in crate::devices::store::diesel) trait DeviceStoreFetchDeviceOperation {
    fn fetch_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreFetchDeviceOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        devices::table
            .find(id)
            .first::<DeviceModel>(self.conn)
            .optional()?
            .map(Device::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreFetchDeviceOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_device(&self, id: i64) -> Result<Option<Device>, DeviceStoreError> {
        devices::table
            .find(id)
            .first::<DeviceModel>(self.conn)
            .optional()?
            .map(Device::try_from)
            .transpose()
    }
}
