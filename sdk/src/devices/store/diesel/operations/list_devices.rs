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

pub(in crate::devices::store::diesel) enum DeviceFilter {
    User(i64),
    Farm(i64),
}

pub(in crate::devices::store::diesel) trait DeviceStoreListDevicesOperation {
    fn list_devices(&self, filter: DeviceFilter) -> Result<Vec<Device>, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreListDevicesOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_devices(&self, filter: DeviceFilter) -> Result<Vec<Device>, DeviceStoreError> {
        let mut query = devices::table.into_boxed().order(devices::id.asc());

        query = match filter {
            DeviceFilter::User(user_id) => query.filter(devices::user_id.eq(user_id)),
            DeviceFilter::Farm(farm_id) => query.filter(devices::farm_id.eq(farm_id)),
        };

        query
            .load::<DeviceModel>(self.conn)?
            .into_iter()
            .map(Device::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreListDevicesOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_devices(&self, filter: DeviceFilter) -> Result<Vec<Device>, DeviceStoreError> {
        let mut query = devices::table.into_boxed().order(devices::id.asc());

        query = match filter {
            DeviceFilter::User(user_id) => query.filter(devices::user_id.eq(user_id)),
            DeviceFilter::Farm(farm_id) => query.filter(devices::farm_id.eq(farm_id)),
        };

        query
            .load::<DeviceModel>(self.conn)?
            .into_iter()
            .map(Device::try_from)
            .collect()
    }
}
