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
use diesel::{dsl::update, prelude::*};

use super::DeviceStoreOperations;
use crate::devices::store::diesel::{models::DeviceModel, schema::devices};
use crate::devices::store::{Device, DeviceStatus, DeviceStoreError};

pub(in crate::devices::store::diesel) trait DeviceStoreUpdateDeviceStatusOperation {
    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
        last_seen: NaiveDateTime,
    ) -> Result<Device, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreUpdateDeviceStatusOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
        last_seen: NaiveDateTime,
    ) -> Result<Device, DeviceStoreError> {
        self.conn.transaction::<_, DeviceStoreError, _>(|| {
            let current = devices::table
                .find(id)
                .first::<DeviceModel>(self.conn)
                .optional()?
                .ok_or_else(|| DeviceStoreError::NotFoundError(format!("device {}", id)))?;

            let model = update(devices::table.find(id))
                .set((
                    devices::status.eq(status.as_str()),
                    devices::battery_level.eq(battery_level.or(current.battery_level)),
                    devices::last_seen.eq(last_seen),
                ))
                .get_result::<DeviceModel>(self.conn)?;

            Device::try_from(model)
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreUpdateDeviceStatusOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
        battery_level: Option<i32>,
        last_seen: NaiveDateTime,
    ) -> Result<Device, DeviceStoreError> {
        self.conn.transaction::<_, DeviceStoreError, _>(|| {
            let current = devices::table
                .find(id)
                .first::<DeviceModel>(self.conn)
                .optional()?
                .ok_or_else(|| DeviceStoreError::NotFoundError(format!("device {}", id)))?;

            update(devices::table.find(id))
                .set((
                    devices::status.eq(status.as_str()),
                    devices::battery_level.eq(battery_level.or(current.battery_level)),
                    devices::last_seen.eq(last_seen),
                ))
                .execute(self.conn)?;

            let model = devices::table.find(id).first::<DeviceModel>(self.conn)?;

            Device::try_from(model)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;

    use crate::devices::store::diesel::models::NewDeviceModel;
    use crate::devices::store::diesel::operations::add_device::DeviceStoreAddDeviceOperation;
    use crate::migrations::run_sqlite_migrations;

    #[test]
    fn test_update_keeps_battery_level_when_absent() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let created_at = NaiveDate::from_ymd(2024, 6, 1).and_hms(8, 0, 0);
        let ops = DeviceStoreOperations::new(&conn);
        let device = ops.add_device(NewDeviceModel {
            user_id: 1,
            farm_id: Some(1),
            name: "Soil Sensor".to_string(),
            device_type: "SakhiSense Station".to_string(),
            location: None,
            status: "online".to_string(),
            battery_level: Some(85),
            last_seen: created_at,
        })?;

        let seen_at = NaiveDate::from_ymd(2024, 6, 2).and_hms(9, 30, 0);
        let updated =
            ops.update_device_status(device.id, DeviceStatus::Offline, None, seen_at)?;

        assert_eq!(updated.status, DeviceStatus::Offline);
        assert_eq!(updated.battery_level, Some(85));
        assert_eq!(updated.last_seen, seen_at);

        let updated =
            ops.update_device_status(device.id, DeviceStatus::LowSignal, Some(12), seen_at)?;
        assert_eq!(updated.battery_level, Some(12));

        match ops.update_device_status(99, DeviceStatus::Online, None, seen_at) {
            Err(DeviceStoreError::NotFoundError(_)) => (),
            res => panic!("Expected NotFoundError, got {:?}", res),
        }

        Ok(())
    }
}
