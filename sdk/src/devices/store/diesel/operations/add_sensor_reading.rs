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
    models::{NewSensorReadingModel, SensorReadingModel},
    schema::sensor_readings,
};
use crate::devices::store::{DeviceStoreError, SensorReading};

pub(in crate::devices::store::diesel) trait DeviceStoreAddSensorReadingOperation {
    fn add_sensor_reading(
        &self,
        reading: NewSensorReadingModel,
    ) -> Result<SensorReading, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreAddSensorReadingOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_sensor_reading(
        &self,
        reading: NewSensorReadingModel,
    ) -> Result<SensorReading, DeviceStoreError> {
        let model = insert_into(sensor_readings::table)
            .values(&reading)
            .get_result::<SensorReadingModel>(self.conn)?;

        SensorReading::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreAddSensorReadingOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_sensor_reading(
        &self,
        reading: NewSensorReadingModel,
    ) -> Result<SensorReading, DeviceStoreError> {
        self.conn.transaction::<_, DeviceStoreError, _>(|| {
            insert_into(sensor_readings::table)
                .values(&reading)
                .execute(self.conn)?;

            let model = sensor_readings::table
                .order(sensor_readings::id.desc())
                .first::<SensorReadingModel>(self.conn)?;

            SensorReading::try_from(model)
        })
    }
}
