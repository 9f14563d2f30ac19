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
use crate::devices::store::diesel::{models::SensorReadingModel, schema::sensor_readings};
use crate::devices::store::{DeviceStoreError, SensorReading, SensorType};

pub(in crate::devices::store::diesel) trait DeviceStoreListSensorReadingsOperation {
    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> DeviceStoreListSensorReadingsOperation
    for DeviceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        let mut query = sensor_readings::table
            .into_boxed()
            .filter(sensor_readings::device_id.eq(device_id))
            .filter(sensor_readings::sensor_type.eq(sensor_type.as_str()))
            .order((sensor_readings::timestamp.desc(), sensor_readings::id.desc()));

        if let Some(limit) = limit {
            query = query.limit(limit.max(0));
        }

        query
            .load::<SensorReadingModel>(self.conn)?
            .into_iter()
            .map(SensorReading::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> DeviceStoreListSensorReadingsOperation
    for DeviceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_sensor_readings(
        &self,
        device_id: i64,
        sensor_type: SensorType,
        limit: Option<i64>,
    ) -> Result<Vec<SensorReading>, DeviceStoreError> {
        let mut query = sensor_readings::table
            .into_boxed()
            .filter(sensor_readings::device_id.eq(device_id))
            .filter(sensor_readings::sensor_type.eq(sensor_type.as_str()))
            .order((sensor_readings::timestamp.desc(), sensor_readings::id.desc()));

        if let Some(limit) = limit {
            query = query.limit(limit.max(0));
        }

        query
            .load::<SensorReadingModel>(self.conn)?
            .into_iter()
            .map(SensorReading::try_from)
            .collect()
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;

    use crate::devices::store::diesel::models::NewSensorReadingModel;
    use crate::devices::store::diesel::operations::add_sensor_reading::DeviceStoreAddSensorReadingOperation;
    use crate::migrations::run_sqlite_migrations;

    fn reading(device_id: i64, sensor_type: &str, hour: u32) -> NewSensorReadingModel {
        NewSensorReadingModel {
            device_id,
            sensor_type: sensor_type.to_string(),
            value: f64::from(hour),
            unit: "%".to_string(),
            timestamp: NaiveDate::from_ymd(2024, 6, 1).and_hms(hour, 0, 0),
        }
    }

    #[test]
    fn test_readings_newest_first_and_limited() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = DeviceStoreOperations::new(&conn);
        ops.add_sensor_reading(reading(1, "soil_moisture", 6))?;
        ops.add_sensor_reading(reading(1, "soil_moisture", 12))?;
        ops.add_sensor_reading(reading(1, "soil_ph", 13))?;
        ops.add_sensor_reading(reading(2, "soil_moisture", 14))?;
        ops.add_sensor_reading(reading(1, "soil_moisture", 9))?;

        let values = ops
            .list_sensor_readings(1, SensorType::SoilMoisture, None)?
            .into_iter()
            .map(|reading| reading.value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![12.0, 9.0, 6.0]);

        let limited = ops.list_sensor_readings(1, SensorType::SoilMoisture, Some(2))?;
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].value, 12.0);

        assert!(ops
            .list_sensor_readings(1, SensorType::SoilMoisture, Some(0))?
            .is_empty());

        Ok(())
    }
}
