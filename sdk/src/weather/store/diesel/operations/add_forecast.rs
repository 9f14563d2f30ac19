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

use super::WeatherStoreOperations;
use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::weather::store::diesel::{
    models::{ForecastModel, NewForecastModel},
    schema::weather_forecasts,
};
use crate::weather::store::{Forecast, WeatherStoreError};

pub(in crate::weather::store::diesel) trait WeatherStoreAddForecastOperation {
    fn add_forecast(&self, forecast: NewForecastModel) -> Result<Forecast, WeatherStoreError>;
}

fn forecast_exists(forecast: &NewForecastModel) -> WeatherStoreError {
    WeatherStoreError::ConstraintViolationError(
        ConstraintViolationError::with_violation_type_and_message(
            ConstraintViolationType::Unique,
            format!(
                "A forecast for {} on {} already exists",
                forecast.location, forecast.forecast_date
            ),
        ),
    )
}

#[cfg(feature = "postgres")]
impl<'a> WeatherStoreAddForecastOperation
    for WeatherStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_forecast(&self, forecast: NewForecastModel) -> Result<Forecast, WeatherStoreError> {
        self.conn.transaction::<_, WeatherStoreError, _>(|| {
            let existing = weather_forecasts::table
                .filter(weather_forecasts::location.eq(&forecast.location))
                .filter(weather_forecasts::forecast_date.eq(forecast.forecast_date))
                .select(weather_forecasts::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(forecast_exists(&forecast));
            }

            let model = insert_into(weather_forecasts::table)
                .values(&forecast)
                .get_result::<ForecastModel>(self.conn)?;

            Forecast::try_from(model)
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> WeatherStoreAddForecastOperation
    for WeatherStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_forecast(&self, forecast: NewForecastModel) -> Result<Forecast, WeatherStoreError> {
        self.conn.transaction::<_, WeatherStoreError, _>(|| {
            let existing = weather_forecasts::table
                .filter(weather_forecasts::location.eq(&forecast.location))
                .filter(weather_forecasts::forecast_date.eq(forecast.forecast_date))
                .select(weather_forecasts::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(forecast_exists(&forecast));
            }

            insert_into(weather_forecasts::table)
                .values(&forecast)
                .execute(self.conn)?;

            let model = weather_forecasts::table
                .order(weather_forecasts::id.desc())
                .first::<ForecastModel>(self.conn)?;

            Forecast::try_from(model)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;

    use crate::migrations::run_sqlite_migrations;
    use crate::weather::store::diesel::operations::fetch_forecast::WeatherStoreFetchForecastOperation;
    use crate::weather::store::diesel::operations::list_forecasts::WeatherStoreListForecastsOperation;
    use crate::weather::store::WeatherCondition;

    fn new_forecast(date: NaiveDate, rainfall: Option<f64>) -> NewForecastModel {
        NewForecastModel {
            location: "Barabanki".to_string(),
            forecast_date: date,
            temperature: Some(29.5),
            min_temperature: Some(24.0),
            max_temperature: Some(33.0),
            humidity: Some(70.0),
            rainfall,
            condition: Some("rainy".to_string()),
        }
    }

    #[test]
    fn test_forecast_queries() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = WeatherStoreOperations::new(&conn);
        let day = |d| NaiveDate::from_ymd(2024, 7, d);
        // inserted out of date order
        for d in &[3, 1, 2, 5] {
            ops.add_forecast(new_forecast(day(*d), Some(4.0)))?;
        }

        let latest = ops.fetch_forecast("Barabanki", None)?.expect("Forecast missing");
        assert_eq!(latest.forecast_date, day(5));
        assert_eq!(latest.condition, Some(WeatherCondition::Rainy));

        let second = ops
            .fetch_forecast("Barabanki", Some(day(2)))?
            .expect("Forecast missing");
        assert_eq!(second.id, 3);
        assert_eq!(ops.fetch_forecast("Barabanki", Some(day(4)))?, None);

        let dates = ops
            .list_forecasts("Barabanki", day(1), Some(day(4)))?
            .into_iter()
            .map(|forecast| forecast.forecast_date)
            .collect::<Vec<_>>();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);

        match ops.add_forecast(new_forecast(day(3), None)) {
            Err(WeatherStoreError::ConstraintViolationError(_)) => (),
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        Ok(())
    }
}
