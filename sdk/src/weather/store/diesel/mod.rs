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

use chrono::NaiveDate;
use diesel::r2d2::{ConnectionManager, Pool};

use super::{forecast_window, Forecast, NewForecast, WeatherStore, WeatherStoreError};
use operations::add_forecast::WeatherStoreAddForecastOperation as _;
use operations::fetch_forecast::WeatherStoreFetchForecastOperation as _;
use operations::list_forecasts::WeatherStoreListForecastsOperation as _;
use operations::WeatherStoreOperations;

/// A `WeatherStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselWeatherStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselWeatherStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselWeatherStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl WeatherStore for DieselWeatherStore<diesel::pg::PgConnection> {
    fn get_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        WeatherStoreOperations::new(&*self.connection_pool.get()?).fetch_forecast(location, date)
    }

    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        days: i64,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        match forecast_window(start, days) {
            Some((start, end)) => WeatherStoreOperations::new(&*self.connection_pool.get()?)
                .list_forecasts(location, start, end),
            None => Ok(vec![]),
        }
    }

    fn create_forecast(&self, forecast: NewForecast) -> Result<Forecast, WeatherStoreError> {
        WeatherStoreOperations::new(&*self.connection_pool.get()?).add_forecast(forecast.into())
    }
}

#[cfg(feature = "sqlite")]
impl WeatherStore for DieselWeatherStore<diesel::sqlite::SqliteConnection> {
    fn get_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        WeatherStoreOperations::new(&*self.connection_pool.get()?).fetch_forecast(location, date)
    }

    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        days: i64,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        match forecast_window(start, days) {
            Some((start, end)) => WeatherStoreOperations::new(&*self.connection_pool.get()?)
                .list_forecasts(location, start, end),
            None => Ok(vec![]),
        }
    }

    fn create_forecast(&self, forecast: NewForecast) -> Result<Forecast, WeatherStoreError> {
        WeatherStoreOperations::new(&*self.connection_pool.get()?).add_forecast(forecast.into())
    }
}
