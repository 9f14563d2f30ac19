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

use diesel::{prelude::*, result::Error as dsl_error};

use super::FarmStoreOperations;
use crate::error::InternalError;
use crate::farms::store::diesel::{models::FarmModel, schema::farms};
use crate::farms::store::{Farm, FarmStoreError};

pub(in crate::farms::store::diesel) trait FarmStoreFetchFarmOperation {
    fn fetch_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> FarmStoreFetchFarmOperation
    for FarmStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        farms::table
            .filter(farms::id.eq(id))
            .first::<FarmModel>(self.conn)
            .map(|model| Some(Farm::from(model)))
            .or_else(|err| {
                if err == dsl_error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })
            .map_err(|err| FarmStoreError::InternalError(InternalError::from_source(Box::new(err))))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> FarmStoreFetchFarmOperation
    for FarmStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        farms::table
            .filter(farms::id.eq(id))
            .first::<FarmModel>(self.conn)
            .map(|model| Some(Farm::from(model)))
            .or_else(|err| {
                if err == dsl_error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })
            .map_err(|err| FarmStoreError::InternalError(InternalError::from_source(Box::new(err))))
    }
}
