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

use diesel::prelude::*;

use super::FarmStoreOperations;
use crate::farms::store::diesel::{models::FarmModel, schema::farms};
use crate::farms::store::{Farm, FarmStoreError};

pub(in crate::farms::store::diesel) trait FarmStoreListFarmsOperation {
    fn list_farms(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> FarmStoreListFarmsOperation
    for FarmStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_farms(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        Ok(farms::table
            .filter(farms::user_id.eq(user_id))
            .order(farms::id.asc())
            .load::<FarmModel>(self.conn)?
            .into_iter()
            .map(Farm::from)
            .collect())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> FarmStoreListFarmsOperation
    for FarmStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_farms(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        Ok(farms::table
            .filter(farms::user_id.eq(user_id))
            .order(farms::id.asc())
            .load::<FarmModel>(self.conn)?
            .into_iter()
            .map(Farm::from)
            .collect())
    }
}
