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

use diesel::{dsl::insert_into, prelude::*};

use super::FarmStoreOperations;
use crate::farms::store::diesel::{
    models::{FarmModel, NewFarmModel},
    schema::farms,
};
use crate::farms::store::{Farm, FarmStoreError};

pub(in crate::farms::store::diesel) trait FarmStoreAddFarmOperation {
    fn add_farm(&self, farm: NewFarmModel) -> Result<Farm, FarmStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> FarmStoreAddFarmOperation
    for FarmStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_farm(&self, farm: NewFarmModel) -> Result<Farm, FarmStoreError> {
        insert_into(farms::table)
            .values(&farm)
            .get_result::<FarmModel>(self.conn)
            .map(Farm::from)
            .map_err(FarmStoreError::from)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> FarmStoreAddFarmOperation
    for FarmStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_farm(&self, farm: NewFarmModel) -> Result<Farm, FarmStoreError> {
        self.conn.transaction::<_, FarmStoreError, _>(|| {
            insert_into(farms::table).values(&farm).execute(self.conn)?;

            farms::table
                .order(farms::id.desc())
                .first::<FarmModel>(self.conn)
                .map(Farm::from)
                .map_err(FarmStoreError::from)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use diesel::sqlite::SqliteConnection;

    use crate::farms::store::diesel::operations::list_farms::FarmStoreListFarmsOperation;
    use crate::migrations::run_sqlite_migrations;

    #[test]
    fn test_add_farms_and_list_by_owner() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = FarmStoreOperations::new(&conn);
        for (user_id, name) in &[(1, "Green Acres"), (2, "River Plot"), (1, "Mango Grove")] {
            ops.add_farm(NewFarmModel {
                user_id: *user_id,
                name: name.to_string(),
                location: None,
                size: Some(2.5),
                description: None,
            })?;
        }

        let names = ops
            .list_farms(1)?
            .into_iter()
            .map(|farm| (farm.id, farm.name))
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![(1, "Green Acres".to_string()), (3, "Mango Grove".to_string())]
        );

        Ok(())
    }
}
