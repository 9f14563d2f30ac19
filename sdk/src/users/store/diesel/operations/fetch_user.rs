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

use super::UserStoreOperations;
use crate::error::InternalError;
use crate::users::store::diesel::{models::UserModel, schema::users};
use crate::users::store::{User, UserStoreError};

pub(in crate::users::store::diesel) enum UserLookup<'a> {
    Id(i64),
    Username(&'a str),
}

pub(in crate::users::store::diesel) trait UserStoreFetchUserOperation {
    fn fetch_user(&self, lookup: UserLookup) -> Result<Option<User>, UserStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> UserStoreFetchUserOperation
    for UserStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_user(&self, lookup: UserLookup) -> Result<Option<User>, UserStoreError> {
        let query = match lookup {
            UserLookup::Id(id) => users::table.filter(users::id.eq(id)).into_boxed(),
            UserLookup::Username(username) => users::table
                .filter(users::username.eq(username.to_string()))
                .into_boxed(),
        };

        query
            .first::<UserModel>(self.conn)
            .map(|model| Some(User::from(model)))
            .or_else(|err| {
                if err == dsl_error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })
            .map_err(|err| UserStoreError::InternalError(InternalError::from_source(Box::new(err))))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> UserStoreFetchUserOperation
    for UserStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_user(&self, lookup: UserLookup) -> Result<Option<User>, UserStoreError> {
        let query = match lookup {
            UserLookup::Id(id) => users::table.filter(users::id.eq(id)).into_boxed(),
            UserLookup::Username(username) => users::table
                .filter(users::username.eq(username.to_string()))
                .into_boxed(),
        };

        query
            .first::<UserModel>(self.conn)
            .map(|model| Some(User::from(model)))
            .or_else(|err| {
                if err == dsl_error::NotFound {
                    Ok(None)
                } else {
                    Err(err)
                }
            })
            .map_err(|err| UserStoreError::InternalError(InternalError::from_source(Box::new(err))))
    }
}
