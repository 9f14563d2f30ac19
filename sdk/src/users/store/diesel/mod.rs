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

use diesel::r2d2::{ConnectionManager, Pool};

use super::{NewUser, User, UserStore, UserStoreError};
use operations::add_user::UserStoreAddUserOperation as _;
use operations::fetch_user::{UserLookup, UserStoreFetchUserOperation as _};
use operations::UserStoreOperations;

/// A `UserStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselUserStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselUserStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselUserStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl UserStore for DieselUserStore<diesel::pg::PgConnection> {
    fn get_user(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?).fetch_user(UserLookup::Id(id))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_user(UserLookup::Username(username))
    }

    fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?).add_user(user.into())
    }
}

#[cfg(feature = "sqlite")]
impl UserStore for DieselUserStore<diesel::sqlite::SqliteConnection> {
    fn get_user(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?).fetch_user(UserLookup::Id(id))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?)
            .fetch_user(UserLookup::Username(username))
    }

    fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        UserStoreOperations::new(&*self.connection_pool.get()?).add_user(user.into())
    }
}
