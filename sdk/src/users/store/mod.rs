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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;
pub mod memory;

pub use error::UserStoreError;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ROLE: &str = "farmer";

/// A farmer account.
///
/// The password is kept as supplied; REST responses never include it.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub location: Option<String>,
    pub preferred_language: String,
    pub role: String,
}

/// The fields supplied when registering a user.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub location: Option<String>,
    pub preferred_language: Option<String>,
}

impl NewUser {
    pub(crate) fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            display_name: self.display_name,
            location: self.location,
            preferred_language: self
                .preferred_language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

pub trait UserStore: Send + Sync {
    /// Fetches a user by id.
    fn get_user(&self, id: i64) -> Result<Option<User>, UserStoreError>;

    /// Fetches a user by username.
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Registers a user. A taken username is a `ConstraintViolationError`.
    fn create_user(&self, user: NewUser) -> Result<User, UserStoreError>;
}

impl<US> UserStore for Box<US>
where
    US: UserStore + ?Sized,
{
    fn get_user(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        (**self).get_user(id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        (**self).get_user_by_username(username)
    }

    fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        (**self).create_user(user)
    }
}
