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

use super::schema::users;
use crate::users::store::{NewUser, User, DEFAULT_LANGUAGE, DEFAULT_ROLE};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "users"]
pub struct NewUserModel {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub location: Option<String>,
    pub preferred_language: String,
    pub role: String,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub location: Option<String>,
    pub preferred_language: String,
    pub role: String,
}

impl From<NewUser> for NewUserModel {
    fn from(user: NewUser) -> Self {
        Self {
            username: user.username,
            password: user.password,
            display_name: user.display_name,
            location: user.location,
            preferred_language: user
                .preferred_language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            display_name: model.display_name,
            location: model.location,
            preferred_language: model.preferred_language,
            role: model.role,
        }
    }
}
