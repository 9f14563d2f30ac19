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

use serde_json::Value;

use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};
use crate::users::store::{NewUser, User};

/// A user as returned by the API. The password is never included.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSlice {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub location: Option<String>,
    pub preferred_language: String,
    pub role: String,
}

impl From<User> for UserSlice {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            location: user.location,
            preferred_language: user.preferred_language,
            role: user.role,
        }
    }
}

impl FromJson for NewUser {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let user = NewUser {
            username: validator.required_non_empty("username"),
            password: validator.required_non_empty("password"),
            display_name: validator.required_non_empty("displayName"),
            location: validator.optional_string("location"),
            preferred_language: validator.optional_string("preferredLanguage"),
        };
        validator.finish()?;
        Ok(user)
    }
}

#[derive(Debug, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl FromJson for LoginRequest {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let request = LoginRequest {
            username: validator.required_non_empty("username"),
            password: validator.required_non_empty("password"),
        };
        validator.finish()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_user_slice_omits_password() {
        let user = User {
            id: 1,
            username: "priya".to_string(),
            password: "password123".to_string(),
            display_name: "Priya Singh".to_string(),
            location: None,
            preferred_language: "hi".to_string(),
            role: "farmer".to_string(),
        };

        let json = serde_json::to_value(UserSlice::from(user)).expect("serializable");
        assert_eq!(json["displayName"], "Priya Singh");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_new_user_requires_credentials() {
        let err = NewUser::from_json(&json!({ "displayName": "A" })).unwrap_err();
        let fields: Vec<&str> = err
            .field_errors()
            .iter()
            .map(|err| err.field.as_str())
            .collect();
        assert_eq!(fields, vec!["username", "password"]);
    }
}
