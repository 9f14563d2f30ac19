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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};

use super::{NewUser, User, UserStore, UserStoreError};

#[derive(Default)]
struct UserTable {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

/// A `UserStore` kept in process memory.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Mutex<UserTable>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserStoreError {
    UserStoreError::InternalError(InternalError::with_message(
        "Cannot access users: mutex lock poisoned".to_string(),
    ))
}

impl UserStore for MemoryUserStore {
    fn get_user(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.users.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        if inner.users.values().any(|u| u.username == user.username) {
            return Err(UserStoreError::ConstraintViolationError(
                ConstraintViolationError::with_violation_type_and_message(
                    ConstraintViolationType::Unique,
                    format!("Username {} is already taken", user.username),
                ),
            ));
        }

        inner.last_id += 1;
        let user = user.into_user(inner.last_id);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "p".to_string(),
            display_name: "A".to_string(),
            location: None,
            preferred_language: None,
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let store = MemoryUserStore::new();

        let user = store.create_user(new_user("a")).expect("Failed to create user");

        assert_eq!(user.id, 1);
        assert_eq!(user.preferred_language, "en");
        assert_eq!(user.role, "farmer");
        assert_eq!(store.get_user(1).expect("Failed to get user"), Some(user));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MemoryUserStore::new();
        store.create_user(new_user("a")).expect("Failed to create user");

        match store.create_user(new_user("a")) {
            Err(UserStoreError::ConstraintViolationError(err)) => {
                assert_eq!(err.violation_type(), &ConstraintViolationType::Unique)
            }
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        // the rejected insert must not consume an id
        let user = store.create_user(new_user("b")).expect("Failed to create user");
        assert_eq!(user.id, 2);
    }
}
