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

use super::UserStoreOperations;
use crate::error::{ConstraintViolationError, ConstraintViolationType};
use crate::users::store::diesel::{
    models::{NewUserModel, UserModel},
    schema::users,
};
use crate::users::store::{User, UserStoreError};

pub(in crate::users::store::diesel) trait UserStoreAddUserOperation {
    fn add_user(&self, user: NewUserModel) -> Result<User, UserStoreError>;
}

fn username_taken(username: &str) -> UserStoreError {
    UserStoreError::ConstraintViolationError(
        ConstraintViolationError::with_violation_type_and_message(
            ConstraintViolationType::Unique,
            format!("Username {} is already taken", username),
        ),
    )
}

#[cfg(feature = "postgres")]
impl<'a> UserStoreAddUserOperation
    for UserStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_user(&self, user: NewUserModel) -> Result<User, UserStoreError> {
        self.conn.transaction::<_, UserStoreError, _>(|| {
            let existing = users::table
                .filter(users::username.eq(&user.username))
                .select(users::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(username_taken(&user.username));
            }

            insert_into(users::table)
                .values(&user)
                .get_result::<UserModel>(self.conn)
                .map(User::from)
                .map_err(UserStoreError::from)
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> UserStoreAddUserOperation
    for UserStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_user(&self, user: NewUserModel) -> Result<User, UserStoreError> {
        self.conn.transaction::<_, UserStoreError, _>(|| {
            let existing = users::table
                .filter(users::username.eq(&user.username))
                .select(users::id)
                .first::<i64>(self.conn)
                .optional()?;
            if existing.is_some() {
                return Err(username_taken(&user.username));
            }

            insert_into(users::table).values(&user).execute(self.conn)?;

            users::table
                .order(users::id.desc())
                .first::<UserModel>(self.conn)
                .map(User::from)
                .map_err(UserStoreError::from)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use diesel::sqlite::SqliteConnection;

    use crate::migrations::run_sqlite_migrations;
    use crate::users::store::diesel::operations::fetch_user::{
        UserLookup, UserStoreFetchUserOperation,
    };

    fn new_user(username: &str) -> NewUserModel {
        NewUserModel {
            username: username.to_string(),
            password: "password123".to_string(),
            display_name: "Priya Singh".to_string(),
            location: Some("Barabanki, Uttar Pradesh".to_string()),
            preferred_language: "hi".to_string(),
            role: "farmer".to_string(),
        }
    }

    #[test]
    fn test_add_and_fetch_user() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = UserStoreOperations::new(&conn);
        let user = ops.add_user(new_user("priya"))?;

        assert_eq!(user.id, 1);
        assert_eq!(ops.fetch_user(UserLookup::Id(1))?, Some(user.clone()));
        assert_eq!(
            ops.fetch_user(UserLookup::Username("priya"))?,
            Some(user)
        );
        assert_eq!(ops.fetch_user(UserLookup::Username("ravi"))?, None);

        Ok(())
    }

    #[test]
    fn test_add_duplicate_user() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = UserStoreOperations::new(&conn);
        ops.add_user(new_user("priya"))?;

        match ops.add_user(new_user("priya")) {
            Err(UserStoreError::ConstraintViolationError(_)) => (),
            res => panic!("Expected ConstraintViolationError, got {:?}", res),
        }

        Ok(())
    }
}
