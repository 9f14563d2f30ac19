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

table! {
    learning_modules (id) {
        id -> BigInt,
        title -> Text,
        description -> Nullable<Text>,
        duration_minutes -> Nullable<Integer>,
        lesson_count -> Nullable<Integer>,
        difficulty -> Text,
    }
}

table! {
    user_learning_progress (id) {
        id -> BigInt,
        user_id -> BigInt,
        module_id -> BigInt,
        progress -> Integer,
        completed -> Bool,
        last_accessed_at -> Timestamp,
    }
}
