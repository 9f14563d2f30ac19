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
    marketplace_listings (id) {
        id -> BigInt,
        user_id -> BigInt,
        crop_name -> Text,
        variety -> Nullable<Text>,
        quantity -> Double,
        unit -> Text,
        price -> Double,
        currency -> Text,
        description -> Nullable<Text>,
        location -> Nullable<Text>,
        is_organic -> Bool,
        is_verified -> Bool,
        created_at -> Timestamp,
    }
}

table! {
    blockchain_transactions (id) {
        id -> BigInt,
        user_id -> BigInt,
        listing_id -> Nullable<BigInt>,
        transaction_type -> Text,
        details -> Nullable<Text>,
        transaction_hash -> Nullable<Text>,
        timestamp -> Timestamp,
    }
}
