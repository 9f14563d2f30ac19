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

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::marketplace::store::{
    Listing, NewListing, NewTransaction, Transaction, TransactionType,
};
use crate::rest_api::resources::utc;
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingSlice {
    pub id: i64,
    pub user_id: i64,
    pub crop_name: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub currency: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_organic: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingSlice {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            user_id: listing.user_id,
            crop_name: listing.crop_name,
            variety: listing.variety,
            quantity: listing.quantity,
            unit: listing.unit,
            price: listing.price,
            currency: listing.currency,
            description: listing.description,
            location: listing.location,
            is_organic: listing.is_organic,
            is_verified: listing.is_verified,
            created_at: utc(listing.created_at),
        }
    }
}

impl FromJson for NewListing {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let listing = NewListing {
            user_id: validator.required_integer("userId"),
            crop_name: validator.required_non_empty("cropName"),
            variety: validator.optional_string("variety"),
            quantity: validator.required_number("quantity"),
            unit: validator.required_string("unit"),
            price: validator.required_number("price"),
            currency: validator.optional_string("currency"),
            description: validator.optional_string("description"),
            location: validator.optional_string("location"),
            is_organic: validator.optional_bool("isOrganic"),
        };
        validator.finish()?;
        Ok(listing)
    }
}

/// A traceability record. `details` is returned exactly as it was submitted.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSlice {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub transaction_type: TransactionType,
    pub details: Option<Value>,
    pub transaction_hash: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Transaction> for TransactionSlice {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            listing_id: transaction.listing_id,
            transaction_type: transaction.transaction_type,
            details: transaction.details,
            transaction_hash: transaction.transaction_hash,
            timestamp: utc(transaction.timestamp),
        }
    }
}

impl FromJson for NewTransaction {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let transaction = NewTransaction {
            user_id: validator.required_integer("userId"),
            listing_id: validator.optional_integer("listingId"),
            transaction_type: validator.required_enum("transactionType"),
            details: validator.optional_json("details"),
            transaction_hash: validator.optional_string("transactionHash"),
        };
        validator.finish()?;
        Ok(transaction)
    }
}
