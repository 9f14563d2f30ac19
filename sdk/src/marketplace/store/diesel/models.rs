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

use std::convert::TryFrom;

use chrono::NaiveDateTime;

use super::schema::{blockchain_transactions, marketplace_listings};
use crate::error::InternalError;
use crate::marketplace::store::{
    Listing, MarketplaceStoreError, NewListing, NewTransaction, Transaction, DEFAULT_CURRENCY,
};
use crate::store::current_timestamp;

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "marketplace_listings"]
pub struct NewListingModel {
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
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ListingModel {
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
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "blockchain_transactions"]
pub struct NewTransactionModel {
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub transaction_type: String,
    pub details: Option<String>,
    pub transaction_hash: Option<String>,
    pub timestamp: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct TransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub transaction_type: String,
    pub details: Option<String>,
    pub transaction_hash: Option<String>,
    pub timestamp: NaiveDateTime,
}

impl From<NewListing> for NewListingModel {
    fn from(listing: NewListing) -> Self {
        Self {
            user_id: listing.user_id,
            crop_name: listing.crop_name,
            variety: listing.variety,
            quantity: listing.quantity,
            unit: listing.unit,
            price: listing.price,
            currency: listing
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            description: listing.description,
            location: listing.location,
            is_organic: listing.is_organic.unwrap_or(false),
            is_verified: false,
            created_at: current_timestamp(),
        }
    }
}

impl From<ListingModel> for Listing {
    fn from(model: ListingModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            crop_name: model.crop_name,
            variety: model.variety,
            quantity: model.quantity,
            unit: model.unit,
            price: model.price,
            currency: model.currency,
            description: model.description,
            location: model.location,
            is_organic: model.is_organic,
            is_verified: model.is_verified,
            created_at: model.created_at,
        }
    }
}

impl From<NewTransaction> for NewTransactionModel {
    fn from(transaction: NewTransaction) -> Self {
        Self {
            user_id: transaction.user_id,
            listing_id: transaction.listing_id,
            transaction_type: transaction.transaction_type.to_string(),
            details: transaction.details.map(|details| details.to_string()),
            transaction_hash: transaction.transaction_hash,
            timestamp: current_timestamp(),
        }
    }
}

impl TryFrom<TransactionModel> for Transaction {
    type Error = MarketplaceStoreError;

    fn try_from(model: TransactionModel) -> Result<Self, Self::Error> {
        let details = model
            .details
            .as_ref()
            .map(|details| serde_json::from_str(details))
            .transpose()
            .map_err(|err| {
                MarketplaceStoreError::InternalError(InternalError::from_source_with_message(
                    Box::new(err),
                    format!("transaction {} has malformed details", model.id),
                ))
            })?;

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            listing_id: model.listing_id,
            transaction_type: model.transaction_type.parse().map_err(|err| {
                MarketplaceStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
            details,
            transaction_hash: model.transaction_hash,
            timestamp: model.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use serde_json::json;

    use crate::marketplace::store::TransactionType;

    fn transaction_model(details: Option<&str>) -> TransactionModel {
        TransactionModel {
            id: 7,
            user_id: 1,
            listing_id: Some(2),
            transaction_type: "harvest".to_string(),
            details: details.map(String::from),
            transaction_hash: Some("0x7e21".to_string()),
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .and_then(|date| date.and_hms_opt(8, 30, 0))
                .expect("valid timestamp"),
        }
    }

    /// Verifies that nested transaction details survive the conversion from the stored text.
    #[test]
    fn test_transaction_from_model_parses_nested_details() {
        let details = json!({"z": 1, "a": [1.5, "x", null], "n": {"k": true}});
        let transaction = Transaction::try_from(transaction_model(Some(&details.to_string())))
            .expect("Failed to convert transaction model");

        assert_eq!(transaction.id, 7);
        assert_eq!(transaction.transaction_type, TransactionType::Harvest);
        assert_eq!(transaction.details, Some(details));

        let transaction = Transaction::try_from(transaction_model(None))
            .expect("Failed to convert transaction model");
        assert_eq!(transaction.details, None);
    }

    /// Verifies that unparseable stored details are reported as an internal error.
    #[test]
    fn test_transaction_from_model_rejects_malformed_details() {
        match Transaction::try_from(transaction_model(Some("{not json"))) {
            Err(MarketplaceStoreError::InternalError(_)) => (),
            res => panic!("Expected InternalError, got {:?}", res),
        }
    }
}
