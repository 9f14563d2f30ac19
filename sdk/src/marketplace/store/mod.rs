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

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::InvalidArgumentError;
use crate::store::current_timestamp;

pub use error::MarketplaceStoreError;

pub const DEFAULT_CURRENCY: &str = "INR";

/// A produce lot offered for sale. `quantity` is expressed in `unit`, `price` in `currency`.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
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

/// Listings are never verified on creation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewListing {
    pub user_id: i64,
    pub crop_name: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_organic: Option<bool>,
}

impl NewListing {
    pub(crate) fn into_listing(self, id: i64) -> Listing {
        Listing {
            id,
            user_id: self.user_id,
            crop_name: self.crop_name,
            variety: self.variety,
            quantity: self.quantity,
            unit: self.unit,
            price: self.price,
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            description: self.description,
            location: self.location,
            is_organic: self.is_organic.unwrap_or(false),
            is_verified: false,
            created_at: current_timestamp(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Harvest,
    QualityCheck,
    MarketListing,
    Sale,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Harvest => "harvest",
            TransactionType::QualityCheck => "quality_check",
            TransactionType::MarketListing => "market_listing",
            TransactionType::Sale => "sale",
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Harvest
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "harvest" => Ok(TransactionType::Harvest),
            "quality_check" => Ok(TransactionType::QualityCheck),
            "market_listing" => Ok(TransactionType::MarketListing),
            "sale" => Ok(TransactionType::Sale),
            _ => Err(InvalidArgumentError::new(
                "transactionType".to_string(),
                format!("unknown transaction type '{}'", s),
            )),
        }
    }
}

/// A traceability record for a listing's supply chain.
///
/// `transaction_hash` is an opaque identifier supplied by the client; it is not computed or
/// verified here.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub transaction_type: TransactionType,
    pub details: Option<Value>,
    pub transaction_hash: Option<String>,
    pub timestamp: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub transaction_type: TransactionType,
    pub details: Option<Value>,
    pub transaction_hash: Option<String>,
}

impl NewTransaction {
    pub(crate) fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            listing_id: self.listing_id,
            transaction_type: self.transaction_type,
            details: self.details,
            transaction_hash: self.transaction_hash,
            timestamp: current_timestamp(),
        }
    }
}

pub trait MarketplaceStore: Send + Sync {
    fn get_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError>;

    fn list_listings(&self) -> Result<Vec<Listing>, MarketplaceStoreError>;

    fn list_listings_by_user(&self, user_id: i64) -> Result<Vec<Listing>, MarketplaceStoreError>;

    fn create_listing(&self, listing: NewListing) -> Result<Listing, MarketplaceStoreError>;

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError>;

    fn list_transactions_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError>;

    fn list_transactions_by_listing(
        &self,
        listing_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError>;

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, MarketplaceStoreError>;
}

impl<MS> MarketplaceStore for Box<MS>
where
    MS: MarketplaceStore + ?Sized,
{
    fn get_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        (**self).get_listing(id)
    }

    fn list_listings(&self) -> Result<Vec<Listing>, MarketplaceStoreError> {
        (**self).list_listings()
    }

    fn list_listings_by_user(&self, user_id: i64) -> Result<Vec<Listing>, MarketplaceStoreError> {
        (**self).list_listings_by_user(user_id)
    }

    fn create_listing(&self, listing: NewListing) -> Result<Listing, MarketplaceStoreError> {
        (**self).create_listing(listing)
    }

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        (**self).get_transaction(id)
    }

    fn list_transactions_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        (**self).list_transactions_by_user(user_id)
    }

    fn list_transactions_by_listing(
        &self,
        listing_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        (**self).list_transactions_by_listing(listing_id)
    }

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, MarketplaceStoreError> {
        (**self).create_transaction(transaction)
    }
}
