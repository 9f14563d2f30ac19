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

use crate::marketplace::store::{
    MarketplaceStore, MarketplaceStoreError, NewListing, NewTransaction,
};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::{ListingSlice, TransactionSlice};

fn store_error(err: MarketplaceStoreError) -> ErrorResponse {
    match err {
        MarketplaceStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        MarketplaceStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        MarketplaceStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        MarketplaceStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

pub fn list_listings<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
) -> Result<Vec<ListingSlice>, ErrorResponse> {
    Ok(store
        .list_listings()
        .map_err(store_error)?
        .into_iter()
        .map(ListingSlice::from)
        .collect())
}

pub fn list_listings_by_user<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
    user_id: &str,
) -> Result<Vec<ListingSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_listings_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(ListingSlice::from)
        .collect())
}

pub fn create_listing<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
    body: &Value,
) -> Result<ListingSlice, ErrorResponse> {
    let new_listing = NewListing::from_json(body)?;
    store
        .create_listing(new_listing)
        .map(ListingSlice::from)
        .map_err(store_error)
}

pub fn list_transactions_by_user<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
    user_id: &str,
) -> Result<Vec<TransactionSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_transactions_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(TransactionSlice::from)
        .collect())
}

pub fn list_transactions_by_listing<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
    listing_id: &str,
) -> Result<Vec<TransactionSlice>, ErrorResponse> {
    let listing_id = parse_id(listing_id, "listing")?;
    Ok(store
        .list_transactions_by_listing(listing_id)
        .map_err(store_error)?
        .into_iter()
        .map(TransactionSlice::from)
        .collect())
}

pub fn create_transaction<'a>(
    store: Box<dyn MarketplaceStore + 'a>,
    body: &Value,
) -> Result<TransactionSlice, ErrorResponse> {
    let new_transaction = NewTransaction::from_json(body)?;
    store
        .create_transaction(new_transaction)
        .map(TransactionSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::marketplace::store::memory::MemoryMarketplaceStore;
    use crate::marketplace::store::TransactionType;

    #[test]
    fn test_listing_defaults() {
        let store = MemoryMarketplaceStore::new();
        let listing = create_listing(
            Box::new(store.clone()),
            &json!({
                "userId": 1,
                "cropName": "Basmati Rice",
                "quantity": 500,
                "unit": "kg",
                "price": 45.5,
            }),
        )
        .expect("Failed to create listing");
        assert_eq!(listing.currency, "INR");
        assert!(!listing.is_organic);
        assert!(!listing.is_verified);

        assert_eq!(
            list_listings(Box::new(store.clone())).expect("Failed to list"),
            vec![listing]
        );
        assert!(list_listings_by_user(Box::new(store), "2")
            .expect("Failed to list")
            .is_empty());
    }

    #[test]
    fn test_transaction_details_round_trip() {
        let store = MemoryMarketplaceStore::new();
        let details = json!({ "grade": "A", "moisture": 12.5, "inspectors": ["FSSAI"] });
        let transaction = create_transaction(
            Box::new(store.clone()),
            &json!({
                "userId": 1,
                "listingId": 7,
                "transactionType": "quality_check",
                "details": details,
                "transactionHash": "0x3f2a",
            }),
        )
        .expect("Failed to create transaction");
        assert_eq!(transaction.transaction_type, TransactionType::QualityCheck);
        assert_eq!(transaction.details, Some(details));

        let by_listing = list_transactions_by_listing(Box::new(store.clone()), "7")
            .expect("Failed to list");
        assert_eq!(by_listing, vec![transaction]);

        let err = create_transaction(
            Box::new(store),
            &json!({ "userId": 1, "transactionType": "refund" }),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.errors()[0].field, "transactionType");
    }
}
