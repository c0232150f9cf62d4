//! DTOs for remote API requests/responses and the decoders that validate them.

use anyhow::{Context, Result};

use crate::model::{Listing, ListingId};

/// Every response body from the API wraps its payload in `{ "data": ... }`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// One row of `GET /wishlists`. The backend populates `listing` with the full record;
/// only its id is read.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct WishlistRecord {
    pub listing: ListingRef,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ListingRef {
    #[serde(rename = "_id")]
    pub id: ListingId,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct AddWishlistRequest<'a> {
    pub(super) listing: &'a str,
}

pub fn decode_wishlist(body: &[u8]) -> Result<Vec<ListingId>> {
    let env: DataEnvelope<Vec<WishlistRecord>> =
        serde_json::from_slice(body).context("parse wishlist response")?;
    Ok(env.data.into_iter().map(|r| r.listing.id).collect())
}

pub fn decode_listings(body: &[u8]) -> Result<Vec<Listing>> {
    let env: DataEnvelope<Vec<Listing>> =
        serde_json::from_slice(body).context("parse listings response")?;
    Ok(env.data)
}

pub fn decode_listing(body: &[u8]) -> Result<Listing> {
    let env: DataEnvelope<Listing> =
        serde_json::from_slice(body).context("parse listing response")?;
    Ok(env.data)
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
