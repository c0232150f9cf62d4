use anyhow::{Context, Result};

use super::KeyValueStorage;
use crate::model::ListingId;

pub const WISHLIST_STORAGE_KEY: &str = "wishlist";

/// Guest-mode wishlist persistence: a JSON array of listing ids under one storage key.
#[derive(Debug)]
pub struct LocalWishlist<S> {
    storage: S,
}

impl<S: KeyValueStorage> LocalWishlist<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> Result<Vec<ListingId>> {
        let Some(raw) = self
            .storage
            .get_item(WISHLIST_STORAGE_KEY)
            .context("read local wishlist")?
        else {
            return Ok(Vec::new());
        };
        let ids: Vec<ListingId> =
            serde_json::from_str(&raw).context("parse local wishlist")?;
        Ok(ids)
    }

    pub fn save(&self, ids: &[ListingId]) -> Result<()> {
        let raw = serde_json::to_string(ids).context("serialize local wishlist")?;
        self.storage
            .set_item(WISHLIST_STORAGE_KEY, &raw)
            .context("write local wishlist")
    }

    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove_item(WISHLIST_STORAGE_KEY)
            .context("remove local wishlist")
    }
}

#[cfg(test)]
#[path = "../tests/wishlist/local_tests.rs"]
mod tests;
