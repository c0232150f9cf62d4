use anyhow::{Context, Result};

use crate::listings::ListingQuery;
use crate::model::{Listing, ListingId, Session};

mod http_client;

mod types;
pub use self::types::*;
mod listings;
mod wishlists;

/// Blocking client for the marketplace REST API.
///
/// Requests are sent once; there is no retry and no client-side timeout.
pub struct RemoteClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("resale")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
