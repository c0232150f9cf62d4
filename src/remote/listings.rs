//! Public listing endpoints.

use super::http_client::read_body;
use super::*;

impl RemoteClient {
    pub fn list_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        let resp = self
            .client
            .get(self.url(&["listings"])?)
            .query(&query.to_query_pairs())
            .send()
            .context("list listings")?;
        let resp = self.ensure_ok(resp, "list listings")?;
        decode_listings(&read_body(resp, "list listings")?)
    }

    pub fn get_listing(&self, id: &ListingId) -> Result<Listing> {
        let resp = self
            .client
            .get(self.url(&["listings", id.as_str()])?)
            .send()
            .context("get listing")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("listing {} not found", id);
        }

        let resp = self.ensure_ok(resp, "get listing")?;
        decode_listing(&read_body(resp, "get listing")?)
    }
}
