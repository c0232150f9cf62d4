//! Authenticated wishlist endpoints.

use super::http_client::read_body;
use super::*;

impl RemoteClient {
    pub fn list_wishlist(&self, session: &Session) -> Result<Vec<ListingId>> {
        let resp = self
            .client
            .get(self.url(&["wishlists"])?)
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .send()
            .context("list wishlist")?;
        let resp = self.ensure_ok(resp, "list wishlist")?;
        decode_wishlist(&read_body(resp, "list wishlist")?)
    }

    pub fn add_to_wishlist(&self, session: &Session, id: &ListingId) -> Result<()> {
        let resp = self
            .client
            .post(self.url(&["wishlists"])?)
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .json(&AddWishlistRequest {
                listing: id.as_str(),
            })
            .send()
            .context("add to wishlist")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("listing {} not found", id);
        }
        self.ensure_ok(resp, "add to wishlist")?;
        Ok(())
    }

    pub fn remove_from_wishlist(&self, session: &Session, id: &ListingId) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&["wishlists", id.as_str()])?)
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .send()
            .context("remove from wishlist")?;
        self.ensure_ok(resp, "remove from wishlist")?;
        Ok(())
    }
}

impl crate::wishlist::WishlistRemote for RemoteClient {
    fn list(&self, session: &Session) -> Result<Vec<ListingId>> {
        self.list_wishlist(session)
    }

    fn add(&self, session: &Session, id: &ListingId) -> Result<()> {
        self.add_to_wishlist(session, id)
    }

    fn remove(&self, session: &Session, id: &ListingId) -> Result<()> {
        self.remove_from_wishlist(session, id)
    }
}
