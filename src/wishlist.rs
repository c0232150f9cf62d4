//! Wishlist state shared by the whole client.
//!
//! A guest's wishlist lives in local key/value storage. Once a session is present the
//! remote API is the store of record, and anything the guest collected is pushed there
//! exactly once on the transition.

use anyhow::Result;

use crate::model::{ListingId, Session};

mod local;
mod storage;
mod sync;

pub use self::local::{LocalWishlist, WISHLIST_STORAGE_KEY};
pub use self::storage::{KeyValueStorage, MemoryStorage};
pub use self::sync::{SyncReport, reconcile};

/// Authenticated wishlist endpoints.
pub trait WishlistRemote {
    fn list(&self, session: &Session) -> Result<Vec<ListingId>>;
    fn add(&self, session: &Session, id: &ListingId) -> Result<()>;
    fn remove(&self, session: &Session, id: &ListingId) -> Result<()>;
}

impl<T: WishlistRemote + ?Sized> WishlistRemote for &T {
    fn list(&self, session: &Session) -> Result<Vec<ListingId>> {
        (**self).list(session)
    }

    fn add(&self, session: &Session, id: &ListingId) -> Result<()> {
        (**self).add(session, id)
    }

    fn remove(&self, session: &Session, id: &ListingId) -> Result<()> {
        (**self).remove(session, id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Guest,
    Syncing,
    Authenticated,
}

/// Wishlist state container. Build one at the application root and hand it down.
///
/// Mutations update the in-memory set first and then write through to whichever store
/// the current phase uses. Write-through failures are logged and never rolled back, so
/// the in-memory set stays what the user last asked for.
pub struct Wishlist<S, R> {
    local: LocalWishlist<S>,
    remote: R,
    session: Option<Session>,
    phase: SessionPhase,
    entries: Vec<ListingId>,
}

impl<S: KeyValueStorage, R: WishlistRemote> Wishlist<S, R> {
    pub fn new(storage: S, remote: R) -> Self {
        Self {
            local: LocalWishlist::new(storage),
            remote,
            session: None,
            phase: SessionPhase::Guest,
            entries: Vec::new(),
        }
    }

    /// Starts already authenticated, for a session restored from disk. No merge runs
    /// until `mount`.
    pub fn with_session(storage: S, remote: R, session: Option<Session>) -> Self {
        let mut w = Self::new(storage, remote);
        if session.is_some() {
            w.phase = SessionPhase::Authenticated;
        }
        w.session = session;
        w
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn entries(&self) -> &[ListingId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn local(&self) -> &LocalWishlist<S> {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Initial population: local storage for a guest, the remote list otherwise.
    ///
    /// An authenticated mount that still finds guest entries locally (an interrupted
    /// earlier merge) pushes them first.
    pub fn mount(&mut self) -> Option<SyncReport> {
        let Some(session) = self.session.clone() else {
            match self.local.load() {
                Ok(ids) => self.set_wishlist(ids),
                Err(err) => tracing::warn!("failed to load local wishlist: {:#}", err),
            }
            return None;
        };

        let leftover = match self.local.load() {
            Ok(ids) => !ids.is_empty(),
            Err(err) => {
                tracing::warn!("failed to read local wishlist: {:#}", err);
                true
            }
        };
        let report = leftover.then(|| self.merge_local(&session));
        self.refresh_remote(&session);
        report
    }

    pub fn is_wishlisted(&self, id: &ListingId) -> bool {
        self.entries.contains(id)
    }

    pub fn toggle(&mut self, id: &ListingId) {
        if self.is_wishlisted(id) {
            self.remove_wishlist(id);
        } else {
            self.add_wishlist(id);
        }
    }

    pub fn add_wishlist(&mut self, id: &ListingId) {
        if !self.is_wishlisted(id) {
            self.entries.push(id.clone());
        }
        match &self.session {
            Some(session) => {
                if let Err(err) = self.remote.add(session, id) {
                    tracing::warn!(listing = %id, "remote wishlist add failed: {:#}", err);
                }
            }
            None => self.persist_local(),
        }
    }

    pub fn remove_wishlist(&mut self, id: &ListingId) {
        self.entries.retain(|e| e != id);
        match &self.session {
            Some(session) => {
                if let Err(err) = self.remote.remove(session, id) {
                    tracing::warn!(listing = %id, "remote wishlist remove failed: {:#}", err);
                }
            }
            None => self.persist_local(),
        }
    }

    /// Empties the in-memory set. Local storage is cleared only for a guest; the remote
    /// list is never touched.
    pub fn clear_wishlist(&mut self) {
        self.entries.clear();
        if self.session.is_none()
            && let Err(err) = self.local.clear()
        {
            tracing::warn!("failed to clear local wishlist: {:#}", err);
        }
    }

    /// Bulk replace. Duplicates collapse onto their first occurrence.
    pub fn set_wishlist(&mut self, ids: impl IntoIterator<Item = ListingId>) {
        self.entries.clear();
        for id in ids {
            if !self.entries.contains(&id) {
                self.entries.push(id);
            }
        }
    }

    /// Applies a session change and runs the matching transition.
    ///
    /// Guest to authenticated merges the local wishlist into the account and returns the
    /// report. Losing the session drops the in-memory set without writing it back to
    /// local storage.
    pub fn set_session(&mut self, next: Option<Session>) -> Option<SyncReport> {
        let prev = self.session.take();
        match (prev, next) {
            (None, Some(session)) => {
                let report = self.merge_local(&session);
                self.refresh_remote(&session);
                self.session = Some(session);
                Some(report)
            }
            (Some(_), Some(session)) => {
                // The previous account's ids must not survive a failed refetch.
                self.entries.clear();
                self.phase = SessionPhase::Authenticated;
                self.refresh_remote(&session);
                self.session = Some(session);
                None
            }
            (Some(_), None) => {
                self.entries.clear();
                self.phase = SessionPhase::Guest;
                None
            }
            (None, None) => None,
        }
    }

    /// Pushes the local wishlist to the account and folds its ids into memory, so the
    /// guest's picks stay visible even if the follow-up fetch fails.
    fn merge_local(&mut self, session: &Session) -> SyncReport {
        self.phase = SessionPhase::Syncing;
        let report = reconcile(&self.local, &self.remote, session);
        self.phase = SessionPhase::Authenticated;

        let merged: Vec<ListingId> = report.local_ids().cloned().collect();
        self.set_wishlist(self.entries.clone().into_iter().chain(merged));
        report
    }

    fn refresh_remote(&mut self, session: &Session) {
        match self.remote.list(session) {
            Ok(ids) => self.set_wishlist(ids),
            Err(err) => tracing::warn!("failed to fetch remote wishlist: {:#}", err),
        }
    }

    fn persist_local(&self) {
        if let Err(err) = self.local.save(&self.entries) {
            tracing::warn!("failed to persist local wishlist: {:#}", err);
        }
    }
}

#[cfg(test)]
#[path = "tests/wishlist/container_tests.rs"]
mod tests;
