use crate::model::{ListingId, Session};

use super::{KeyValueStorage, LocalWishlist, WishlistRemote};

/// Outcome of pushing a guest wishlist to the remote store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pushed: Vec<ListingId>,
    pub failed: Vec<ListingId>,

    // Every id read from local storage, in stored order.
    attempted: Vec<ListingId>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.attempted.is_empty()
    }

    /// Every id that was held locally, in stored order, whether or not its push succeeded.
    pub fn local_ids(&self) -> impl Iterator<Item = &ListingId> {
        self.attempted.iter()
    }
}

/// One-shot guest to account merge: add every locally held id remotely, then drop the
/// local copy.
///
/// Individual failures are logged and recorded in the report; they do not stop the
/// remaining pushes and do not keep the local copy alive.
pub fn reconcile<S, R>(local: &LocalWishlist<S>, remote: &R, session: &Session) -> SyncReport
where
    S: KeyValueStorage,
    R: WishlistRemote + ?Sized,
{
    let ids = match local.load() {
        Ok(ids) => ids,
        Err(err) => {
            tracing::warn!("discarding unreadable local wishlist: {:#}", err);
            Vec::new()
        }
    };

    let mut report = SyncReport::default();
    for id in ids {
        report.attempted.push(id.clone());
        match remote.add(session, &id) {
            Ok(()) => report.pushed.push(id),
            Err(err) => {
                tracing::warn!(listing = %id, "wishlist sync push failed: {:#}", err);
                report.failed.push(id);
            }
        }
    }

    if let Err(err) = local.clear() {
        tracing::warn!("failed to clear local wishlist after sync: {:#}", err);
    }
    tracing::debug!(
        pushed = report.pushed.len(),
        failed = report.failed.len(),
        "wishlist sync finished"
    );
    report
}

#[cfg(test)]
#[path = "../tests/wishlist/sync_tests.rs"]
mod tests;
