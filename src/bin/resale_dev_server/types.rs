use super::*;

#[derive(Clone)]
pub(super) struct AppState {
    pub(super) data_dir: PathBuf,

    // blake3 hashes of the accepted bearer tokens.
    pub(super) token_hashes: HashSet<String>,

    pub(super) listings: Arc<Vec<Listing>>,

    // Keyed by owner (token hash).
    pub(super) wishlists: Arc<RwLock<HashMap<String, Vec<WishlistItem>>>>,
}

impl AppState {
    pub(super) fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id.as_str() == id)
    }
}

/// Authenticated caller, attached to the request by `require_bearer`.
#[derive(Clone, Debug)]
pub(super) struct Owner(pub(super) String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WishlistItem {
    #[serde(rename = "_id")]
    pub(super) id: String,
    pub(super) listing: ListingId,
    pub(super) created_at: String,
}

/// Wire form of a wishlist row: the listing is populated with the full record.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WishlistItemView {
    #[serde(rename = "_id")]
    pub(super) id: String,
    pub(super) listing: Listing,
    pub(super) created_at: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct AddWishlistRequest {
    pub(super) listing: String,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct Data<T> {
    pub(super) data: T,
}

pub(super) fn data<T: serde::Serialize>(value: T) -> Json<Data<T>> {
    Json(Data { data: value })
}
