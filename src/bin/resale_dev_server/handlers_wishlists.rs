use super::*;

pub(super) async fn list_wishlist(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
) -> Json<Data<Vec<WishlistItemView>>> {
    let wishlists = state.wishlists.read().await;
    let items = wishlists.get(&owner.0).map(Vec::as_slice).unwrap_or_default();

    // Rows whose listing left the catalogue are hidden rather than served half-empty.
    let views = items
        .iter()
        .filter_map(|item| {
            let listing = state.listing(item.listing.as_str())?;
            Some(WishlistItemView {
                id: item.id.clone(),
                listing: listing.clone(),
                created_at: item.created_at.clone(),
            })
        })
        .collect();
    data(views)
}

pub(super) async fn add_to_wishlist(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    Json(payload): Json<AddWishlistRequest>,
) -> Result<(StatusCode, Json<Data<WishlistItem>>), Response> {
    if state.listing(&payload.listing).is_none() {
        return Err(not_found("listing"));
    }

    let mut wishlists = state.wishlists.write().await;
    let items = wishlists.entry(owner.0.clone()).or_default();
    if let Some(existing) = items.iter().find(|i| i.listing.as_str() == payload.listing) {
        return Ok((StatusCode::OK, data(existing.clone())));
    }

    let created_at = now_ts();
    let item = WishlistItem {
        id: wishlist_item_id(&owner.0, &payload.listing, &created_at),
        listing: ListingId::from(payload.listing),
        created_at,
    };
    items.push(item.clone());
    persist_wishlists(state.as_ref(), &wishlists).map_err(internal_error)?;
    tracing::info!(listing = %item.listing, "wishlist add");

    Ok((StatusCode::CREATED, data(item)))
}

pub(super) async fn remove_from_wishlist(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<Owner>,
    Path(listing_id): Path<String>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut wishlists = state.wishlists.write().await;
    let Some(items) = wishlists.get_mut(&owner.0) else {
        return Err(not_found("wishlist entry"));
    };
    let before = items.len();
    items.retain(|i| i.listing.as_str() != listing_id);
    if items.len() == before {
        return Err(not_found("wishlist entry"));
    }

    persist_wishlists(state.as_ref(), &wishlists).map_err(internal_error)?;
    tracing::info!(listing = %listing_id, "wishlist remove");
    Ok(Json(serde_json::json!({"data": {"listing": listing_id}})))
}

fn wishlist_item_id(owner: &str, listing: &str, created_at: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(owner.as_bytes());
    hasher.update(b"\n");
    hasher.update(listing.as_bytes());
    hasher.update(b"\n");
    hasher.update(created_at.as_bytes());
    hasher.finalize().to_hex()[..24].to_string()
}
