use resale::listings::ListingQuery;

use super::*;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Data<Vec<Listing>>>, Response> {
    let query = ListingQuery::from_query_pairs(params).map_err(bad_request)?;
    let listings = query.apply(state.listings.as_ref().clone());
    Ok(data(listings))
}

pub(super) async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
) -> Result<Json<Data<Listing>>, Response> {
    let Some(listing) = state.listing(&listing_id) else {
        return Err(not_found("listing"));
    };
    Ok(data(listing.clone()))
}
