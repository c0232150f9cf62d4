use serde::{Deserialize, Serialize};

use super::ListingId;

/// A marketplace item as served by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: ListingId,
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub price: f64,
    pub category: String,
    pub condition: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
