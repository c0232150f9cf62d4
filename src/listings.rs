//! Listing browser state: the filters a shopper can set, how they map onto URL query
//! parameters, and the client-side filter/sort pass over a fetched collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::Listing;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            other => anyhow::bail!(
                "unknown sort order {:?} (expected newest, oldest, price-asc or price-desc)",
                other
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search_term: Option<String>,
    pub sort: SortOrder,
}

impl ListingQuery {
    /// Query parameters for the set filters only. The default sort is left implicit.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = non_empty(&self.category) {
            pairs.push(("category", v.to_string()));
        }
        if let Some(v) = non_empty(&self.condition) {
            pairs.push(("condition", v.to_string()));
        }
        if let Some(v) = self.min_price {
            pairs.push(("minPrice", v.to_string()));
        }
        if let Some(v) = self.max_price {
            pairs.push(("maxPrice", v.to_string()));
        }
        if let Some(v) = non_empty(&self.search_term) {
            pairs.push(("searchTerm", v.to_string()));
        }
        if self.sort != SortOrder::default() {
            pairs.push(("sort", self.sort.to_string()));
        }
        pairs
    }

    /// Inverse of `to_query_pairs`. Unknown keys and empty values are ignored.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut q = ListingQuery::default();
        for (k, v) in pairs {
            let v = v.as_ref().trim();
            if v.is_empty() {
                continue;
            }
            match k.as_ref() {
                "category" => q.category = Some(v.to_string()),
                "condition" => q.condition = Some(v.to_string()),
                "minPrice" => q.min_price = Some(parse_price("minPrice", v)?),
                "maxPrice" => q.max_price = Some(parse_price("maxPrice", v)?),
                "searchTerm" => q.search_term = Some(v.to_string()),
                "sort" => q.sort = v.parse()?,
                _ => {}
            }
        }
        Ok(q)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(c) = non_empty(&self.category)
            && !listing.category.eq_ignore_ascii_case(c)
        {
            return false;
        }
        if let Some(c) = non_empty(&self.condition)
            && !listing.condition.eq_ignore_ascii_case(c)
        {
            return false;
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        if let Some(term) = non_empty(&self.search_term) {
            let term = term.to_lowercase();
            return listing.title.to_lowercase().contains(&term)
                || listing.description.to_lowercase().contains(&term);
        }
        true
    }

    /// Filters then sorts. The sort is stable, so ties keep server order.
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        let mut out: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();
        match self.sort {
            SortOrder::PriceAsc => out.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceDesc => out.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Newest => out.sort_by(|a, b| by_date(a, b, true)),
            SortOrder::Oldest => out.sort_by(|a, b| by_date(a, b, false)),
        }
        out
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_price(key: &str, v: &str) -> Result<f64> {
    let n: f64 = v
        .parse()
        .with_context(|| format!("invalid {} {:?}", key, v))?;
    if !n.is_finite() || n < 0.0 {
        anyhow::bail!("invalid {} {:?} (must be a non-negative number)", key, v);
    }
    Ok(n)
}

fn created_at(l: &Listing) -> Option<OffsetDateTime> {
    l.created_at
        .as_deref()
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
}

// Undated listings go last in either direction.
fn by_date(a: &Listing, b: &Listing, newest_first: bool) -> Ordering {
    match (created_at(a), created_at(b)) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "tests/listings_tests.rs"]
mod tests;
