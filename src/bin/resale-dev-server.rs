#![allow(clippy::result_large_err)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

use resale::model::{Listing, ListingId};

#[path = "resale_dev_server/types.rs"]
mod types;
use self::types::*;
#[path = "resale_dev_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "resale_dev_server/catalogue.rs"]
mod catalogue;
use self::catalogue::*;
#[path = "resale_dev_server/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "resale_dev_server/auth.rs"]
mod auth;
use self::auth::*;
#[path = "resale_dev_server/handlers_listings.rs"]
mod handlers_listings;
use self::handlers_listings::*;
#[path = "resale_dev_server/handlers_wishlists.rs"]
mod handlers_wishlists;
use self::handlers_wishlists::*;
#[path = "resale_dev_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    resale::logging::init("info");
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
