mod config;
mod ids;
mod listing;
mod session;

pub use self::config::{ApiConfig, ClientConfig, ClientState, DEFAULT_API_URL};
pub use self::ids::ListingId;
pub use self::listing::Listing;
pub use self::session::Session;
