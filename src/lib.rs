pub mod listings;
pub mod logging;
pub mod model;
pub mod remote;
pub mod store;
pub mod wishlist;
