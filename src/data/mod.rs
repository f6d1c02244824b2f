pub mod listing;

pub use listing::{listings_from_json, Listing, PropertyType};
