pub mod map_service;
pub mod properties;
pub mod storage;

pub use map_service::DefaultMapService;
pub use properties::{Listings, PropertyStore};
pub use storage::{JsonFilePreferenceStore, MemoryPreferenceStore};
