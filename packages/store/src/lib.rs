pub mod cache;
pub mod config;
pub mod keys;
pub mod models;

pub mod lenient;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use cache::{KeyValueStore, LocalCache};
pub use config::{ApiConfig, AppConfig, CourierConfig, Platform};
pub use models::{
    branch_code_of, entity_code_of, Notification, NotificationFeed, Parcel, Role, Session, UserId,
};
