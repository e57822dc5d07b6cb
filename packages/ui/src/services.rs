//! Shared service handles and the local store constructor.
//!
//! The store is a [`store::FileStore`] under `<data_dir>/courier/`. Every
//! screen builds its own [`Cache`] over it on demand; all of them read and
//! write the same files.

use std::path::PathBuf;

use api::{ApiClient, ApiError};
use app::{NotificationInbox, PushBus};
use dioxus::prelude::*;
use store::{CourierConfig, FileStore, LocalCache};

pub type Cache = LocalCache<FileStore>;
pub type Inbox = NotificationInbox<ApiClient, FileStore>;

/// Directory holding the local store and `courier.toml`.
pub fn data_dir() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courier")
    }
    #[cfg(target_arch = "wasm32")]
    {
        PathBuf::from("courier")
    }
}

pub fn make_cache() -> Cache {
    LocalCache::new(FileStore::new(data_dir()))
}

/// Handles every screen needs, provided once by the root component.
#[derive(Clone, Debug)]
pub struct Services {
    pub api: ApiClient,
    pub config: CourierConfig,
    pub push: PushBus,
}

impl Services {
    pub fn new(config: CourierConfig) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(&config.api)?,
            config,
            push: PushBus::new(),
        })
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}
