//! This crate contains all shared UI for the courier app.

use dioxus::prelude::*;

mod services;
pub use services::{data_dir, make_cache, use_services, Cache, Inbox, Services};

mod session;
pub use session::{session_store, use_session, SessionProvider, SessionState};

mod boot_gate;
pub use boot_gate::BootGate;

mod inbox;
pub use inbox::{use_inbox, use_inbox_snapshot, InboxProvider, NotificationList, UnreadBadge};

mod parcel_search;
pub use parcel_search::{ParcelRow, ParcelSearch};

pub const MAIN_CSS: Asset = asset!("/assets/main.css");
