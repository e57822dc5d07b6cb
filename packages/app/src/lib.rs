//! # App crate: the courier client's workflows
//!
//! Everything between the screens and the remote API lives here, generic over
//! [`api::CourierApi`], [`store::KeyValueStore`] and [`push::PushGateway`] so
//! the UI wires in real implementations and the tests wire in fakes.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bootstrap`] | Start-up: version gate, push token, listener, token sync |
//! | [`listener`] | Reacting to push events for the process lifetime |
//! | [`token_sync`] | Registering the device token for the logged-in user |
//! | [`push`] | Push payloads, events and the gateway seam |
//! | [`session`] | Login and logout |
//! | [`registration`] | OTP sign-up and input validation |
//! | [`inbox`] | Notification list with optimistic mark-all-read |
//! | [`search`] | Filtering the cached parcel list |
//! | [`dashboard`] | Loading and caching each role's data |

pub mod bootstrap;
pub mod dashboard;
pub mod error;
pub mod inbox;
pub mod listener;
pub mod push;
pub mod registration;
pub mod search;
pub mod session;
pub mod token_sync;

#[cfg(test)]
mod testing;

pub use bootstrap::{BootOutcome, Bootstrap, Gate};
pub use dashboard::{promo_images, refresh_role_data, RoleData};
pub use error::{AppError, FieldError};
pub use inbox::{InboxSnapshot, MarkAllRead, NotificationInbox};
pub use listener::{Navigation, PushListener};
pub use push::{PushBus, PushError, PushEvent, PushGateway, PushMessage};
pub use registration::RegistrationFlow;
pub use search::{search, ParcelIndex};
pub use session::SessionStore;
pub use token_sync::{sync_push_token, TokenSync};
