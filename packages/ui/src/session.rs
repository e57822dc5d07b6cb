//! Session context for the UI.

use app::SessionStore;
use dioxus::prelude::*;
use store::{FileStore, Session};

use crate::services::make_cache;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

pub fn session_store() -> SessionStore<FileStore> {
    SessionStore::new(make_cache())
}

/// Loads the stored session on mount and provides it to every child.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut state = use_signal(SessionState::default);

    let _ = use_resource(move || async move {
        let session = session_store().current().await;
        state.set(SessionState {
            session,
            loading: false,
        });
    });

    use_context_provider(|| state);

    rsx! {
        {children}
    }
}
