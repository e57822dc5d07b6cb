//! Notification inbox context, list and unread badge.

use app::{InboxSnapshot, MarkAllRead, NotificationInbox};
use dioxus::prelude::*;
use store::Notification;

use crate::services::{make_cache, use_services, Inbox};

pub fn use_inbox() -> Inbox {
    use_context::<Inbox>()
}

pub fn use_inbox_snapshot() -> Signal<InboxSnapshot> {
    use_context::<Signal<InboxSnapshot>>()
}

/// Provides one shared inbox and mirrors its state into a signal.
#[component]
pub fn InboxProvider(children: Element) -> Element {
    let services = use_services();
    let inbox = use_context_provider(|| NotificationInbox::new(services.api.clone(), make_cache()));
    let mut snapshot = use_context_provider(|| Signal::new(inbox.snapshot()));

    use_future(move || {
        let inbox = inbox.clone();
        async move {
            let mut changes = inbox.subscribe();
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    rsx! {
        {children}
    }
}

#[component]
pub fn UnreadBadge() -> Element {
    let count = use_inbox_snapshot()().unread_count;
    if count == 0 {
        return rsx! {};
    }
    rsx! {
        span {
            class: "ml-1 px-1.5 rounded-full bg-red-600 text-white text-xs",
            "{count}"
        }
    }
}

/// The notification list. Fetches on mount.
#[component]
pub fn NotificationList(on_open: EventHandler<Notification>) -> Element {
    let inbox = use_inbox();
    let snapshot = use_inbox_snapshot();
    let mut error = use_signal(|| Option::<String>::None);

    let loader_inbox = inbox.clone();
    let _loader = use_resource(move || {
        let inbox = loader_inbox.clone();
        async move {
            match inbox.fetch().await {
                Ok(()) => error.set(None),
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    });

    let handle_mark_all = move |_| {
        let inbox = inbox.clone();
        spawn(async move {
            if inbox.mark_all_as_read().await == MarkAllRead::Reconciled {
                tracing::info!("notifications reloaded after failed mark-all-read");
            }
        });
    };

    let InboxSnapshot {
        notifications,
        unread_count,
        loading,
    } = snapshot();
    let empty = notifications.is_empty();

    rsx! {
        div {
            class: "flex flex-col",
            div {
                class: "flex items-center justify-between px-4 py-3 border-b border-neutral-200",
                h2 { class: "m-0 text-base font-semibold", "Notifications" }
                button {
                    class: "text-sm text-primary-500 disabled:text-neutral-400",
                    disabled: unread_count == 0,
                    onclick: handle_mark_all,
                    "Mark all as read"
                }
            }
            if loading {
                p { class: "p-4 text-neutral-600", "Loading..." }
            } else if let Some(err) = error() {
                p { class: "p-4 text-red-600 text-[0.8125rem]", "{err}" }
            } else if empty {
                p { class: "p-4 text-neutral-600", "No notifications" }
            }
            for notification in notifications {
                NotificationRow {
                    key: "{notification.id}",
                    notification: notification.clone(),
                    on_open: on_open,
                }
            }
        }
    }
}

#[component]
fn NotificationRow(notification: Notification, on_open: EventHandler<Notification>) -> Element {
    let class = if notification.is_read {
        "px-4 py-3 border-b border-neutral-100 text-neutral-600"
    } else {
        "px-4 py-3 border-b border-neutral-100 bg-primary-50 font-medium"
    };
    let title = notification.title.clone();
    let body = notification.body.clone();
    let created_at = notification.created_at.clone().unwrap_or_default();

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_open.call(notification.clone()),
            div { class: "text-[0.9375rem]", "{title}" }
            div { class: "text-[0.8125rem]", "{body}" }
            div { class: "text-xs text-neutral-400", "{created_at}" }
        }
    }
}
