use dioxus::prelude::*;

use crate::core::controller::Notifier;
use crate::core::platform::{self, Platform};
use crate::t;

/// Blocking notifications for the analyzer page.
///
/// The browser gets a real `window.alert`. Hosts without one (the desktop
/// webview) get the message parked in a signal, shown by [`NoticeDialog`]
/// until dismissed.
#[derive(Clone, Copy, PartialEq)]
pub struct PageNotifier {
    pending: Signal<Option<String>>,
}

impl PageNotifier {
    pub fn new(pending: Signal<Option<String>>) -> Self {
        Self { pending }
    }

    pub fn pending(&self) -> Option<String> {
        (self.pending)()
    }

    pub fn dismiss(&self) {
        let mut pending = self.pending;
        pending.set(None);
    }
}

impl Notifier for PageNotifier {
    fn notify(&self, message: &str) {
        if Platform::current().has_native_alert() && platform::alert(message) {
            return;
        }
        let mut pending = self.pending;
        pending.set(Some(message.to_string()));
    }
}

#[component]
pub fn NoticeDialog(notifier: PageNotifier) -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|code| code());
    let Some(message) = notifier.pending() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice-backdrop",
            div {
                class: "notice",
                role: "alertdialog",
                aria_modal: "true",
                p { id: "noticeMessage", class: "notice__message", "{message}" }
                button {
                    class: "button button--primary",
                    autofocus: true,
                    onclick: move |_| notifier.dismiss(),
                    {t!("notice-dismiss")}
                }
            }
        }
    }
}
