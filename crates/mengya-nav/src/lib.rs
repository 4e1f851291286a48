//! Page navigation for the Mengya page shell.
//!
//! The [`NavigationController`] maps logical page identifiers to documents,
//! keeps a short back-stack, saves and restores per-page scroll state through
//! the [`HierarchicalStore`](mengya_store::HierarchicalStore), and defers the
//! actual location change behind a transition delay. Hosts (a browser
//! binding, a headless shell, a test) implement [`Host`] and drive time with
//! [`NavigationController::advance`].
//!
//! [`Session`] bundles one page load's worth of context: host, store,
//! controller, toasts and lifecycle callbacks.

pub mod controller;
pub mod history;
pub mod host;
pub mod lifecycle;
pub mod pages;
pub mod session;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use controller::{
    Completion, EventOutcome, NavEvent, NavigateOptions, NavigationController, NavigationTicket,
    PageState,
};
pub use history::NavigationHistory;
pub use host::{Host, MemoryHost, PageStyle};
pub use lifecycle::PageLifecycle;
pub use pages::{PageConfig, PageTable, page_config, page_name_from_path};
pub use session::Session;
pub use timer::TimerQueue;
