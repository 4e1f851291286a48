//! One page load's worth of navigation context.

use mengya_store::{HierarchicalStore, Storage, SyncReport};
use mengya_types::clock::Clock;
use mengya_types::config::MengyaConfig;
use mengya_types::error::Result;
use mengya_ui::{DEFAULT_VIBRATION, ToastManager};

use crate::controller::{
    EventOutcome, NavEvent, NavigateOptions, NavigationController, NavigationTicket,
};
use crate::host::Host;
use crate::lifecycle::PageLifecycle;
use crate::pages::PageTable;

/// Owns the host, store, navigation controller, toasts and lifecycle
/// callbacks, and wires them together the way a page load does.
///
/// Call [`page_ready`](Self::page_ready) once the host is showing a
/// document, then drive time with [`tick`](Self::tick).
pub struct Session<H: Host> {
    config: MengyaConfig,
    host: H,
    store: HierarchicalStore,
    nav: NavigationController,
    toasts: ToastManager,
    lifecycle: PageLifecycle,
}

impl<H: Host> Session<H> {
    pub fn new(
        config: MengyaConfig,
        host: H,
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let store = HierarchicalStore::from_config(&config, storage, clock);
        let nav = NavigationController::new(&config);
        let toasts = ToastManager::new(config.toast_duration_ms);
        Self {
            config,
            host,
            store,
            nav,
            toasts,
            lifecycle: PageLifecycle::new(),
        }
    }

    /// Replace the built-in page table.
    pub fn with_pages(mut self, pages: PageTable) -> Self {
        self.nav = NavigationController::new(&self.config).with_pages(pages);
        self
    }

    /// Page-ready bootstrap: pick up a history snapshot if enabled, sync the
    /// store (sweeping expired entries), install navigation and run ready
    /// callbacks.
    pub fn page_ready(&mut self) -> SyncReport {
        if self.config.persist_history && self.nav.restore_history(&mut self.store) {
            log::debug!("Restored history: {:?}", self.nav.history().to_vec());
        }
        let report = self.store.sync_data();
        self.nav.init(&self.host, &self.store);
        self.lifecycle.mark_ready();
        log::info!("Page ready: {}", self.nav.current_page(&self.host));
        report
    }

    /// Navigate to `page`, recording it in history.
    pub fn navigate(&mut self, page: &str) -> Result<NavigationTicket> {
        let ticket = self.nav.navigate_to(
            &mut self.host,
            &mut self.store,
            page,
            NavigateOptions::RECORD,
        )?;
        self.snapshot();
        Ok(ticket)
    }

    /// Go back one page, or home.
    pub fn back(&mut self) -> Result<NavigationTicket> {
        let ticket = self.nav.smart_back(&mut self.host, &mut self.store)?;
        self.snapshot();
        Ok(ticket)
    }

    /// Route a popstate or key event to the controller.
    pub fn handle_event(&mut self, event: &NavEvent) -> EventOutcome {
        let outcome = self
            .nav
            .handle_event(&mut self.host, &mut self.store, event);
        if outcome.handled {
            self.snapshot();
        }
        outcome
    }

    /// Advance transitions and toasts by `dt_ms`. Returns the number of
    /// navigation tasks run.
    pub fn tick(&mut self, dt_ms: u32) -> usize {
        self.toasts.tick(dt_ms);
        self.nav.advance(&mut self.host, u64::from(dt_ms))
    }

    /// Let every pending transition finish, aging toasts by the same
    /// amount. Returns the milliseconds that passed.
    pub fn settle(&mut self) -> u64 {
        let waited = self.nav.run_until_idle(&mut self.host);
        self.toasts.tick(u32::try_from(waited).unwrap_or(u32::MAX));
        waited
    }

    /// Simulate a fresh load of the document the host is showing: the
    /// in-memory tier, controller, toasts and callbacks start over, then
    /// [`page_ready`](Self::page_ready) runs.
    pub fn reload(&mut self) -> SyncReport {
        let pages = self.nav.pages().clone();
        self.nav = NavigationController::new(&self.config).with_pages(pages);
        self.store.clear_memory();
        self.toasts = ToastManager::new(self.config.toast_duration_ms);
        self.lifecycle = PageLifecycle::new();
        self.page_ready()
    }

    /// Haptic feedback through the host. `None` uses [`DEFAULT_VIBRATION`];
    /// an empty pattern does nothing.
    pub fn vibrate(&mut self, pattern: Option<&[u32]>) {
        let pattern = pattern.unwrap_or(DEFAULT_VIBRATION);
        if !pattern.is_empty() {
            self.host.vibrate(pattern);
        }
    }

    /// Run unload callbacks and flush the store.
    pub fn before_unload(&mut self) -> SyncReport {
        self.lifecycle.before_unload();
        self.snapshot();
        self.store.sync_data()
    }

    fn snapshot(&mut self) {
        if self.config.persist_history {
            self.nav.snapshot_history(&mut self.store);
        }
    }

    pub fn config(&self) -> &MengyaConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &HierarchicalStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HierarchicalStore {
        &mut self.store
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn lifecycle_mut(&mut self) -> &mut PageLifecycle {
        &mut self.lifecycle
    }

    /// Identifier of the page the host is showing.
    pub fn current_page(&self) -> String {
        self.nav.current_page(&self.host)
    }
}
