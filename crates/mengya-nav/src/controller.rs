//! Navigation controller: history stack, timed transitions, scroll state.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

use mengya_store::HierarchicalStore;
use mengya_types::config::MengyaConfig;
use mengya_types::error::{MengyaError, Result};
use mengya_types::input::KeyEvent;

use crate::history::NavigationHistory;
use crate::host::{Host, PageStyle};
use crate::pages::{PageTable, normalize_id, page_name_from_path};
use crate::timer::TimerQueue;

/// Store path that holds a history snapshot.
pub const HISTORY_SNAPSHOT_PATH: &str = "navigation.history";

/// Options for [`NavigationController::navigate_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Leave the history stack untouched (back navigation, restoration).
    pub suppress_history_record: bool,
}

impl NavigateOptions {
    /// Record the page in history.
    pub const RECORD: Self = Self {
        suppress_history_record: false,
    };

    /// Do not record the page in history.
    pub const SUPPRESS: Self = Self {
        suppress_history_record: true,
    };
}

/// Scroll state saved for a page before leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    #[serde(rename = "scrollPosition", default, deserialize_with = "rounded_offset")]
    pub scroll_position: i32,
    /// Epoch milliseconds; makes the entry eligible for expiry.
    #[serde(default)]
    pub timestamp: u64,
}

/// Browsers report fractional scroll offsets; round them to whole pixels.
fn rounded_offset<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let y = f64::deserialize(deserializer)?;
    Ok(y.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

/// Completion signal of a scheduled navigation.
#[derive(Debug, Clone, Default)]
pub struct Completion(Rc<Cell<bool>>);

impl Completion {
    /// Whether the location change has been applied.
    pub fn is_complete(&self) -> bool {
        self.0.get()
    }

    fn complete(&self) {
        self.0.set(true);
    }
}

/// Handle for a navigation that has been scheduled but not yet applied.
#[derive(Debug, Clone)]
pub struct NavigationTicket {
    /// Identifier navigated to.
    pub page: String,
    /// Document the host will be pointed at.
    pub target: String,
    completion: Completion,
}

impl NavigationTicket {
    /// Whether the host location has been changed.
    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    /// A shareable completion signal.
    pub fn completion(&self) -> Completion {
        self.completion.clone()
    }
}

/// External events bridged into navigation once [`init`] has run.
///
/// [`init`]: NavigationController::init
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Native back/forward. `page` is the identifier remembered in the
    /// history entry's state, if any.
    PopState { page: Option<String> },
    /// A key press anywhere on the page.
    Key(KeyEvent),
}

/// What the controller did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub handled: bool,
    /// The host should suppress its default action.
    pub prevent_default: bool,
}

impl EventOutcome {
    const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };
}

#[derive(Debug)]
enum Task {
    RestoreStyle,
    ChangeLocation { target: String, completion: Completion },
    RestoreScroll(i32),
}

/// Owns the back-stack and sequences page transitions.
#[derive(Debug)]
pub struct NavigationController {
    pages: PageTable,
    history: NavigationHistory,
    timers: TimerQueue<Task>,
    home_page: String,
    transition_delay_ms: u64,
    restore_delay_ms: u64,
    bridges_installed: bool,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(&MengyaConfig::default())
    }
}

impl NavigationController {
    pub fn new(config: &MengyaConfig) -> Self {
        Self {
            pages: PageTable::builtin(),
            history: NavigationHistory::new(config.history_limit),
            timers: TimerQueue::new(),
            home_page: config.home_page.clone(),
            transition_delay_ms: config.transition_delay_ms,
            restore_delay_ms: config.restore_delay_ms,
            bridges_installed: false,
        }
    }

    /// Replace the built-in page table.
    pub fn with_pages(mut self, pages: PageTable) -> Self {
        self.pages = pages;
        self
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    pub fn home_page(&self) -> &str {
        &self.home_page
    }

    /// Whether [`init`](Self::init) has installed the event bridges.
    pub fn is_initialized(&self) -> bool {
        self.bridges_installed
    }

    /// Identifier of the page the host is showing.
    pub fn current_page(&self, host: &dyn Host) -> String {
        page_name_from_path(&host.location_path())
    }

    /// Number of scheduled tasks not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Schedule a transition to `page`.
    ///
    /// Fails without touching any state if `page` is not in the page table;
    /// the user is alerted and the error is logged. On success the history
    /// is updated immediately, the current scroll offset is saved, and the
    /// location change runs after the transition delay (see
    /// [`advance`](Self::advance)).
    pub fn navigate_to(
        &mut self,
        host: &mut dyn Host,
        store: &mut HierarchicalStore,
        page: &str,
        options: NavigateOptions,
    ) -> Result<NavigationTicket> {
        let page = normalize_id(page);
        let Some(target) = self.pages.resolve(page).map(str::to_string) else {
            log::error!("Page not found: {page}");
            host.alert(&format!(
                "Sorry, the page \"{page}\" is not available yet or does not exist"
            ));
            return Err(MengyaError::UnknownPage(page.to_string()));
        };

        if !options.suppress_history_record && self.history.record(page) {
            log::debug!("History: {:?}", self.history.to_vec());
        }

        self.save_current_page_state(host, store);

        host.apply_page_style(PageStyle::DIMMED);
        self.timers.schedule(self.transition_delay_ms, Task::RestoreStyle);

        let completion = Completion::default();
        self.timers.schedule(
            self.transition_delay_ms,
            Task::ChangeLocation {
                target: target.clone(),
                completion: completion.clone(),
            },
        );
        log::info!("Navigating to {page} ({target})");

        Ok(NavigationTicket {
            page: page.to_string(),
            target,
            completion,
        })
    }

    /// Go back one page, or to the home page when there is nothing to go
    /// back to. The destination is never pushed again.
    pub fn smart_back(
        &mut self,
        host: &mut dyn Host,
        store: &mut HierarchicalStore,
    ) -> Result<NavigationTicket> {
        if self.history.len() > 1 {
            let popped = self.history.pop();
            let previous = self
                .history
                .top()
                .unwrap_or(self.home_page.as_str())
                .to_string();
            let result = self.navigate_to(host, store, &previous, NavigateOptions::SUPPRESS);
            if let (Err(_), Some(page)) = (&result, popped) {
                self.history.record(page);
            }
            result
        } else {
            let home = self.home_page.clone();
            let ticket = self.navigate_to(host, store, &home, NavigateOptions::SUPPRESS)?;
            self.history.reset_to(home);
            Ok(ticket)
        }
    }

    fn save_current_page_state(&self, host: &dyn Host, store: &mut HierarchicalStore) {
        let key = format!("pageState_{}", self.current_page(host));
        let state = PageState {
            scroll_position: host.scroll_y(),
            timestamp: store.now_ms(),
        };
        store.set_local(&key, &state);
    }

    /// Schedule restoration of the scroll offset saved for the current page.
    ///
    /// Returns whether a restoration was scheduled. Missing or zero saved
    /// state is a silent no-op.
    pub fn restore_page_state(&mut self, host: &dyn Host, store: &HierarchicalStore) -> bool {
        let key = format!("pageState_{}", self.current_page(host));
        let Some(raw) = store.get_local(&key) else {
            return false;
        };
        let Ok(state) = serde_json::from_value::<PageState>(raw) else {
            return false;
        };
        if state.scroll_position == 0 {
            return false;
        }
        log::debug!("Restoring scroll {} on {key}", state.scroll_position);
        self.timers.schedule(
            self.restore_delay_ms,
            Task::RestoreScroll(state.scroll_position),
        );
        true
    }

    /// Per-load setup: restore scroll state, make sure the current page is on
    /// top of history and start listening for bridged events.
    pub fn init(&mut self, host: &dyn Host, store: &HierarchicalStore) {
        self.restore_page_state(host, store);
        let current = self.current_page(host);
        self.history.record(current.as_str());
        self.bridges_installed = true;
        log::debug!("Navigation ready on {current}");
    }

    /// Route an external event. Events are ignored before [`init`](Self::init).
    pub fn handle_event(
        &mut self,
        host: &mut dyn Host,
        store: &mut HierarchicalStore,
        event: &NavEvent,
    ) -> EventOutcome {
        if !self.bridges_installed {
            return EventOutcome::IGNORED;
        }
        match event {
            NavEvent::PopState { page: Some(page) } => {
                // Unknown pages are already alerted and logged.
                let _ = self.navigate_to(host, store, page, NavigateOptions::SUPPRESS);
                EventOutcome {
                    handled: true,
                    prevent_default: false,
                }
            },
            NavEvent::Key(key) if key.is_back_shortcut() => {
                let _ = self.smart_back(host, store);
                EventOutcome {
                    handled: true,
                    prevent_default: true,
                }
            },
            _ => EventOutcome::IGNORED,
        }
    }

    /// Advance the transition clock and run every task that became due.
    /// Returns the number of tasks run.
    pub fn advance(&mut self, host: &mut dyn Host, elapsed_ms: u64) -> usize {
        let due = self.timers.advance(elapsed_ms);
        let count = due.len();
        for task in due {
            match task {
                Task::RestoreStyle => host.apply_page_style(PageStyle::NORMAL),
                Task::ChangeLocation { target, completion } => {
                    host.set_location(&target);
                    completion.complete();
                },
                Task::RestoreScroll(y) => host.scroll_to(y),
            }
        }
        count
    }

    /// Milliseconds until the next pending task is due.
    pub fn next_due_in(&self) -> Option<u64> {
        self.timers.next_due_in()
    }

    /// Advance straight through every pending task. Returns the virtual time
    /// that passed.
    pub fn run_until_idle(&mut self, host: &mut dyn Host) -> u64 {
        let mut waited = 0;
        while let Some(delay) = self.timers.next_due_in() {
            self.advance(host, delay);
            waited += delay;
        }
        waited
    }

    /// Save the history stack into the store so the next page load can pick
    /// it up.
    pub fn snapshot_history(&self, store: &mut HierarchicalStore) -> bool {
        store.set_data(HISTORY_SNAPSHOT_PATH, &self.history.to_vec())
    }

    /// Replace the history with a saved snapshot. Returns `false` if there
    /// is none.
    pub fn restore_history(&mut self, store: &mut HierarchicalStore) -> bool {
        let Some(entries) = store.get_data_as::<Vec<String>>(HISTORY_SNAPSHOT_PATH) else {
            return false;
        };
        self.history = NavigationHistory::from_entries(self.history.limit(), entries);
        true
    }
}
