//! Transient toast notifications.
//!
//! A toast slides in from the right, stays for its duration, then slides
//! out and is dropped. Clicking a toast starts the exit early. The manager
//! owns no rendering; callers read [`ToastManager::toasts`] each frame.

use crate::animation::{Easing, Tween};

/// Default time a toast stays on screen.
pub const DEFAULT_DURATION_MS: u32 = 3000;

/// Slide in/out animation length.
pub const SLIDE_MS: u32 = 300;

/// Severity of a notification. Picks the colour and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Background colour as a CSS hex string.
    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "#10B981",
            Self::Error => "#EF4444",
            Self::Warning => "#F59E0B",
            Self::Info => "#3B82F6",
        }
    }

    /// Icon class shown before the message.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    /// Parse a severity name. Unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" | "warn" => Self::Warning,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Anything that can show a transient message to the user.
pub trait Notifier {
    /// Display `message` for `duration_ms`.
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u32);
}

/// Identifier of a shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Showing,
    Leaving,
}

/// One toast on screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
    age_ms: u32,
    phase: Phase,
    /// Horizontal offset as a fraction of the toast width (1.0 = off-screen).
    slide: Tween,
    opacity: Tween,
}

impl Toast {
    fn new(id: ToastId, message: String, severity: Severity, duration_ms: u32) -> Self {
        Self {
            id,
            message,
            severity,
            duration_ms,
            age_ms: 0,
            phase: Phase::Showing,
            slide: Tween::new(1.0, 0.0, SLIDE_MS, Easing::EaseOutCubic),
            opacity: Tween::new(0.0, 1.0, SLIDE_MS, Easing::EaseOutCubic),
        }
    }

    /// Current horizontal offset (0.0 = fully in view).
    pub fn offset(&self) -> f32 {
        self.slide.value()
    }

    /// Current opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Whether the exit animation has started.
    pub fn is_leaving(&self) -> bool {
        self.phase == Phase::Leaving
    }

    fn leave(&mut self) {
        if self.phase == Phase::Leaving {
            return;
        }
        self.phase = Phase::Leaving;
        self.slide.retarget(1.0, SLIDE_MS);
        self.opacity.retarget(0.0, SLIDE_MS);
    }

    /// Advance; returns `false` once the toast should be dropped.
    fn tick(&mut self, dt_ms: u32) -> bool {
        self.age_ms = self.age_ms.saturating_add(dt_ms);
        self.slide.tick(dt_ms);
        self.opacity.tick(dt_ms);
        match self.phase {
            Phase::Showing => {
                if self.age_ms >= self.duration_ms {
                    self.leave();
                }
                true
            },
            Phase::Leaving => !self.slide.is_finished(),
        }
    }
}

/// Stack of active toasts, newest last.
#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    next_id: u64,
    default_duration_ms: u32,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl ToastManager {
    pub fn new(default_duration_ms: u32) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            default_duration_ms,
        }
    }

    /// Show a toast.
    pub fn show(&mut self, message: &str, severity: Severity, duration_ms: u32) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        log::debug!("Toast [{severity}] {message} ({duration_ms}ms)");
        self.toasts
            .push(Toast::new(id, message.to_string(), severity, duration_ms));
        id
    }

    pub fn success(&mut self, message: &str, duration_ms: Option<u32>) -> ToastId {
        self.show(message, Severity::Success, self.duration(duration_ms))
    }

    pub fn error(&mut self, message: &str, duration_ms: Option<u32>) -> ToastId {
        self.show(message, Severity::Error, self.duration(duration_ms))
    }

    pub fn warning(&mut self, message: &str, duration_ms: Option<u32>) -> ToastId {
        self.show(message, Severity::Warning, self.duration(duration_ms))
    }

    pub fn info(&mut self, message: &str, duration_ms: Option<u32>) -> ToastId {
        self.show(message, Severity::Info, self.duration(duration_ms))
    }

    fn duration(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_duration_ms)
    }

    /// Start the exit animation of a toast, as a click would.
    ///
    /// Returns `false` if the toast is gone or already leaving.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if !toast.is_leaving() => {
                toast.leave();
                true
            },
            _ => false,
        }
    }

    /// Start the exit animation of every toast.
    pub fn clear_all(&mut self) {
        for toast in &mut self.toasts {
            toast.leave();
        }
    }

    /// Advance all toasts and drop the ones that finished leaving.
    pub fn tick(&mut self, dt_ms: u32) {
        self.toasts.retain_mut(|t| t.tick(dt_ms));
    }

    /// Toasts currently on screen, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastManager {
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u32) {
        self.show(message, severity, duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_palette() {
        assert_eq!(Severity::Success.background(), "#10B981");
        assert_eq!(Severity::Error.background(), "#EF4444");
        assert_eq!(Severity::Warning.background(), "#F59E0B");
        assert_eq!(Severity::Info.background(), "#3B82F6");
        assert_eq!(Severity::Error.icon(), "fas fa-exclamation-circle");
    }

    #[test]
    fn unknown_severity_name_is_info() {
        assert_eq!(Severity::from_name("ERROR"), Severity::Error);
        assert_eq!(Severity::from_name("celebration"), Severity::Info);
    }

    #[test]
    fn toast_slides_in() {
        let mut mgr = ToastManager::default();
        mgr.info("Welcome back!", None);
        let t = &mgr.toasts()[0];
        assert_eq!(t.offset(), 1.0);
        assert_eq!(t.opacity(), 0.0);

        mgr.tick(SLIDE_MS);
        let t = &mgr.toasts()[0];
        assert_eq!(t.offset(), 0.0);
        assert_eq!(t.opacity(), 1.0);
        assert_eq!(t.duration_ms, DEFAULT_DURATION_MS);
    }

    #[test]
    fn toast_auto_dismisses_after_duration() {
        let mut mgr = ToastManager::default();
        mgr.success("Task complete", Some(1000));
        mgr.tick(999);
        assert!(!mgr.toasts()[0].is_leaving());
        mgr.tick(1);
        assert!(mgr.toasts()[0].is_leaving());
        mgr.tick(SLIDE_MS - 1);
        assert_eq!(mgr.toasts().len(), 1);
        mgr.tick(1);
        assert!(mgr.is_empty());
    }

    #[test]
    fn dismiss_starts_exit_early() {
        let mut mgr = ToastManager::default();
        let id = mgr.warning("Low battery", Some(10_000));
        mgr.tick(SLIDE_MS);
        assert!(mgr.dismiss(id));
        assert!(!mgr.dismiss(id));
        mgr.tick(SLIDE_MS);
        assert!(mgr.is_empty());
        assert!(!mgr.dismiss(id));
    }

    #[test]
    fn clear_all_removes_every_toast() {
        let mut mgr = ToastManager::default();
        mgr.info("one", None);
        mgr.error("two", None);
        mgr.clear_all();
        assert!(mgr.toasts().iter().all(Toast::is_leaving));
        mgr.tick(SLIDE_MS);
        assert!(mgr.is_empty());
    }

    #[test]
    fn notifier_uses_given_duration() {
        let mut mgr = ToastManager::default();
        Notifier::notify(&mut mgr, "Saved", Severity::Success, 500);
        assert_eq!(mgr.toasts()[0].duration_ms, 500);
        assert_eq!(mgr.toasts()[0].severity, Severity::Success);
    }

    #[test]
    fn ids_are_unique() {
        let mut mgr = ToastManager::default();
        let a = mgr.info("a", None);
        let b = mgr.info("b", None);
        assert_ne!(a, b);
    }
}
