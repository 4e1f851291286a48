//! The page host: location, scroll, styling, alerts and vibration.
//!
//! In a browser these map onto `window.location`, `window.scrollY`, the body
//! style, `alert()` and `navigator.vibrate()`. [`MemoryHost`] implements them in memory for the
//! headless shell and tests.

/// Visual state of the page body during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyle {
    pub opacity: f32,
    pub scale: f32,
}

impl PageStyle {
    /// Resting style.
    pub const NORMAL: Self = Self {
        opacity: 1.0,
        scale: 1.0,
    };

    /// Style held while a transition plays.
    pub const DIMMED: Self = Self {
        opacity: 0.8,
        scale: 0.98,
    };
}

impl Default for PageStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Services the navigation controller needs from its embedding.
pub trait Host {
    /// Path of the current document (e.g. `/app/profile.html`).
    fn location_path(&self) -> String;

    /// Load `target`, a document path relative to the current one.
    fn set_location(&mut self, target: &str);

    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> i32;

    /// Scroll to an absolute vertical offset.
    fn scroll_to(&mut self, y: i32);

    /// Apply a body style.
    fn apply_page_style(&mut self, style: PageStyle);

    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);

    /// Run a vibration pattern. Hosts without a vibration motor ignore it.
    fn vibrate(&mut self, pattern: &[u32]) {
        let _ = pattern;
    }
}

/// In-memory host that records everything it is asked to do.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    path: String,
    scroll_y: i32,
    style: PageStyle,
    /// Every location set, in order.
    pub visited: Vec<String>,
    /// Every alert shown, in order.
    pub alerts: Vec<String>,
    /// Every vibration pattern run, in order.
    pub vibrations: Vec<Vec<u32>>,
}

impl MemoryHost {
    /// Create a host showing the document at `path`.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            scroll_y: 0,
            style: PageStyle::NORMAL,
            visited: Vec::new(),
            alerts: Vec::new(),
            vibrations: Vec::new(),
        }
    }

    /// Current body style.
    pub fn style(&self) -> PageStyle {
        self.style
    }
}

impl Host for MemoryHost {
    fn location_path(&self) -> String {
        self.path.clone()
    }

    fn set_location(&mut self, target: &str) {
        self.path = resolve_relative(&self.path, target);
        self.scroll_y = 0;
        self.visited.push(target.to_string());
    }

    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: i32) {
        self.scroll_y = y.max(0);
    }

    fn apply_page_style(&mut self, style: PageStyle) {
        self.style = style;
    }

    fn alert(&mut self, message: &str) {
        log::warn!("alert: {message}");
        self.alerts.push(message.to_string());
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        self.vibrations.push(pattern.to_vec());
    }
}

/// Resolve `target` against the directory of `base`.
fn resolve_relative(base: &str, target: &str) -> String {
    if target.starts_with('/') {
        return target.to_string();
    }
    match base.rfind('/') {
        Some(i) => format!("{}{target}", &base[..=i]),
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_location_replaces_last_segment() {
        let mut host = MemoryHost::new("/app/home.html");
        host.set_location("profile.html");
        assert_eq!(host.location_path(), "/app/profile.html");
        assert_eq!(host.visited, vec!["profile.html"]);
    }

    #[test]
    fn absolute_target_replaces_path() {
        let mut host = MemoryHost::new("/app/home.html");
        host.set_location("/other/start.html");
        assert_eq!(host.location_path(), "/other/start.html");
    }

    #[test]
    fn bare_base_path() {
        assert_eq!(resolve_relative("home.html", "settings.html"), "settings.html");
        assert_eq!(resolve_relative("/", "settings.html"), "/settings.html");
    }

    #[test]
    fn new_document_starts_at_top() {
        let mut host = MemoryHost::new("/home.html");
        host.scroll_to(480);
        host.set_location("story-wall.html");
        assert_eq!(host.scroll_y(), 0);
    }

    #[test]
    fn negative_scroll_clamps_to_zero() {
        let mut host = MemoryHost::new("/home.html");
        host.scroll_to(-5);
        assert_eq!(host.scroll_y(), 0);
    }

    #[test]
    fn alerts_are_recorded() {
        let mut host = MemoryHost::new("/home.html");
        host.alert("nope");
        assert_eq!(host.alerts, vec!["nope"]);
    }

    #[test]
    fn vibrations_are_recorded() {
        let mut host = MemoryHost::new("/home.html");
        host.vibrate(&[50]);
        host.vibrate(&[100, 30, 100]);
        assert_eq!(host.vibrations, vec![vec![50], vec![100, 30, 100]]);
    }

    #[test]
    fn vibrate_is_optional_for_hosts() {
        struct Silent;
        impl Host for Silent {
            fn location_path(&self) -> String {
                "/home.html".to_string()
            }
            fn set_location(&mut self, _target: &str) {}
            fn scroll_y(&self) -> i32 {
                0
            }
            fn scroll_to(&mut self, _y: i32) {}
            fn apply_page_style(&mut self, _style: PageStyle) {}
            fn alert(&mut self, _message: &str) {}
        }
        Silent.vibrate(&[50]);
    }
}
