//! Static page table and per-page display configuration.
//!
//! The table is closed: an identifier that is not listed here never
//! resolves, and no target is derived from an unknown name.

use std::collections::BTreeMap;

/// Every page the shell can navigate to, as `(identifier, document)`.
const PAGE_TARGETS: &[(&str, &str)] = &[
    // Child pages
    ("home", "home.html"),
    ("learning-path", "learning-path.html"),
    ("ai-assistant", "ai-assistant.html"),
    ("story-wall", "story-wall.html"),
    ("profile", "profile.html"),
    ("badge-center", "badge-center.html"),
    ("evaluation", "evaluation.html"),
    ("task-detail", "task-detail.html"),
    ("report-detail", "report-detail.html"),
    ("settings", "settings.html"),
    ("profile-edit", "profile-edit.html"),
    ("collaborative-learning", "collaborative-learning.html"),
    ("system-features", "system-features.html"),
    ("learning-dashboard", "learning-dashboard.html"),
    // Parent pages
    ("parent-auth", "parent-auth.html"),
    ("parent-mode", "parent-mode.html"),
    ("parent-panel", "parent-panel.html"),
    ("parent-ai", "parent-ai.html"),
    ("parent-community", "parent-community.html"),
    ("parent-child-task", "parent-child-task.html"),
    // Family and account
    ("family-center", "family-center.html"),
    ("family-achievements", "family-achievements.html"),
    ("account-center", "account-center.html"),
    ("quick-access", "quick-access.html"),
    // Onboarding and demos
    ("demo-guide", "demo-guide.html"),
    ("test-flow", "test-flow.html"),
    ("start", "start.html"),
    // Tablet layout
    ("ipad-start", "ipad-start.html"),
    ("ipad-main", "ipad-main.html"),
    ("ipad-learning", "ipad-learning.html"),
    ("ipad-ai", "ipad-ai.html"),
    ("ipad-profile", "ipad-profile.html"),
];

/// Title, icon and logical parent of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub title: &'static str,
    pub icon: &'static str,
    /// Page the header back button leads to.
    pub back: Option<&'static str>,
}

impl PageConfig {
    const fn new(title: &'static str, icon: &'static str, back: Option<&'static str>) -> Self {
        Self { title, icon, back }
    }
}

/// Returned for pages without a display configuration.
pub const UNKNOWN_PAGE: PageConfig =
    PageConfig::new("Unknown page", "fas fa-question", Some("home"));

const PAGE_CONFIGS: &[(&str, PageConfig)] = &[
    ("home", PageConfig::new("Home", "fas fa-home", None)),
    (
        "learning-path",
        PageConfig::new("Learning Path", "fas fa-road", Some("home")),
    ),
    (
        "ai-assistant",
        PageConfig::new("AI Assistant", "fas fa-robot", Some("home")),
    ),
    (
        "story-wall",
        PageConfig::new("Story Wall", "fas fa-book", Some("home")),
    ),
    (
        "badge-center",
        PageConfig::new("Badge Center", "fas fa-trophy", Some("profile")),
    ),
    (
        "evaluation",
        PageConfig::new("Skill Check", "fas fa-chart-bar", Some("profile")),
    ),
    ("profile", PageConfig::new("Profile", "fas fa-user", Some("home"))),
    (
        "profile-edit",
        PageConfig::new("Edit Profile", "fas fa-edit", Some("profile")),
    ),
    (
        "settings",
        PageConfig::new("Settings", "fas fa-cog", Some("profile")),
    ),
    (
        "task-detail",
        PageConfig::new("Task Details", "fas fa-tasks", Some("learning-path")),
    ),
    (
        "report-detail",
        PageConfig::new("Task Report", "fas fa-file-alt", Some("learning-path")),
    ),
    (
        "system-features",
        PageConfig::new("System Features", "fas fa-cogs", Some("settings")),
    ),
    (
        "collaborative-learning",
        PageConfig::new("Learn Together", "fas fa-users", Some("home")),
    ),
    (
        "family-center",
        PageConfig::new("Family Center", "fas fa-home-heart", Some("home")),
    ),
    (
        "parent-auth",
        PageConfig::new("Parent Check", "fas fa-shield-alt", Some("home")),
    ),
    (
        "parent-mode",
        PageConfig::new("Parent Mode", "fas fa-user-shield", Some("home")),
    ),
    (
        "parent-panel",
        PageConfig::new("Parent Dashboard", "fas fa-tachometer-alt", Some("parent-mode")),
    ),
    (
        "parent-ai",
        PageConfig::new("AI Report", "fas fa-brain", Some("parent-panel")),
    ),
    (
        "parent-community",
        PageConfig::new("Parent Community", "fas fa-users", Some("parent-panel")),
    ),
    (
        "parent-child-task",
        PageConfig::new("Family Tasks", "fas fa-heart", Some("parent-panel")),
    ),
];

/// Display configuration for `page`, or [`UNKNOWN_PAGE`].
pub fn page_config(page: &str) -> PageConfig {
    PAGE_CONFIGS
        .iter()
        .find(|(id, _)| *id == page)
        .map(|(_, cfg)| *cfg)
        .unwrap_or(UNKNOWN_PAGE)
}

/// Page identifier for a location path: the last segment without `.html`,
/// or `home` when that is empty.
pub fn page_name_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or("");
    let name = file.strip_suffix(".html").unwrap_or(file);
    if name.is_empty() {
        "home".to_string()
    } else {
        name.to_string()
    }
}

/// Closed mapping from page identifier to document target.
#[derive(Debug, Clone)]
pub struct PageTable {
    targets: BTreeMap<String, String>,
}

impl Default for PageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PageTable {
    /// The shell's built-in pages.
    pub fn builtin() -> Self {
        Self::from_pairs(PAGE_TARGETS.iter().copied())
    }

    /// Build a table from `(identifier, target)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            targets: pairs
                .into_iter()
                .map(|(id, target)| (id.to_string(), target.to_string()))
                .collect(),
        }
    }

    /// Document target for `page`. A trailing `.html` on the identifier is
    /// ignored.
    pub fn resolve(&self, page: &str) -> Option<&str> {
        self.targets
            .get(normalize_id(page))
            .map(String::as_str)
    }

    pub fn contains(&self, page: &str) -> bool {
        self.resolve(page).is_some()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Strip a trailing `.html` from an identifier.
pub(crate) fn normalize_id(page: &str) -> &str {
    page.strip_suffix(".html").unwrap_or(page)
}
