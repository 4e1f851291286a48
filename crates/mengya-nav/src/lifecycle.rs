//! Page lifecycle callbacks: ready, visibility, before-unload.

type Callback = Box<dyn FnMut()>;
type VisibilityCallback = Box<dyn FnMut(bool)>;

/// Callback registry for one page load.
///
/// Callbacks run synchronously in registration order.
#[derive(Default)]
pub struct PageLifecycle {
    ready: bool,
    on_ready: Vec<Callback>,
    on_visibility: Vec<VisibilityCallback>,
    on_unload: Vec<Callback>,
}

impl std::fmt::Debug for PageLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLifecycle")
            .field("ready", &self.ready)
            .field("on_ready", &self.on_ready.len())
            .field("on_visibility", &self.on_visibility.len())
            .field("on_unload", &self.on_unload.len())
            .finish()
    }
}

impl PageLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Run `callback` once the page is ready, or right away if it already is.
    pub fn on_ready<F: FnMut() + 'static>(&mut self, mut callback: F) {
        if self.ready {
            callback();
        } else {
            self.on_ready.push(Box::new(callback));
        }
    }

    /// Mark the page ready and drain pending ready callbacks. Later calls do
    /// nothing.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        for mut callback in self.on_ready.drain(..) {
            callback();
        }
    }

    /// Register a callback receiving `true` when the page becomes visible.
    pub fn on_visibility_change<F: FnMut(bool) + 'static>(&mut self, callback: F) {
        self.on_visibility.push(Box::new(callback));
    }

    pub fn visibility_changed(&mut self, visible: bool) {
        log::debug!("Page visibility: {visible}");
        for callback in &mut self.on_visibility {
            callback(visible);
        }
    }

    /// Register a callback for when the page is about to be left.
    pub fn on_before_unload<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_unload.push(Box::new(callback));
    }

    pub fn before_unload(&mut self) {
        for callback in &mut self.on_unload {
            callback();
        }
    }
}
