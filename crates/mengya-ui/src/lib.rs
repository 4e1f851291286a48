//! Leaf UI helpers for the Mengya page shell.
//!
//! None of these carry application state beyond their own animation clocks.
//! Each is advanced explicitly with `tick(dt_ms)` by whatever drives frames.

pub mod animation;
pub mod interaction;
pub mod toast;

pub use animation::{Easing, Tween};
pub use interaction::{ClickPulse, DEFAULT_VIBRATION, ElementRect, Ripple, StaggeredReveal};
pub use toast::{Notifier, Severity, Toast, ToastId, ToastManager};
