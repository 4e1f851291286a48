//! Touch feedback: ripples, click pulses, staggered reveal and the default
//! vibration pattern.

use crate::animation::{Easing, Tween};

/// Ripple lifetime.
pub const RIPPLE_MS: u32 = 600;

/// Final ripple scale relative to its base diameter.
pub const RIPPLE_MAX_SCALE: f32 = 4.0;

/// How long a pressed element stays shrunk.
pub const CLICK_PULSE_MS: u32 = 150;

/// Scale of a pressed element.
pub const CLICK_PULSE_SCALE: f32 = 0.95;

/// Delay between consecutive reveal animations.
pub const REVEAL_STAGGER_MS: u32 = 100;

/// Length of one reveal animation.
pub const REVEAL_MS: u32 = 600;

/// Starting downward offset of a revealed element, in pixels.
pub const REVEAL_OFFSET_PX: f32 = 20.0;

/// Vibration pattern used when the caller gives none: on-times and
/// off-times in milliseconds, alternating.
pub const DEFAULT_VIBRATION: &[u32] = &[50];

/// Bounding box of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// An expanding, fading circle centred on a pointer press.
#[derive(Debug, Clone)]
pub struct Ripple {
    /// Base diameter: the larger of the element's width and height.
    pub size: f32,
    /// Left edge relative to the element.
    pub left: f32,
    /// Top edge relative to the element.
    pub top: f32,
    scale: Tween,
    opacity: Tween,
}

impl Ripple {
    /// Start a ripple for a press at viewport position `(x, y)` on `rect`.
    pub fn at(rect: ElementRect, x: f32, y: f32) -> Self {
        let size = rect.width.max(rect.height);
        Self {
            size,
            left: x - rect.left - size / 2.0,
            top: y - rect.top - size / 2.0,
            scale: Tween::new(0.0, RIPPLE_MAX_SCALE, RIPPLE_MS, Easing::Linear),
            opacity: Tween::new(1.0, 0.0, RIPPLE_MS, Easing::Linear),
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.scale.tick(dt_ms);
        self.opacity.tick(dt_ms);
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Whether the ripple should be removed.
    pub fn is_finished(&self) -> bool {
        self.scale.is_finished()
    }
}

/// Brief shrink of a pressed element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickPulse {
    elapsed_ms: u32,
}

impl ClickPulse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    /// Current scale: shrunk until the pulse elapses, then back to 1.
    pub fn scale(&self) -> f32 {
        if self.elapsed_ms < CLICK_PULSE_MS {
            CLICK_PULSE_SCALE
        } else {
            1.0
        }
    }
}

/// Fade-and-rise reveal for a list of elements, one after another.
#[derive(Debug, Clone, Copy)]
pub struct StaggeredReveal {
    count: usize,
    elapsed_ms: u32,
}

impl StaggeredReveal {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            elapsed_ms: 0,
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    /// `(opacity, translate_y)` of element `index`.
    pub fn element(&self, index: usize) -> (f32, f32) {
        let delay = REVEAL_STAGGER_MS.saturating_mul(index as u32);
        let t = self.elapsed_ms.saturating_sub(delay) as f32 / REVEAL_MS as f32;
        let progress = Easing::EaseInOut.apply(t);
        (progress, REVEAL_OFFSET_PX * (1.0 - progress))
    }

    /// Whether every element has finished revealing.
    pub fn is_finished(&self) -> bool {
        let last_delay = REVEAL_STAGGER_MS.saturating_mul(self.count.saturating_sub(1) as u32);
        self.count == 0 || self.elapsed_ms >= last_delay + REVEAL_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: ElementRect = ElementRect {
        left: 100.0,
        top: 50.0,
        width: 80.0,
        height: 40.0,
    };

    #[test]
    fn ripple_is_centred_on_pointer() {
        let r = Ripple::at(BUTTON, 120.0, 60.0);
        assert_eq!(r.size, 80.0);
        assert_eq!(r.left, 120.0 - 100.0 - 40.0);
        assert_eq!(r.top, 60.0 - 50.0 - 40.0);
    }

    #[test]
    fn ripple_grows_and_fades() {
        let mut r = Ripple::at(BUTTON, 140.0, 70.0);
        assert_eq!(r.scale(), 0.0);
        assert_eq!(r.opacity(), 1.0);
        r.tick(RIPPLE_MS / 2);
        assert_eq!(r.scale(), 2.0);
        assert!(!r.is_finished());
        r.tick(RIPPLE_MS / 2);
        assert_eq!(r.scale(), RIPPLE_MAX_SCALE);
        assert_eq!(r.opacity(), 0.0);
        assert!(r.is_finished());
    }

    #[test]
    fn click_pulse_returns_to_full_size() {
        let mut p = ClickPulse::new();
        assert_eq!(p.scale(), CLICK_PULSE_SCALE);
        p.tick(CLICK_PULSE_MS - 1);
        assert_eq!(p.scale(), CLICK_PULSE_SCALE);
        p.tick(1);
        assert_eq!(p.scale(), 1.0);
    }

    #[test]
    fn reveal_is_staggered() {
        let mut reveal = StaggeredReveal::new(3);
        reveal.tick(REVEAL_STAGGER_MS);
        let (first, _) = reveal.element(0);
        let (second, offset) = reveal.element(1);
        assert!(first > 0.0);
        assert_eq!(second, 0.0);
        assert_eq!(offset, REVEAL_OFFSET_PX);
    }

    #[test]
    fn reveal_finishes_after_last_element() {
        let mut reveal = StaggeredReveal::new(3);
        reveal.tick(2 * REVEAL_STAGGER_MS + REVEAL_MS - 1);
        assert!(!reveal.is_finished());
        reveal.tick(1);
        assert!(reveal.is_finished());
        assert_eq!(reveal.element(2), (1.0, 0.0));
    }

    #[test]
    fn empty_reveal_is_finished() {
        assert!(StaggeredReveal::new(0).is_finished());
    }
}
