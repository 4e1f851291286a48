//! Easing curves and tick-driven tweens.

/// Timing curve of a transition, named after its CSS counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in-out; stands in for CSS `ease`.
    #[default]
    EaseInOut,
    /// Cubic ease-out, used for slides.
    EaseOutCubic,
}

impl Easing {
    /// Map linear progress `t` to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut if t < 0.5 => 2.0 * t * t,
            Self::EaseInOut => -1.0 + (4.0 - 2.0 * t) * t,
            Self::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            },
        }
    }
}

/// A value moving from `from` to `to` over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    elapsed_ms: u32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the new value. Never overshoots.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(dt_ms)
            .min(self.duration_ms);
        self.value()
    }

    /// Start again from the current value towards `to`.
    pub fn retarget(&mut self, to: f32, duration_ms: u32) {
        *self = Self::new(self.value(), to, duration_ms, self.easing);
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            1.0
        } else {
            self.elapsed_ms as f32 / self.duration_ms as f32
        }
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}
