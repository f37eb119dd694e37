//! Retargetable tweens driven by frame deltas

/// Cubic in-out easing on `t` in `[0, 1]`
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A single animated quantity.
///
/// Retargeting starts a fresh transition from whatever value is currently
/// displayed, so interrupted animations never jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    /// A tween resting at `value`; later transitions take `duration` seconds
    pub fn settled(value: f32, duration: f32) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
        }
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.to;
        }
        let t = ease_cubic_in_out(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Head towards `to`; a no-op if that is already the target
    pub fn retarget(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Jump straight to `value` with no animation
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed = self.duration;
    }

    /// Change the length of this and later transitions
    pub fn set_duration(&mut self, duration: f32) {
        let current = self.value();
        let settled = self.is_settled();
        self.duration = duration.max(0.0);
        if settled {
            self.snap(self.to);
        } else {
            self.from = current;
            self.elapsed = 0.0;
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }
}

/// Milliseconds to the seconds the tweens count in
pub(crate) fn seconds(ms: u64) -> f32 {
    ms as f32 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::settled(0.0, 0.5);
        tween.retarget(100.0);
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.is_settled());

        tween.advance(0.25);
        assert!((tween.value() - 50.0).abs() < 1e-4);

        tween.advance(1.0);
        assert_eq!(tween.value(), 100.0);
        assert!(tween.is_settled());
    }

    #[test]
    fn test_retarget_midway_starts_from_current_value() {
        let mut tween = Tween::settled(0.0, 1.0);
        tween.retarget(100.0);
        tween.advance(0.5);
        let midway = tween.value();

        tween.retarget(0.0);
        assert_eq!(tween.value(), midway);
        tween.advance(1.0);
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut tween = Tween::settled(0.0, 1.0);
        tween.retarget(10.0);
        tween.advance(0.5);
        let before = tween;
        tween.retarget(10.0);
        assert_eq!(tween, before);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut tween = Tween::settled(1.0, 0.0);
        tween.retarget(2.0);
        assert_eq!(tween.value(), 2.0);
        assert!(tween.is_settled());
    }
}
