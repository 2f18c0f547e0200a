/// Blend progress.
///
/// `Idle -> Blending -> Idle`. While active, `alpha` never decreases; it hits
/// exactly 1.0 once, on the same step `active` turns false, after which
/// `elapsed` and `alpha` reset to zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlendState {
    /// Last mood time fully applied. `None` when the baseline was restored.
    pub current_time: Option<i32>,
    /// Mood time the running blend heads to.
    pub target_time: Option<i32>,
    pub elapsed: f32,
    pub duration: f32,
    pub alpha: f32,
    pub active: bool,
}

impl BlendState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts blending toward `target` over `duration` seconds.
    pub fn begin(&mut self, target: Option<i32>, duration: f32) {
        self.target_time = target;
        self.duration = duration;
        self.elapsed = 0.0;
        self.alpha = 0.0;
        self.active = true;
    }

    /// Core logic: advance time. Returns the alpha to apply this step.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.active {
            return self.alpha;
        }

        // 1. Accumulate time, clamped to the duration
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);

        // 2. Normalize; a remainder within a few ulps counts as complete
        let remaining = self.duration - self.elapsed;
        self.alpha = if remaining <= self.duration * f32::EPSILON * 16.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };

        if self.alpha >= 1.0 {
            self.finish();
            return 1.0;
        }
        self.alpha
    }

    /// Ends the blend: the target becomes the current time.
    pub fn finish(&mut self) {
        self.current_time = self.target_time.take();
        self.elapsed = 0.0;
        self.alpha = 0.0;
        self.active = false;
    }

    /// Records an instant application of `time`.
    pub fn set_applied(&mut self, time: Option<i32>) {
        self.current_time = time;
        self.target_time = None;
        self.elapsed = 0.0;
        self.alpha = 0.0;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_reaches_one_once() {
        let mut state = BlendState::new();
        state.begin(Some(10), 1.0);

        let mut hits = 0;
        for _ in 0..20 {
            if !state.active {
                break;
            }
            let alpha = state.advance(0.1);
            if alpha >= 1.0 {
                hits += 1;
                assert!(!state.active);
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(state.current_time, Some(10));
        assert!(state.alpha.abs() < f32::EPSILON);
        assert!(state.elapsed.abs() < f32::EPSILON);
    }

    #[test]
    fn test_frame_deltas_complete_on_time() {
        let mut state = BlendState::new();
        state.begin(Some(5), 1.0);

        let mut last = 0.0;
        for _ in 0..60 {
            last = state.advance(1.0 / 60.0);
        }
        assert_eq!(last, 1.0);
        assert!(!state.active);
        assert_eq!(state.current_time, Some(5));
    }

    #[test]
    fn test_nan_dt_is_ignored() {
        let mut state = BlendState::new();
        state.begin(Some(1), 1.0);
        let alpha = state.advance(f32::NAN);
        assert!(alpha.abs() < f32::EPSILON);
        assert!(state.active);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut state = BlendState::new();
        state.begin(Some(1), 2.0);
        let a = state.advance(0.5);
        let b = state.advance(-1.0);
        assert!(b >= a);
    }
}
