use alloc::{vec, vec::Vec};

#[cfg(feature = "logging")]
use defmt::debug;

/// Timing of the frame being rendered, supplied by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Monotonic frame timestamp.
    pub now_ms: f64,
    /// Time since the previous frame.
    pub elapsed_ms: f64,
}

impl FrameTime {
    pub const fn new(now_ms: f64, elapsed_ms: f64) -> Self {
        Self { now_ms, elapsed_ms }
    }
}

/// Held peak of one displayed element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakState {
    /// Held intensity in `[0, 255]`.
    pub value: f32,
    /// Timestamp of the last rise.
    pub set_at_ms: f64,
}

/// Peak hold-and-decay state for a fixed number of elements.
///
/// Values rise instantly and fall linearly, reaching zero `decay_ms` after
/// the last rise. A decay of zero drops every peak on the same update.
#[derive(Debug, Clone, Default)]
pub struct PeakTracker {
    states: Vec<PeakState>,
}

impl PeakTracker {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![PeakState::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[PeakState] {
        &self.states
    }

    pub fn get(&self, index: usize) -> Option<&PeakState> {
        self.states.get(index)
    }

    /// Reallocates the tracker with zeroed peaks when `len` differs.
    ///
    /// Returns `true` if the history was discarded.
    pub fn ensure_len(&mut self, len: usize) -> bool {
        if self.states.len() == len {
            return false;
        }
        #[cfg(feature = "logging")]
        debug!("peak tracker resized {} -> {}", self.states.len(), len);
        #[cfg(feature = "std")]
        std::println!("peak tracker resized {} -> {}", self.states.len(), len);
        self.states = vec![PeakState::default(); len];
        true
    }

    /// Discards all peak history, keeping the length.
    pub fn reset(&mut self) {
        self.states.fill(PeakState::default());
    }

    /// Feeds the element's current value for this frame.
    ///
    /// A higher value replaces the held peak and restarts its fade; the decay
    /// for `time.elapsed_ms` is then subtracted in the same call.
    pub fn update(&mut self, index: usize, current_value: f32, time: FrameTime, decay_ms: f32) {
        let Some(state) = self.states.get_mut(index) else {
            return;
        };

        let current_value = if current_value.is_finite() {
            current_value.clamp(0.0, 255.0)
        } else {
            0.0
        };
        if current_value > state.value {
            state.value = current_value;
            state.set_at_ms = time.now_ms;
        }

        let decay = decay_amount(time.elapsed_ms, decay_ms);
        state.value = (state.value - decay).max(0.0);
    }

    /// Opacity of the element's peak indicator at `now_ms`, in `[0, 1]`.
    ///
    /// 1 at the moment of a rise, falling linearly to 0 once `decay_ms` has
    /// passed. A peak that has decayed to zero has no indicator.
    pub fn opacity_of(&self, index: usize, now_ms: f64, decay_ms: f32) -> f32 {
        let Some(state) = self.states.get(index) else {
            return 0.0;
        };
        if state.value <= 0.0 || decay_ms.is_nan() || decay_ms <= 0.0 {
            return 0.0;
        }
        let since_rise = (now_ms - state.set_at_ms).max(0.0);
        let normalized = (since_rise / decay_ms as f64).min(1.0);
        (1.0 - normalized) as f32
    }

    /// The held value and indicator opacity, or `None` when nothing should be drawn.
    pub fn indicator(&self, index: usize, now_ms: f64, decay_ms: f32) -> Option<(f32, f32)> {
        let opacity = self.opacity_of(index, now_ms, decay_ms);
        if opacity <= 0.0 {
            return None;
        }
        self.states.get(index).map(|state| (state.value, opacity))
    }
}

/// Intensity lost over `elapsed_ms`, `255 * elapsed / decay`.
///
/// A zero or invalid decay duration loses the full range at once.
fn decay_amount(elapsed_ms: f64, decay_ms: f32) -> f32 {
    let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
    if !decay_ms.is_finite() || decay_ms <= 0.0 {
        return 255.0;
    }
    (255.0 * elapsed_ms / decay_ms as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DECAY: f32 = 1000.0;

    #[test]
    fn test_monotonic_rise_with_no_elapsed_time() {
        let mut tracker = PeakTracker::new(1);
        for (step, value) in [10.0, 20.0, 150.0, 254.0, 255.0].into_iter().enumerate() {
            tracker.update(0, value, FrameTime::new(step as f64, 0.0), DECAY);
            assert_eq!(tracker.states()[0].value, value);
        }
    }

    #[test]
    fn test_full_decay_period_drains_peak() {
        let mut tracker = PeakTracker::new(1);
        tracker.update(0, 200.0, FrameTime::new(0.0, 0.0), DECAY);
        tracker.update(0, 0.0, FrameTime::new(1000.0, DECAY as f64), DECAY);
        assert_eq!(tracker.states()[0].value, 0.0);
    }

    #[test]
    fn test_linear_decay_rate() {
        let mut tracker = PeakTracker::new(1);
        tracker.update(0, 255.0, FrameTime::new(0.0, 0.0), DECAY);
        tracker.update(0, 0.0, FrameTime::new(100.0, 100.0), DECAY);
        assert_abs_diff_eq!(tracker.states()[0].value, 229.5, epsilon = 1e-3);
        tracker.update(0, 0.0, FrameTime::new(600.0, 500.0), DECAY);
        assert_abs_diff_eq!(tracker.states()[0].value, 102.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rise_then_same_frame_decay() {
        let mut tracker = PeakTracker::new(1);
        tracker.update(0, 100.0, FrameTime::new(16.0, 16.0), DECAY);
        let state = tracker.states()[0];
        assert_eq!(state.set_at_ms, 16.0);
        assert_abs_diff_eq!(state.value, 100.0 - 255.0 * 16.0 / 1000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_values_are_clamped() {
        let mut tracker = PeakTracker::new(2);
        tracker.update(0, 900.0, FrameTime::new(0.0, 0.0), DECAY);
        tracker.update(1, f32::NAN, FrameTime::new(0.0, 0.0), DECAY);
        assert_eq!(tracker.states()[0].value, 255.0);
        assert_eq!(tracker.states()[1].value, 0.0);
        tracker.update(0, 0.0, FrameTime::new(0.0, 1.0e9), DECAY);
        assert_eq!(tracker.states()[0].value, 0.0);
    }

    #[test]
    fn test_opacity_law() {
        let mut tracker = PeakTracker::new(1);
        tracker.update(0, 200.0, FrameTime::new(500.0, 0.0), DECAY);
        assert_eq!(tracker.opacity_of(0, 500.0, DECAY), 1.0);

        let mut previous = 1.0;
        for now in (500..1500).step_by(50) {
            let opacity = tracker.opacity_of(0, now as f64, DECAY);
            assert!(opacity <= previous);
            previous = opacity;
        }
        assert_eq!(tracker.opacity_of(0, 1500.0, DECAY), 0.0);
        assert_eq!(tracker.opacity_of(0, 9000.0, DECAY), 0.0);
        assert_abs_diff_eq!(tracker.opacity_of(0, 750.0, DECAY), 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_decay_drops_instantly() {
        let mut tracker = PeakTracker::new(1);
        tracker.update(0, 200.0, FrameTime::new(10.0, 0.0), 0.0);
        assert_eq!(tracker.states()[0].value, 0.0);
        let opacity = tracker.opacity_of(0, 10.0, 0.0);
        assert!(opacity.is_finite());
        assert_eq!(opacity, 0.0);
        assert!(tracker.indicator(0, 10.0, 0.0).is_none());
    }

    #[test]
    fn test_ensure_len_discards_history() {
        let mut tracker = PeakTracker::new(16);
        tracker.update(2, 200.0, FrameTime::new(0.0, 0.0), DECAY);
        assert!(tracker.indicator(2, 0.0, DECAY).is_some());

        assert!(!tracker.ensure_len(16));
        assert!(tracker.ensure_len(8));
        assert_eq!(tracker.len(), 8);
        for index in 0..8 {
            assert_eq!(tracker.opacity_of(index, 0.0, DECAY), 0.0);
        }
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut tracker = PeakTracker::new(2);
        tracker.update(5, 100.0, FrameTime::default(), DECAY);
        assert_eq!(tracker.opacity_of(5, 0.0, DECAY), 0.0);
        assert!(tracker.get(5).is_none());
    }

    #[test]
    fn test_reset_keeps_length() {
        let mut tracker = PeakTracker::new(3);
        tracker.update(1, 80.0, FrameTime::default(), DECAY);
        tracker.reset();
        assert_eq!(tracker.len(), 3);
        assert!(tracker.states().iter().all(|s| s.value == 0.0));
    }
}
