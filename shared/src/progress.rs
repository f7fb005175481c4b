/// Period of the cosmetic progress animation.
pub const TICK_INTERVAL_MS: u32 = 100;

/// Delay between the bar reaching 100% and the results being shown.
pub const FINALIZE_DELAY_MS: u32 = 1200;

/// The simulated bar never passes this until the real response arrives.
pub const PROGRESS_CAP: f64 = 90.0;

pub const PENDING_TRANSITION: &str = "width 0.2s linear";
pub const FINALIZE_TRANSITION: &str = "width 1.2s cubic-bezier(0.22, 1, 0.36, 1)";

/// Fake upload progress that slows down the further it gets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulatedProgress {
    value: f64,
}

impl SimulatedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(self) -> f64 {
        self.value
    }

    /// Rounded percentage for the title text.
    pub fn percent(self) -> u32 {
        self.value.round() as u32
    }

    fn step_scale(self) -> f64 {
        if self.value < 20.0 {
            0.8
        } else if self.value < 50.0 {
            0.3
        } else {
            0.1
        }
    }

    /// Advance by one tick. `sample` is a uniform draw from `[0, 1)`.
    pub fn advance(&mut self, sample: f64) -> f64 {
        let sample = if sample.is_finite() {
            sample.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.value = (self.value + sample * self.step_scale()).min(PROGRESS_CAP);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_slows_down_past_thresholds() {
        let mut p = SimulatedProgress::new();
        assert_eq!(p.advance(1.0), 0.8);

        let mut mid = SimulatedProgress { value: 20.0 };
        assert!((mid.advance(1.0) - 20.3).abs() < 1e-9);

        let mut late = SimulatedProgress { value: 50.0 };
        assert!((late.advance(1.0) - 50.1).abs() < 1e-9);
    }

    #[test]
    fn never_passes_cap() {
        let mut p = SimulatedProgress::new();
        for _ in 0..10_000 {
            p.advance(0.999);
        }
        assert_eq!(p.value(), PROGRESS_CAP);
        assert_eq!(p.percent(), 90);
    }

    #[test]
    fn bad_samples_do_not_move_the_bar() {
        let mut p = SimulatedProgress::new();
        p.advance(f64::NAN);
        p.advance(-3.0);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(SimulatedProgress { value: 12.5 }.percent(), 13);
        assert_eq!(SimulatedProgress { value: 12.49 }.percent(), 12);
    }
}
