//! Splash screen progress
//!
//! The bar fills by 2% every 30 ms. One step after reaching 100% it holds for
//! 300 ms while the overlay fades out via CSS, then the overlay is removed and the
//! page waits another 500 ms before it counts as loaded.

/// Interval between progress steps
pub const STEP_INTERVAL_MS: f64 = 30.0;
/// Percent added per step
pub const STEP_PERCENT: u8 = 2;
/// Time at 100% before the overlay is removed
pub const HOLD_MS: f64 = 300.0;
/// Time between removing the overlay and reporting completion
pub const EXIT_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Bar filling
    Filling,
    /// Full, overlay fading out
    Holding,
    /// Overlay gone, waiting to report completion
    Hidden,
    Complete,
}

#[derive(Debug, Clone)]
pub struct LoadingProgress {
    progress: u8,
    phase: LoadingPhase,
    /// Time accumulated toward the next step or phase change
    accumulator: f64,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingProgress {
    pub fn new() -> Self {
        Self {
            progress: 0,
            phase: LoadingPhase::Filling,
            accumulator: 0.0,
        }
    }

    /// Advance by `dt_ms` of wall time. Returns true if the phase changed.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let start = self.phase;
        self.accumulator += dt_ms.max(0.0);

        loop {
            match self.phase {
                LoadingPhase::Filling => {
                    if self.accumulator < STEP_INTERVAL_MS {
                        break;
                    }
                    self.accumulator -= STEP_INTERVAL_MS;
                    if self.progress >= 100 {
                        self.phase = LoadingPhase::Holding;
                    } else {
                        self.progress = (self.progress + STEP_PERCENT).min(100);
                    }
                }
                LoadingPhase::Holding => {
                    if self.accumulator < HOLD_MS {
                        break;
                    }
                    self.accumulator -= HOLD_MS;
                    self.phase = LoadingPhase::Hidden;
                }
                LoadingPhase::Hidden => {
                    if self.accumulator < EXIT_MS {
                        break;
                    }
                    self.accumulator = 0.0;
                    self.phase = LoadingPhase::Complete;
                }
                LoadingPhase::Complete => {
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        self.phase != start
    }

    /// Percent shown on the bar, 0-100
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Target overlay opacity; the CSS transition animates between the two values
    pub fn opacity(&self) -> f32 {
        if self.progress >= 100 { 0.0 } else { 1.0 }
    }

    /// Whether the overlay is still in the page
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, LoadingPhase::Filling | LoadingPhase::Holding)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LoadingPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_two_percent_per_step() {
        let mut loading = LoadingProgress::new();
        loading.advance(29.0);
        assert_eq!(loading.progress(), 0);
        loading.advance(1.0);
        assert_eq!(loading.progress(), 2);
        loading.advance(300.0);
        assert_eq!(loading.progress(), 22);
        assert_eq!(loading.opacity(), 1.0);
    }

    #[test]
    fn test_timeline() {
        let mut loading = LoadingProgress::new();

        assert!(!loading.advance(1500.0));
        assert_eq!(loading.progress(), 100);
        assert_eq!(loading.phase(), LoadingPhase::Filling);
        assert_eq!(loading.opacity(), 0.0);

        // One more step notices the bar is full
        assert!(loading.advance(30.0));
        assert_eq!(loading.phase(), LoadingPhase::Holding);
        assert!(loading.is_visible());

        assert!(loading.advance(300.0));
        assert_eq!(loading.phase(), LoadingPhase::Hidden);
        assert!(!loading.is_visible());
        assert!(!loading.is_complete());

        assert!(!loading.advance(499.0));
        assert!(loading.advance(1.0));
        assert!(loading.is_complete());
        assert_eq!(loading.progress(), 100);
    }

    #[test]
    fn test_large_jump_runs_to_completion() {
        let mut loading = LoadingProgress::new();
        assert!(loading.advance(10_000.0));
        assert!(loading.is_complete());
        assert!(!loading.advance(10_000.0));
    }

    #[test]
    fn test_small_frames_match_one_big_step() {
        let mut a = LoadingProgress::new();
        for _ in 0..100 {
            a.advance(16.0);
        }
        let mut b = LoadingProgress::new();
        b.advance(1600.0);
        assert_eq!(a.progress(), b.progress());
        assert_eq!(a.phase(), b.phase());
    }
}
