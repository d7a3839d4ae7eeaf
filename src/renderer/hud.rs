//! HUD text and a headless presenter that logs it

use super::Presenter;
use super::snapshot::FrameSnapshot;
use crate::sim::GamePhase;

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// One-line HUD: balance, level, clock and impact totals (whole units)
pub fn hud_text(frame: &FrameSnapshot) -> String {
    let impact = frame.stats.impact;
    format!(
        "${} | Level {} | {} | sorted {} | trees {} | water {} L | CO2 {} g",
        frame.balance,
        frame.level,
        format_clock(frame.elapsed),
        frame.stats.items_sorted,
        impact.trees as i64,
        impact.water as i64,
        impact.co2 as i64,
    )
}

/// Presenter for headless runs: logs the HUD once per simulated second
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_second: Option<u32>,
    last_phase: Option<GamePhase>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if self.last_phase != Some(frame.phase) {
            self.last_phase = Some(frame.phase);
            self.last_second = None;
            log::info!("[{:?}] {}", frame.phase, hud_text(frame));
            return;
        }
        if !frame.is_active() {
            return;
        }

        let second = frame.elapsed as u32;
        if self.last_second != Some(second) {
            self.last_second = Some(second);
            log::info!("{}", hud_text(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::renderer::SnapshotOptions;
    use crate::sim::{Category, GameState, Layout};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(59.9), "00:59");
        assert_eq!(format_clock(61.0), "01:01");
        assert_eq!(format_clock(3600.0), "60:00");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_hud_text() {
        let tuning = Tuning::default();
        let layout = Layout::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT, &tuning);
        let mut state = GameState::new(tuning, layout, 1);
        state.restart();
        state.elapsed = 75.5;
        state.level = 3;
        state.stats.record(Category::Paper);
        state.stats.record(Category::Glass);

        let mut rng = Pcg32::seed_from_u64(0);
        let frame = FrameSnapshot::capture(&state, &SnapshotOptions::default(), &mut rng);
        assert_eq!(
            hud_text(&frame),
            "$10 | Level 3 | 01:15 | sorted 2 | trees 0 | water 100 L | CO2 1200 g"
        );
    }
}
