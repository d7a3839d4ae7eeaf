//! Read-only per-frame view of the game state

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;

use super::Presenter;
use crate::Settings;
use crate::sim::{GamePhase, GameState, Item, Layout, Message, Receptacle, SessionStats};

/// Which optional effects make it into a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub particles: bool,
    pub screen_shake: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            particles: true,
            screen_shake: true,
        }
    }
}

impl From<&Settings> for SnapshotOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            particles: settings.particles,
            screen_shake: settings.effective_screen_shake(),
        }
    }
}

/// A particle reduced to what a renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    /// ARGB, alpha faded by remaining life
    pub color: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub layout: Layout,
    pub phase: GamePhase,
    pub balance: i32,
    pub level: u32,
    pub elapsed: f32,
    /// Fraction of the current level completed, in [0, 1)
    pub level_progress: f32,
    pub belt_scroll: f32,
    pub stats: SessionStats,
    /// Draw order: by y, with the dragged item last
    pub items: Vec<Item>,
    /// Visible receptacles only
    pub receptacles: Vec<Receptacle>,
    pub particles: Vec<ParticleView>,
    pub messages: Vec<Message>,
    /// Whole-frame offset while the screen shakes
    pub shake_offset: Vec2,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, options: &SnapshotOptions, rng: &mut impl Rng) -> Self {
        let items = state
            .items
            .iter()
            .filter(|i| !i.dragging)
            .chain(state.items.iter().filter(|i| i.dragging))
            .copied()
            .collect();

        let particles = if options.particles {
            state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    radius: p.size,
                    color: p.faded_color(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let shake_offset = if options.screen_shake {
            state.shake.offset(rng)
        } else {
            Vec2::ZERO
        };

        let duration = state.tuning.level_duration;
        let level_progress = if duration > 0.0 {
            (state.elapsed % duration) / duration
        } else {
            0.0
        };

        Self {
            layout: state.layout,
            phase: state.phase,
            balance: state.balance,
            level: state.level,
            elapsed: state.elapsed,
            level_progress,
            belt_scroll: state.belt_scroll,
            stats: state.stats,
            items,
            receptacles: state.receptacles.iter().filter(|r| r.visible).copied().collect(),
            particles,
            messages: state.messages.clone(),
            shake_offset,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn dragged_item(&self) -> Option<&Item> {
        self.items.last().filter(|i| i.dragging)
    }
}

/// Presenter that keeps the latest frame for other threads to read
#[derive(Clone, Default)]
pub struct SharedFrame {
    latest: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl SharedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<FrameSnapshot> {
        self.latest.lock().clone()
    }
}

impl Presenter for SharedFrame {
    fn present(&mut self, frame: &FrameSnapshot) {
        *self.latest.lock() = Some(frame.clone());
    }
}
