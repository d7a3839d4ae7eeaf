//! Item spawning and difficulty progression
//!
//! Difficulty is purely time based: one level per `level_duration` seconds
//! of active play. Each level shortens the spawn interval, speeds up the
//! belt and may unlock new categories (and their receptacles).

use glam::Vec2;
use rand::Rng;

use super::category::Category;
use super::state::{GameEvent, GameState, Item};
use crate::Tuning;
use crate::audio::SoundCue;
use crate::colors;
use crate::consts::RECEPTACLE_PADDING;

/// Level for a given amount of active play time
pub fn level_for_elapsed(elapsed: f32, level_duration: f32) -> u32 {
    (elapsed / level_duration) as u32 + 1
}

pub fn spawn_interval_for_level(level: u32, tuning: &Tuning) -> f32 {
    (tuning.spawn_interval - level as f32 * tuning.spawn_interval_step).max(tuning.min_spawn_interval)
}

pub fn belt_speed_for_level(level: u32, tuning: &Tuning) -> f32 {
    tuning.belt_speed + (level * level) as f32 * tuning.belt_speed_growth
}

/// Raise the level if enough time has passed. Returns true on level-up.
pub fn update_difficulty(state: &mut GameState) -> bool {
    let level = level_for_elapsed(state.elapsed, state.tuning.level_duration);
    if level <= state.level {
        return false;
    }

    state.level = level;
    state.spawn_interval = spawn_interval_for_level(level, &state.tuning);
    state.belt_speed = belt_speed_for_level(level, &state.tuning);
    arrange_receptacles(state);

    state.play(SoundCue::LevelUp);
    state.push_event(GameEvent::LevelUp(level));
    let center = state.layout.center();
    state.add_message(format!("Level {level}!"), colors::YELLOW, center);
    log::info!(
        "Level {level}: spawn every {:.2}s, belt {:.0}px/s",
        state.spawn_interval,
        state.belt_speed
    );
    true
}

/// Show receptacles unlocked at the current level and centre them as a row
pub fn arrange_receptacles(state: &mut GameState) {
    let level = state.level;
    let step = |width: f32| width * (1.0 + RECEPTACLE_PADDING);

    let mut total_width = 0.0;
    for receptacle in &mut state.receptacles {
        receptacle.visible = receptacle.category.is_unlocked(level);
        if receptacle.visible {
            total_width += step(receptacle.size.x);
        }
    }

    // Hidden receptacles keep their last position; they take no part in collisions
    let mut x = (state.layout.width - total_width) / 2.0;
    for receptacle in state.receptacles.iter_mut().filter(|r| r.visible) {
        receptacle.pos.x = x;
        x += step(receptacle.size.x);
    }
}

/// Accumulate the spawn timer and spawn when it elapses
pub fn advance_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval {
        spawn_item(state);
        state.spawn_timer = 0.0;
    }
}

/// Spawn one item just off the left edge of the belt
///
/// No-op when the live cap is reached or nothing is unlocked yet.
pub fn spawn_item(state: &mut GameState) -> Option<u32> {
    if state.items.len() >= state.tuning.max_items {
        return None;
    }

    let available: Vec<Category> = Category::unlocked(state.level).collect();
    if available.is_empty() {
        return None;
    }

    let size = state.layout.item_size;
    let belt_y = state.layout.belt_y;
    let min_y = belt_y - (size * 2.0 / 3.0).floor();
    let max_y = belt_y + state.layout.belt_height - size;

    let rng = state.rng();
    let category = available[rng.random_range(0..available.len())];
    let variant = rng.random_range(0..category.info().variants);
    let y = min_y + rng.random::<f32>() * (max_y - min_y);

    let id = state.next_entity_id();
    state.insert_item(Item {
        id,
        pos: Vec2::new(-size * 2.0, y),
        size,
        category,
        variant,
        dragging: false,
    });
    log::trace!("Spawned {} item {id}", category.as_str());
    Some(id)
}
