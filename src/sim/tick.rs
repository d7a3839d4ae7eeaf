//! Variable timestep simulation tick
//!
//! One call advances the whole game by `dt` seconds of wall time.

use super::rules;
use super::spawner;
use super::state::GameState;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    state.shake.update(dt);

    if state.is_active() {
        state.elapsed += dt;
        spawner::update_difficulty(state);
        scroll_belt(state, dt);
        spawner::advance_spawner(state, dt);
        rules::resolve_belt(state, dt);
    }

    // Feedback keeps animating after game over
    update_effects(state, dt);
}

fn scroll_belt(state: &mut GameState, dt: f32) {
    state.belt_scroll += state.belt_speed * dt;
    let tile = state.tuning.belt_tile_width();
    if tile > 0.0 {
        state.belt_scroll %= tile;
    }
}

/// Age particles and floating messages, dropping dead ones
pub fn update_effects(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(|p| p.is_alive());

    for message in &mut state.messages {
        message.update(dt);
    }
    state.messages.retain(|m| m.is_alive());
}
