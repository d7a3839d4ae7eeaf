//! Scoring rules: deposits, misses, drag releases and game over

use glam::Vec2;

use super::collision::find_receptacle;
use super::state::{GameEvent, GamePhase, GameState, Item};
use crate::audio::SoundCue;
use crate::colors;

/// What happened to an item that left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Matching receptacle
    Sorted,
    /// Receptacle of another category
    WrongReceptacle,
    /// Crossed the right edge unsorted
    Missed,
    /// Released on the belt; keeps travelling
    ReturnedToBelt,
    /// Released outside the belt; destroyed
    Dropped,
}

/// Advance every non-dragged item and resolve receptacle hits and misses
pub fn resolve_belt(state: &mut GameState, dt: f32) {
    let speed = state.belt_speed;
    let right_edge = state.layout.width;

    let mut i = 0;
    while i < state.items.len() {
        if !state.is_active() {
            break;
        }
        if state.items[i].dragging {
            i += 1;
            continue;
        }

        state.items[i].advance(speed, dt);
        let item = state.items[i];

        if item.pos.x > right_edge {
            state.items.remove(i);
            handle_missed(state, &item);
            continue;
        }

        if let Some(receptacle) = find_receptacle(&item.bounds(), &state.receptacles) {
            state.items.remove(i);
            resolve_deposit(state, &item, receptacle);
            continue;
        }

        i += 1;
    }
}

/// Apply the result of `item` landing in receptacle `index`
///
/// The caller removes the item from the live set.
pub fn resolve_deposit(state: &mut GameState, item: &Item, index: usize) -> Outcome {
    let category = item.category;
    let pos = item.pos;

    if state.receptacles[index].accepts(item) {
        state.balance += category.reward();
        state.stats.record(category);
        state.receptacles[index].deposits += 1;

        state.spawn_burst(pos, category.color(), 20, 1.0);
        state.play(SoundCue::Correct);
        state.add_message(format!("+{}", category.reward()), colors::GREEN, pos);
        Outcome::Sorted
    } else {
        state.spawn_burst(pos, colors::RED, 30, 1.5);
        state.shake.trigger(0.3, 10.0);
        state.play(SoundCue::Wrong);
        state.add_message(category.penalty().to_string(), colors::RED, pos);

        apply_penalty(state, category.penalty());
        Outcome::WrongReceptacle
    }
}

/// An item crossed the right edge
pub fn handle_missed(state: &mut GameState, item: &Item) -> Outcome {
    let penalty = item.category.penalty();
    state.play(SoundCue::Miss);
    let pos = Vec2::new(state.layout.width - 200.0, item.pos.y);
    state.add_message(format!("Missed! {penalty}"), colors::RED, pos);
    apply_penalty(state, penalty);
    Outcome::Missed
}

/// Resolve a drag release of item `id`
///
/// Returns `None` when the item no longer exists.
pub fn release_item(state: &mut GameState, id: u32) -> Option<Outcome> {
    let mut item = state.remove_item(id)?;
    item.dragging = false;

    if let Some(receptacle) = find_receptacle(&item.bounds(), &state.receptacles) {
        return Some(resolve_deposit(state, &item, receptacle));
    }

    let penalty = item.category.reduced_penalty();
    let anchor = Vec2::new(item.pos.x, item.pos.y + item.size / 2.0);

    let outcome = if state.layout.on_belt(anchor) {
        state.insert_item(item);
        state.add_message(format!("Didn't get it! {penalty}"), colors::YELLOW, item.pos);
        Outcome::ReturnedToBelt
    } else {
        state.play(SoundCue::Miss);
        state.spawn_burst(item.pos, colors::GRAY, 15, 1.0);
        state.add_message(format!("Off the belt! {penalty}"), colors::RED, item.pos);
        Outcome::Dropped
    };

    apply_penalty(state, penalty);
    Some(outcome)
}

/// Subtract a (negative) penalty and end the session if the balance goes negative
pub fn apply_penalty(state: &mut GameState, penalty: i32) {
    debug_assert!(penalty < 0, "penalties are negative");
    state.balance += penalty;
    if state.balance < 0 && state.is_active() {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if let Some(drag) = state.drag.take() {
        if let Some(item) = state.items.iter_mut().find(|i| i.id == drag.item_id) {
            item.dragging = false;
        }
    }
    state.play(SoundCue::GameOver);
    state.shake.trigger(0.5, 20.0);

    let report = state.stats.report();
    log::info!(
        "Game over after {:.1}s: {} sorted, balance {}",
        state.elapsed,
        report.items_sorted,
        state.balance
    );
    state.push_event(GameEvent::GameOver(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::sim::Category;
    use crate::sim::state::Layout;

    fn active_state() -> GameState {
        let tuning = Tuning::default();
        let layout = Layout::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT, &tuning);
        let mut state = GameState::new(tuning, layout, 3);
        state.restart();
        state.drain_events();
        state
    }

    fn add_item(state: &mut GameState, category: Category, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        let size = state.layout.item_size;
        state.insert_item(Item {
            id,
            pos,
            size,
            category,
            variant: 0,
            dragging: false,
        });
        id
    }

    fn receptacle_index(state: &GameState, category: Category) -> usize {
        state
            .receptacles
            .iter()
            .position(|r| r.category == category)
            .expect("receptacle exists")
    }

    fn game_over_count(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| matches!(e, GameEvent::GameOver(_))).count()
    }

    #[test]
    fn test_correct_deposit() {
        let mut state = active_state();
        let index = receptacle_index(&state, Category::Paper);
        let pos = state.receptacles[index].pos;
        let id = add_item(&mut state, Category::Paper, pos);
        let item = state.remove_item(id).expect("item");

        assert_eq!(resolve_deposit(&mut state, &item, index), Outcome::Sorted);
        assert_eq!(state.balance, INITIAL_BALANCE + 6);
        assert_eq!(state.stats.items_sorted, 1);
        assert_eq!(state.stats.sorted(Category::Paper), 1);
        assert_eq!(state.receptacles[index].deposits, 1);
        assert!((state.stats.impact.co2 - 900.0).abs() < 0.001);
        assert_eq!(state.particles.len(), 20);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Correct)));
    }

    #[test]
    fn test_wrong_deposit() {
        let mut state = active_state();
        state.balance = 100;
        let index = receptacle_index(&state, Category::Plastic);
        let id = add_item(&mut state, Category::Paper, Vec2::ZERO);
        let item = state.remove_item(id).expect("item");

        assert_eq!(resolve_deposit(&mut state, &item, index), Outcome::WrongReceptacle);
        assert_eq!(state.balance, 98);
        assert_eq!(state.stats.items_sorted, 0);
        assert_eq!(state.receptacles[index].deposits, 0);
        assert!(state.shake.is_active());
        assert_eq!(state.particles.len(), 30);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Wrong)));
    }

    #[test]
    fn test_miss_triggers_game_over() {
        // Plastic miss from 10 drives the balance to -5
        let mut state = active_state();
        let x = state.layout.width - 1.0;
        add_item(&mut state, Category::Plastic, Vec2::new(x, 400.0));

        resolve_belt(&mut state, 0.1);

        assert!(state.items.is_empty());
        assert_eq!(state.balance, -5);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::Miss)));
        assert!(events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert_eq!(game_over_count(&events), 1);
        let report = events.iter().find_map(|e| match e {
            GameEvent::GameOver(r) => Some(*r),
            _ => None,
        });
        assert_eq!(report.map(|r| r.items_sorted), Some(0));
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut state = active_state();
        let x = state.layout.width - 1.0;
        add_item(&mut state, Category::Plastic, Vec2::new(x, 400.0));
        add_item(&mut state, Category::Plastic, Vec2::new(x, 450.0));

        resolve_belt(&mut state, 0.1);
        apply_penalty(&mut state, -15);

        assert_eq!(game_over_count(&state.drain_events()), 1);
        assert!(!state.is_active());
    }

    #[test]
    fn test_zero_balance_is_not_game_over() {
        let mut state = active_state();
        apply_penalty(&mut state, -10);
        assert_eq!(state.balance, 0);
        assert!(state.is_active());
    }

    #[test]
    fn test_release_over_matching_receptacle() {
        let mut state = active_state();
        let index = receptacle_index(&state, Category::Plastic);
        let pos = state.receptacles[index].pos;
        let id = add_item(&mut state, Category::Plastic, pos);
        state.items[0].dragging = true;

        assert_eq!(release_item(&mut state, id), Some(Outcome::Sorted));
        assert_eq!(state.balance, INITIAL_BALANCE + 5);
        assert_eq!(state.receptacles[index].deposits, 1);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_release_off_belt() {
        let mut state = active_state();
        state.balance = 50;
        // Header zone: neither belt nor receptacle
        let id = add_item(&mut state, Category::Plastic, Vec2::new(100.0, 10.0));

        assert_eq!(release_item(&mut state, id), Some(Outcome::Dropped));
        assert_eq!(state.balance, 45);
        assert!(state.items.is_empty());
        assert_eq!(state.particles.len(), 15);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Miss)));
    }

    #[test]
    fn test_release_on_belt_returns_item() {
        let mut state = active_state();
        state.balance = 50;
        add_item(&mut state, Category::Paper, Vec2::new(10.0, 500.0));
        let id = add_item(&mut state, Category::Glass, Vec2::new(400.0, 350.0));
        if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
            item.dragging = true;
        }

        assert_eq!(release_item(&mut state, id), Some(Outcome::ReturnedToBelt));
        assert_eq!(state.balance, 47);
        assert_eq!(state.items.len(), 2);
        // Re-sorted by y and moving again
        assert_eq!(state.items[0].id, id);
        assert!(!state.items[0].dragging);
    }

    #[test]
    fn test_release_unknown_item() {
        let mut state = active_state();
        assert_eq!(release_item(&mut state, 999), None);
        assert_eq!(state.balance, INITIAL_BALANCE);
    }

    #[test]
    fn test_belt_carries_item_into_matching_receptacle() {
        let mut state = active_state();
        let index = receptacle_index(&state, Category::Plastic);
        let receptacle = state.receptacles[index];
        let size = state.layout.item_size;
        // One 0.1 s step at 120 px/s closes the 5 px gap and overlaps by 7
        let id = add_item(
            &mut state,
            Category::Plastic,
            Vec2::new(receptacle.pos.x - size - 5.0, receptacle.pos.y - 100.0),
        );

        resolve_belt(&mut state, 0.1);

        assert!(state.item(id).is_none());
        assert_eq!(state.balance, INITIAL_BALANCE + 5);
        assert_eq!(state.receptacles[index].deposits, 1);
        assert_eq!(state.stats.sorted(Category::Plastic), 1);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Correct)));
    }

    #[test]
    fn test_belt_overlap_first_created_receptacle_wins() {
        let mut state = active_state();
        let plastic = receptacle_index(&state, Category::Plastic);
        let paper = receptacle_index(&state, Category::Paper);
        assert!(plastic < paper);
        let size = state.layout.item_size;
        let paper_rect = state.receptacles[paper];
        // After the step the item spans the gap and overlaps both receptacles
        let id = add_item(
            &mut state,
            Category::Paper,
            Vec2::new(paper_rect.pos.x - size - 5.0, paper_rect.pos.y - 100.0),
        );

        resolve_belt(&mut state, 0.1);

        let bounds = Item {
            id,
            pos: Vec2::new(paper_rect.pos.x - size + 7.0, paper_rect.pos.y - 100.0),
            size,
            category: Category::Paper,
            variant: 0,
            dragging: false,
        }
        .bounds();
        assert!(bounds.overlaps(&state.receptacles[plastic].bounds()));
        assert!(bounds.overlaps(&state.receptacles[paper].bounds()));

        assert!(state.item(id).is_none());
        assert_eq!(state.balance, INITIAL_BALANCE + Category::Paper.penalty());
        assert_eq!(state.receptacles[paper].deposits, 0);
        assert_eq!(state.receptacles[plastic].deposits, 0);
        assert_eq!(state.stats.items_sorted, 0);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Wrong)));
    }

    #[test]
    fn test_game_over_releases_held_item() {
        let mut state = active_state();
        let held = add_item(&mut state, Category::Paper, Vec2::new(100.0, 400.0));
        if let Some(item) = state.items.iter_mut().find(|i| i.id == held) {
            item.dragging = true;
        }
        state.drag = Some(crate::sim::Drag {
            item_id: held,
            offset: Vec2::new(10.0, 10.0),
        });

        apply_penalty(&mut state, -15);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drag.is_none());
        assert!(state.items.iter().all(|i| !i.dragging));
    }

    #[test]
    fn test_dragged_items_skip_belt() {
        let mut state = active_state();
        let id = add_item(&mut state, Category::Paper, Vec2::new(100.0, 400.0));
        state.items[0].dragging = true;
        resolve_belt(&mut state, 1.0);
        assert_eq!(state.item(id).map(|i| i.pos.x), Some(100.0));
    }
}
