//! Demo auto-sorter
//!
//! Plays the game through the same pointer interface as a human: pick the
//! item closest to the right edge that it can sort, drag it onto its
//! receptacle and let go.

use glam::Vec2;

use crate::renderer::FrameSnapshot;
use crate::sim::{Item, PointerEvent};

#[derive(Debug, Default)]
pub struct AutoSorter {
    /// Item handled last; skipped until a fresh snapshot no longer shows it
    last_item: Option<u32>,
}

impl AutoSorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer gesture for the next item to sort, if any
    pub fn plan(&mut self, frame: &FrameSnapshot) -> Option<[PointerEvent; 3]> {
        if !frame.is_active() || frame.dragged_item().is_some() {
            return None;
        }

        let mut candidates: Vec<&Item> = frame
            .items
            .iter()
            .filter(|i| i.pos.x >= 0.0 && Some(i.id) != self.last_item)
            .collect();
        candidates.sort_by(|a, b| b.pos.x.partial_cmp(&a.pos.x).unwrap_or(std::cmp::Ordering::Equal));

        for item in candidates {
            let Some(receptacle) = frame.receptacles.iter().find(|r| r.category == item.category) else {
                continue;
            };
            let grab = item.bounds().center();
            // The hit test picks the first item in draw order under the pointer
            let first_hit = frame.items.iter().find(|i| i.contains_point(grab));
            if first_hit.map(|i| i.id) != Some(item.id) {
                continue;
            }

            self.last_item = Some(item.id);
            let target: Vec2 = receptacle.bounds().center();
            return Some([
                PointerEvent::Down(grab),
                PointerEvent::Move(target),
                PointerEvent::Up,
            ]);
        }
        None
    }
}
