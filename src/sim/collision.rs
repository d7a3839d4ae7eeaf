//! Axis-aligned overlap tests between items, receptacles and the belt

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Receptacle;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Index of the first visible receptacle overlapping `bounds`
///
/// Iteration follows receptacle creation order, so the first match wins.
pub fn find_receptacle(bounds: &Rect, receptacles: &[Receptacle]) -> Option<usize> {
    receptacles
        .iter()
        .position(|r| r.visible && r.bounds().overlaps(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Category;
    use proptest::prelude::*;

    fn receptacle(category: Category, x: f32, visible: bool) -> Receptacle {
        let mut r = Receptacle::new(category, Vec2::new(x, 500.0), Vec2::new(100.0, 150.0));
        r.visible = visible;
        r
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Touching edges are not an overlap
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(r.contains_point(Vec2::new(40.0, 60.0)));
        assert!(r.contains_point(r.center()));
        assert!(!r.contains_point(Vec2::new(9.9, 30.0)));
        assert!(!r.contains_point(Vec2::new(20.0, 60.1)));
    }

    #[test]
    fn test_find_receptacle_first_visible_wins() {
        let receptacles = vec![
            receptacle(Category::Plastic, 0.0, false),
            receptacle(Category::Paper, 50.0, true),
            receptacle(Category::Glass, 60.0, true),
        ];
        let item = Rect::new(Vec2::new(70.0, 520.0), Vec2::new(20.0, 20.0));
        assert_eq!(find_receptacle(&item, &receptacles), Some(1));
    }

    #[test]
    fn test_find_receptacle_none() {
        let receptacles = vec![receptacle(Category::Plastic, 0.0, true)];
        let item = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0));
        assert_eq!(find_receptacle(&item, &receptacles), None);
        assert_eq!(find_receptacle(&item, &[]), None);
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = Rect::new(Vec2::new(ax, ay), Vec2::new(w, h));
            let b = Rect::new(Vec2::new(bx, by), Vec2::new(h, w));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 1.0f32..200.0) {
            let a = Rect::new(Vec2::new(x, y), Vec2::splat(w));
            prop_assert!(a.overlaps(&a));
            prop_assert!(a.contains_point(a.center()));
        }
    }
}
