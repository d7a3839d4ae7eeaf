//! Item categories and their fixed balance table

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// The closed set of sortable item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Plastic,
    Paper,
    Glass,
    Metal,
    Battery,
}

/// Resources saved by sorting an item (arbitrary units)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Impact {
    pub co2: f32,
    pub trees: f32,
    pub water: f32,
}

impl Impact {
    pub const fn new(co2: f32, trees: f32, water: f32) -> Self {
        Self { co2, trees, water }
    }
}

impl AddAssign for Impact {
    fn add_assign(&mut self, rhs: Self) {
        self.co2 += rhs.co2;
        self.trees += rhs.trees;
        self.water += rhs.water;
    }
}

/// Immutable per-category configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryInfo {
    /// First difficulty level at which the category appears
    pub unlock_level: u32,
    /// Balance gained for a correct sort
    pub reward: i32,
    /// Balance change for a miss or wrong sort (negative)
    pub penalty: i32,
    pub impact: Impact,
    /// ARGB
    pub color: u32,
    /// Number of visual variants for items
    pub variants: u8,
    /// Asset key of the matching receptacle
    pub receptacle_asset: &'static str,
}

const TABLE: [CategoryInfo; Category::COUNT] = [
    CategoryInfo {
        unlock_level: 1,
        reward: 5,
        penalty: -15,
        impact: Impact::new(150.0, 0.0, 5.0),
        color: 0xFF2196F3, // blue
        variants: 3,
        receptacle_asset: "bin_plastic",
    },
    CategoryInfo {
        unlock_level: 1,
        reward: 6,
        penalty: -2,
        impact: Impact::new(900.0, 0.1, 100.0),
        color: 0xFFFFC107, // yellow
        variants: 2,
        receptacle_asset: "bin_paper",
    },
    CategoryInfo {
        unlock_level: 3,
        reward: 10,
        penalty: -8,
        impact: Impact::new(300.0, 0.0, 0.5),
        color: 0xFF4CAF50, // green
        variants: 2,
        receptacle_asset: "bin_glass",
    },
    CategoryInfo {
        unlock_level: 5,
        reward: 15,
        penalty: -5,
        impact: Impact::new(200.0, 0.0, 4.0),
        color: 0xFF9E9E9E, // gray
        variants: 2,
        receptacle_asset: "bin_metal",
    },
    CategoryInfo {
        unlock_level: 6,
        reward: 10,
        penalty: -100,
        impact: Impact::new(50.0, 0.0, 500.0),
        color: 0xFFF44336, // red
        variants: 2,
        receptacle_asset: "bin_battery",
    },
];

impl Category {
    pub const COUNT: usize = 5;

    /// All categories in receptacle creation order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Plastic,
        Category::Paper,
        Category::Glass,
        Category::Metal,
        Category::Battery,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::Plastic => 0,
            Category::Paper => 1,
            Category::Glass => 2,
            Category::Metal => 3,
            Category::Battery => 4,
        }
    }

    #[inline]
    pub fn info(self) -> &'static CategoryInfo {
        &TABLE[self.index()]
    }

    pub fn unlock_level(self) -> u32 {
        self.info().unlock_level
    }

    pub fn reward(self) -> i32 {
        self.info().reward
    }

    pub fn penalty(self) -> i32 {
        self.info().penalty
    }

    pub fn impact(self) -> Impact {
        self.info().impact
    }

    pub fn color(self) -> u32 {
        self.info().color
    }

    /// Penalty for a drag that misses every receptacle:
    /// a third of the full penalty, rounded up, at least 1, negated.
    pub fn reduced_penalty(self) -> i32 {
        let magnitude = self.penalty().unsigned_abs().div_ceil(3).max(1);
        -(magnitude as i32)
    }

    pub fn is_unlocked(self, level: u32) -> bool {
        self.unlock_level() <= level
    }

    /// Categories available at `level`, in table order
    pub fn unlocked(level: u32) -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(move |c| c.is_unlocked(level))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Plastic => "plastic",
            Category::Paper => "paper",
            Category::Glass => "glass",
            Category::Metal => "metal",
            Category::Battery => "battery",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_penalties_negative_rewards_positive() {
        for category in Category::ALL {
            assert!(category.penalty() < 0, "{category:?}");
            assert!(category.reward() > 0, "{category:?}");
        }
    }

    #[test]
    fn test_reduced_penalty() {
        assert_eq!(Category::Plastic.reduced_penalty(), -5);
        assert_eq!(Category::Paper.reduced_penalty(), -1);
        assert_eq!(Category::Glass.reduced_penalty(), -3);
        assert_eq!(Category::Metal.reduced_penalty(), -2);
        assert_eq!(Category::Battery.reduced_penalty(), -34);
    }

    #[test]
    fn test_unlocked_by_level() {
        let level1: Vec<_> = Category::unlocked(1).collect();
        assert_eq!(level1, vec![Category::Plastic, Category::Paper]);
        assert_eq!(Category::unlocked(3).count(), 3);
        assert_eq!(Category::unlocked(5).count(), 4);
        assert_eq!(Category::unlocked(6).count(), 5);
        assert_eq!(Category::unlocked(0).count(), 0);
    }

    #[test]
    fn test_impact_accumulates() {
        let mut total = Impact::default();
        total += Category::Paper.impact();
        total += Category::Paper.impact();
        assert!((total.co2 - 1800.0).abs() < 0.001);
        assert!((total.trees - 0.2).abs() < 0.001);
        assert!((total.water - 200.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_unlocked_set_grows_with_level(level in 0u32..20) {
            prop_assert!(Category::unlocked(level).count() <= Category::unlocked(level + 1).count());
        }
    }
}
