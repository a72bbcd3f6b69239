//! Property tests for the trail generator.

use adventeer_logic::map::{current_index, milestones};
use adventeer_logic::trail::{generate, TrailPoint};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_inputs_same_points(identity in ".{0,24}", level in 1u32..20, height in 200.0f64..2000.0) {
        let a = generate(&identity, level, height);
        let b = generate(&identity, level, height);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn points_respect_bounds(identity in "[a-z0-9-]{1,36}", level in 1u32..30, height in 200.0f64..2000.0) {
        let points = generate(&identity, level, height);
        prop_assert_eq!(points[0], TrailPoint::new(100.0, 250.0));
        for p in &points[1..] {
            prop_assert!(p.y >= 100.0 && p.y <= height - 100.0, "y={} height={}", p.y, height);
        }
        let last = points[points.len() - 1];
        prop_assert_eq!(last.x, 100.0 + 900.0 + level as f64 * 120.0);
    }

    #[test]
    fn next_level_is_longer(identity in "[a-zA-Z]{1,16}", level in 1u32..25) {
        let shorter = generate(&identity, level, 800.0).len();
        let longer = generate(&identity, level + 1, 800.0).len();
        prop_assert!(longer > shorter);
    }

    #[test]
    fn markers_index_inside_trail(identity in "[a-z]{1,12}", level in 0u32..40) {
        let points = generate(&identity, level, 800.0);
        prop_assert!(current_index(&points, level) < points.len());
        for m in milestones(&points, level) {
            prop_assert_eq!(m.level % 5, 0);
            prop_assert_eq!(m.unlocked, level >= m.level);
        }
    }
}
