//! Proficiency level classification.
//!
//! The thresholds are fixed: stored historical results were classified with
//! them and must stay comparable.

use crate::model::Level;

/// Lowest score classified as [`Level::Intermediate`].
pub const INTERMEDIATE_THRESHOLD: f64 = 60.0;

/// Lowest score classified as [`Level::Advanced`].
pub const ADVANCED_THRESHOLD: f64 = 80.0;

/// Map an overall score in `[0, 100]` to a proficiency level.
pub fn classify(score: f64) -> Level {
    if score < INTERMEDIATE_THRESHOLD {
        Level::Beginner
    } else if score < ADVANCED_THRESHOLD {
        Level::Intermediate
    } else {
        Level::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify(0.0), Level::Beginner);
        assert_eq!(classify(59.99), Level::Beginner);
        assert_eq!(classify(60.0), Level::Intermediate);
        assert_eq!(classify(79.99), Level::Intermediate);
        assert_eq!(classify(80.0), Level::Advanced);
        assert_eq!(classify(100.0), Level::Advanced);
    }

    #[test]
    fn monotonic_over_range() {
        let mut previous = classify(0.0);
        for step in 0..=10_000 {
            let level = classify(f64::from(step) / 100.0);
            assert!(level >= previous, "level dropped at {step}");
            previous = level;
        }
    }

    #[test]
    fn two_of_three_correct_is_intermediate() {
        assert_eq!(classify(200.0 / 3.0), Level::Intermediate);
    }
}
