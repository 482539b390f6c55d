//! Reputation update rules
//!
//! Integer arithmetic throughout. The expert update truncates twice (the old
//! score and the rating are each divided by ten before combining), which
//! loses up to 9 points per step compared to `(9 * old + rating) / 10`.

use serde::{Deserialize, Serialize};

use crate::models::{ExpertRecord, RoutineTemplate};

/// Reputation assigned on verification
pub const INITIAL_EXPERT_SCORE: u32 = 80;
pub const MAX_REPUTATION_SCORE: u32 = 100;

/// Expert reputation after one more rating
pub fn next_expert_score(old_score: u32, rating: u32) -> u32 {
    9 * (old_score / 10) + rating / 10
}

/// Rating count and integer average of a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineRating {
    pub count: u64,
    pub average: u32,
}

/// Routine rating after one more rating
pub fn next_routine_rating(current: RoutineRating, rating: u32) -> RoutineRating {
    if current.count == 0 {
        return RoutineRating {
            count: 1,
            average: rating,
        };
    }

    let total = u128::from(current.average) * u128::from(current.count) + u128::from(rating);
    let count = current.count + 1;
    // A mean of values <= 100 stays <= 100
    let average = u32::try_from(total / u128::from(count)).unwrap_or(MAX_REPUTATION_SCORE);

    RoutineRating { count, average }
}

/// Copy of `record` with the rating folded into its reputation
pub fn rate_expert(record: &ExpertRecord, rating: u32) -> ExpertRecord {
    ExpertRecord {
        reputation_score: next_expert_score(record.reputation_score, rating),
        ..record.clone()
    }
}

/// Copy of `routine` with the rating folded into its average
pub fn rate_routine(routine: &RoutineTemplate, rating: u32) -> RoutineTemplate {
    let next = next_routine_rating(
        RoutineRating {
            count: routine.rating_count,
            average: routine.average_rating,
        },
        rating,
    );

    RoutineTemplate {
        rating_count: next.count,
        average_rating: next.average,
        ..routine.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;

    #[test]
    fn test_expert_score_examples() {
        assert_eq!(next_expert_score(80, 90), 81);
        assert_eq!(next_expert_score(80, 80), 80);
        assert_eq!(next_expert_score(81, 90), 81);
        assert_eq!(next_expert_score(80, 1), 72);
        assert_eq!(next_expert_score(100, 100), 100);
        assert_eq!(next_expert_score(0, 9), 0);
    }

    #[test]
    fn test_expert_score_double_truncation() {
        // Single truncation would give (9 * 89 + 99) / 10 = 90
        assert_eq!(next_expert_score(89, 99), 81);
    }

    #[test]
    fn test_expert_score_stays_bounded() {
        for rating in 1..=100 {
            let mut score = INITIAL_EXPERT_SCORE;
            for _ in 0..50 {
                score = next_expert_score(score, rating);
                assert!(score <= MAX_REPUTATION_SCORE);
            }
        }
        for old in 0..=100 {
            for rating in 1..=100 {
                assert!(next_expert_score(old, rating) <= MAX_REPUTATION_SCORE);
            }
        }
    }

    #[test]
    fn test_first_routine_rating_taken_verbatim() {
        let next = next_routine_rating(RoutineRating { count: 0, average: 0 }, 73);
        assert_eq!(next, RoutineRating { count: 1, average: 73 });
    }

    #[test]
    fn test_routine_running_mean_truncates() {
        let mut rating = RoutineRating { count: 0, average: 0 };
        rating = next_routine_rating(rating, 90);
        rating = next_routine_rating(rating, 81);
        // (90 + 81) / 2 = 85.5
        assert_eq!(rating, RoutineRating { count: 2, average: 85 });
        rating = next_routine_rating(rating, 1);
        // (85 * 2 + 1) / 3 = 57
        assert_eq!(rating, RoutineRating { count: 3, average: 57 });
    }

    #[test]
    fn test_constant_ratings_converge_immediately() {
        let mut rating = RoutineRating { count: 0, average: 0 };
        for _ in 0..20 {
            rating = next_routine_rating(rating, 42);
            assert_eq!(rating.average, 42);
        }
        assert_eq!(rating.count, 20);
    }

    #[test]
    fn test_rate_expert_changes_only_score() {
        let record = ExpertRecord {
            verified_at: 7,
            credentials: Credentials::new("MD, dermatology").unwrap(),
            reputation_score: INITIAL_EXPERT_SCORE,
        };
        let rated = rate_expert(&record, 90);
        assert_eq!(rated.reputation_score, 81);
        assert_eq!(rated.verified_at, 7);
        assert_eq!(rated.credentials, record.credentials);
    }
}
