//! Priority scoring.
//!
//! Pure and deterministic: urgency weight plus a penalty for low ratings
//! plus a capped engagement bonus. Always returns a score in [10, 190].

use crate::model::Urgency;

/// Thumbs-up contribution is capped so one viral review cannot dominate.
const THUMBS_BONUS_CAP: i64 = 50;

/// Rating assumed when the source value is missing or outside [1, 5].
const DEFAULT_RATING: i64 = 3;

/// Compute the priority score for a validated review.
///
/// `rating` and `thumbs_up` are re-defaulted here even though the
/// validator normalizes them upstream, so the formula holds no matter
/// who calls it. Urgency is already a closed enum, so its weight is
/// exhaustive. No error path.
pub fn priority_score(urgency: Urgency, rating: Option<i64>, thumbs_up: Option<i64>) -> i64 {
    let rating = match rating {
        Some(r) if (1..=5).contains(&r) => r,
        _ => DEFAULT_RATING,
    };
    let thumbs_up = match thumbs_up {
        Some(t) if t >= 0 => t,
        _ => 0,
    };

    let rating_penalty = (5 - rating) * 10;
    let thumbs_bonus = thumbs_up.min(THUMBS_BONUS_CAP);

    urgency.weight() + rating_penalty + thumbs_bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximum_score() {
        assert_eq!(priority_score(Urgency::High, Some(1), Some(1000)), 190);
    }

    #[test]
    fn test_minimum_score() {
        assert_eq!(priority_score(Urgency::Low, Some(5), Some(0)), 10);
    }

    #[test]
    fn test_worked_example() {
        // high urgency, 1 star, no thumbs: 100 + 40 + 0
        assert_eq!(priority_score(Urgency::High, Some(1), Some(0)), 140);
    }

    #[test]
    fn test_missing_inputs_default() {
        // rating -> 3, thumbs -> 0: 50 + 20 + 0
        assert_eq!(priority_score(Urgency::Medium, None, None), 70);
    }

    #[test]
    fn test_out_of_range_inputs_default() {
        assert_eq!(priority_score(Urgency::Medium, Some(9), Some(-4)), 70);
        assert_eq!(priority_score(Urgency::Medium, Some(0), None), 70);
    }

    #[test]
    fn test_thumbs_bonus_is_capped() {
        assert_eq!(
            priority_score(Urgency::Low, Some(5), Some(49)),
            10 + 49
        );
        assert_eq!(
            priority_score(Urgency::Low, Some(5), Some(51)),
            10 + 50
        );
    }

    #[test]
    fn test_score_always_in_range() {
        for urgency in Urgency::ALL {
            for rating in -2..8 {
                for thumbs in [-10, 0, 7, 50, 500] {
                    let score = priority_score(urgency, Some(rating), Some(thumbs));
                    assert!((10..=190).contains(&score), "score {score} out of range");
                }
            }
        }
    }
}
