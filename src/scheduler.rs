// Copyright 2025 The flits authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The grading state machine: a simplified Anki-style SM-2 variant.
//!
//! A card starts `New`, passes through a short `Learning` step, and
//! graduates to `Review`, where each successful grade multiplies the
//! interval by the card's ease factor. Forgetting a `Review` card (grading
//! `Again`) is a lapse: the ease takes a penalty and the card regresses to
//! `Learning`.

use crate::types::card::Scheduling;
use crate::types::date::Day;
use crate::types::rating::Rating;
use crate::types::stage::Stage;

/// Ease factor assigned to cards that never earned one.
pub const DEFAULT_EASE: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE: f64 = 1.3;

/// Interval of the first learning step, in days.
const LEARNING_STEP_DAYS: i64 = 1;

/// Interval granted on graduation with `Good`, in days.
const GRADUATING_INTERVAL_DAYS: i64 = 3;

/// Interval granted on graduation with `Easy`, in days.
const EASY_GRADUATING_INTERVAL_DAYS: i64 = 4;

/// Ease reward for grading `Easy`.
const EASE_REWARD: f64 = 0.15;

/// Ease penalty for grading `Hard` on a `Review` card.
const EASE_PENALTY_HARD: f64 = 0.15;

/// Ease penalty for a lapse.
const EASE_PENALTY_LAPSE: f64 = 0.20;

/// Interval multiplier for `Hard` on a `Review` card.
const HARD_INTERVAL_FACTOR: f64 = 1.2;

/// Extra interval multiplier for `Easy` on a `Review` card, on top of ease.
const EASY_BONUS: f64 = 1.3;

/// Whether `Hard` on a `Learning` card repeats the first learning step
/// instead of graduating like `Good`.
const HARD_REPEATS_LEARNING_STEP: bool = true;

/// Compute the scheduling fields after grading a card.
///
/// Pure: reads the current fields, returns the new ones. The caller persists
/// the result. Grading always clears `suspended` (grading a suspended card
/// is an explicit resume).
pub fn apply_grade(current: &Scheduling, rating: Rating, today: Day) -> Scheduling {
    let mut next = current.clone();
    next.reps += 1;
    if next.first_seen.is_none() {
        next.first_seen = Some(today);
    }

    match next.stage {
        Stage::New => {
            match rating {
                Rating::Again | Rating::Hard => next.interval_days = LEARNING_STEP_DAYS,
                Rating::Good => next.interval_days = GRADUATING_INTERVAL_DAYS,
                Rating::Easy => {
                    next.interval_days = EASY_GRADUATING_INTERVAL_DAYS;
                    next.ease += EASE_REWARD;
                }
            }
            next.stage = if next.interval_days > 1 {
                Stage::Review
            } else {
                Stage::Learning
            };
        }
        Stage::Learning => match rating {
            Rating::Again => next.interval_days = LEARNING_STEP_DAYS,
            Rating::Hard if HARD_REPEATS_LEARNING_STEP => {
                next.interval_days = LEARNING_STEP_DAYS;
            }
            Rating::Hard | Rating::Good => {
                next.interval_days = GRADUATING_INTERVAL_DAYS;
                next.stage = Stage::Review;
            }
            Rating::Easy => {
                next.interval_days = EASY_GRADUATING_INTERVAL_DAYS;
                next.ease += EASE_REWARD;
                next.stage = Stage::Review;
            }
        },
        Stage::Review => match rating {
            Rating::Again => {
                next.lapses += 1;
                next.ease = (next.ease - EASE_PENALTY_LAPSE).max(MIN_EASE);
                next.interval_days = LEARNING_STEP_DAYS;
                next.stage = Stage::Learning;
            }
            Rating::Hard => {
                next.ease = (next.ease - EASE_PENALTY_HARD).max(MIN_EASE);
                next.interval_days =
                    (next.interval_days as f64 * HARD_INTERVAL_FACTOR).round() as i64;
            }
            Rating::Good => {
                next.interval_days = (next.interval_days as f64 * next.ease).round() as i64;
            }
            Rating::Easy => {
                next.ease += EASE_REWARD;
                next.interval_days =
                    (next.interval_days as f64 * next.ease * EASY_BONUS).round() as i64;
            }
        },
        Stage::Relearning => match rating {
            Rating::Again => next.interval_days = LEARNING_STEP_DAYS,
            Rating::Hard | Rating::Good | Rating::Easy => {
                next.interval_days = GRADUATING_INTERVAL_DAYS;
                next.stage = Stage::Review;
            }
        },
    }

    next.interval_days = next.interval_days.max(1);
    next.due_date = Some(today.add_days(next.interval_days));
    next.last_reviewed = Some(today);
    next.suspended = false;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Day {
        Day::from_ymd(2024, 1, 10)
    }

    fn review_card(interval_days: i64, ease: f64) -> Scheduling {
        Scheduling {
            stage: Stage::Review,
            interval_days,
            ease,
            reps: 5,
            lapses: 0,
            first_seen: Some(Day::from_ymd(2023, 12, 1)),
            last_reviewed: Some(Day::from_ymd(2024, 1, 1)),
            due_date: Some(today()),
            suspended: false,
        }
    }

    #[test]
    fn test_new_card_again() {
        let next = apply_grade(&Scheduling::pristine(), Rating::Again, today());
        assert_eq!(next.stage, Stage::Learning);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.reps, 1);
        assert_eq!(next.first_seen, Some(today()));
        assert_eq!(next.due_date, Some(Day::from_ymd(2024, 1, 11)));
    }

    #[test]
    fn test_new_card_hard() {
        let next = apply_grade(&Scheduling::pristine(), Rating::Hard, today());
        assert_eq!(next.stage, Stage::Learning);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn test_new_card_good_graduates() {
        let next = apply_grade(&Scheduling::pristine(), Rating::Good, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 3);
        assert_eq!(next.ease, 2.5);
        assert_eq!(next.reps, 1);
        assert_eq!(next.first_seen, Some(today()));
        assert_eq!(next.due_date, Some(Day::from_ymd(2024, 1, 13)));
    }

    #[test]
    fn test_new_card_easy() {
        let next = apply_grade(&Scheduling::pristine(), Rating::Easy, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 4);
        assert_eq!(next.ease, 2.65);
    }

    #[test]
    fn test_learning_again_repeats_step() {
        let mut current = Scheduling::pristine();
        current.stage = Stage::Learning;
        current.interval_days = 1;
        let next = apply_grade(&current, Rating::Again, today());
        assert_eq!(next.stage, Stage::Learning);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn test_learning_hard_repeats_step() {
        let mut current = Scheduling::pristine();
        current.stage = Stage::Learning;
        current.interval_days = 1;
        let next = apply_grade(&current, Rating::Hard, today());
        assert_eq!(next.stage, Stage::Learning);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn test_learning_good_graduates() {
        let mut current = Scheduling::pristine();
        current.stage = Stage::Learning;
        current.interval_days = 1;
        let next = apply_grade(&current, Rating::Good, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 3);
    }

    #[test]
    fn test_learning_easy_graduates_with_reward() {
        let mut current = Scheduling::pristine();
        current.stage = Stage::Learning;
        current.interval_days = 1;
        let next = apply_grade(&current, Rating::Easy, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 4);
        assert_eq!(next.ease, 2.65);
    }

    #[test]
    fn test_review_again_is_a_lapse() {
        let current = review_card(10, 2.0);
        let next = apply_grade(&current, Rating::Again, today());
        assert_eq!(next.stage, Stage::Learning);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.lapses, 1);
        assert!((next.ease - 1.8).abs() < 1e-9);
        assert_eq!(next.due_date, Some(Day::from_ymd(2024, 1, 11)));
    }

    #[test]
    fn test_review_hard() {
        let current = review_card(10, 2.5);
        let next = apply_grade(&current, Rating::Hard, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 12);
        assert!((next.ease - 2.35).abs() < 1e-9);
        assert_eq!(next.lapses, 0);
    }

    #[test]
    fn test_review_good_multiplies_by_ease() {
        let current = review_card(6, 2.5);
        let next = apply_grade(&current, Rating::Good, today());
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.ease, 2.5);
    }

    #[test]
    fn test_review_easy_applies_bonus() {
        let current = review_card(10, 2.5);
        let next = apply_grade(&current, Rating::Easy, today());
        // round(10 * 2.65 * 1.3) = 34
        assert_eq!(next.interval_days, 34);
        assert_eq!(next.ease, 2.65);
    }

    #[test]
    fn test_ease_floor() {
        let current = review_card(10, 1.35);
        let next = apply_grade(&current, Rating::Again, today());
        assert_eq!(next.ease, MIN_EASE);
        let next = apply_grade(&review_card(10, 1.3), Rating::Hard, today());
        assert_eq!(next.ease, MIN_EASE);
    }

    #[test]
    fn test_interval_never_below_one() {
        // Hard on a degenerate zero-interval review card rounds to zero, but
        // the post-processing clamp raises it back.
        let current = review_card(0, 1.3);
        let next = apply_grade(&current, Rating::Hard, today());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.due_date, Some(Day::from_ymd(2024, 1, 11)));
    }

    #[test]
    fn test_relearning_again() {
        let mut current = review_card(1, 2.0);
        current.stage = Stage::Relearning;
        let next = apply_grade(&current, Rating::Again, today());
        assert_eq!(next.stage, Stage::Relearning);
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn test_relearning_graduates() {
        let mut current = review_card(1, 2.0);
        current.stage = Stage::Relearning;
        let next = apply_grade(&current, Rating::Good, today());
        assert_eq!(next.stage, Stage::Review);
        assert_eq!(next.interval_days, 3);
    }

    #[test]
    fn test_grading_unsuspends() {
        let mut current = review_card(10, 2.5);
        current.suspended = true;
        let next = apply_grade(&current, Rating::Good, today());
        assert!(!next.suspended);
    }

    #[test]
    fn test_first_seen_is_preserved() {
        let first = Day::from_ymd(2023, 12, 1);
        let current = review_card(10, 2.5);
        let next = apply_grade(&current, Rating::Good, today());
        assert_eq!(next.first_seen, Some(first));
    }

    #[test]
    fn test_deterministic() {
        let current = review_card(17, 2.15);
        let a = apply_grade(&current, Rating::Easy, today());
        let b = apply_grade(&current, Rating::Easy, today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_invariants_hold_across_a_long_run() {
        let ratings = [
            Rating::Good,
            Rating::Again,
            Rating::Hard,
            Rating::Easy,
            Rating::Good,
            Rating::Easy,
            Rating::Again,
            Rating::Good,
        ];
        let mut state = Scheduling::pristine();
        let mut day = today();
        for rating in ratings {
            state = apply_grade(&state, rating, day);
            assert!(state.interval_days >= 1);
            assert!(state.ease >= MIN_EASE);
            assert_eq!(state.due_date, Some(day.add_days(state.interval_days)));
            day = day.add_days(state.interval_days);
        }
        assert_eq!(state.reps, ratings.len() as i64);
        assert_eq!(state.lapses, 2);
    }
}
