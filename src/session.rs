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

//! The session controller: drives one card at a time through the scheduler,
//! persists the result, and advances until the queue is exhausted.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::Settings;
use crate::error::Fallible;
use crate::error::fail;
use crate::queue::build_queue;
use crate::scheduler::apply_grade;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::Scheduling;
use crate::types::date::Day;
use crate::types::rating::Rating;
use crate::types::review_event::ReviewEvent;
use crate::types::review_event::ReviewKind;
use crate::types::timestamp::Timestamp;

/// Attempts per card write before the grading step is reported failed.
const WRITE_RETRIES: u32 = 3;

/// The persistence collaborator. Card writes must be idempotent under retry;
/// event appends are append-only and never read back by the core.
pub trait CardStore {
    fn load_cards(&self) -> Fallible<Vec<Card>>;
    fn save_scheduling(&mut self, id: CardId, scheduling: &Scheduling) -> Fallible<()>;
    fn append_event(&mut self, event: &ReviewEvent) -> Fallible<()>;
}

/// Counts reported when a session ends.
#[derive(PartialEq, Eq, Debug)]
pub struct SessionSummary {
    /// Total cards graded.
    pub graded: usize,
    /// Graded cards that were new introductions.
    pub new_introduced: usize,
    /// Graded cards that were reviews of previously seen material.
    pub reviewed: usize,
    /// Review events that could not be appended to the audit trail.
    pub events_dropped: usize,
}

/// One review session over today's queue.
///
/// The session owns its queue and the card currently being presented; no
/// state lives outside it, so independent sessions (and tests) cannot step
/// on each other. A grading step only advances the queue after the card
/// write succeeded.
pub struct Session {
    today: Day,
    queue: VecDeque<Card>,
    graded: usize,
    new_introduced: usize,
    reviewed: usize,
    events_dropped: usize,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(
        cards: Vec<Card>,
        today: Day,
        settings: &Settings,
        rng: &mut R,
    ) -> Self {
        let queue = build_queue(cards, today, settings, rng);
        Self {
            today,
            queue: queue.into(),
            graded: 0,
            new_introduced: 0,
            reviewed: 0,
            events_dropped: 0,
        }
    }

    /// The card currently being presented, or None if the queue is
    /// exhausted.
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Grade the current card: compute the new scheduling fields, persist
    /// them, append the review event, and advance to the next card.
    ///
    /// On a card-write failure (after retries) the error is returned, the
    /// queue does not advance, and nothing is counted: the learner's answer
    /// was not saved and they can grade again. A failed event append is
    /// tolerated (the audit trail is best-effort) but counted separately.
    pub fn grade(&mut self, rating: Rating, store: &mut dyn CardStore) -> Fallible<Scheduling> {
        let (id, before) = match self.queue.front() {
            Some(card) => (card.id, card.scheduling.clone()),
            None => return fail("no card is being presented."),
        };
        let updated = apply_grade(&before, rating, self.today);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match store.save_scheduling(id, &updated) {
                Ok(()) => break,
                Err(e) if attempt < WRITE_RETRIES => {
                    log::warn!("Card write failed (attempt {attempt}): {e}");
                }
                Err(e) => return Err(e),
            }
        }

        let kind = if before.first_seen.is_none() {
            ReviewKind::New
        } else {
            ReviewKind::Review
        };
        let event = ReviewEvent {
            card_id: id,
            rating,
            reviewed_at: Timestamp::now(),
            event_date: self.today,
            kind,
        };
        if let Err(e) = store.append_event(&event) {
            log::warn!("Review event dropped for card {id}: {e}");
            self.events_dropped += 1;
        }

        self.queue.pop_front();
        self.graded += 1;
        match kind {
            ReviewKind::New => self.new_introduced += 1,
            ReviewKind::Review => self.reviewed += 1,
        }
        log::debug!(
            "Graded card {id} {rating}: stage={} interval={}d ease={:.2}",
            updated.stage,
            updated.interval_days,
            updated.ease
        );
        Ok(updated)
    }

    pub fn finish(self) -> SessionSummary {
        SessionSummary {
            graded: self.graded,
            new_introduced: self.new_introduced,
            reviewed: self.reviewed,
            events_dropped: self.events_dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::stage::Stage;

    fn today() -> Day {
        Day::from_ymd(2024, 1, 10)
    }

    fn new_card(id: i64) -> Card {
        Card {
            id: CardId::new(id),
            front: format!("front {id}"),
            back: format!("back {id}"),
            image_url: None,
            scheduling: Scheduling::pristine(),
        }
    }

    fn due_card(id: i64) -> Card {
        let mut card = new_card(id);
        card.scheduling.stage = Stage::Review;
        card.scheduling.interval_days = 3;
        card.scheduling.first_seen = Some(Day::from_ymd(2023, 12, 1));
        card.scheduling.due_date = Some(today());
        card
    }

    fn session(cards: Vec<Card>) -> Session {
        let mut rng = StdRng::seed_from_u64(7);
        Session::new(cards, today(), &Settings::default(), &mut rng)
    }

    /// In-memory store with switchable failure modes.
    #[derive(Default)]
    struct MemoryStore {
        scheduling: HashMap<i64, Scheduling>,
        events: Vec<ReviewEvent>,
        card_writes_fail: bool,
        event_appends_fail: bool,
    }

    impl CardStore for MemoryStore {
        fn load_cards(&self) -> Fallible<Vec<Card>> {
            Ok(Vec::new())
        }

        fn save_scheduling(&mut self, id: CardId, scheduling: &Scheduling) -> Fallible<()> {
            if self.card_writes_fail {
                return fail("store is down.");
            }
            self.scheduling.insert(id.into_inner(), scheduling.clone());
            Ok(())
        }

        fn append_event(&mut self, event: &ReviewEvent) -> Fallible<()> {
            if self.event_appends_fail {
                return fail("audit log is down.");
            }
            self.events.push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_empty_session_is_complete() {
        let session = session(Vec::new());
        assert!(session.is_complete());
        assert!(session.current().is_none());
        let summary = session.finish();
        assert_eq!(summary.graded, 0);
    }

    #[test]
    fn test_grade_with_no_current_card_fails() {
        let mut session = session(Vec::new());
        let mut store = MemoryStore::default();
        assert!(session.grade(Rating::Good, &mut store).is_err());
    }

    #[test]
    fn test_drives_queue_to_completion() {
        let mut session = session(vec![due_card(1), due_card(2), new_card(3)]);
        let mut store = MemoryStore::default();
        assert_eq!(session.remaining(), 3);
        while !session.is_complete() {
            session.grade(Rating::Good, &mut store).unwrap();
        }
        assert_eq!(store.scheduling.len(), 3);
        assert_eq!(store.events.len(), 3);
        let summary = session.finish();
        assert_eq!(
            summary,
            SessionSummary {
                graded: 3,
                new_introduced: 1,
                reviewed: 2,
                events_dropped: 0,
            }
        );
    }

    #[test]
    fn test_persisted_fields_match_scheduler_output() {
        let mut session = session(vec![due_card(1)]);
        let mut store = MemoryStore::default();
        let updated = session.grade(Rating::Good, &mut store).unwrap();
        assert_eq!(store.scheduling[&1], updated);
        assert_eq!(updated.interval_days, 8); // round(3 * 2.5)
    }

    #[test]
    fn test_event_classification() {
        let mut session = session(vec![due_card(1), new_card(2)]);
        let mut store = MemoryStore::default();
        // Due cards precede new cards in the queue.
        session.grade(Rating::Good, &mut store).unwrap();
        session.grade(Rating::Good, &mut store).unwrap();
        assert_eq!(store.events[0].kind, ReviewKind::Review);
        assert_eq!(store.events[0].card_id, CardId::new(1));
        assert_eq!(store.events[1].kind, ReviewKind::New);
        assert_eq!(store.events[1].event_date, today());
    }

    #[test]
    fn test_card_write_failure_does_not_advance() {
        let mut session = session(vec![due_card(1)]);
        let mut store = MemoryStore {
            card_writes_fail: true,
            ..Default::default()
        };
        assert!(session.grade(Rating::Good, &mut store).is_err());
        assert_eq!(session.remaining(), 1);
        assert!(store.events.is_empty());

        // The store recovers; grading the same card again succeeds.
        store.card_writes_fail = false;
        session.grade(Rating::Good, &mut store).unwrap();
        assert!(session.is_complete());
        let summary = session.finish();
        assert_eq!(summary.graded, 1);
    }

    #[test]
    fn test_event_append_failure_is_tolerated() {
        let mut session = session(vec![due_card(1)]);
        let mut store = MemoryStore {
            event_appends_fail: true,
            ..Default::default()
        };
        session.grade(Rating::Good, &mut store).unwrap();
        assert!(session.is_complete());
        assert_eq!(store.scheduling.len(), 1);
        let summary = session.finish();
        assert_eq!(summary.graded, 1);
        assert_eq!(summary.events_dropped, 1);
    }
}
