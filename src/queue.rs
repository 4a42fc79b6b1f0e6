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

//! Daily queue building: partition the collection into due and new cards,
//! shuffle each partition, and cap new introductions by the daily quota.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config::Settings;
use crate::types::card::Card;
use crate::types::date::Day;
use crate::types::stage::Stage;

/// Build today's review queue.
///
/// Suspended cards are excluded outright. Due cards (graduated, due date on
/// or before today) come first so that overdue material is never starved by
/// new introductions; never-seen new cards follow, capped by whatever is
/// left of today's quota. With `review_ahead`, cards due strictly tomorrow
/// slot in between. Each partition is shuffled independently; the RNG is a
/// parameter so tests can seed it.
pub fn build_queue<R: Rng + ?Sized>(
    cards: Vec<Card>,
    today: Day,
    settings: &Settings,
    rng: &mut R,
) -> Vec<Card> {
    // Cards introduced today count against the quota even though they have
    // already left the new pool, so grading a card once today does not
    // double-count it against tomorrow's pool.
    let introduced_today = cards
        .iter()
        .filter(|c| c.scheduling.first_seen == Some(today))
        .count();
    let quota = (settings.max_new_per_day as usize).saturating_sub(introduced_today);

    let mut due = Vec::new();
    let mut ahead = Vec::new();
    let mut fresh = Vec::new();
    for card in cards {
        let s = &card.scheduling;
        if s.suspended {
            continue;
        }
        if s.stage != Stage::New && s.due_date.is_some_and(|d| d <= today) {
            due.push(card);
        } else if settings.review_ahead
            && s.stage != Stage::New
            && s.due_date == Some(today.tomorrow())
        {
            ahead.push(card);
        } else if s.stage == Stage::New && s.first_seen.is_none() {
            fresh.push(card);
        }
    }

    due.shuffle(rng);
    ahead.shuffle(rng);
    fresh.shuffle(rng);
    fresh.truncate(quota);

    log::debug!(
        "Queue: {} due, {} ahead, {} new (quota {}).",
        due.len(),
        ahead.len(),
        fresh.len(),
        quota
    );

    due.extend(ahead);
    due.extend(fresh);
    due
}

/// Workload counts for the menu summary: what a session today and a session
/// tomorrow would look like.
#[derive(Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub new_today: usize,
    pub review_today: usize,
    pub new_tomorrow: usize,
    pub review_tomorrow: usize,
}

pub fn summarize(cards: &[Card], today: Day, settings: &Settings) -> DeckSummary {
    let max_new = settings.max_new_per_day as usize;
    let introduced_today = cards
        .iter()
        .filter(|c| c.scheduling.first_seen == Some(today))
        .count();
    let available_new = cards
        .iter()
        .filter(|c| {
            !c.scheduling.suspended
                && c.scheduling.stage == Stage::New
                && c.scheduling.first_seen.is_none()
        })
        .count();
    let review_today = cards
        .iter()
        .filter(|c| {
            !c.scheduling.suspended
                && c.scheduling.stage != Stage::New
                && c.scheduling.due_date.is_some_and(|d| d <= today)
        })
        .count();
    let review_tomorrow = cards
        .iter()
        .filter(|c| {
            !c.scheduling.suspended
                && c.scheduling.stage != Stage::New
                && c.scheduling.due_date == Some(today.tomorrow())
        })
        .count();
    DeckSummary {
        new_today: available_new.min(max_new.saturating_sub(introduced_today)),
        review_today,
        new_tomorrow: available_new.min(max_new),
        review_tomorrow,
    }
}
