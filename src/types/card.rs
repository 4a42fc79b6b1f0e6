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

use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

use crate::scheduler::DEFAULT_EASE;
use crate::types::date::Day;
use crate::types::stage::Stage;

/// A card's stable identifier. Assigned by the store, immutable afterwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId(i64);

impl CardId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for CardId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for CardId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let id: i64 = FromSql::column_result(value)?;
        Ok(CardId(id))
    }
}

/// The scheduling fields of a card. Only the scheduler (and the explicit
/// suspend/reset operations) ever writes these.
#[derive(Clone, PartialEq, Debug)]
pub struct Scheduling {
    pub stage: Stage,
    /// Days until the next showing. Always >= 1 after a grading event.
    pub interval_days: i64,
    /// Multiplicative interval growth factor. Never below 1.3.
    pub ease: f64,
    /// Completed reviews. Monotonic except for an explicit reset.
    pub reps: i64,
    /// Times a Review-stage card was forgotten.
    pub lapses: i64,
    /// The date the card was first shown, or None if never shown.
    pub first_seen: Option<Day>,
    pub last_reviewed: Option<Day>,
    /// The date the card becomes eligible for review. None while New.
    pub due_date: Option<Day>,
    pub suspended: bool,
}

impl Scheduling {
    /// Scheduling state of a freshly created card.
    pub fn pristine() -> Self {
        Self {
            stage: Stage::New,
            interval_days: 0,
            ease: DEFAULT_EASE,
            reps: 0,
            lapses: 0,
            first_seen: None,
            last_reviewed: None,
            due_date: None,
            suspended: false,
        }
    }

    /// Build scheduling state from possibly-incomplete stored fields.
    ///
    /// Externally edited rows may be missing values or hold garbage; rather
    /// than propagating an error, missing or invalid fields fall back to the
    /// defaults of a pristine card. This is the single place where those
    /// defaults are applied.
    pub fn hydrate(
        stage: Option<Stage>,
        interval_days: Option<i64>,
        ease: Option<f64>,
        reps: Option<i64>,
        lapses: Option<i64>,
        first_seen: Option<Day>,
        last_reviewed: Option<Day>,
        due_date: Option<Day>,
        suspended: bool,
    ) -> Self {
        Self {
            stage: stage.unwrap_or(Stage::New),
            interval_days: interval_days.map(|i| i.max(0)).unwrap_or(0),
            ease: ease
                .filter(|e| e.is_finite() && *e > 0.0)
                .unwrap_or(DEFAULT_EASE),
            reps: reps.map(|r| r.max(0)).unwrap_or(0),
            lapses: lapses.map(|l| l.max(0)).unwrap_or(0),
            first_seen,
            last_reviewed,
            due_date,
            suspended,
        }
    }
}

/// One learnable fact: a front/back text pair with an optional hint image.
///
/// `front`, `back` and `image_url` are never touched by the scheduler.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub image_url: Option<String>,
    pub scheduling: Scheduling,
}
