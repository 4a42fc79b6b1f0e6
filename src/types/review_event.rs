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

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::types::card::CardId;
use crate::types::date::Day;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// Whether a grading event introduced the card or reviewed it. A grade that
/// sets `first_seen` for the first time counts as an introduction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReviewKind {
    New,
    Review,
}

impl ReviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::New => "new",
            ReviewKind::Review => "review",
        }
    }
}

impl ToSql for ReviewKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Append-only audit record of one grading action. Written once, never read
/// back by the scheduler.
#[derive(Clone, Debug)]
pub struct ReviewEvent {
    pub card_id: CardId,
    pub rating: Rating,
    pub reviewed_at: Timestamp,
    pub event_date: Day,
    pub kind: ReviewKind,
}
