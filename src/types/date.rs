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

use chrono::Duration;
use chrono::Local;
use chrono::NaiveDate;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar date in the learner's local timezone. Scheduling works in whole
/// days, so this is the only notion of time the scheduler sees.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn add_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn tomorrow(self) -> Self {
        self.add_days(1)
    }

    #[cfg(test)]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl ToSql for Day {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.format(FORMAT).to_string()))
    }
}

impl FromSql for Day {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        let date = NaiveDate::parse_from_str(&string, FORMAT)
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(Day(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_days() {
        let day = Day::from_ymd(2024, 1, 10);
        assert_eq!(day.add_days(3), Day::from_ymd(2024, 1, 13));
        assert_eq!(day.tomorrow(), Day::from_ymd(2024, 1, 11));
    }

    #[test]
    fn test_add_days_crosses_month() {
        let day = Day::from_ymd(2024, 1, 31);
        assert_eq!(day.add_days(1), Day::from_ymd(2024, 2, 1));
    }

    #[test]
    fn test_ordering() {
        assert!(Day::from_ymd(2024, 1, 10) < Day::from_ymd(2024, 1, 11));
    }

    #[test]
    fn test_display() {
        assert_eq!(Day::from_ymd(2024, 1, 10).to_string(), "2024-01-10");
    }
}
