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

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::CardStore;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::Scheduling;
use crate::types::date::Day;
use crate::types::review_event::ReviewEvent;
use crate::types::stage::Stage;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::bootstrap(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> Fallible<Self> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Add a new card with pristine scheduling state. Returns its id.
    pub fn insert_card(
        &mut self,
        front: &str,
        back: &str,
        image_url: Option<&str>,
    ) -> Fallible<CardId> {
        let sql = "insert into cards (front, back, image_url, stage, interval_days, ease, reps, lapses, suspended) values (?, ?, ?, ?, ?, ?, ?, ?, 0) returning card_id;";
        let s = Scheduling::pristine();
        let id: CardId = self.conn.query_row(
            sql,
            (
                front,
                back,
                image_url,
                s.stage,
                s.interval_days,
                s.ease,
                s.reps,
                s.lapses,
            ),
            |row| row.get(0),
        )?;
        log::debug!("Added card {id}.");
        Ok(id)
    }

    /// Fetch a single card by id.
    pub fn get_card(&self, id: CardId) -> Fallible<Card> {
        let sql = "select card_id, front, back, image_url, stage, interval_days, ease, reps, lapses, first_seen, last_reviewed, due_date, suspended from cards where card_id = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(read_card(row)?),
            None => fail("no card with that id."),
        }
    }

    pub fn set_suspended(&mut self, id: CardId, suspended: bool) -> Fallible<()> {
        let sql = "update cards set suspended = ? where card_id = ?;";
        let affected = self.conn.execute(sql, (suspended, id))?;
        if affected == 0 {
            return fail("no card with that id.");
        }
        Ok(())
    }

    /// Put a card's scheduling state back to pristine `New`. This is the
    /// only operation besides grading that touches scheduling fields, and
    /// the only one allowed to reset reps and lapses.
    pub fn reset_card(&mut self, id: CardId) -> Fallible<()> {
        let sql = "update cards set stage = ?, interval_days = ?, ease = ?, reps = ?, lapses = ?, first_seen = null, last_reviewed = null, due_date = null, suspended = 0 where card_id = ?;";
        let s = Scheduling::pristine();
        let affected = self.conn.execute(
            sql,
            (s.stage, s.interval_days, s.ease, s.reps, s.lapses, id),
        )?;
        if affected == 0 {
            return fail("no card with that id.");
        }
        Ok(())
    }
}

impl CardStore for Database {
    fn load_cards(&self) -> Fallible<Vec<Card>> {
        let sql = "select card_id, front, back, image_url, stage, interval_days, ease, reps, lapses, first_seen, last_reviewed, due_date, suspended from cards;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(read_card(row)?);
        }
        log::debug!("Loaded {} cards.", cards.len());
        Ok(cards)
    }

    fn save_scheduling(&mut self, id: CardId, scheduling: &Scheduling) -> Fallible<()> {
        let sql = "update cards set stage = ?, interval_days = ?, ease = ?, reps = ?, lapses = ?, first_seen = ?, last_reviewed = ?, due_date = ?, suspended = ? where card_id = ?;";
        let affected = self.conn.execute(
            sql,
            (
                scheduling.stage,
                scheduling.interval_days,
                scheduling.ease,
                scheduling.reps,
                scheduling.lapses,
                scheduling.first_seen,
                scheduling.last_reviewed,
                scheduling.due_date,
                scheduling.suspended,
                id,
            ),
        )?;
        if affected == 0 {
            return fail("no card with that id.");
        }
        Ok(())
    }

    fn append_event(&mut self, event: &ReviewEvent) -> Fallible<()> {
        let sql = "insert into reviews (card_id, rating, reviewed_at, event_date, review_kind) values (?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                event.card_id,
                event.rating,
                event.reviewed_at,
                event.event_date,
                event.kind,
            ),
        )?;
        Ok(())
    }
}

/// Read one card row, applying scheduling defaults for missing or malformed
/// fields (externally edited rows are tolerated, per the hydration policy).
fn read_card(row: &Row) -> rusqlite::Result<Card> {
    let stage: Option<String> = row.get("stage")?;
    let stage = stage.as_deref().and_then(Stage::parse);
    let first_seen: Option<Day> = row.get("first_seen")?;
    let last_reviewed: Option<Day> = row.get("last_reviewed")?;
    let due_date: Option<Day> = row.get("due_date")?;
    let scheduling = Scheduling::hydrate(
        stage,
        row.get("interval_days")?,
        row.get("ease")?,
        row.get("reps")?,
        row.get("lapses")?,
        first_seen,
        last_reviewed,
        due_date,
        row.get("suspended")?,
    );
    Ok(Card {
        id: row.get("card_id")?,
        front: row.get("front")?,
        back: row.get("back")?,
        image_url: row.get("image_url")?,
        scheduling,
    })
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
