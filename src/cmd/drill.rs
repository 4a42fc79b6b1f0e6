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

use std::io::Write;
use std::path::PathBuf;

use crate::cmd::open_deck;
use crate::config::load_settings;
use crate::error::Fallible;
use crate::session::CardStore;
use crate::session::Session;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

pub fn drill(directory: PathBuf) -> Fallible<()> {
    let settings = load_settings(&directory)?;
    let mut db = open_deck(&directory)?;
    let cards = db.load_cards()?;
    // The session's "today" is fixed at start, so a drill spanning midnight
    // stays coherent.
    let today = Timestamp::now().local_day();

    let mut rng = rand::rng();
    let mut session = Session::new(cards, today, &settings, &mut rng);
    if session.is_complete() {
        println!("No cards due today.");
        return Ok(());
    }
    println!("{} cards to review.", session.remaining());

    while let Some(card) = session.current() {
        let front = card.front.clone();
        let back = card.back.clone();
        let has_hint = card.image_url.is_some();
        println!();
        println!("Q: {front}");
        if has_hint {
            println!("   (a hint image exists for this card)");
        }
        print!("[press enter to reveal] ");
        std::io::stdout().flush()?;
        read_line()?;
        println!("A: {back}");
        let rating = match read_rating()? {
            Some(rating) => rating,
            // Learner quit; everything graded so far is already persisted.
            None => break,
        };
        if let Err(e) = session.grade(rating, &mut db) {
            // The answer was not saved; the card stays at the front of the
            // queue so the learner can grade it again.
            eprintln!("{e}");
            eprintln!("Your answer may not be saved. Grade the card again to retry.");
        }
    }

    let summary = session.finish();
    println!();
    println!(
        "Session complete: {} graded ({} new, {} review).",
        summary.graded, summary.new_introduced, summary.reviewed
    );
    if summary.events_dropped > 0 {
        eprintln!(
            "Warning: {} review event(s) could not be recorded.",
            summary.events_dropped
        );
    }
    Ok(())
}

fn read_line() -> Fallible<String> {
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt until the learner enters a valid rating, or None to quit.
fn read_rating() -> Fallible<Option<Rating>> {
    loop {
        println!("Grade: (1 = Again, 2 = Hard, 3 = Good, 4 = Easy, q = quit)");
        let input = read_line()?;
        match input.as_str() {
            "1" => return Ok(Some(Rating::Again)),
            "2" => return Ok(Some(Rating::Hard)),
            "3" => return Ok(Some(Rating::Good)),
            "4" => return Ok(Some(Rating::Easy)),
            "q" => return Ok(None),
            _ => println!("Invalid input. Please enter a number between 1 and 4."),
        }
    }
}
