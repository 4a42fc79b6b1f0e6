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
use std::path::Path;

use clap::ValueEnum;

use crate::cmd::open_deck;
use crate::config::load_settings;
use crate::error::Fallible;
use crate::queue::summarize;
use crate::session::CardStore;
use crate::types::date::Day;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_deck_stats(directory: &Path, format: StatsFormat) -> Fallible<()> {
    let settings = load_settings(directory)?;
    let db = open_deck(directory)?;
    let cards = db.load_cards()?;
    let summary = summarize(&cards, Day::today(), &settings);

    match format {
        StatsFormat::Text => {
            println!(
                "Today: New {}, Review {}",
                summary.new_today, summary.review_today
            );
            println!(
                "Tomorrow: New {}, Review {}",
                summary.new_tomorrow, summary.review_tomorrow
            );
        }
        StatsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
