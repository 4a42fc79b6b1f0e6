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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::cards;
use crate::cmd::drill::drill;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_deck_stats;
use crate::error::Fallible;
use crate::types::card::CardId;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Run today's review session.
    Drill {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Print how much work is waiting today and tomorrow.
    Stats {
        /// Optional path to the deck directory.
        directory: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Add a card to the deck.
    Add {
        /// Front side text.
        front: String,
        /// Back side text.
        back: String,
        /// Optional hint image URL.
        #[arg(long)]
        image_url: Option<String>,
        /// Optional path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Exclude a card from all review queues.
    Suspend {
        /// The card's id.
        card_id: i64,
        /// Optional path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Put a suspended card back into circulation.
    Resume {
        /// The card's id.
        card_id: i64,
        /// Optional path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Reset a card's scheduling back to brand new.
    Reset {
        /// The card's id.
        card_id: i64,
        /// Optional path to the deck directory.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill { directory } => drill(resolve_directory(directory)?),
        Command::Stats { directory, format } => {
            print_deck_stats(&resolve_directory(directory)?, format)
        }
        Command::Add {
            front,
            back,
            image_url,
            directory,
        } => cards::add(
            &resolve_directory(directory)?,
            &front,
            &back,
            image_url.as_deref(),
        ),
        Command::Suspend { card_id, directory } => {
            cards::suspend(&resolve_directory(directory)?, CardId::new(card_id), true)
        }
        Command::Resume { card_id, directory } => {
            cards::suspend(&resolve_directory(directory)?, CardId::new(card_id), false)
        }
        Command::Reset { card_id, directory } => {
            cards::reset(&resolve_directory(directory)?, CardId::new(card_id))
        }
    }
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    match directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}
