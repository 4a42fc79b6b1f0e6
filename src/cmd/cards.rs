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

use std::path::Path;

use crate::cmd::open_deck;
use crate::error::Fallible;
use crate::types::card::CardId;

pub fn add(directory: &Path, front: &str, back: &str, image_url: Option<&str>) -> Fallible<()> {
    let mut db = open_deck(directory)?;
    let id = db.insert_card(front, back, image_url)?;
    println!("Added card {id}.");
    Ok(())
}

pub fn suspend(directory: &Path, id: CardId, suspended: bool) -> Fallible<()> {
    let mut db = open_deck(directory)?;
    db.set_suspended(id, suspended)?;
    if suspended {
        println!("Suspended card {id}.");
    } else {
        println!("Resumed card {id}.");
    }
    Ok(())
}

pub fn reset(directory: &Path, id: CardId) -> Fallible<()> {
    let mut db = open_deck(directory)?;
    db.reset_card(id)?;
    println!("Reset card {id}.");
    Ok(())
}
