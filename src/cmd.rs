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

pub mod cards;
pub mod drill;
pub mod stats;

use std::path::Path;

use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

const DATABASE_FILE: &str = "flits.sqlite3";

/// Open (or create) the deck database in the given directory.
pub fn open_deck(directory: &Path) -> Fallible<Database> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let db_path = directory.join(DATABASE_FILE);
    Database::open(
        db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?,
    )
}
