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

use serde::Deserialize;

use crate::error::Fallible;

const SETTINGS_FILE: &str = "flits.toml";

/// Per-deck settings, read from an optional `flits.toml` in the deck
/// directory. The scheduler never writes these.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Ceiling on how many never-seen cards are introduced per calendar day.
    pub max_new_per_day: u32,
    /// Also queue cards due tomorrow, after today's due cards and before new
    /// ones.
    pub review_ahead: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_new_per_day: 10,
            review_ahead: false,
        }
    }
}

/// Load settings from the deck directory, falling back to defaults if no
/// settings file exists.
pub fn load_settings(directory: &Path) -> Fallible<Settings> {
    let path = directory.join(SETTINGS_FILE);
    if !path.exists() {
        log::debug!("No {SETTINGS_FILE}, using default settings.");
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    log::debug!(
        "Settings: max_new_per_day={}, review_ahead={}",
        settings.max_new_per_day,
        settings.review_ahead
    );
    Ok(settings)
}
