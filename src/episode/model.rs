// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDateTime;

use super::format::{format_duration, format_published};

/// A playable podcast episode, as loaded into the player queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    /// Playback length in seconds
    pub duration: u64,
    /// Audio resource location
    pub url: String,
}

/// An episode together with the data only the listing and detail pages need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDetail {
    pub episode: Episode,
    pub published_at: NaiveDateTime,
    /// Raw HTML description
    pub description: String,
}

impl EpisodeDetail {
    /// Duration rendered as `HH:MM:SS`
    pub fn duration_string(&self) -> String {
        format_duration(self.episode.duration)
    }

    /// Publication date rendered as e.g. `Jan 22, 21`
    pub fn published_string(&self) -> String {
        format_published(&self.published_at)
    }

    pub fn into_episode(self) -> Episode {
        self.episode
    }
}
