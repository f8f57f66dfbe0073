// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::api::{fetch_episode, fetch_episodes, fetch_featured_ids};
use crate::config::ApiConfig;
use crate::episode::{Episode, EpisodeDetail};
use crate::error::ApiError;
use crate::http::HttpClient;

/// Data behind the home page: the newest releases and everything after them
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    /// Newest episodes, shown prominently
    pub latest: Vec<EpisodeDetail>,
    /// Remaining episodes, shown as a table
    pub all: Vec<EpisodeDetail>,
}

impl HomePage {
    /// Split a newest-first list after its first `latest_count` entries
    pub fn split(mut episodes: Vec<EpisodeDetail>, latest_count: usize) -> Self {
        let cut = latest_count.min(episodes.len());
        let all = episodes.split_off(cut);

        Self {
            latest: episodes,
            all,
        }
    }

    /// Every episode on the page, in display order
    pub fn iter(&self) -> impl Iterator<Item = &EpisodeDetail> {
        self.latest.iter().chain(self.all.iter())
    }

    pub fn len(&self) -> usize {
        self.latest.len() + self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The page as a player queue, so a display position is a queue index
    pub fn playlist(&self) -> Vec<Episode> {
        self.iter().map(|detail| detail.episode.clone()).collect()
    }
}

/// Load the home page
pub async fn load_home<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
) -> Result<HomePage, ApiError> {
    let episodes = fetch_episodes(client, config).await?;
    tracing::debug!(count = episodes.len(), "home page loaded");

    Ok(HomePage::split(episodes, config.latest_count))
}

/// Load the detail page of one episode
pub async fn load_episode_page<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    id: &str,
) -> Result<EpisodeDetail, ApiError> {
    fetch_episode(client, config, id).await
}

/// Ids of the episodes whose pages are worth preparing ahead of time
pub async fn load_featured<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
) -> Result<Vec<String>, ApiError> {
    fetch_featured_ids(client, config).await
}
