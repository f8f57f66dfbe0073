// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;
use url::Url;

use crate::config::ApiConfig;
use crate::episode::EpisodeDetail;
use crate::error::ApiError;
use crate::http::HttpClient;

use super::parse::{parse_episode_list, parse_episode_record};

/// Build the URL listing the `limit` most recent episodes
pub fn episodes_url(config: &ApiConfig, limit: usize) -> Result<Url, ApiError> {
    let mut url = config.base_url.join("episodes")?;
    url.query_pairs_mut()
        .append_pair("_limit", &limit.to_string())
        .append_pair("_sort", "published_at")
        .append_pair("_order", "desc");
    Ok(url)
}

/// Build the URL of a single episode, escaping the id as one path segment
pub fn episode_url(config: &ApiConfig, id: &str) -> Result<Url, ApiError> {
    let mut url = config.base_url.join("episodes")?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(id);
    }
    Ok(url)
}

/// Fetch raw response bytes, treating HTTP error statuses as failures
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, ApiError> {
    let response = client.get(url).await.map_err(|e| ApiError::FetchFailed {
        url: url.to_string(),
        source: e,
    })?;

    if response.status >= 400 {
        return Err(ApiError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    tracing::debug!(url, status = response.status, bytes = response.body.len(), "fetched");
    Ok(response.body)
}

/// Fetch the most recent episodes, newest first
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
) -> Result<Vec<EpisodeDetail>, ApiError> {
    let url = episodes_url(config, config.list_limit)?;
    tracing::info!(%url, "fetching episode list");

    let bytes = fetch_bytes(client, url.as_str()).await?;
    parse_episode_list(&bytes, url.as_str())
}

/// Fetch a single episode by id
pub async fn fetch_episode<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    id: &str,
) -> Result<EpisodeDetail, ApiError> {
    let url = episode_url(config, id)?;
    tracing::info!(%url, "fetching episode");

    let bytes = fetch_bytes(client, url.as_str()).await?;
    parse_episode_record(&bytes, url.as_str())
}

/// Fetch the ids of the most recent episodes worth pre-rendering
pub async fn fetch_featured_ids<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
) -> Result<Vec<String>, ApiError> {
    let url = episodes_url(config, config.featured_count)?;
    let bytes = fetch_bytes(client, url.as_str()).await?;
    let episodes = parse_episode_list(&bytes, url.as_str())?;

    Ok(episodes.into_iter().map(|e| e.episode.id).collect())
}
