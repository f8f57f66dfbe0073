// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::episode::{Episode, EpisodeDetail};
use crate::error::ApiError;

/// Episode record as served by the API
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    pub file: RawFile,
}

/// Audio file attached to a raw episode record
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: String,
    pub duration: Option<RawDuration>,
}

/// Duration as it appears on the wire: a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl RawDuration {
    /// Coerce to whole seconds, or `None` if the value is not a usable number
    pub fn to_seconds(&self) -> Option<u64> {
        match self {
            RawDuration::Integer(secs) => Some(*secs),
            RawDuration::Float(secs) => float_seconds(*secs),
            RawDuration::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Some(0);
                }
                text.parse::<u64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(float_seconds))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            RawDuration::Integer(secs) => secs.to_string(),
            RawDuration::Float(secs) => secs.to_string(),
            RawDuration::Text(text) => format!("\"{}\"", text),
        }
    }
}

fn float_seconds(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.trunc() as u64)
}

/// Shape a raw record into an episode with its page fields
pub fn parse_episode(raw: RawEpisode) -> Result<EpisodeDetail, ApiError> {
    let duration = raw
        .file
        .duration
        .as_ref()
        .and_then(RawDuration::to_seconds)
        .ok_or_else(|| ApiError::InvalidDuration {
            id: raw.id.clone(),
            value: raw
                .file
                .duration
                .as_ref()
                .map(RawDuration::describe)
                .unwrap_or_else(|| "missing".to_string()),
        })?;

    let published_at =
        parse_published_at(&raw.published_at).ok_or_else(|| ApiError::InvalidDate {
            id: raw.id.clone(),
            date_str: raw.published_at.clone(),
        })?;

    Ok(EpisodeDetail {
        episode: Episode {
            id: raw.id,
            title: raw.title,
            members: raw.members,
            thumbnail: raw.thumbnail,
            duration,
            url: raw.file.url,
        },
        published_at,
        description: raw.description,
    })
}

/// Parse a JSON array of raw records
///
/// Records that cannot be shaped are skipped with a warning, so one broken
/// entry does not hide the rest of the list.
pub fn parse_episode_list(json: &[u8], url: &str) -> Result<Vec<EpisodeDetail>, ApiError> {
    let raw: Vec<RawEpisode> =
        serde_json::from_slice(json).map_err(|e| ApiError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })?;

    let episodes = raw
        .into_iter()
        .filter_map(|record| match parse_episode(record) {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!(error = %e, "skipping episode record");
                None
            }
        })
        .collect();

    Ok(episodes)
}

/// Parse a single JSON record
pub fn parse_episode_record(json: &[u8], url: &str) -> Result<EpisodeDetail, ApiError> {
    let raw: RawEpisode = serde_json::from_slice(json).map_err(|e| ApiError::DecodeFailed {
        url: url.to_string(),
        source: e,
    })?;

    parse_episode(raw)
}

/// Parse a publication timestamp, keeping its wall-clock time
fn parse_published_at(date_str: &str) -> Option<NaiveDateTime> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.naive_local());
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
