// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors that can occur when fetching or shaping episode records
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Episode '{id}' has an invalid duration: {value}")]
    InvalidDuration { id: String, value: String },

    #[error("Failed to parse date '{date_str}' for episode '{id}'")]
    InvalidDate { id: String, date_str: String },
}

/// Errors reported by player commands that validate their input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Start index {index} is out of range for a queue of {len} episodes")]
    StartIndexOutOfRange { index: usize, len: usize },
}

/// Errors that can occur while validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("Episode list limit must be greater than zero")]
    ZeroLimit,

    #[error("Latest releases count must be greater than zero")]
    ZeroLatest,
}

/// Errors raised by the interactive player session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown command '{0}' (type 'help' for a list of commands)")]
    UnknownCommand(String),

    #[error("Invalid episode number '{0}'")]
    InvalidEpisodeNumber(String),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
