// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::error::ConfigError;

/// Default location of the episode API
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Settings for talking to the episode API and shaping the pages
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, always ending with a slash so relative joins keep its path
    pub base_url: Url,
    /// Number of episodes requested for the home page
    pub list_limit: usize,
    /// How many of those are shown as latest releases
    pub latest_count: usize,
    /// How many recent episode ids are listed as featured
    pub featured_count: usize,
}

impl ApiConfig {
    /// Build a validated config from raw values
    pub fn new(
        base_url: &str,
        list_limit: usize,
        latest_count: usize,
    ) -> Result<Self, ConfigError> {
        let mut base = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source: e,
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base.scheme().to_string()));
        }

        if list_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        if latest_count == 0 {
            return Err(ConfigError::ZeroLatest);
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base_url: base,
            list_limit,
            latest_count,
            featured_count: latest_count,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:3333/").expect("valid default URL"),
            list_limit: 12,
            latest_count: 2,
            featured_count: 2,
        }
    }
}
