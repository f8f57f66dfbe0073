mod fetch;
mod parse;

pub use fetch::{
    episode_url, episodes_url, fetch_bytes, fetch_episode, fetch_episodes, fetch_featured_ids,
};
pub use parse::{
    RawDuration, RawEpisode, RawFile, parse_episode, parse_episode_list, parse_episode_record,
};
