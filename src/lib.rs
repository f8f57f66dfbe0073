pub mod api;
pub mod config;
pub mod episode;
pub mod error;
pub mod events;
pub mod http;
pub mod logging;
pub mod pages;
pub mod player;
pub mod session;

// Re-export main types for convenience
pub use api::{fetch_episode, fetch_episodes, fetch_featured_ids};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use episode::{Episode, EpisodeDetail, format_duration, format_header_date, format_published, strip_html};
pub use error::{ApiError, ConfigError, PlayerError, SessionError};
pub use events::{NoopObserver, PlayerEvent, PlayerObserver, SharedObserver};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pages::{HomePage, load_episode_page, load_featured, load_home};
pub use player::{EndedAction, PlayerState, PlayerStore, handle_episode_ended};
pub use session::{Command, Flow, Session, parse_episode_number};
