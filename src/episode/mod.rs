mod format;
mod model;

pub use format::{format_duration, format_header_date, format_published, strip_html, truncate_title};
pub use model::{Episode, EpisodeDetail};
