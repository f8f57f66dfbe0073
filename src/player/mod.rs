mod ended;
mod store;

pub use ended::{EndedAction, handle_episode_ended};
pub use store::{PlayerState, PlayerStore};
