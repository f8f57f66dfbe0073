use rand::Rng;

use super::store::PlayerStore;

/// What the media element should do after an episode played to its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedAction {
    /// Loop mode: seek back to the start and keep playing
    Restart,
    /// The store moved on; load the episode at `index`
    Advanced { index: usize },
    /// Nothing left to play; the queue was cleared
    Cleared,
    /// Nothing was loaded; the store is unchanged
    Idle,
}

/// Apply the end-of-episode policy to the store
pub fn handle_episode_ended<R: Rng>(store: &mut PlayerStore<R>) -> EndedAction {
    if store.current_episode().is_none() {
        tracing::debug!("episode ended with nothing loaded");
        return EndedAction::Idle;
    }

    if store.is_looping() {
        tracing::debug!(index = store.current_index(), "episode ended, looping");
        return EndedAction::Restart;
    }

    if store.has_next() {
        store.play_next();
        tracing::debug!(index = store.current_index(), "episode ended, advanced");
        return EndedAction::Advanced {
            index: store.current_index(),
        };
    }

    tracing::debug!("episode ended, queue finished");
    store.clear_player_state();
    EndedAction::Cleared
}
