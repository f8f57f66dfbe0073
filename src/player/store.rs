// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::episode::Episode;
use crate::error::PlayerError;
use crate::events::{NoopObserver, PlayerEvent, SharedObserver};

/// Queue and transport flags of the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Episodes in playback order
    pub queue: Vec<Episode>,
    /// Offset into `queue`; meaningless while the queue is empty
    pub current_index: usize,
    pub is_playing: bool,
    /// Repeat the current episode instead of advancing when it ends
    pub is_looping: bool,
    /// Pick a random queue position on "next"
    pub is_shuffling: bool,
}

impl PlayerState {
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Always true while shuffling a non-empty queue, since any position
    /// (including the current one) is eligible.
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty() && (self.is_shuffling || self.current_index + 1 < self.queue.len())
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.get(self.current_index)
    }
}

/// Single owner of the player state.
///
/// Every read and mutation goes through the store. It is created once per
/// session by the application root and lent to whoever issues commands;
/// followers subscribe through a [`PlayerObserver`](crate::events::PlayerObserver).
pub struct PlayerStore<R = StdRng> {
    state: PlayerState,
    rng: R,
    observer: SharedObserver,
}

impl PlayerStore<StdRng> {
    /// Create an empty store with an entropy-seeded random generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for PlayerStore<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for PlayerStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> PlayerStore<R> {
    /// Create an empty store drawing shuffle positions from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: PlayerState::default(),
            rng,
            observer: NoopObserver::shared(),
        }
    }

    /// Report every state change to `observer`
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the queue with a single episode and start playing it
    pub fn play(&mut self, episode: Episode) {
        tracing::debug!(episode = %episode.id, "play single episode");
        self.replace_queue(vec![episode], 0);
    }

    /// Replace the queue with `list` and start playing at `start_index`
    ///
    /// A non-empty list must contain `start_index`; otherwise nothing changes.
    /// An empty list is accepted and leaves the index at 0.
    pub fn play_list(&mut self, list: Vec<Episode>, start_index: usize) -> Result<(), PlayerError> {
        if list.is_empty() {
            tracing::debug!("play empty list");
            self.replace_queue(list, 0);
            return Ok(());
        }

        if start_index >= list.len() {
            tracing::warn!(start_index, len = list.len(), "rejected play_list start index");
            return Err(PlayerError::StartIndexOutOfRange {
                index: start_index,
                len: list.len(),
            });
        }

        tracing::debug!(len = list.len(), start_index, "play list");
        self.replace_queue(list, start_index);
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        let playing = !self.state.is_playing;
        self.set_playing_state(playing);
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        tracing::debug!(looping = self.state.is_looping, "toggle loop");
        self.observer
            .notify(PlayerEvent::LoopingChanged(self.state.is_looping));
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        tracing::debug!(shuffling = self.state.is_shuffling, "toggle shuffle");
        self.observer
            .notify(PlayerEvent::ShufflingChanged(self.state.is_shuffling));
    }

    /// Set the playing flag without toggling, e.g. when the media element
    /// pauses or stops on its own
    pub fn set_playing_state(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }

        self.state.is_playing = playing;
        tracing::debug!(playing, "playing state changed");
        self.observer.notify(PlayerEvent::PlayingChanged(playing));
    }

    /// Move to the next episode
    ///
    /// While shuffling, any queue position may be chosen, including the
    /// current one. Otherwise the index advances unless the queue is at its
    /// end. An empty queue is left alone.
    pub fn play_next(&mut self) {
        let len = self.state.queue.len();
        if len == 0 {
            return;
        }

        if self.state.is_shuffling {
            let index = self.rng.gen_range(0..len);
            tracing::debug!(index, "shuffle next");
            self.select(index);
        } else if self.state.has_next() {
            self.select(self.state.current_index + 1);
        }
    }

    /// Move to the previous episode, if there is one
    pub fn play_previous(&mut self) {
        if self.state.has_previous() {
            self.select(self.state.current_index - 1);
        }
    }

    /// Empty the queue and rewind the index; transport flags are kept
    pub fn clear_player_state(&mut self) {
        self.state.queue.clear();
        self.state.current_index = 0;
        tracing::debug!("player state cleared");
        self.observer.notify(PlayerEvent::Cleared);
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    pub fn queue(&self) -> &[Episode] {
        &self.state.queue
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling
    }

    /// Borrow the whole state record
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    fn replace_queue(&mut self, queue: Vec<Episode>, start_index: usize) {
        self.state.queue = queue;
        self.state.current_index = start_index;
        self.observer.notify(PlayerEvent::QueueReplaced {
            len: self.state.queue.len(),
            current_index: start_index,
        });
        self.notify_episode_changed();
        self.set_playing_state(true);
    }

    fn select(&mut self, index: usize) {
        self.state.current_index = index;
        self.notify_episode_changed();
    }

    fn notify_episode_changed(&self) {
        if let Some(episode) = self.state.current_episode() {
            self.observer.notify(PlayerEvent::EpisodeChanged {
                index: self.state.current_index,
                episode_id: episode.id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingObserver;

    fn make_episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Host".to_string(),
            thumbnail: format!("https://example.com/{}.jpg", id),
            duration: 60,
            url: format!("https://example.com/{}.m4a", id),
        }
    }

    fn make_queue(n: usize) -> Vec<Episode> {
        (0..n).map(|i| make_episode(&format!("ep{}", i))).collect()
    }

    fn seeded_store() -> PlayerStore {
        PlayerStore::with_rng(StdRng::seed_from_u64(7))
    }

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = PlayerStore::new();

        assert!(store.queue().is_empty());
        assert_eq!(store.current_index(), 0);
        assert!(!store.is_playing());
        assert!(!store.is_looping());
        assert!(!store.is_shuffling());
        assert!(store.current_episode().is_none());
        assert!(!store.has_next());
        assert!(!store.has_previous());
    }

    #[test]
    fn play_replaces_queue_regardless_of_prior_state() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 2).unwrap();
        store.set_playing_state(false);

        let episode = make_episode("solo");
        store.play(episode.clone());

        assert_eq!(store.queue(), &[episode.clone()]);
        assert_eq!(store.current_index(), 0);
        assert!(store.is_playing());
        assert_eq!(store.current_episode(), Some(&episode));
    }

    #[test]
    fn play_list_starts_at_given_index() {
        let mut store = seeded_store();
        let queue = make_queue(3);

        store.play_list(queue.clone(), 1).unwrap();

        assert_eq!(store.current_index(), 1);
        assert_eq!(store.current_episode(), Some(&queue[1]));
        assert!(store.is_playing());
    }

    #[test]
    fn play_list_rejects_out_of_range_index_without_changes() {
        let mut store = seeded_store();
        store.play(make_episode("keep"));
        let before = store.state().clone();

        let result = store.play_list(make_queue(3), 3);

        assert_eq!(
            result,
            Err(PlayerError::StartIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn play_list_accepts_empty_list() {
        let mut store = seeded_store();
        store.play_list(make_queue(2), 1).unwrap();

        store.play_list(Vec::new(), 5).unwrap();

        assert!(store.queue().is_empty());
        assert_eq!(store.current_index(), 0);
        assert!(store.is_playing());
        assert!(store.current_episode().is_none());
    }

    #[test]
    fn play_next_advances_until_end_of_queue() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 0).unwrap();

        store.play_next();
        assert_eq!(store.current_index(), 1);
        store.play_next();
        assert_eq!(store.current_index(), 2);
        assert!(!store.has_next());
        store.play_next();
        assert_eq!(store.current_index(), 2);
    }

    #[test]
    fn play_next_while_shuffling_stays_in_range() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 0).unwrap();
        store.toggle_shuffle();

        for _ in 0..200 {
            store.play_next();
            assert!(store.current_index() < 3);
            assert!(store.has_next());
        }
    }

    #[test]
    fn play_next_while_shuffling_reaches_every_position() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 0).unwrap();
        store.toggle_shuffle();

        let mut seen = [false; 3];
        for _ in 0..200 {
            store.play_next();
            seen[store.current_index()] = true;
        }

        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn shuffle_reports_next_even_at_end_of_queue() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 2).unwrap();
        assert!(!store.has_next());

        store.toggle_shuffle();
        assert!(store.has_next());
    }

    #[test]
    fn navigation_on_empty_queue_is_a_noop() {
        let mut store = seeded_store();
        store.toggle_shuffle();

        store.play_next();
        store.play_previous();

        assert_eq!(store.current_index(), 0);
        assert!(!store.has_next());
        assert!(store.current_episode().is_none());
    }

    #[test]
    fn play_previous_at_start_is_a_noop() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 0).unwrap();

        store.play_previous();

        assert_eq!(store.current_index(), 0);
        assert!(!store.has_previous());
    }

    #[test]
    fn play_previous_steps_back() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 2).unwrap();

        store.play_previous();
        assert_eq!(store.current_index(), 1);
        assert!(store.has_previous());
        store.play_previous();
        assert_eq!(store.current_index(), 0);
        assert!(!store.has_previous());
    }

    #[test]
    fn toggles_invert_only_their_own_flag() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 1).unwrap();
        let base = store.state().clone();

        store.toggle_loop();
        assert_eq!(
            store.state(),
            &PlayerState {
                is_looping: !base.is_looping,
                ..base.clone()
            }
        );
        store.toggle_loop();

        store.toggle_shuffle();
        assert_eq!(
            store.state(),
            &PlayerState {
                is_shuffling: !base.is_shuffling,
                ..base.clone()
            }
        );
        store.toggle_shuffle();

        store.toggle_play();
        assert_eq!(
            store.state(),
            &PlayerState {
                is_playing: !base.is_playing,
                ..base.clone()
            }
        );
    }

    #[test]
    fn clear_empties_queue_from_any_state() {
        let mut store = seeded_store();
        store.play_list(make_queue(3), 2).unwrap();
        store.toggle_loop();

        store.clear_player_state();

        assert!(store.queue().is_empty());
        assert_eq!(store.current_index(), 0);
        assert!(store.current_episode().is_none());
        assert!(store.is_looping());
    }

    #[test]
    fn set_playing_state_is_idempotent() {
        let mut store = seeded_store();

        store.set_playing_state(false);
        assert!(!store.is_playing());
        store.set_playing_state(false);
        assert!(!store.is_playing());

        store.set_playing_state(true);
        assert!(store.is_playing());
    }

    #[test]
    fn has_flags_follow_index_for_sequential_queue() {
        let mut store = seeded_store();
        let queue = make_queue(4);

        for start in 0..4 {
            store.play_list(queue.clone(), start).unwrap();
            assert_eq!(store.has_previous(), start > 0);
            assert_eq!(store.has_next(), start + 1 < 4);
        }
    }

    #[test]
    fn observer_sees_queue_and_episode_changes() {
        let observer = RecordingObserver::new();
        let mut store = seeded_store().with_observer(observer.clone());

        store.play_list(make_queue(2), 0).unwrap();
        assert_eq!(
            observer.take(),
            vec![
                PlayerEvent::QueueReplaced {
                    len: 2,
                    current_index: 0
                },
                PlayerEvent::EpisodeChanged {
                    index: 0,
                    episode_id: "ep0".to_string()
                },
                PlayerEvent::PlayingChanged(true),
            ]
        );

        store.play_next();
        store.play_next();
        store.set_playing_state(true);
        store.toggle_play();
        store.clear_player_state();
        assert_eq!(
            observer.take(),
            vec![
                PlayerEvent::EpisodeChanged {
                    index: 1,
                    episode_id: "ep1".to_string()
                },
                PlayerEvent::PlayingChanged(false),
                PlayerEvent::Cleared,
            ]
        );
    }
}
