use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

/// Events emitted by the player store whenever its state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The queue was replaced by a new list
    QueueReplaced { len: usize, current_index: usize },

    /// The current episode changed (new index or new queue)
    EpisodeChanged { index: usize, episode_id: String },

    /// Playback was started or paused
    PlayingChanged(bool),

    /// Loop mode was switched
    LoopingChanged(bool),

    /// Shuffle mode was switched
    ShufflingChanged(bool),

    /// The queue was emptied
    Cleared,
}

/// Trait for observing player state changes.
///
/// The media element and the rendering layer implement this to follow the
/// store without holding their own copy of the state.
pub trait PlayerObserver: Send + Sync {
    /// Handle a state change
    fn notify(&self, event: PlayerEvent);
}

/// A shared reference to a player observer
pub type SharedObserver = Arc<dyn PlayerObserver>;

/// An observer that silently ignores all events.
/// Useful for tests or when nothing follows the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PlayerObserver for NoopObserver {
    fn notify(&self, _event: PlayerEvent) {}
}

impl NoopObserver {
    /// Create a new NoopObserver wrapped in an Arc
    pub fn shared() -> SharedObserver {
        Arc::new(Self)
    }
}

/// An observer that keeps every event it receives, in order
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PlayerEvent>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Remove and return the events seen so far
    pub fn take(&self) -> Vec<PlayerEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
impl PlayerObserver for RecordingObserver {
    fn notify(&self, event: PlayerEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
