use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{self, Instant};

use super::state::{lock, AnimatorState, Tick};
use crate::frame::FrameRequester;

/// Everything the advancement task of one run needs.
///
/// The task never holds the context, and only a weak reference to the
/// state: once the identity is discarded and the last animator for it is
/// gone, the state and its cancel sender drop and the task stops.
pub(crate) struct Runner {
    pub id: String,
    pub state: Weak<Mutex<AnimatorState>>,
    pub frames: FrameRequester,
    pub run: u64,
    pub tick: Duration,
    pub cancel: oneshot::Receiver<()>,
}

impl Runner {
    /// Tick the run until it finishes or gets cancelled.
    ///
    /// A cancelled task leaves the state alone: whoever cancelled it owns the
    /// state from then on.
    pub async fn run(mut self) {
        let mut interval = time::interval_at(Instant::now() + self.tick, self.tick);

        loop {
            tokio::select! {
                biased;
                // Fires on an explicit cancel and when the state is dropped
                _ = &mut self.cancel => {
                    log::trace!("animator `{}`: run {} cancelled", self.id, self.run);
                    return;
                }
                _ = interval.tick() => {}
            }

            let Some(state) = self.state.upgrade() else {
                log::trace!("animator `{}`: state discarded", self.id);
                return;
            };

            self.frames.request();

            let outcome = lock(&state).tick(self.run, self.tick);
            match outcome {
                Tick::Continue => {
                    log::trace!("animator `{}`: tick", self.id);
                }
                Tick::Stale => {
                    log::trace!("animator `{}`: run {} superseded", self.id, self.run);
                    return;
                }
                Tick::Finished => {
                    // One more frame so the host renders the resting state
                    self.frames.request();
                    log::debug!("animator `{}`: finished", self.id);
                    return;
                }
            }
        }
    }
}
