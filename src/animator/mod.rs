//! The playback engine.
//!
//! An [`Animator`] wraps an [`Animation`] and is built once per frame like any
//! other widget. Its clock lives in a per-identity [`AnimatorState`] in the
//! [`Context`], shared with a tokio task that advances it tick by tick, so
//! the animator itself can be rebuilt from scratch every frame.
//!
//! ```ignore
//! let ctx = Context::new()?;
//! // every frame
//! ctx.begin_frame();
//! let mut fade = Animator::new(&ctx, Transition::new(vec![layout_a, layout_b]))
//!     .duration(Duration::from_millis(300))
//!     .easing(EasingAlgorithm::InOutCubic)
//!     .trigger(Trigger::on_change(PlayMode::Forward, move || toggled.get()));
//! fade.build(ui);
//! ```

mod runner;
mod state;
mod trigger;

pub use state::AnimatorConfig;
pub use trigger::{Trigger, TriggerType};

use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use runner::Runner;
use state::{lock, AnimatorState, Snapshot};

use crate::animation::{step, Animation, EasingAlgorithm, KeyFrame, PlayMode, Starter};
use crate::context::Context;
use crate::error::Result;
use crate::ui::{Ui, Widget};

/// Drives an [`Animation`] through its key frames over time.
pub struct Animator<A: Animation> {
    ctx: Context,
    id: String,
    animation: A,
    config: AnimatorConfig,
    trigger: Option<Trigger>,
    key_frame_count: usize,
    state: OnceLock<Arc<Mutex<AnimatorState>>>,
}

impl<A: Animation> Animator<A> {
    /// Wrap `animation` with an automatically generated identity.
    ///
    /// # Panics
    /// If the animation reports zero key frames.
    pub fn new(ctx: &Context, animation: A) -> Self {
        let key_frame_count = animation.key_frames_count();
        assert!(
            key_frame_count > 0,
            "an animation needs at least one key frame"
        );

        Self {
            ctx: ctx.clone(),
            id: ctx.gen_id("Animator"),
            animation,
            config: AnimatorConfig::default(),
            trigger: None,
            key_frame_count,
            state: OnceLock::new(),
        }
    }

    /// Ticks per second of the next run.
    ///
    /// # Panics
    /// If `fps` is zero.
    pub fn fps(mut self, fps: u32) -> Self {
        self.set_fps(fps);
        self
    }

    /// Length of one lap of the next run.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.set_duration(duration);
        self
    }

    pub fn easing(mut self, easing: EasingAlgorithm) -> Self {
        self.set_easing(easing);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.set_trigger(trigger);
        self
    }

    /// Override the automatic identity. Animators sharing an identity share
    /// their playback state.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    pub fn set_fps(&mut self, fps: u32) {
        assert!(fps > 0, "animator `{}`: fps must be positive", self.id);
        self.config.fps = fps;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        if duration.is_zero() {
            log::warn!(
                "animator `{}`: zero duration, laps will complete on the first tick",
                self.id
            );
        }
        self.config.duration = duration;
    }

    pub fn set_easing(&mut self, easing: EasingAlgorithm) {
        self.config.easing = easing;
    }

    pub fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = Some(trigger);
    }

    pub fn clear_trigger(&mut self) {
        self.trigger = None;
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.state = OnceLock::new();
    }

    pub fn identity(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> AnimatorConfig {
        self.config
    }

    pub fn key_frames_count(&self) -> usize {
        self.key_frame_count
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    fn shared_state(&self) -> &Arc<Mutex<AnimatorState>> {
        self.state.get_or_init(|| {
            let count = self.key_frame_count;
            let state = self
                .ctx
                .state(&self.id, || Mutex::new(AnimatorState::new(count)));
            let stored = lock(&state).key_frame_count();
            assert_eq!(
                stored, count,
                "animator `{}` was created with {} key frames, found state for {} (identity collision?)",
                self.id, count, stored
            );
            state
        })
    }

    fn lock(&self) -> MutexGuard<'_, AnimatorState> {
        lock(self.shared_state())
    }

    /// Play one lap from the current key frame in `mode` direction.
    pub fn start(&mut self, mode: PlayMode) {
        let current = self.current_key_frame();
        let destination = step(current, self.key_frame_count, mode.delta());
        self.start_key_frames(current, destination, 0, mode);
    }

    /// Jump to `begin` and play lap by lap in `mode` direction until
    /// `destination` is reached, then `cycles` more full rounds back to it.
    ///
    /// Preempts a run in flight. Settings changed since the last start apply
    /// from this run on.
    ///
    /// # Panics
    /// If either key frame is out of range.
    pub fn start_key_frames(
        &mut self,
        begin: KeyFrame,
        destination: KeyFrame,
        cycles: usize,
        mode: PlayMode,
    ) {
        for frame in [begin, destination] {
            assert!(
                frame.index() < self.key_frame_count,
                "animator `{}`: {} out of range, the animation has {} key frames",
                self.id,
                frame,
                self.key_frame_count
            );
        }

        self.animation.reset();

        let config = self.config;
        let (run, cancel, preempted) = {
            let mut state = self.lock();
            let preempted = state.running;
            let (run, cancel) = state.begin_run(begin, destination, cycles, mode, config);
            (run, cancel, preempted)
        };

        if preempted {
            log::debug!("animator `{}`: preempting the running animation", self.id);
        }
        log::debug!(
            "animator `{}`: start {:?} {} -> {} ({} extra cycles)",
            self.id,
            mode,
            begin,
            destination,
            cycles
        );

        let runner = Runner {
            id: self.id.clone(),
            state: Arc::downgrade(self.shared_state()),
            frames: self.ctx.frames().clone(),
            run,
            tick: config.tick(),
            cancel,
        };
        self.ctx.spawn(runner.run());
        self.ctx.request_frame();
    }

    /// Play the whole sequence, first to last key frame (last to first when
    /// backward), then `cycles` more full rounds.
    pub fn start_cycle(&mut self, cycles: usize, mode: PlayMode) {
        let first = KeyFrame::FIRST;
        let last = KeyFrame(self.key_frame_count - 1);
        match mode {
            PlayMode::Forward => self.start_key_frames(first, last, cycles, mode),
            PlayMode::Backward => self.start_key_frames(last, first, cycles, mode),
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Progress of the current lap in key frame space: rises 0 -> 1 forward,
    /// falls 1 -> 0 backward. Zero while idle.
    pub fn current_progress(&self) -> f32 {
        self.lock().progress()
    }

    /// The key frame the animator rests on, or the one the current lap
    /// leaves from.
    pub fn current_key_frame(&self) -> KeyFrame {
        self.lock().current
    }

    pub fn remaining_cycles(&self) -> usize {
        self.lock().remaining_cycles
    }

    /// Scratch data stored with [`set_custom_data`](Self::set_custom_data).
    ///
    /// Returns an error if the data was stored as another type.
    pub fn custom_data<T: Clone + 'static>(&self) -> Result<Option<T>> {
        self.lock().custom_data()
    }

    pub fn set_custom_data<T: Send + Sync + 'static>(&self, value: T) {
        self.lock().set_custom_data(value);
    }

    pub fn clear_custom_data(&self) {
        self.lock().clear_custom_data();
    }

    /// Render the animation for this frame. Call once per frame.
    pub fn build(&mut self, ui: &mut dyn Ui) {
        let initialized = self.lock().initialized;
        if !initialized {
            log::trace!("animator `{}`: init", self.id);
            self.animation.init(ui);
            self.lock().initialized = true;
        }

        let queue = StartQueue::default();
        let snapshot = self.lock().snapshot();
        match snapshot {
            Snapshot::Running(frame) => {
                self.animation.build_animation(ui, frame, &queue);
                self.run_queued(&queue);
            }
            Snapshot::Idle(current) => {
                self.animation.build_normal(ui, current, &queue);
                self.run_queued(&queue);
                if !self.is_running() {
                    self.evaluate_trigger();
                }
            }
        }
    }

    fn run_queued(&mut self, queue: &StartQueue) {
        match queue.take() {
            Some(StartRequest::Step(mode)) => self.start(mode),
            Some(StartRequest::KeyFrames {
                begin,
                destination,
                cycles,
                mode,
            }) => self.start_key_frames(begin, destination, cycles, mode),
            Some(StartRequest::Cycle(cycles, mode)) => self.start_cycle(cycles, mode),
            None => {}
        }
    }

    fn evaluate_trigger(&mut self) {
        let state = self.shared_state().clone();
        let Some(trigger) = self.trigger.as_mut() else {
            return;
        };

        let mode = trigger.mode;
        let fire = trigger.evaluate(&mut lock(&state).last_trigger_value);

        if fire {
            log::debug!("animator `{}`: triggered ({:?})", self.id, mode);
            self.start(mode);
        }
    }
}

impl<A: Animation> Widget for Animator<A> {
    fn build(&mut self, ui: &mut dyn Ui) {
        Animator::build(self, ui)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StartRequest {
    Step(PlayMode),
    KeyFrames {
        begin: KeyFrame,
        destination: KeyFrame,
        cycles: usize,
        mode: PlayMode,
    },
    Cycle(usize, PlayMode),
}

/// [`Starter`] handed to the animation while it renders. Requests are carried
/// out once the render call returns; the last one wins.
#[derive(Default)]
struct StartQueue {
    request: Cell<Option<StartRequest>>,
}

impl StartQueue {
    fn push(&self, request: StartRequest) {
        self.request.set(Some(request));
    }

    fn take(&self) -> Option<StartRequest> {
        self.request.take()
    }
}

impl Starter for StartQueue {
    fn start(&self, mode: PlayMode) {
        self.push(StartRequest::Step(mode));
    }

    fn start_key_frames(&self, begin: KeyFrame, destination: KeyFrame, cycles: usize, mode: PlayMode) {
        self.push(StartRequest::KeyFrames {
            begin,
            destination,
            cycles,
            mode,
        });
    }

    fn start_cycle(&self, cycles: usize, mode: PlayMode) {
        self.push(StartRequest::Cycle(cycles, mode));
    }
}
