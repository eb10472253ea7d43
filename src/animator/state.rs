use std::any::{type_name, Any};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::animation::{step, AnimationFrame, EasingAlgorithm, KeyFrame, PlayMode};
use crate::error::{AnimationError, Result};

/// Playback settings of an animator.
///
/// A copy is taken when a run starts, so changing the animator's settings
/// never alters a run already in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfig {
    /// Ticks per second of the advancement task
    pub fps: u32,
    /// Time of one lap, from a key frame to its neighbour
    pub duration: Duration,
    pub easing: EasingAlgorithm,
}

impl AnimatorConfig {
    /// Interval between two ticks.
    ///
    /// Rounded up to the nanosecond so that `fps` ticks always cover a full
    /// second.
    pub fn tick(&self) -> Duration {
        let fps = u64::from(self.fps.max(1));
        Duration::from_nanos(1_000_000_000u64.div_ceil(fps))
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration: Duration::from_secs(1),
            easing: EasingAlgorithm::None,
        }
    }
}

/// What happened on one tick of the advancement task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    /// The run was superseded or stopped, the task must exit untouched
    Stale,
    /// Still playing
    Continue,
    /// Reached the final key frame with no cycles left
    Finished,
}

/// What the render thread should draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Snapshot {
    Idle(KeyFrame),
    Running(AnimationFrame),
}

struct CustomData {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Per-identity playback state, shared by the render thread and the
/// advancement task under one mutex.
pub(crate) struct AnimatorState {
    /// The animation's init hook has run
    pub initialized: bool,
    pub running: bool,
    /// Time spent in the current lap
    pub elapsed: Duration,
    /// Length of the current lap
    pub planned: Duration,
    /// Key frame the current lap leaves from
    pub current: KeyFrame,
    /// Key frame the current lap arrives at, one step from `current`
    pub destination: KeyFrame,
    /// Key frame at which the run stops once no cycles are left
    pub final_target: KeyFrame,
    pub remaining_cycles: usize,
    pub mode: PlayMode,
    pub last_trigger_value: bool,
    /// Settings of the active run
    pub config: AnimatorConfig,
    /// Generation of the active run
    pub run: u64,
    cancel: Option<oneshot::Sender<()>>,
    custom_data: Option<CustomData>,
    key_frame_count: usize,
}

impl AnimatorState {
    pub fn new(key_frame_count: usize) -> Self {
        assert!(key_frame_count > 0, "an animation needs at least one key frame");
        Self {
            initialized: false,
            running: false,
            elapsed: Duration::ZERO,
            planned: Duration::ZERO,
            current: KeyFrame::FIRST,
            destination: KeyFrame::FIRST,
            final_target: KeyFrame::FIRST,
            remaining_cycles: 0,
            mode: PlayMode::Forward,
            last_trigger_value: false,
            config: AnimatorConfig::default(),
            run: 0,
            cancel: None,
            custom_data: None,
            key_frame_count,
        }
    }

    pub fn key_frame_count(&self) -> usize {
        self.key_frame_count
    }

    /// Install a new run, superseding the active one if any.
    ///
    /// Returns the generation of the new run and the receiver its task
    /// listens to for cancellation.
    pub fn begin_run(
        &mut self,
        begin: KeyFrame,
        final_target: KeyFrame,
        cycles: usize,
        mode: PlayMode,
        config: AnimatorConfig,
    ) -> (u64, oneshot::Receiver<()>) {
        if let Some(cancel) = self.cancel.take() {
            // The old task may already be gone, nothing to do then
            let _ = cancel.send(());
        }

        let (tx, rx) = oneshot::channel();
        self.run = self.run.wrapping_add(1);
        self.cancel = Some(tx);
        self.running = true;
        self.elapsed = Duration::ZERO;
        self.planned = config.duration;
        self.current = begin;
        self.destination = step(begin, self.key_frame_count, mode.delta());
        self.final_target = final_target;
        self.remaining_cycles = cycles;
        self.mode = mode;
        self.config = config;

        (self.run, rx)
    }

    /// Advance the run `run` by one tick of length `tick`.
    pub fn tick(&mut self, run: u64, tick: Duration) -> Tick {
        if !self.running || run != self.run {
            return Tick::Stale;
        }

        self.elapsed += tick;
        if self.elapsed < self.planned {
            return Tick::Continue;
        }

        // Lap boundary
        self.elapsed = Duration::ZERO;
        self.current = self.destination;
        if self.current == self.final_target {
            if self.remaining_cycles == 0 {
                self.stop();
                return Tick::Finished;
            }
            self.remaining_cycles -= 1;
        }
        self.destination = step(self.current, self.key_frame_count, self.mode.delta());

        Tick::Continue
    }

    /// Back to idle, resting on the current key frame.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
        self.planned = Duration::ZERO;
        self.cancel = None;
    }

    /// Linear progress of the current lap in time, 0 -> 1 whatever the
    /// direction.
    fn lap_ratio(&self) -> f32 {
        if self.planned.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.planned.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// The in-between frame of the current lap, in key frame space.
    ///
    /// A backward lap is the time-reverse of the forward lap between the same
    /// two key frames: progress runs 1 -> 0 and the easing curve is read
    /// backwards.
    pub fn frame(&self) -> AnimationFrame {
        let ratio = self.lap_ratio();
        match self.mode {
            PlayMode::Forward => AnimationFrame {
                eased: self.config.easing.apply(ratio),
                raw: ratio,
                source: self.current,
                destination: self.destination,
                mode: self.mode,
            },
            PlayMode::Backward => AnimationFrame {
                eased: self.config.easing.apply(1.0 - ratio),
                raw: 1.0 - ratio,
                source: self.destination,
                destination: self.current,
                mode: self.mode,
            },
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        if self.running {
            Snapshot::Running(self.frame())
        } else {
            Snapshot::Idle(self.current)
        }
    }

    /// Progress of the current lap in key frame space, 0 when idle.
    pub fn progress(&self) -> f32 {
        if self.running {
            self.frame().raw
        } else {
            0.0
        }
    }

    pub fn custom_data<T: Clone + 'static>(&self) -> Result<Option<T>> {
        let Some(data) = &self.custom_data else {
            return Ok(None);
        };

        data.value
            .downcast_ref::<T>()
            .cloned()
            .map(Some)
            .ok_or(AnimationError::InvalidDataType {
                expected: type_name::<T>(),
                found: data.type_name,
            })
    }

    pub fn set_custom_data<T: Send + Sync + 'static>(&mut self, value: T) {
        self.custom_data = Some(CustomData {
            value: Box::new(value),
            type_name: type_name::<T>(),
        });
    }

    pub fn clear_custom_data(&mut self) {
        self.custom_data = None;
    }
}

/// Lock the state, recovering it if a panicking holder poisoned the mutex.
pub(crate) fn lock(state: &Mutex<AnimatorState>) -> MutexGuard<'_, AnimatorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
