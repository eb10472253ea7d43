//! The contract between the playback engine and the effects it drives.
//!
//! An [`Animation`] describes a fixed number of key frames and knows how to
//! render itself either resting on one of them ([`Animation::build_normal`])
//! or somewhere between two neighbours ([`Animation::build_animation`]). The
//! [`Animator`](crate::Animator) owns the clock and decides which one to call.

mod animatable;
mod curve;
mod easing;
mod key_frame;

pub use animatable::Animatable;
pub use curve::bezier;
pub use easing::{ease, EasingAlgorithm};
pub use key_frame::{step, KeyFrame};

use crate::ui::Ui;

/// Direction of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayMode {
    /// Towards higher key frames, progress runs 0 -> 1
    #[default]
    Forward,
    /// Towards lower key frames, progress runs 1 -> 0
    Backward,
}

impl PlayMode {
    /// Key frame delta of one lap in this direction
    pub fn delta(self) -> isize {
        match self {
            PlayMode::Forward => 1,
            PlayMode::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            PlayMode::Forward => PlayMode::Backward,
            PlayMode::Backward => PlayMode::Forward,
        }
    }
}

/// Everything an animation needs to render one in-between frame.
///
/// `source` and `destination` are ordered in key frame space: `source` is the
/// frame at progress 0 and `destination` the frame at progress 1, whatever the
/// direction of playback. A forward lap moves progress 0 -> 1, a backward lap
/// 1 -> 0, so effects interpolate `value(source) -> value(destination)` by
/// `eased` and never need to look at `mode`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Progress after easing, may leave [0, 1] for overshooting curves
    pub eased: f32,
    /// Linear progress, always in [0, 1]
    pub raw: f32,
    pub source: KeyFrame,
    pub destination: KeyFrame,
    pub mode: PlayMode,
}

/// Handle given to animations (and the widgets they render) to request
/// playback of their own animator.
///
/// Requests are queued and carried out once the current render call returns;
/// when several are made in one call, the last one wins.
pub trait Starter {
    /// Play one lap from the current key frame in `mode` direction.
    fn start(&self, mode: PlayMode);

    /// Jump to `begin` and play lap by lap until `destination` is reached,
    /// then `cycles` more full rounds back to it.
    fn start_key_frames(&self, begin: KeyFrame, destination: KeyFrame, cycles: usize, mode: PlayMode);

    /// Play the whole sequence (first to last key frame, or last to first when
    /// backward), then `cycles` more full rounds.
    fn start_cycle(&self, cycles: usize, mode: PlayMode);
}

/// A widget that can request playback of the animator rendering it, like a
/// layout that starts a transition when clicked.
pub trait Layout {
    fn build(&mut self, ui: &mut dyn Ui, starter: &dyn Starter);
}

impl<F> Layout for F
where
    F: FnMut(&mut dyn Ui, &dyn Starter),
{
    fn build(&mut self, ui: &mut dyn Ui, starter: &dyn Starter) {
        self(ui, starter)
    }
}

/// A visual effect driven by an [`Animator`](crate::Animator).
///
/// Both build methods must render the payload exactly once per call: the host
/// accumulates whatever is rendered, so skipping or doubling a render shows.
pub trait Animation {
    /// Called once per animator identity, before its first render. Use it for
    /// setup that needs the render context, like capturing the cursor.
    fn init(&mut self, _ui: &mut dyn Ui) {}

    /// Called at the beginning of every start request, before playback begins.
    /// Must not block.
    fn reset(&mut self) {}

    /// Number of key frames. Queried once, when the animator is created, and
    /// must never be zero.
    fn key_frames_count(&self) -> usize;

    /// Render while idle, resting on `current`.
    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, starter: &dyn Starter);

    /// Render while playing, between `frame.source` and `frame.destination`.
    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, starter: &dyn Starter);
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn init(&mut self, ui: &mut dyn Ui) {
        (**self).init(ui)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn key_frames_count(&self) -> usize {
        (**self).key_frames_count()
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, starter: &dyn Starter) {
        (**self).build_normal(ui, current, starter)
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, starter: &dyn Starter) {
        (**self).build_animation(ui, frame, starter)
    }
}
