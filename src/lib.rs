//! Key-frame animations for immediate-mode GUIs.
//!
//! Wrap an [`Animation`] in an [`Animator`] and build it every frame like
//! any other widget. The animator keeps its clock in the [`Context`] and a
//! tokio task advances it in the background, asking the host for a new frame
//! on every tick through the context's [`FrameRequester`].
//!
//! The host toolkit is reached only through the [`Ui`] trait.

// Lets the derive macro name this crate from inside it
extern crate self as guido_animations;

pub mod animation;
pub mod animator;
pub mod context;
pub mod effects;
pub mod error;
pub mod frame;
pub mod storage;
pub mod ui;

#[cfg(test)]
#[path = "../tests/common/recording.rs"]
pub(crate) mod testing;

pub use animation::{
    bezier, ease, step, Animatable, Animation, AnimationFrame, EasingAlgorithm, KeyFrame, Layout,
    PlayMode, Starter,
};
pub use animator::{Animator, AnimatorConfig, Trigger, TriggerType};
pub use context::Context;
pub use error::{AnimationError, Result};
pub use frame::FrameRequester;
pub use guido_animations_macros::Animatable;
pub use storage::StateStore;
pub use ui::{Color, Size, StyleColorId, Ui, Vec2, Widget};

pub mod prelude {
    pub use crate::animation::{
        Animation, AnimationFrame, EasingAlgorithm, KeyFrame, Layout, PlayMode, Starter,
    };
    pub use crate::animator::{Animator, Trigger, TriggerType};
    pub use crate::effects::{
        CenterAxes, ColorFlow, ColorSource, HoverColor, Move, MoveStep, Resizable, Resize,
        Transition,
    };
    pub use crate::ui::{Color, Size, StyleColorId, Ui, Vec2, Widget};
    pub use crate::{Animatable, Context};
}
