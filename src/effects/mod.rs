//! Ready-made [`Animation`](crate::Animation)s.
//!
//! Each effect is a plain value rebuilt every frame along with its
//! [`Animator`](crate::Animator); whatever it must remember between frames
//! is kept in the [`Context`](crate::Context) under its own identity.

mod color_flow;
mod hover_color;
mod move_anim;
mod resize;
mod transition;

pub use color_flow::{ColorFlow, ColorSource};
pub use hover_color::HoverColor;
pub use move_anim::{Move, MoveStep};
pub use resize::{CenterAxes, Resizable, Resize};
pub use transition::Transition;
