//! The host rendering substrate seen from the animation side.
//!
//! Animations never talk to a concrete toolkit. Everything they need from the
//! host (style scopes, cursor placement, hit-testing) goes through [`Ui`],
//! and every payload they render is a [`Widget`].

use std::ops::{Add, Mul, Sub};

use crate::Animatable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Mix the RGB channels of two colors, clamping every channel to [0, 1].
    ///
    /// `t` may overshoot (elastic or back easing); the clamp keeps the result a
    /// valid color. Alpha is taken from `self`.
    pub fn mix_rgb(&self, to: &Color, t: f32) -> Color {
        let channel = |from: f32, to: f32| (from + (to - from) * t).clamp(0.0, 1.0);
        Color {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
            a: self.a,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// A position or offset in the current layout's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Animatable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Animatable)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Identifier of a color slot in the host's style (button, button hovered, ...).
///
/// The numbering belongs to the host; animations only pass it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleColorId(pub u32);

/// Services an immediate-mode host exposes to animations during a render call.
///
/// Every `push_*` made inside a render call is matched by a `pop_*` before that
/// call returns.
pub trait Ui {
    /// Override a style color for everything rendered until the matching pop.
    fn push_style_color(&mut self, id: StyleColorId, color: Color);

    /// Pop the `count` most recent style color overrides.
    fn pop_style_color(&mut self, count: usize);

    /// The color a style slot currently resolves to.
    fn style_color(&self, id: StyleColorId) -> Color;

    /// Multiply the opacity of everything rendered until the matching pop.
    fn push_alpha(&mut self, alpha: f32);

    fn pop_alpha(&mut self);

    /// Drawing cursor in the current layout's local coordinates.
    fn cursor_pos(&self) -> Vec2;

    fn set_cursor_pos(&mut self, pos: Vec2);

    /// Whether the most recently rendered widget is under the pointer.
    fn is_item_hovered(&self) -> bool;
}

/// Something that renders itself into the current frame.
pub trait Widget {
    fn build(&mut self, ui: &mut dyn Ui);
}

impl<F> Widget for F
where
    F: FnMut(&mut dyn Ui),
{
    fn build(&mut self, ui: &mut dyn Ui) {
        self(ui)
    }
}
