use std::sync::{Arc, Mutex, PoisonError};

use bitflags::bitflags;

use crate::animation::{Animatable, Animation, AnimationFrame, KeyFrame, Starter};
use crate::context::Context;
use crate::ui::{Size, Ui, Vec2, Widget};

/// A widget whose size can be set before it renders.
pub trait Resizable: Widget {
    fn set_size(&mut self, size: Size);
}

bitflags! {
    /// Axes along which a resized widget stays centered on its first position
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CenterAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

/// Resizes a widget through a list of sizes, one per key frame.
pub struct Resize<W: Resizable> {
    widget: W,
    sizes: Vec<Size>,
    center: CenterAxes,
    origin: Arc<Mutex<Vec2>>,
}

impl<W: Resizable> Resize<W> {
    /// # Panics
    /// If `sizes` is empty.
    pub fn new(ctx: &Context, widget: W, sizes: impl IntoIterator<Item = Size>) -> Self {
        Self::with_id(ctx, &ctx.gen_id("Resize"), widget, sizes)
    }

    /// Like [`Resize::new`] with an explicit identity for the captured cursor.
    pub fn with_id(ctx: &Context, id: &str, widget: W, sizes: impl IntoIterator<Item = Size>) -> Self {
        let sizes: Vec<Size> = sizes.into_iter().collect();
        assert!(!sizes.is_empty(), "a resize needs at least one size");

        Self {
            widget,
            sizes,
            center: CenterAxes::empty(),
            origin: ctx.state(id, || Mutex::new(Vec2::ZERO)),
        }
    }

    /// Move the cursor before rendering so the widget grows from its center
    /// along `axes` instead of from its top-left corner.
    pub fn trick_cursor(mut self, axes: CenterAxes) -> Self {
        self.center = axes;
        self
    }

    fn render(&mut self, ui: &mut dyn Ui, size: Size) {
        if !self.center.is_empty() {
            let origin = *self.origin.lock().unwrap_or_else(PoisonError::into_inner);
            let base = self.sizes[0];
            let mut pos = origin;
            if self.center.contains(CenterAxes::HORIZONTAL) {
                pos.x -= (size.width - base.width) / 2.0;
            }
            if self.center.contains(CenterAxes::VERTICAL) {
                pos.y -= (size.height - base.height) / 2.0;
            }
            ui.set_cursor_pos(pos);
        }

        self.widget.set_size(size);
        self.widget.build(ui);
    }
}

impl<W: Resizable> Animation for Resize<W> {
    fn init(&mut self, ui: &mut dyn Ui) {
        *self.origin.lock().unwrap_or_else(PoisonError::into_inner) = ui.cursor_pos();
    }

    fn key_frames_count(&self) -> usize {
        self.sizes.len()
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, _starter: &dyn Starter) {
        let size = self.sizes[current.index()];
        self.render(ui, size);
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, _starter: &dyn Starter) {
        let from = self.sizes[frame.source.index()];
        let to = self.sizes[frame.destination.index()];
        self.render(ui, Size::lerp(&from, &to, frame.eased));
    }
}
