use std::sync::{Arc, Mutex, PoisonError};

use crate::animation::{bezier, Animatable, Animation, AnimationFrame, KeyFrame, Layout, Starter};
use crate::context::Context;
use crate::ui::{Ui, Vec2};

/// One key frame of a [`Move`]: where the widget goes next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoveStep {
    offset: Vec2,
    absolute: bool,
    controls: Vec<Vec2>,
}

impl MoveStep {
    /// Move by `(x, y)` from the previous key frame.
    pub fn new(x: f32, y: f32) -> Self {
        Self::vec(Vec2::new(x, y))
    }

    pub fn vec(offset: Vec2) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }

    /// Treat the offset as a position in the layout rather than a move.
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Reach this step along a Bézier curve instead of a straight line.
    ///
    /// Control points are relative to the position the step starts from.
    pub fn bezier(mut self, controls: impl IntoIterator<Item = Vec2>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    fn resolve(&self, previous: Vec2) -> Vec2 {
        if self.absolute {
            self.offset
        } else {
            previous + self.offset
        }
    }
}

/// Moves a widget through a path of positions.
///
/// Key frame 0 is wherever the drawing cursor was on the first render; every
/// [`MoveStep`] adds one key frame.
pub struct Move<L: Layout> {
    widget: L,
    steps: Vec<MoveStep>,
    start: Arc<Mutex<Vec2>>,
}

impl<L: Layout> Move<L> {
    pub fn new(ctx: &Context, widget: L, first: MoveStep) -> Self {
        Self::with_id(ctx, &ctx.gen_id("Move"), widget, first)
    }

    /// Like [`Move::new`] with an explicit identity for the captured start
    /// position.
    pub fn with_id(ctx: &Context, id: &str, widget: L, first: MoveStep) -> Self {
        Self {
            widget,
            steps: vec![first],
            start: ctx.state(id, || Mutex::new(Vec2::ZERO)),
        }
    }

    /// Append another step as the next key frame.
    pub fn step(mut self, step: MoveStep) -> Self {
        self.steps.push(step);
        self
    }

    fn start(&self) -> Vec2 {
        *self.start.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Position of every key frame
    fn positions(&self) -> Vec<Vec2> {
        let mut positions = Vec::with_capacity(self.steps.len() + 1);
        let mut current = self.start();
        positions.push(current);
        for step in &self.steps {
            current = step.resolve(current);
            positions.push(current);
        }
        positions
    }
}

impl<L: Layout> Animation for Move<L> {
    fn init(&mut self, ui: &mut dyn Ui) {
        *self.start.lock().unwrap_or_else(PoisonError::into_inner) = ui.cursor_pos();
    }

    fn key_frames_count(&self) -> usize {
        self.steps.len() + 1
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, starter: &dyn Starter) {
        let positions = self.positions();
        ui.set_cursor_pos(positions[current.index()]);
        self.widget.build(ui, starter);
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, starter: &dyn Starter) {
        let positions = self.positions();
        let from = positions[frame.source.index()];
        let to = positions[frame.destination.index()];

        // Laps wrapping around to the start always go straight
        let curve = frame
            .destination
            .index()
            .checked_sub(1)
            .filter(|&step| step == frame.source.index())
            .map(|step| &self.steps[step].controls)
            .filter(|controls| !controls.is_empty());

        let pos = match curve {
            Some(controls) => {
                let mut points = Vec::with_capacity(controls.len() + 2);
                points.push(from);
                points.extend(controls.iter().map(|control| from + *control));
                points.push(to);
                bezier(frame.eased, &points)
            }
            None => Vec2::lerp(&from, &to, frame.eased),
        };

        ui.set_cursor_pos(pos);
        self.widget.build(ui, starter);
    }
}
